use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::{types::Json, FromRow};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dates::iso_date;

/// A logged serving. Nutrient values are frozen at insert time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FoodEntry {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub food_id: Option<Uuid>,
    pub barcode: Option<String>,
    pub food_name: String,
    pub brand: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub meal: String,
    #[serde(with = "iso_date")]
    pub consumed_on: Date,
    pub nutrients: Json<BTreeMap<String, f64>>,
    pub calories_kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
