use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dates::iso_date;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeightEntry {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub weight_kg: f64,
    #[serde(with = "iso_date")]
    pub recorded_on: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct LogWeightRequest {
    pub weight_kg: f64,
    #[serde(default, with = "iso_date::option")]
    pub recorded_on: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default, with = "iso_date::option")]
    pub from: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub to: Option<Date>,
}

pub fn validate_weight(kg: f64) -> Result<f64, String> {
    if kg.is_finite() && kg > 0.0 && kg < 1000.0 {
        Ok(kg)
    } else {
        Err("weight_kg must be between 0 and 1000".into())
    }
}
