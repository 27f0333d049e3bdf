use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;
use uuid::Uuid;

use crate::dates::iso_date;
use crate::nutrition::UnitChoice;
use crate::settings::Goals;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub food_id: Uuid,
    /// Number or numeric text, as typed by the user.
    pub quantity: Value,
    pub unit: Option<UnitChoice>,
    #[serde(default)]
    pub meal: MealSlot,
    #[serde(default, with = "iso_date::option")]
    pub consumed_on: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub calories_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Goal minus intake, only for goals the user has set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacroRemaining {
    pub calories_kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub entries: usize,
    pub totals: MacroTotals,
    pub goals: Goals,
    pub remaining: MacroRemaining,
}
