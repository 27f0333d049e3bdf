use serde_json::Value;

use super::dto::{MacroRemaining, MacroTotals};
use super::repo_types::FoodEntry;
use crate::error::AppError;
use crate::nutrition::{available_units, resolve_unit, scale_all, NutrientTable, ScaledNutrients, UnitChoice};
use crate::settings::Goals;

pub const CALORIES: &str = "energy-kcal";
pub const PROTEIN: &str = "proteins";
pub const CARBS: &str = "carbohydrates";
pub const FAT: &str = "fat";

/// Accepts a JSON number or numeric text; the result is finite and positive.
pub fn validate_quantity(raw: &Value) -> Result<f64, AppError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(q) if q.is_finite() && q > 0.0 => Ok(q),
        Some(_) => Err(AppError::BadRequest("quantity must be greater than zero".into())),
        None => Err(AppError::BadRequest("quantity must be a number".into())),
    }
}

/// Values written with an entry and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    pub unit: UnitChoice,
    pub nutrients: ScaledNutrients,
}

impl EntrySnapshot {
    pub fn take(table: &NutrientTable, quantity: f64, requested: Option<UnitChoice>) -> Self {
        let unit = resolve_unit(&available_units(table), requested);
        Self {
            unit,
            nutrients: scale_all(table, quantity, unit),
        }
    }

    pub fn calories_kcal(&self) -> Option<f64> {
        self.nutrients.get(CALORIES)
    }
    pub fn protein_g(&self) -> Option<f64> {
        self.nutrients.get(PROTEIN)
    }
    pub fn carbs_g(&self) -> Option<f64> {
        self.nutrients.get(CARBS)
    }
    pub fn fat_g(&self) -> Option<f64> {
        self.nutrients.get(FAT)
    }
}

pub fn totals(entries: &[FoodEntry]) -> MacroTotals {
    entries.iter().fold(MacroTotals::default(), |acc, e| MacroTotals {
        calories_kcal: acc.calories_kcal + e.calories_kcal.unwrap_or(0.0),
        protein_g: acc.protein_g + e.protein_g.unwrap_or(0.0),
        carbs_g: acc.carbs_g + e.carbs_g.unwrap_or(0.0),
        fat_g: acc.fat_g + e.fat_g.unwrap_or(0.0),
    })
}

pub fn remaining(totals: &MacroTotals, goals: &Goals) -> MacroRemaining {
    MacroRemaining {
        calories_kcal: goals.calories_kcal.map(|g| g - totals.calories_kcal),
        protein_g: goals.protein_g.map(|g| g - totals.protein_g),
        carbs_g: goals.carbs_g.map(|g| g - totals.carbs_g),
        fat_g: goals.fat_g.map(|g| g - totals.fat_g),
    }
}
