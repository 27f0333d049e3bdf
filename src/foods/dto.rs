use serde::{Deserialize, Serialize};

use super::repo_types::Food;
use crate::nutrition::{
    available_units, parse_serving_size, resolve_unit, units::UnknownUnit, ServingSize, UnitChoice,
};

/// A food plus what a client needs to render the serving picker.
#[derive(Debug, Serialize)]
pub struct FoodDetails {
    #[serde(flatten)]
    pub food: Food,
    pub available_units: Vec<UnitChoice>,
    pub default_unit: UnitChoice,
    pub serving: ServingSize,
}

/// `?unit=` on food reads; free text so unknown units get a JSON 400.
#[derive(Debug, Default, Deserialize)]
pub struct FoodQuery {
    pub unit: Option<String>,
}

impl FoodQuery {
    pub fn requested_unit(&self) -> Result<Option<UnitChoice>, UnknownUnit> {
        self.unit
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(str::parse::<UnitChoice>)
            .transpose()
    }
}

impl From<Food> for FoodDetails {
    fn from(food: Food) -> Self {
        FoodDetails::for_unit(food, None)
    }
}

impl FoodDetails {
    /// Keeps `requested` when the food has data for it, else the first offered unit.
    pub fn for_unit(food: Food, requested: Option<UnitChoice>) -> Self {
        let available_units = available_units(&food.nutriments);
        let default_unit = resolve_unit(&available_units, requested);
        let serving = parse_serving_size(food.serving_size_raw.as_deref());
        Self {
            food,
            available_units,
            default_unit,
            serving,
        }
    }
}
