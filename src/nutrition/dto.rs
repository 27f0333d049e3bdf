use serde::{Deserialize, Serialize};

use super::{NutrientTable, ScaledNutrients, UnitChoice};

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub nutriments: NutrientTable,
    pub quantity: f64,
    /// Currently selected unit; replaced when the product has no data for it.
    pub unit: Option<UnitChoice>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub unit: UnitChoice,
    pub available_units: Vec<UnitChoice>,
    pub nutrients: ScaledNutrients,
}
