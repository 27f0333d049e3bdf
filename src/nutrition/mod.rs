//! Per-100 nutrient tables, unit selection and serving scaling.

pub mod dto;
pub mod handlers;
pub mod scaler;
pub mod serving;
pub mod table;
pub mod units;

use crate::state::AppState;
use axum::Router;

pub use scaler::{available_units, resolve_unit, scale, scale_all, ScaledNutrients};
pub use serving::{parse_serving_size, ServingSize};
pub use table::{NutrientTable, ANCHOR_NUTRIENTS};
pub use units::UnitChoice;

pub fn router() -> Router<AppState> {
    handlers::nutrition_routes()
}
