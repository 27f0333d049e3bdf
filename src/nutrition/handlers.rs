use axum::{routing::post, Json, Router};
use tracing::instrument;

use super::dto::{PreviewRequest, PreviewResponse};
use super::{available_units, resolve_unit, scale_all};
use crate::state::AppState;

pub fn nutrition_routes() -> Router<AppState> {
    Router::new().route("/nutrition/preview", post(preview))
}

/// Scales a nutrient table for the entered serving. No storage involved.
#[instrument(skip(req))]
pub async fn preview(Json(req): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let available = available_units(&req.nutriments);
    let unit = resolve_unit(&available, req.unit);
    let nutrients = scale_all(&req.nutriments, req.quantity, unit);
    Json(PreviewResponse {
        unit,
        available_units: available,
        nutrients,
    })
}
