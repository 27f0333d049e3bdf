use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{validate_weight, LogWeightRequest, RangeQuery, WeightEntry};
use crate::{
    auth::services::AuthUser,
    dates::today_utc,
    error::{ApiResult, AppError},
    state::AppState,
};

pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/progress/weight", get(list_weight).put(log_weight))
}

#[instrument(skip(state, req))]
pub async fn log_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<LogWeightRequest>,
) -> ApiResult<Json<WeightEntry>> {
    let kg = validate_weight(req.weight_kg).map_err(AppError::BadRequest)?;
    let day = req.recorded_on.unwrap_or_else(today_utc);

    let entry = WeightEntry::upsert(&state.db, user_id, kg, day).await?;
    info!(%user_id, weight_kg = kg, recorded_on = %day, "weight logged");
    Ok(Json(entry))
}

#[instrument(skip(state))]
pub async fn list_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(range): Query<RangeQuery>,
) -> ApiResult<Json<Vec<WeightEntry>>> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::BadRequest("from must not be after to".into()));
        }
    }
    let rows = WeightEntry::list_range(&state.db, user_id, range.from, range.to).await?;
    Ok(Json(rows))
}
