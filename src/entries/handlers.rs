use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateEntryRequest, DayQuery, DaySummary},
    repo::NewEntry,
    repo_types::FoodEntry,
    services::{remaining, totals, validate_quantity, EntrySnapshot},
};
use crate::{
    auth::services::AuthUser,
    dates::today_utc,
    error::{ApiResult, AppError},
    foods::Food,
    state::AppState,
};

pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/summary", get(day_summary))
        .route("/entries/:id", delete(delete_entry))
}

/// POST /entries
/// Quantity is checked before anything is read or written.
#[instrument(skip(state, req))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateEntryRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<FoodEntry>)> {
    let quantity = validate_quantity(&req.quantity)?;

    let food = Food::find_by_id(&state.db, req.food_id)
        .await?
        .ok_or_else(|| AppError::NotFound("food not found".into()))?;

    let snapshot = EntrySnapshot::take(&food.nutriments, quantity, req.unit);
    let entry = FoodEntry::insert(
        &state.db,
        NewEntry {
            user_id,
            food: &food,
            quantity,
            meal: req.meal,
            consumed_on: req.consumed_on.unwrap_or_else(today_utc),
            snapshot: &snapshot,
        },
    )
    .await?;

    info!(%user_id, entry_id = %entry.id, unit = %snapshot.unit, quantity, "food logged");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/entries/{}", entry.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(entry)))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> ApiResult<Json<Vec<FoodEntry>>> {
    let day = q.date.unwrap_or_else(today_utc);
    Ok(Json(FoodEntry::list_for_day(&state.db, user_id, day).await?))
}

#[instrument(skip(state))]
pub async fn day_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> ApiResult<Json<DaySummary>> {
    let day = q.date.unwrap_or_else(today_utc);
    let entries = FoodEntry::list_for_day(&state.db, user_id, day).await?;
    let goals = state.settings.get(user_id).await?.goals;

    let totals = totals(&entries);
    let remaining = remaining(&totals, &goals);
    Ok(Json(DaySummary {
        date: day,
        entries: entries.len(),
        totals,
        goals,
        remaining,
    }))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if FoodEntry::delete(&state.db, user_id, id).await? {
        info!(%user_id, entry_id = %id, "food entry deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("entry not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{app::build_app, auth::dto::JwtKeys, state::AppState};

    fn post_entry(token: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/entries")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn rejects_missing_token() {
        let app = build_app(AppState::fake());
        let resp = app
            .oneshot(post_entry(None, json!({ "food_id": Uuid::new_v4(), "quantity": 100 })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_non_positive_quantity_before_touching_storage() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign_access(Uuid::new_v4()).unwrap();
        let app = build_app(state);

        for quantity in [json!(0), json!(-20), json!("lots")] {
            let resp = app
                .clone()
                .oneshot(post_entry(
                    Some(&token),
                    json!({ "food_id": Uuid::new_v4(), "quantity": quantity }),
                ))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }
}
