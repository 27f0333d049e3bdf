use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use super::{dto::{FoodDetails, FoodQuery}, repo_types::Food, services::lookup_barcode};
use crate::{
    auth::services::AuthUser,
    error::{ApiResult, AppError},
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods/barcode/:barcode", get(scan_barcode))
        .route("/foods/:id", get(get_food))
}

/// GET /foods/barcode/:barcode
/// Looks the product up, stores it as the canonical food and returns it.
#[instrument(skip(state))]
pub async fn scan_barcode(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(barcode): Path<String>,
) -> ApiResult<Json<FoodDetails>> {
    let (product, ticket) =
        lookup_barcode(state.products.as_ref(), &state.scans, user_id, &barcode).await?;

    // A failed upsert drops the ticket, which frees the slot for a retry.
    let food = Food::upsert(&state.db, &product).await.map_err(|e| {
        error!(error = %e, %user_id, %barcode, "food upsert failed");
        AppError::Internal(e)
    })?;
    ticket.settle();

    Ok(Json(FoodDetails::from(food)))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
    Query(q): Query<FoodQuery>,
) -> ApiResult<Json<FoodDetails>> {
    let requested = q
        .requested_unit()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let food = Food::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("food not found".into()))?;
    Ok(Json(FoodDetails::for_unit(food, requested)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{
        app::build_app,
        auth::dto::JwtKeys,
        foods::services::fake::StaticProducts,
        openfoodfacts::LookupError,
        state::AppState,
    };

    fn get_as(state: &AppState, user: Uuid, uri: &str) -> Request<Body> {
        let token = JwtKeys::from_ref(state).sign_access(user).unwrap();
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn scan_status(state: AppState, user: Uuid, barcode: &str) -> StatusCode {
        let req = get_as(&state, user, &format!("/api/v1/foods/barcode/{barcode}"));
        build_app(state).oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn malformed_barcode_is_bad_request() {
        let status = scan_status(AppState::fake(), Uuid::new_v4(), "12ab").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_and_frees_slot() {
        let state = AppState::fake();
        let scans = state.scans.clone();
        let user = Uuid::new_v4();

        let status = scan_status(state, user, "4006381333931").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(scans.begin(user).is_ok());
    }

    #[tokio::test]
    async fn scan_in_flight_is_conflict() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        let _pending = state.scans.begin(user).unwrap();

        let status = scan_status(state, user, "4006381333931").await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn upstream_outage_is_bad_gateway() {
        let state = AppState::fake_with_products(Arc::new(StaticProducts::failing(
            LookupError::Upstream(503),
        )));
        let status = scan_status(state, Uuid::new_v4(), "4006381333931").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn unknown_unit_on_food_read_is_bad_request() {
        let state = AppState::fake();
        let uri = format!("/api/v1/foods/{}?unit=cup", Uuid::new_v4());
        let req = get_as(&state, Uuid::new_v4(), &uri);
        let res = build_app(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
