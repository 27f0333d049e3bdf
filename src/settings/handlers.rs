use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::dto::{Settings, SettingsPatch};
use crate::{auth::services::AuthUser, error::ApiResult, state::AppState};

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).patch(patch_settings))
}

#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings.get(user_id).await?))
}

#[instrument(skip(state, patch))]
pub async fn patch_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings.update(user_id, patch).await?))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        extract::FromRef,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{app::build_app, auth::dto::JwtKeys, state::AppState};

    async fn call(app: &Router, token: &str, method: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method(method)
            .uri("/api/v1/settings")
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn patch_merges_and_get_reads_back() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign_access(Uuid::new_v4()).unwrap();
        let app = build_app(state);

        let (status, body) = call(&app, &token, "GET", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["theme"], "system");

        let (status, _) = call(&app, &token, "PATCH", Some(json!({ "theme": "dark" }))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = call(
            &app,
            &token,
            "PATCH",
            Some(json!({ "goals": { "calories_kcal": 2100 } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["theme"], "dark");

        let (_, body) = call(&app, &token, "GET", None).await;
        assert_eq!(body["theme"], "dark");
        assert_eq!(body["goals"]["calories_kcal"], json!(2100.0));
    }

    #[tokio::test]
    async fn negative_goal_is_bad_request() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign_access(Uuid::new_v4()).unwrap();
        let app = build_app(state);

        let (status, body) = call(
            &app,
            &token,
            "PATCH",
            Some(json!({ "goals": { "fat_g": -1 } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("fat_g"));
    }
}
