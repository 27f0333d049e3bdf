use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use super::{
    repo,
    services::{ext_from_mime, presign_avatar, store_avatar, UploadItem},
};
use crate::{
    auth::services::AuthUser,
    error::{ApiResult, AppError},
    state::AppState,
};

const MAX_DISPLAY_NAME: usize = 80;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route(
            "/profile/avatar",
            post(upload_avatar).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
}

async fn load_profile(state: &AppState, user_id: Uuid) -> ApiResult<ProfileResponse> {
    let row = repo::get_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    let avatar_url = match row.avatar_key.as_deref() {
        Some(key) => match presign_avatar(state, key).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, %user_id, "avatar presign failed");
                None
            }
        },
        None => None,
    };

    Ok(ProfileResponse {
        id: row.user_id,
        email: row.email,
        display_name: row.display_name,
        avatar_url,
    })
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    Ok(Json(load_profile(&state, user_id).await?))
}

#[instrument(skip(state, req))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let name = req
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if name.is_some_and(|n| n.chars().count() > MAX_DISPLAY_NAME) {
        return Err(AppError::BadRequest(format!(
            "display_name must be at most {MAX_DISPLAY_NAME} characters"
        )));
    }

    repo::set_display_name(&state.db, user_id, name).await?;
    Ok(Json(load_profile(&state, user_id).await?))
}

/// POST /profile/avatar (multipart, field `avatar`)
#[instrument(skip(state, mp))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> ApiResult<Json<ProfileResponse>> {
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("avatar") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        if ext_from_mime(&content_type).is_none() {
            return Err(AppError::BadRequest(format!(
                "unsupported image type: {content_type}"
            )));
        }
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if body.is_empty() {
            return Err(AppError::BadRequest("avatar is empty".into()));
        }

        store_avatar(
            &state,
            user_id,
            UploadItem {
                body,
                content_type: &content_type,
            },
        )
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "avatar upload failed");
            AppError::Internal(e)
        })?;

        return Ok(Json(load_profile(&state, user_id).await?));
    }

    Err(AppError::BadRequest("avatar is required".into()))
}
