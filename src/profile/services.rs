use anyhow::Context;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use super::repo;
use crate::state::AppState;

pub const AVATAR_URL_TTL_SECS: u64 = 30 * 60;

pub struct UploadItem<'a> {
    pub body: Bytes,
    pub content_type: &'a str,
}

pub fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

pub fn avatar_key(user_id: Uuid, object_id: Uuid, ext: &str) -> String {
    format!("avatars/{user_id}/{object_id}.{ext}")
}

/// Uploads a new avatar, records it and drops the previous object.
///
/// The caller has already checked the content type.
pub async fn store_avatar(st: &AppState, user_id: Uuid, img: UploadItem<'_>) -> anyhow::Result<String> {
    let ext = ext_from_mime(img.content_type).unwrap_or("bin");
    let key = avatar_key(user_id, Uuid::new_v4(), ext);

    st.storage
        .put_object(&key, img.body, img.content_type)
        .await
        .with_context(|| format!("put_object {key}"))?;

    let previous = match repo::swap_avatar_key(&st.db, user_id, &key).await {
        Ok(prev) => prev,
        Err(e) => {
            // Row not updated: the new object is orphaned, remove it.
            if let Err(del) = st.storage.delete_object(&key).await {
                warn!(error = %del, %key, "cleanup of unlinked avatar failed");
            }
            return Err(e);
        }
    };

    if let Some(old) = previous.filter(|old| *old != key) {
        if let Err(e) = st.storage.delete_object(&old).await {
            warn!(error = %e, key = %old, "old avatar not deleted");
        }
    }

    info!(%user_id, %key, "avatar stored");
    Ok(key)
}

pub async fn presign_avatar(st: &AppState, key: &str) -> anyhow::Result<String> {
    st.storage
        .presign_get(key, AVATAR_URL_TTL_SECS)
        .await
        .with_context(|| format!("presign url for {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_image_mime_types() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
        assert_eq!(ext_from_mime("text/html"), None);
    }

    #[test]
    fn avatar_keys_are_scoped_per_user() {
        let user = Uuid::new_v4();
        let object = Uuid::new_v4();
        assert_eq!(
            avatar_key(user, object, "png"),
            format!("avatars/{user}/{object}.png")
        );
    }

    #[tokio::test]
    async fn presigns_through_storage_client() {
        let state = AppState::fake();
        let url = presign_avatar(&state, "avatars/u/a.webp").await.unwrap();
        assert!(url.contains("avatars/u/a.webp"));
    }
}
