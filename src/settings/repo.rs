use anyhow::Context;
use axum::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::dto::Settings;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self, user_id: Uuid) -> anyhow::Result<Option<Settings>>;
    async fn save(&self, user_id: Uuid, settings: &Settings) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgSettingsStore {
    db: PgPool,
}

impl PgSettingsStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn load(&self, user_id: Uuid) -> anyhow::Result<Option<Settings>> {
        let row = sqlx::query_as::<_, (Json<Settings>,)>(
            r#"
            SELECT settings
              FROM user_settings
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("load user settings")?;
        Ok(row.map(|(Json(s),)| s))
    }

    async fn save(&self, user_id: Uuid, settings: &Settings) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (user_id, settings)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET settings = EXCLUDED.settings, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(Json(settings))
        .execute(&self.db)
        .await
        .context("save user settings")?;
        Ok(())
    }
}
