use anyhow::Context;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_key: Option<String>,
    pub updated_at: Option<OffsetDateTime>,
}

pub async fn get_profile(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT u.id AS user_id, u.email, p.display_name, p.avatar_key, p.updated_at
          FROM users u
          LEFT JOIN profiles p ON p.user_id = u.id
         WHERE u.id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get profile")?;
    Ok(row)
}

pub async fn set_display_name(
    db: &PgPool,
    user_id: Uuid,
    display_name: Option<&str>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, display_name)
        VALUES ($1, $2)
        ON CONFLICT (user_id)
        DO UPDATE SET display_name = EXCLUDED.display_name, updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(display_name)
    .execute(db)
    .await
    .context("set display name")?;
    Ok(())
}

/// Points the profile at `new_key` and returns the key it replaced.
pub async fn swap_avatar_key(
    db: &PgPool,
    user_id: Uuid,
    new_key: &str,
) -> anyhow::Result<Option<String>> {
    let mut tx = db.begin().await.context("begin tx")?;

    let previous: Option<(Option<String>,)> =
        sqlx::query_as("SELECT avatar_key FROM profiles WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .context("read avatar key")?;

    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, avatar_key)
        VALUES ($1, $2)
        ON CONFLICT (user_id)
        DO UPDATE SET avatar_key = EXCLUDED.avatar_key, updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(new_key)
    .execute(&mut *tx)
    .await
    .context("write avatar key")?;

    tx.commit().await.context("commit tx")?;
    Ok(previous.and_then(|(key,)| key))
}
