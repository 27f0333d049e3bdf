use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::dto::WeightEntry;

impl WeightEntry {
    /// One reading per user per day; a second reading replaces the first.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        weight_kg: f64,
        recorded_on: Date,
    ) -> anyhow::Result<WeightEntry> {
        let row = sqlx::query_as::<_, WeightEntry>(
            r#"
            INSERT INTO weight_entries (user_id, weight_kg, recorded_on)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, recorded_on) DO UPDATE SET weight_kg = EXCLUDED.weight_kg
            RETURNING id, user_id, weight_kg, recorded_on, created_at
            "#,
        )
        .bind(user_id)
        .bind(weight_kg)
        .bind(recorded_on)
        .fetch_one(db)
        .await
        .context("upsert weight entry")?;
        Ok(row)
    }

    pub async fn list_range(
        db: &PgPool,
        user_id: Uuid,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<WeightEntry>> {
        let rows = sqlx::query_as::<_, WeightEntry>(
            r#"
            SELECT id, user_id, weight_kg, recorded_on, created_at
              FROM weight_entries
             WHERE user_id = $1
               AND ($2::date IS NULL OR recorded_on >= $2)
               AND ($3::date IS NULL OR recorded_on <= $3)
             ORDER BY recorded_on ASC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(db)
        .await
        .context("list weight entries")?;
        Ok(rows)
    }
}
