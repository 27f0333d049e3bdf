use anyhow::Context;
use sqlx::{types::Json, PgPool};
use time::Date;
use uuid::Uuid;

use super::dto::MealSlot;
use super::repo_types::FoodEntry;
use super::services::EntrySnapshot;
use crate::foods::Food;

const ENTRY_COLUMNS: &str = "id, user_id, food_id, barcode, food_name, brand, quantity, unit, meal, \
     consumed_on, nutrients, calories_kcal, protein_g, carbs_g, fat_g, created_at";

pub struct NewEntry<'a> {
    pub user_id: Uuid,
    pub food: &'a Food,
    pub quantity: f64,
    pub meal: MealSlot,
    pub consumed_on: Date,
    pub snapshot: &'a EntrySnapshot,
}

impl FoodEntry {
    pub async fn insert(db: &PgPool, new: NewEntry<'_>) -> anyhow::Result<FoodEntry> {
        let sql = format!(
            r#"
            INSERT INTO food_entries (user_id, food_id, barcode, food_name, brand, quantity, unit,
                                      meal, consumed_on, nutrients, calories_kcal, protein_g,
                                      carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {ENTRY_COLUMNS}
            "#
        );
        let snap = new.snapshot;
        let entry = sqlx::query_as::<_, FoodEntry>(&sql)
            .bind(new.user_id)
            .bind(new.food.id)
            .bind(&new.food.barcode)
            .bind(&new.food.name)
            .bind(&new.food.brand)
            .bind(new.quantity)
            .bind(snap.unit.as_str())
            .bind(new.meal.as_str())
            .bind(new.consumed_on)
            .bind(Json(&snap.nutrients.0))
            .bind(snap.calories_kcal())
            .bind(snap.protein_g())
            .bind(snap.carbs_g())
            .bind(snap.fat_g())
            .fetch_one(db)
            .await
            .context("insert food entry")?;
        Ok(entry)
    }

    pub async fn list_for_day(db: &PgPool, user_id: Uuid, day: Date) -> anyhow::Result<Vec<FoodEntry>> {
        let sql = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
              FROM food_entries
             WHERE user_id = $1 AND consumed_on = $2
             ORDER BY created_at ASC
            "#
        );
        let rows = sqlx::query_as::<_, FoodEntry>(&sql)
            .bind(user_id)
            .bind(day)
            .fetch_all(db)
            .await
            .context("list food entries")?;
        Ok(rows)
    }

    /// Returns false when no entry of this user had that id.
    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM food_entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await
            .context("delete food entry")?;
        Ok(res.rows_affected() > 0)
    }
}
