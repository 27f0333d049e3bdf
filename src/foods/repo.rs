use anyhow::Context;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::repo_types::Food;
use crate::nutrition::parse_serving_size;
use crate::openfoodfacts::Product;

const FOOD_COLUMNS: &str = "id, barcode, name, brand, image_url, ingredients, allergens, \
     serving_size_raw, serving_size, serving_unit, nutriments, created_at, updated_at";

impl Food {
    /// Insert or refresh the canonical record for `product.barcode`.
    pub async fn upsert(db: &PgPool, product: &Product) -> anyhow::Result<Food> {
        let serving = parse_serving_size(product.serving_size_raw.as_deref());
        let sql = format!(
            r#"
            INSERT INTO foods (barcode, name, brand, image_url, ingredients, allergens,
                               serving_size_raw, serving_size, serving_unit, nutriments)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (barcode) DO UPDATE SET
                name = EXCLUDED.name,
                brand = EXCLUDED.brand,
                image_url = EXCLUDED.image_url,
                ingredients = EXCLUDED.ingredients,
                allergens = EXCLUDED.allergens,
                serving_size_raw = EXCLUDED.serving_size_raw,
                serving_size = EXCLUDED.serving_size,
                serving_unit = EXCLUDED.serving_unit,
                nutriments = EXCLUDED.nutriments,
                updated_at = now()
            RETURNING {FOOD_COLUMNS}
            "#
        );
        let food = sqlx::query_as::<_, Food>(&sql)
            .bind(&product.barcode)
            .bind(&product.name)
            .bind(&product.brand)
            .bind(&product.image_url)
            .bind(&product.ingredients)
            .bind(&product.allergens)
            .bind(&product.serving_size_raw)
            .bind(serving.size)
            .bind(serving.unit)
            .bind(Json(&product.nutriments))
            .fetch_one(db)
            .await
            .with_context(|| format!("upsert food {}", product.barcode))?;
        Ok(food)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Food>> {
        let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1");
        let food = sqlx::query_as::<_, Food>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("find food by id")?;
        Ok(food)
    }
}
