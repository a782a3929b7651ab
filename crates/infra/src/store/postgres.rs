//! Postgres-backed ingredient store.
//!
//! The store trait is synchronous; every call blocks on the captured runtime
//! handle. Call it from a blocking context (`spawn_blocking`), never directly
//! from an async task.

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokio::runtime::Handle;

use pizzeria_core::{Entity, IngredientId};
use pizzeria_inventory::{Ingredient, NewIngredient};

use super::{IngredientStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS ingredients (
    id                  BIGSERIAL PRIMARY KEY,
    description         TEXT        NOT NULL,
    category            TEXT        NOT NULL,
    portion_quantity    BIGINT      NOT NULL,
    portion_price       NUMERIC     NOT NULL,
    percentage_discount NUMERIC     NULL,
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Ingredient store over a single `ingredients` table.
///
/// Each statement touches one row, so per-ingredient writes are atomic;
/// nothing spans several ingredients.
pub struct PostgresIngredientStore {
    pool: PgPool,
    handle: Handle,
}

impl PostgresIngredientStore {
    pub fn new(pool: PgPool, handle: Handle) -> Self {
        Self { pool, handle }
    }

    /// Connect and make sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await.map_err(backend)?;
        sqlx::query(SCHEMA).execute(&pool).await.map_err(backend)?;
        Ok(Self::new(pool, Handle::current()))
    }

    fn block_on<F, T>(&self, fut: F) -> Result<T, StoreError>
    where
        F: std::future::Future<Output = Result<T, sqlx::Error>>,
    {
        self.handle.block_on(fut).map_err(backend)
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn row_to_ingredient(row: &PgRow) -> Result<Ingredient, StoreError> {
    let id: i64 = row.try_get("id").map_err(backend)?;
    let attrs = NewIngredient {
        description: row.try_get("description").map_err(backend)?,
        category: row.try_get("category").map_err(backend)?,
        portion_quantity: row.try_get("portion_quantity").map_err(backend)?,
        portion_price: row.try_get::<Decimal, _>("portion_price").map_err(backend)?,
        percentage_discount: row
            .try_get::<Option<Decimal>, _>("percentage_discount")
            .map_err(backend)?,
    };
    Ok(Ingredient::from_parts(IngredientId::new(id), attrs))
}

impl IngredientStore for PostgresIngredientStore {
    fn get(&self, id: IngredientId) -> Result<Ingredient, StoreError> {
        let row = self.block_on(
            sqlx::query(
                r#"
                SELECT id, description, category, portion_quantity, portion_price, percentage_discount
                FROM ingredients
                WHERE id = $1
                "#,
            )
            .bind(id.get())
            .fetch_optional(&self.pool),
        )?;

        match row {
            Some(row) => row_to_ingredient(&row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn save(&self, ingredient: Ingredient) -> Result<Ingredient, StoreError> {
        self.block_on(
            sqlx::query(
                r#"
                INSERT INTO ingredients (
                    id,
                    description,
                    category,
                    portion_quantity,
                    portion_price,
                    percentage_discount
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (id)
                DO UPDATE SET
                    description = EXCLUDED.description,
                    category = EXCLUDED.category,
                    portion_quantity = EXCLUDED.portion_quantity,
                    portion_price = EXCLUDED.portion_price,
                    percentage_discount = EXCLUDED.percentage_discount,
                    updated_at = NOW()
                "#,
            )
            .bind(ingredient.id().get())
            .bind(ingredient.description())
            .bind(ingredient.category())
            .bind(ingredient.portion_quantity())
            .bind(ingredient.portion_price())
            .bind(ingredient.percentage_discount())
            .execute(&self.pool),
        )?;
        Ok(ingredient)
    }

    fn create(&self, attrs: NewIngredient) -> Result<Ingredient, StoreError> {
        let row = self.block_on(
            sqlx::query(
                r#"
                INSERT INTO ingredients (
                    description,
                    category,
                    portion_quantity,
                    portion_price,
                    percentage_discount
                )
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, description, category, portion_quantity, portion_price, percentage_discount
                "#,
            )
            .bind(&attrs.description)
            .bind(&attrs.category)
            .bind(attrs.portion_quantity)
            .bind(attrs.portion_price)
            .bind(attrs.percentage_discount)
            .fetch_one(&self.pool),
        )?;
        row_to_ingredient(&row)
    }

    fn delete(&self, id: IngredientId) -> Result<(), StoreError> {
        let result = self.block_on(
            sqlx::query("DELETE FROM ingredients WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool),
        )?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Ingredient>, StoreError> {
        let rows = self.block_on(
            sqlx::query(
                r#"
                SELECT id, description, category, portion_quantity, portion_price, percentage_discount
                FROM ingredients
                ORDER BY id
                "#,
            )
            .fetch_all(&self.pool),
        )?;
        rows.iter().map(row_to_ingredient).collect()
    }
}
