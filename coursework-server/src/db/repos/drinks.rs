//! Coffee shop drink repository
//!
//! Recipes are stored as a JSONB array of ingredients.

use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::{DrinkChanges, DrinkLong, Ingredient};

#[derive(Debug, FromRow)]
struct DrinkRow {
    id: i32,
    title: String,
    recipe: Json<Vec<Ingredient>>,
}

impl From<DrinkRow> for DrinkLong {
    fn from(row: DrinkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            recipe: row.recipe.0,
        }
    }
}

/// Drink repository
pub struct DrinkRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> DrinkRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<DrinkLong>, DbError> {
        let rows: Vec<DrinkRow> = sqlx::query_as("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(DrinkLong::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<DrinkLong, DbError> {
        let row: DrinkRow = sqlx::query_as("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("drink", id))?;
        Ok(row.into())
    }

    /// Insert a drink. A duplicate title surfaces as `DbError::Conflict`.
    pub async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<DrinkLong, DbError> {
        let row: DrinkRow = sqlx::query_as(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(Json(recipe))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Apply the fields present in `changes`, keeping the rest.
    pub async fn update(&self, id: i32, changes: &DrinkChanges) -> Result<DrinkLong, DbError> {
        let row: DrinkRow = sqlx::query_as(
            r#"
            UPDATE drinks SET
                title = COALESCE($2, title),
                recipe = COALESCE($3, recipe)
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.recipe.as_ref().map(Json))
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("drink", id))?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("drink", id));
        }
        Ok(())
    }
}
