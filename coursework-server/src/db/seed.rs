//! Default rows each app expects on first run

use sqlx::types::Json;
use sqlx::PgPool;

use crate::app::App;
use crate::models::Ingredient;
use super::DbError;

/// Categories the trivia frontend ships icons for
pub const TRIVIA_CATEGORIES: &[&str] = &[
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// Insert default rows for `app`. Safe to run repeatedly.
///
/// Returns the number of rows actually inserted.
pub async fn run(pool: &PgPool, app: App) -> Result<u64, DbError> {
    let inserted = match app {
        App::Fyyur => 0,
        App::Trivia => seed_categories(pool).await?,
        App::Coffee => seed_water(pool).await?,
    };

    tracing::info!(%app, inserted, "Seed complete");
    Ok(inserted)
}

async fn seed_categories(pool: &PgPool) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for kind in TRIVIA_CATEGORIES {
        inserted += sqlx::query("INSERT INTO categories (type) VALUES ($1) ON CONFLICT (type) DO NOTHING")
            .bind(kind)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn seed_water(pool: &PgPool) -> Result<u64, DbError> {
    let recipe = vec![Ingredient {
        color: "blue".to_string(),
        name: "water".to_string(),
        parts: 1,
    }];

    let result = sqlx::query(
        "INSERT INTO drinks (title, recipe) VALUES ($1, $2) ON CONFLICT (title) DO NOTHING",
    )
    .bind("water")
    .bind(Json(recipe))
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
