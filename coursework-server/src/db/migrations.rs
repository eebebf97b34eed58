//! Schema for each app, created idempotently on start-up

use sqlx::PgPool;

use crate::app::App;
use super::DbError;

const FYYUR: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(2) NOT NULL,
        address VARCHAR(120) NOT NULL,
        phone VARCHAR(120),
        genres TEXT[] NOT NULL DEFAULT '{}',
        image_link VARCHAR(500),
        facebook_link VARCHAR(120),
        website_link VARCHAR(120),
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artists (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(2) NOT NULL,
        phone VARCHAR(120),
        genres TEXT[] NOT NULL DEFAULT '{}',
        image_link VARCHAR(500),
        facebook_link VARCHAR(120),
        website_link VARCHAR(120),
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id SERIAL PRIMARY KEY,
        artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE ON UPDATE CASCADE,
        venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE ON UPDATE CASCADE,
        start_time TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS shows_artist_id_idx ON shows (artist_id)",
    "CREATE INDEX IF NOT EXISTS shows_venue_id_idx ON shows (venue_id)",
];

const TRIVIA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        type TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS questions (
        id SERIAL PRIMARY KEY,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        category INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)",
];

const COFFEE: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id SERIAL PRIMARY KEY,
        title VARCHAR(80) NOT NULL UNIQUE,
        recipe JSONB NOT NULL
    )
    "#];

/// DDL statements for `app`, in execution order.
pub fn statements(app: App) -> &'static [&'static str] {
    match app {
        App::Fyyur => FYYUR,
        App::Trivia => TRIVIA,
        App::Coffee => COFFEE,
    }
}

/// Run all migrations for `app` inside one transaction.
pub async fn run(pool: &PgPool, app: App) -> Result<(), DbError> {
    tracing::info!(%app, "Running migrations...");

    let mut tx = pool.begin().await?;
    for statement in statements(app) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(%app, "Migrations complete");
    Ok(())
}
