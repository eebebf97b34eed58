//! `coursework migrate <app>` and `coursework seed <app>`

use anyhow::{Context, Result};
use clap::Parser;

use coursework_core::CourseworkConfig;
use coursework_server::db::{self, migrations, seed, PgPool};
use coursework_server::App;

#[derive(Parser, Debug)]
pub struct DbArgs {
    /// App whose tables to touch: fyyur, trivia or coffee
    pub app: App,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the app's tables if they do not exist yet.
pub async fn run_migrate(args: DbArgs) -> Result<()> {
    let pool = connect(&args).await?;
    migrations::run(&pool, args.app)
        .await
        .context("Failed to run migrations")?;

    println!("Migrations applied for {}", args.app);
    Ok(())
}

/// Create tables, then insert the app's default rows.
pub async fn run_seed(args: DbArgs) -> Result<()> {
    let pool = connect(&args).await?;
    migrations::run(&pool, args.app)
        .await
        .context("Failed to run migrations")?;
    let inserted = seed::run(&pool, args.app)
        .await
        .context("Failed to seed database")?;

    println!("Seeded {}: {} new row(s)", args.app, inserted);
    Ok(())
}

async fn connect(args: &DbArgs) -> Result<PgPool> {
    let mut config = CourseworkConfig::load().context("Failed to load config")?;
    if let Some(url) = &args.database_url {
        config.database.url = url.clone();
    }

    db::connect(&config.database)
        .await
        .context("Failed to create database pool")
}
