//! `coursework serve <app>`
//!
//! Loads config, applies flag overrides, runs migrations and then serves
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use coursework_core::CourseworkConfig;
use coursework_server::db::{self, migrations};
use coursework_server::{run_server, App, AppState, JwtVerifier, ServerConfig};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// App to serve: fyyur, trivia or coffee
    pub app: App,

    /// Address to bind to (default from config: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Skip creating tables on start-up
    #[arg(long)]
    pub no_migrate: bool,
}

/// Resolve the bind address and CORS mode from flags, then config.
fn server_config(args: &ServeArgs, config: &CourseworkConfig) -> Result<ServerConfig> {
    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => config
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?,
    };

    Ok(ServerConfig {
        app: args.app,
        bind_addr,
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    })
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = CourseworkConfig::load().context("Failed to load config")?;
    if let Some(url) = &args.database_url {
        config.database.url = url.clone();
    }
    let server = server_config(&args, &config)?;

    tracing::info!(app = %args.app, "Starting coursework server on {}", server.bind_addr);

    let pool = db::connect(&config.database)
        .await
        .context("Failed to create database pool")?;

    if !args.no_migrate {
        migrations::run(&pool, args.app)
            .await
            .context("Failed to run migrations")?;
    }

    let verifier =
        JwtVerifier::from_config(&config.auth).context("Failed to set up token verification")?;
    if args.app == App::Coffee && verifier.is_none() {
        tracing::warn!("No JWT key configured; permission-guarded routes will return 500");
    }

    let state = AppState::new(pool, args.app).with_verifier(verifier);
    run_server(state, server).await.context("Server error")?;

    Ok(())
}
