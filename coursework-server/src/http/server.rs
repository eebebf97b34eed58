//! Axum server setup
//!
//! One process serves one app:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::JwtVerifier;
use super::{error, page, routes};
use crate::app::App;

/// Origins allowed when CORS is not permissive
const LOCAL_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5000",
    "http://localhost:8100",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5000",
    "http://127.0.0.1:8100",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Which app to serve
    pub app: App,

    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app: App::Fyyur,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub pool: PgPool,
    pub app: App,
    /// Bearer token verifier; `None` when no key is configured
    pub verifier: Option<JwtVerifier>,
}

impl AppState {
    pub fn new(pool: PgPool, app: App) -> Self {
        Self {
            pool,
            app,
            verifier: None,
        }
    }

    pub fn with_verifier(mut self, verifier: Option<JwtVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}

/// Routes, fallbacks and tracing for `state.app`, without CORS.
pub fn build_router(state: AppState) -> Router {
    let app = state.app;

    let app_routes = match app {
        App::Fyyur => routes::fyyur_router(),
        App::Trivia => routes::trivia_router(),
        App::Coffee => routes::coffee_router(),
    };
    let router = Router::new().merge(routes::health::router()).merge(app_routes);

    let router = if app.renders_html() {
        router
            .fallback(page::not_found)
            .method_not_allowed_fallback(page::method_not_allowed)
    } else {
        router
            .fallback(error::not_found)
            .method_not_allowed_fallback(error::method_not_allowed)
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = LOCAL_ORIGINS
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let state = AppState::new(pool, App::Trivia);
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state).layer(cors_layer(config.cors_permissive));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(app = %config.app, "Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::lazy_pool;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router(app: App) -> Router {
        let pool = lazy_pool("postgres://nobody@127.0.0.1:1/none").unwrap();
        build_router(AppState::new(pool, app))
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn local_origins_parse() {
        for origin in LOCAL_ORIGINS {
            assert!(origin.parse::<HeaderValue>().is_ok(), "{origin}");
        }
    }

    #[tokio::test]
    async fn every_app_has_health() {
        for app in App::ALL {
            let response = router(app)
                .oneshot(Request::get("/health").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{app}");
        }
    }

    #[tokio::test]
    async fn json_apps_fall_back_to_json_404() {
        let response = router(App::Trivia)
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "resource not found");
    }

    #[tokio::test]
    async fn wrong_method_is_405_envelope() {
        let response = router(App::Coffee)
            .oneshot(Request::put("/drinks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], 405);
    }

    #[tokio::test]
    async fn fyyur_falls_back_to_404_page() {
        let response = router(App::Fyyur)
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Not Found"));
    }
}
