//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error envelopes for the APIs, HTML error pages for the booking site

pub mod auth;
pub mod error;
pub mod extractors;
pub mod page;
pub mod routes;
pub mod server;
pub mod templates;

pub use auth::{Audience, AuthError, Claims, JwtVerifier};
pub use error::ApiError;
pub use page::PageError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
