//! coursework-server: database layer and HTTP servers for the coursework apps
//!
//! - fyyur: venue/artist/show booking site rendered as HTML
//! - trivia: question API with paging, search and quizzes
//! - coffee: drink API guarded by JWT permissions
//!
//! Each process serves exactly one [`App`].

pub mod app;
pub mod db;
pub mod http;
pub mod models;

pub use app::{App, UnknownApp};
pub use db::{create_pool, DbError};
pub use http::{build_router, run_server, AppState, JwtVerifier, ServerConfig, ServerError};
