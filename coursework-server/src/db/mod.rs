//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default)
//! - List operations use JOINs, never N+1 queries
//! - Rely on DB constraints and map violations to `DbError`
//! - Paging happens in SQL with LIMIT/OFFSET

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

pub use error::DbError;
pub use pool::{connect, create_pool, lazy_pool};
pub use repos::*;
pub use sqlx::PgPool;
