//! Command implementations for the coursework CLI

pub mod config;
pub mod db;
pub mod serve;

pub use config::run_config;
pub use db::{run_migrate, run_seed};
pub use serve::run_serve;
