//! coursework-core: configuration and errors shared by the coursework servers

pub mod config;
pub mod error;

pub use config::{AuthSection, CourseworkConfig, DatabaseSection, JwtAlgorithm, ServerSection};
pub use error::{CourseworkError, Result};
