//! Route handlers organized by resource

use std::sync::Arc;

use axum::Router;
use serde::Deserialize;

use super::server::AppState;

pub mod health;

// booking site
pub mod home;
pub mod venues;
pub mod artists;
pub mod shows;

// trivia API
pub mod categories;
pub mod questions;
pub mod quizzes;

// coffee shop API
pub mod drinks;

/// `search_term` field posted by the venue and artist search boxes
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

pub fn fyyur_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(home::router())
        .merge(venues::router())
        .merge(artists::router())
        .merge(shows::router())
}

pub fn trivia_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(categories::router())
        .merge(questions::router())
        .merge(quizzes::router())
}

pub fn coffee_router() -> Router<Arc<AppState>> {
    Router::new().merge(drinks::router())
}
