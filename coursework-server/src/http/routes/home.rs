//! Booking site landing page

use std::sync::Arc;

use axum::response::Html;
use axum::{routing::get, Router};
use minijinja::context;

use crate::http::page::{self, PageError};
use crate::http::server::AppState;

/// GET /
async fn index() -> Result<Html<String>, PageError> {
    page::render("home.html", context! {})
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{get, router, send};
    use crate::app::App;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn home_page_renders() {
        let (status, body) = send(router(App::Fyyur), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/venues/create"));
    }
}
