//! HTML page rendering and page errors for the booking site

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use serde::Serialize;

use super::templates;
use crate::db::DbError;

/// Error rendered as an HTML error page
#[derive(Debug)]
pub enum PageError {
    /// Unknown path or record (404 page)
    NotFound,

    /// Database failure (500 page, logged)
    Database(DbError),

    /// Template failed to render (500 page, logged)
    Template(minijinja::Error),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let template = match &self {
            Self::NotFound => "errors/404.html",
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                "errors/500.html"
            }
            Self::Template(e) => {
                tracing::error!("Template error: {:#}", e);
                "errors/500.html"
            }
        };

        match templates::render(template, context! {}) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Error page failed to render: {}", e);
                (status, status.canonical_reason().unwrap_or("error")).into_response()
            }
        }
    }
}

impl From<DbError> for PageError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

impl From<minijinja::Error> for PageError {
    fn from(e: minijinja::Error) -> Self {
        Self::Template(e)
    }
}

/// Render `name` as a 200 page.
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<Html<String>, PageError> {
    Ok(Html(templates::render(name, ctx)?))
}

/// Render `name` with an explicit status.
pub fn render_status<S: Serialize>(
    status: StatusCode,
    name: &str,
    ctx: S,
) -> Result<Response, PageError> {
    Ok((status, Html(templates::render(name, ctx)?)).into_response())
}

/// Home page carrying one flash message.
pub fn home_with_flash(status: StatusCode, message: String) -> Result<Response, PageError> {
    render_status(status, "home.html", context! { flash => vec![message] })
}

/// Fallback for unmatched paths.
pub async fn not_found() -> PageError {
    PageError::NotFound
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_renders_404_page() {
        let response = PageError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("404"));
    }

    #[tokio::test]
    async fn database_error_renders_500_page() {
        let err = PageError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_record_is_404() {
        let err = PageError::from(DbError::not_found("venue", 3));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn flash_message_on_home() {
        let response =
            home_with_flash(StatusCode::INTERNAL_SERVER_ERROR, "An error occurred.".into()).unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("An error occurred."));
    }
}
