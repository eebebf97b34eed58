//! JSON API errors with IntoResponse
//!
//! Every error renders as `{"success": false, "error": <status>, "message": <text>}`.
//! Auth failures add a machine-readable `"code"`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::auth::AuthError;
use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request or missing keys (400)
    BadRequest { reason: String },

    /// Resource or page not found (404)
    NotFound,

    /// Route exists with another method (405)
    MethodNotAllowed,

    /// Well-formed body with invalid content (422)
    Validation(ValidationError),

    /// Request conflicts with stored data, e.g. duplicate title (422)
    Unprocessable { reason: String },

    /// Token or permission failure (status carried by the error)
    Auth(AuthError),

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Validation(_) | Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Auth(e) => e.status,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fixed client-facing message for a status.
pub fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "resource not found",
        StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        _ => "internal server error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Auth(e) => {
                tracing::debug!(code = e.code, "Auth rejected: {}", e.description);
                json!({
                    "success": false,
                    "error": status.as_u16(),
                    "code": e.code,
                    "message": e.description,
                })
            }
            other => {
                match other {
                    Self::BadRequest { reason } | Self::Unprocessable { reason } => {
                        tracing::debug!(%status, "Rejected request: {}", reason);
                    }
                    Self::Validation(e) => tracing::debug!(%status, "Validation failed: {}", e),
                    Self::Database(e) => tracing::error!("Database error: {}", e),
                    _ => {}
                }
                json!({
                    "success": false,
                    "error": status.as_u16(),
                    "message": status_message(status),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NotFound,
            DbError::Conflict { constraint } => Self::Unprocessable {
                reason: format!("duplicate value ({constraint})"),
            },
            DbError::ForeignKey { constraint } => Self::Unprocessable {
                reason: format!("unknown reference ({constraint})"),
            },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

/// Fallback for unmatched paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let (status, json) = body(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json,
            json!({"success": false, "error": 404, "message": "resource not found"})
        );
    }

    #[tokio::test]
    async fn validation_is_422() {
        let (status, json) = body(ValidationError::Empty { field: "title" }.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "unprocessable");
    }

    #[tokio::test]
    async fn bad_request_hides_reason() {
        let (status, json) = body(ApiError::bad_request("missing searchTerm")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "bad request");
    }

    #[tokio::test]
    async fn auth_error_carries_code() {
        let (status, json) = body(AuthError::unauthorized().into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["code"], "unauthorized");
        assert_eq!(json["error"], 403);
        assert_eq!(json["success"], false);
    }

    #[test]
    fn db_errors_map_to_status() {
        assert_eq!(
            ApiError::from(DbError::not_found("drink", 1)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DbError::Conflict {
                constraint: "drinks_title_key".into()
            })
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
