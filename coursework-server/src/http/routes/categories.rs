//! Trivia categories

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::questions::QUESTIONS_PER_PAGE;
use crate::db::repos::{CategoryRepo, QuestionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{PageQuery, ValidId};
use crate::http::server::AppState;

/// GET /categories
async fn list_categories(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let categories = CategoryRepo::new(&state.pool).list().await?;
    Ok(Json(json!({
        "success": true,
        "categories": categories,
    })))
}

/// GET /categories/{id}/questions?page=N
async fn questions_for_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    PageQuery(params): PageQuery,
) -> Result<Json<Value>, ApiError> {
    let category = CategoryRepo::new(&state.pool).get(id).await?;
    let page = params.with_fixed_size(QUESTIONS_PER_PAGE);
    let questions = QuestionRepo::new(&state.pool)
        .list_for_category(id, page)
        .await?;

    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "questions": questions.items,
        "totalQuestions": questions.total,
        "currentCategory": category.kind,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}
