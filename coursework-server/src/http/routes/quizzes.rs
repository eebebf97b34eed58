//! Trivia quiz: one random unseen question per call

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rand::seq::SliceRandom;
use serde_json::{json, Value};

use crate::db::repos::{CategoryRepo, QuestionRepo};
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::QuizRequest;

/// POST /quizzes
async fn next_question(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<QuizRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(previous), Some(quiz_category)) = (req.previous_questions, req.quiz_category) else {
        return Err(ApiError::bad_request(
            "previous_questions and quiz_category are required",
        ));
    };

    let category = quiz_category.category_id()?;
    if let Some(id) = category {
        CategoryRepo::new(&state.pool)
            .get(id)
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => ApiError::Unprocessable {
                    reason: format!("unknown quiz category {id}"),
                },
                other => other.into(),
            })?;
    }

    let candidates = QuestionRepo::new(&state.pool)
        .quiz_candidates(category, &previous)
        .await?;
    let question = candidates.choose(&mut rand::thread_rng()).cloned();

    tracing::debug!(
        ?category,
        asked = previous.len(),
        remaining = candidates.len(),
        "Quiz question drawn"
    );

    Ok(Json(json!({
        "success": true,
        "question": question,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quizzes", post(next_question))
}
