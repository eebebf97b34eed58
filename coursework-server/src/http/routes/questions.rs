//! Trivia questions: paged listing, create, search and delete

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::repos::{CategoryRepo, QuestionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PageQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{QuestionsIntent, QuestionsPost};

/// Page size of every question listing
pub const QUESTIONS_PER_PAGE: u32 = 10;

/// GET /questions?page=N
async fn list_questions(
    State(state): State<Arc<AppState>>,
    PageQuery(params): PageQuery,
) -> Result<Json<Value>, ApiError> {
    let page = params.with_fixed_size(QUESTIONS_PER_PAGE);
    let questions = QuestionRepo::new(&state.pool).list(page).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = CategoryRepo::new(&state.pool).list().await?;

    Ok(Json(json!({
        "success": true,
        "questions": questions.items,
        "totalQuestions": questions.total,
        "categories": categories,
        "currentCategory": null,
    })))
}

/// POST /questions - create when question fields are sent, search on `searchTerm`
async fn post_questions(
    State(state): State<Arc<AppState>>,
    PageQuery(params): PageQuery,
    JsonBody(body): JsonBody<QuestionsPost>,
) -> Result<Json<Value>, ApiError> {
    let repo = QuestionRepo::new(&state.pool);

    match body.intent() {
        QuestionsIntent::Create => {
            let question = body.to_new_question()?;
            let created = repo.create(&question).await?;
            tracing::info!(question_id = created.id, category = created.category, "Question created");

            Ok(Json(json!({
                "success": true,
                "created": created.id,
            })))
        }
        QuestionsIntent::Search(term) => {
            let page = params.with_fixed_size(QUESTIONS_PER_PAGE);
            let found = repo.search(&term, page).await?;
            tracing::debug!(term = %term, total = found.total, "Question search");

            Ok(Json(json!({
                "success": true,
                "questions": found.items,
                "totalQuestions": found.total,
                "currentCategory": null,
            })))
        }
        QuestionsIntent::Unknown => Err(ApiError::bad_request(
            "expected question fields or searchTerm",
        )),
    }
}

/// DELETE /questions/{id}
async fn delete_question(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Value>, ApiError> {
    QuestionRepo::new(&state.pool).delete(id).await?;
    tracing::info!(question_id = id, "Question deleted");

    Ok(Json(json!({
        "success": true,
        "deleted": id,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{id}", delete(delete_question))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{get, json_request, router, send_json};
    use crate::app::App;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn neither_create_nor_search_is_400() {
        let (status, body) =
            send_json(router(App::Trivia), json_request("POST", "/questions", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 400);
    }

    #[tokio::test]
    async fn incomplete_question_is_422() {
        let (status, body) = send_json(
            router(App::Trivia),
            json_request("POST", "/questions", r#"{"question": "What is 2 + 2?"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "unprocessable");
    }

    #[tokio::test]
    async fn out_of_range_difficulty_is_422() {
        let (status, _) = send_json(
            router(App::Trivia),
            json_request(
                "POST",
                "/questions",
                r#"{"question": "q", "answer": "a", "difficulty": 7, "category": "1"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, _) =
            send_json(router(App::Trivia), json_request("POST", "/questions", "{nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_bad_id_is_404() {
        let (status, body) =
            send_json(router(App::Trivia), json_request("DELETE", "/questions/abc", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "resource not found");
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let (status, body) =
            send_json(router(App::Trivia), json_request("PATCH", "/questions", "{}")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["message"], "method not allowed");
    }

    #[tokio::test]
    async fn bad_page_is_400() {
        let (status, _) = send_json(router(App::Trivia), get("/questions?page=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
