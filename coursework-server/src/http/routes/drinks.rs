//! Coffee shop drinks
//!
//! The public menu hides ingredient names; everything else needs a bearer
//! token carrying the matching permission.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::repos::DrinkRepo;
use crate::http::auth::{Authorized, Permission};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::AppState;
use crate::models::{
    drink_title, CreateDrinkRequest, DrinkLong, DrinkShort, UpdateDrinkRequest, ValidationError,
};

pub struct GetDrinksDetail;
pub struct PostDrinks;
pub struct PatchDrinks;
pub struct DeleteDrinks;

impl Permission for GetDrinksDetail {
    const NAME: &'static str = "get:drinks-detail";
}

impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}

impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}

impl Permission for DeleteDrinks {
    const NAME: &'static str = "delete:drinks";
}

fn drinks_response(drinks: Vec<DrinkLong>) -> Json<Value> {
    Json(json!({
        "success": true,
        "drinks": drinks,
    }))
}

/// GET /drinks - public menu
async fn list_drinks(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let drinks: Vec<DrinkShort> = DrinkRepo::new(&state.pool)
        .list()
        .await?
        .iter()
        .map(DrinkLong::short)
        .collect();

    Ok(Json(json!({
        "success": true,
        "drinks": drinks,
    })))
}

/// GET /drinks-detail
async fn list_drinks_detail(
    _auth: Authorized<GetDrinksDetail>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let drinks = DrinkRepo::new(&state.pool).list().await?;
    Ok(drinks_response(drinks))
}

/// POST /drinks
async fn create_drink(
    auth: Authorized<PostDrinks>,
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateDrinkRequest>,
) -> Result<Json<Value>, ApiError> {
    let title = drink_title(
        req.title
            .as_deref()
            .ok_or(ValidationError::Missing { field: "title" })?,
    )?;
    let recipe = req
        .recipe
        .ok_or(ValidationError::Missing { field: "recipe" })?
        .into_recipe()?;

    let drink = DrinkRepo::new(&state.pool).create(&title, &recipe).await?;
    tracing::info!(drink_id = drink.id, sub = ?auth.claims.sub, "Drink created");

    Ok(drinks_response(vec![drink]))
}

/// PATCH /drinks/{id}
async fn update_drink(
    auth: Authorized<PatchDrinks>,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<UpdateDrinkRequest>,
) -> Result<Json<Value>, ApiError> {
    let repo = DrinkRepo::new(&state.pool);
    repo.get(id).await?;

    let changes = req.into_changes().map_err(|e| match e {
        ValidationError::Missing { .. } => ApiError::bad_request(e.to_string()),
        other => other.into(),
    })?;

    let drink = repo.update(id, &changes).await?;
    tracing::info!(drink_id = id, sub = ?auth.claims.sub, "Drink updated");

    Ok(drinks_response(vec![drink]))
}

/// DELETE /drinks/{id}
async fn delete_drink(
    auth: Authorized<DeleteDrinks>,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Value>, ApiError> {
    DrinkRepo::new(&state.pool).delete(id).await?;
    tracing::info!(drink_id = id, sub = ?auth.claims.sub, "Drink deleted");

    Ok(Json(json!({
        "success": true,
        "delete": id,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drinks", get(list_drinks).post(create_drink))
        .route("/drinks-detail", get(list_drinks_detail))
        .route("/drinks/{id}", patch(update_drink).delete(delete_drink))
}


#[cfg(test)]
mod db_tests {
    use super::super::testing::{get, send_json};
    use crate::app::App;
    use crate::http::auth::tests::{in_one_hour, sign, SECRET};
    use crate::http::auth::JwtVerifier;
    use crate::http::server::{build_router, AppState};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;

    // Run with: DATABASE_URL=... cargo test -p coursework-server -- --ignored

    async fn router() -> axum::Router {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.unwrap();
        crate::db::migrations::run(&pool, App::Coffee).await.unwrap();
        crate::db::seed::run(&pool, App::Coffee).await.unwrap();
        build_router(AppState::new(pool, App::Coffee).with_verifier(Some(JwtVerifier::hs256(SECRET))))
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn public_menu_hides_ingredient_names() {
        let (status, body) = send_json(router().await, get("/drinks")).await;
        assert_eq!(status, StatusCode::OK);
        let drinks = body["drinks"].as_array().unwrap();
        assert!(!drinks.is_empty());
        assert!(drinks[0]["recipe"][0].get("name").is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn manager_creates_and_deletes() {
        let token = sign(json!({
            "exp": in_one_hour(),
            "permissions": ["post:drinks", "delete:drinks"],
        }));
        let title = format!("Cortado {}", rand::random::<u32>());
        let create = Request::builder()
            .method("POST")
            .uri("/drinks")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"title": title, "recipe": [{"name": "milk", "color": "white", "parts": 1}]})
                    .to_string(),
            ))
            .unwrap();
        let (status, body) = send_json(router().await, create).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["drinks"][0]["recipe"][0]["name"], "milk");
        let id = body["drinks"][0]["id"].as_i64().unwrap();

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/drinks/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send_json(router().await, delete).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["delete"], id);
    }
}
