//! Venue pages

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::Form;
use chrono::Utc;
use minijinja::context;
use serde::Serialize;
use serde_json::{json, Value};

use super::SearchForm;
use crate::db::repos::{Venue, VenueRepo, VenueShow};
use crate::http::error::ApiError;
use crate::http::extractors::{PageId, ValidId};
use crate::http::page::{self, PageError};
use crate::http::server::AppState;
use crate::models::fields::{GENRES, STATES};
use crate::models::{partition_by_time, VenueForm};

/// Venue with its shows split at request time
#[derive(Serialize)]
struct VenueDetail {
    #[serde(flatten)]
    venue: Venue,
    past_shows: Vec<VenueShow>,
    upcoming_shows: Vec<VenueShow>,
    past_shows_count: usize,
    upcoming_shows_count: usize,
}

fn form_page(
    status: StatusCode,
    heading: &str,
    action: &str,
    form: &VenueForm,
    errors: Vec<String>,
) -> Result<Response, PageError> {
    page::render_status(
        status,
        "forms/venue.html",
        context! {
            heading,
            action,
            submit => heading,
            form,
            errors,
            genres => GENRES,
            states => STATES,
        },
    )
}

/// GET /venues - grouped by city and state
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let areas = VenueRepo::new(&state.pool).list_by_area(Utc::now()).await?;
    page::render("venues.html", context! { areas })
}

/// POST /venues/search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let data = VenueRepo::new(&state.pool)
        .search(&form.search_term, Utc::now())
        .await?;

    page::render(
        "search.html",
        context! {
            kind => "venues",
            search_term => form.search_term,
            results => context! { count => data.len(), data },
        },
    )
}

/// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    PageId(id): PageId,
) -> Result<Html<String>, PageError> {
    let repo = VenueRepo::new(&state.pool);
    let venue = repo.get(id).await?;
    let shows = repo.shows_for_venue(id).await?;
    let (past_shows, upcoming_shows) = partition_by_time(shows, Utc::now());

    let venue = VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    };
    page::render("show_venue.html", context! { venue })
}

/// GET /venues/create
async fn create_venue_form() -> Result<Response, PageError> {
    form_page(
        StatusCode::OK,
        "List a new venue",
        "/venues/create",
        &VenueForm::default(),
        Vec::new(),
    )
}

/// POST /venues/create
async fn create_venue(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> Result<Response, PageError> {
    let venue = match form.validate() {
        Ok(venue) => venue,
        Err(errors) => {
            return form_page(
                StatusCode::BAD_REQUEST,
                "List a new venue",
                "/venues/create",
                &form,
                errors.messages(),
            )
        }
    };

    match VenueRepo::new(&state.pool).create(&venue).await {
        Ok(created) => {
            tracing::info!(venue_id = created.id, "Venue listed");
            page::home_with_flash(
                StatusCode::OK,
                format!("Venue {} was successfully listed!", created.name),
            )
        }
        Err(e) => {
            tracing::error!(venue = form.display_name(), "Venue insert failed: {}", e);
            page::home_with_flash(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "An error occurred. Venue {} could not be listed.",
                    form.display_name()
                ),
            )
        }
    }
}

/// GET /venues/{id}/edit
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    PageId(id): PageId,
) -> Result<Response, PageError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;
    form_page(
        StatusCode::OK,
        "Edit venue",
        &format!("/venues/{id}/edit"),
        &VenueForm::from(&venue),
        Vec::new(),
    )
}

/// POST /venues/{id}/edit
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    PageId(id): PageId,
    Form(form): Form<VenueForm>,
) -> Result<Response, PageError> {
    let venue = match form.validate() {
        Ok(venue) => venue,
        Err(errors) => {
            return form_page(
                StatusCode::BAD_REQUEST,
                "Edit venue",
                &format!("/venues/{id}/edit"),
                &form,
                errors.messages(),
            )
        }
    };

    VenueRepo::new(&state.pool).update(id, &venue).await?;
    tracing::info!(venue_id = id, "Venue updated");
    Ok(Redirect::to(&format!("/venues/{id}")).into_response())
}

/// DELETE /venues/{id} - called from the detail page script
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Value>, ApiError> {
    VenueRepo::new(&state.pool).delete(id).await?;
    tracing::info!(venue_id = id, "Venue deleted");
    Ok(Json(json!({ "success": true, "redirect": "/" })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
