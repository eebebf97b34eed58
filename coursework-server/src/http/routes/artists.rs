//! Artist pages

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
use crate::db::repos::{Artist, ArtistRepo, ArtistShow};
use crate::http::error::ApiError;
use crate::http::extractors::{PageId, ValidId};
use crate::http::page::{self, PageError};
use crate::http::server::AppState;
use crate::models::fields::{GENRES, STATES};
use crate::models::{partition_by_time, ArtistForm};

/// Artist with their shows split at request time
#[derive(Serialize)]
struct ArtistDetail {
    #[serde(flatten)]
    artist: Artist,
    past_shows: Vec<ArtistShow>,
    upcoming_shows: Vec<ArtistShow>,
    past_shows_count: usize,
    upcoming_shows_count: usize,
}

fn form_page(
    status: StatusCode,
    heading: &str,
    action: &str,
    form: &ArtistForm,
    errors: Vec<String>,
) -> Result<Response, PageError> {
    page::render_status(
        status,
        "forms/artist.html",
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

/// GET /artists
async fn list_artists(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let artists = ArtistRepo::new(&state.pool).list(Utc::now()).await?;
    page::render("artists.html", context! { artists })
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let data = ArtistRepo::new(&state.pool)
        .search(&form.search_term, Utc::now())
        .await?;

    page::render(
        "search.html",
        context! {
            kind => "artists",
            search_term => form.search_term,
            results => context! { count => data.len(), data },
        },
    )
}

/// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    PageId(id): PageId,
) -> Result<Html<String>, PageError> {
    let repo = ArtistRepo::new(&state.pool);
    let artist = repo.get(id).await?;
    let shows = repo.shows_for_artist(id).await?;
    let (past_shows, upcoming_shows) = partition_by_time(shows, Utc::now());

    let artist = ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    };
    page::render("show_artist.html", context! { artist })
}

/// GET /artists/create
async fn create_artist_form() -> Result<Response, PageError> {
    form_page(
        StatusCode::OK,
        "List a new artist",
        "/artists/create",
        &ArtistForm::default(),
        Vec::new(),
    )
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, PageError> {
    let artist = match form.validate() {
        Ok(artist) => artist,
        Err(errors) => {
            return form_page(
                StatusCode::BAD_REQUEST,
                "List a new artist",
                "/artists/create",
                &form,
                errors.messages(),
            )
        }
    };

    match ArtistRepo::new(&state.pool).create(&artist).await {
        Ok(created) => {
            tracing::info!(artist_id = created.id, "Artist listed");
            page::home_with_flash(
                StatusCode::OK,
                format!("Artist {} was successfully listed!", created.name),
            )
        }
        Err(e) => {
            tracing::error!(artist = form.display_name(), "Artist insert failed: {}", e);
            page::home_with_flash(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "An error occurred. Artist {} could not be listed.",
                    form.display_name()
                ),
            )
        }
    }
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    PageId(id): PageId,
) -> Result<Response, PageError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;
    form_page(
        StatusCode::OK,
        "Edit artist",
        &format!("/artists/{id}/edit"),
        &ArtistForm::from(&artist),
        Vec::new(),
    )
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    PageId(id): PageId,
    Form(form): Form<ArtistForm>,
) -> Result<Response, PageError> {
    let artist = match form.validate() {
        Ok(artist) => artist,
        Err(errors) => {
            return form_page(
                StatusCode::BAD_REQUEST,
                "Edit artist",
                &format!("/artists/{id}/edit"),
                &form,
                errors.messages(),
            )
        }
    };

    ArtistRepo::new(&state.pool).update(id, &artist).await?;
    tracing::info!(artist_id = id, "Artist updated");
    Ok(Redirect::to(&format!("/artists/{id}")).into_response())
}

/// DELETE /artists/{id} - called from the detail page script
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Value>, ApiError> {
    ArtistRepo::new(&state.pool).delete(id).await?;
    tracing::info!(artist_id = id, "Artist deleted");
    Ok(Json(json!({ "success": true, "redirect": "/" })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist).delete(delete_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
