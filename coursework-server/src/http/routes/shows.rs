//! Show listing and booking

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Response};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::Form;
use minijinja::context;

use crate::db::repos::ShowRepo;
use crate::db::DbError;
use crate::http::page::{self, PageError};
use crate::http::server::AppState;
use crate::models::ShowForm;

fn form_page(status: StatusCode, form: &ShowForm, errors: Vec<String>) -> Result<Response, PageError> {
    page::render_status(status, "forms/show.html", context! { form, errors })
}

/// GET /shows
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let shows = ShowRepo::new(&state.pool).list().await?;
    page::render("shows.html", context! { shows })
}

/// GET /shows/create
async fn create_show_form() -> Result<Response, PageError> {
    form_page(StatusCode::OK, &ShowForm::default(), Vec::new())
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> Result<Response, PageError> {
    let show = match form.validate() {
        Ok(show) => show,
        Err(errors) => return form_page(StatusCode::BAD_REQUEST, &form, errors.messages()),
    };

    match ShowRepo::new(&state.pool).create(&show).await {
        Ok(created) => {
            tracing::info!(
                show_id = created.id,
                artist_id = created.artist_id,
                venue_id = created.venue_id,
                "Show listed"
            );
            page::home_with_flash(StatusCode::OK, "Show was successfully listed!".to_string())
        }
        Err(DbError::ForeignKey { constraint }) => {
            tracing::debug!(%constraint, "Show references a missing artist or venue");
            form_page(
                StatusCode::BAD_REQUEST,
                &form,
                vec!["No artist or venue exists with that ID.".to_string()],
            )
        }
        Err(e) => {
            tracing::error!("Show insert failed: {}", e);
            page::home_with_flash(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred. Show could not be listed.".to_string(),
            )
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{form_request, get, router, send};
    use crate::app::App;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn create_form_renders() {
        let (status, body) = send(router(App::Fyyur), get("/shows/create")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"name="start_time""#));
    }

    #[tokio::test]
    async fn bad_start_time_rerenders_form() {
        let (status, body) = send(
            router(App::Fyyur),
            form_request("/shows/create", "artist_id=1&venue_id=2&start_time=soon"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("start_time: expected"));
        assert!(body.contains(r#"value="soon""#));
    }

    #[tokio::test]
    async fn non_numeric_ids_rejected() {
        let (status, body) = send(
            router(App::Fyyur),
            form_request("/shows/create", "artist_id=abc&venue_id=2&start_time=2035-01-01+20%3A00"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("artist_id: must be a positive number"));
    }
}
