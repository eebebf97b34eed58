//! Artist repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::{ArtistForm, NewArtist, Scheduled};
use super::escape_like;

/// Artist record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<&Artist> for ArtistForm {
    fn from(a: &Artist) -> Self {
        Self {
            name: Some(a.name.clone()),
            city: Some(a.city.clone()),
            state: Some(a.state.clone()),
            phone: a.phone.clone(),
            genres: a.genres.clone(),
            image_link: a.image_link.clone(),
            facebook_link: a.facebook_link.clone(),
            website_link: a.website_link.clone(),
            seeking_venue: a.seeking_venue.then(|| "y".to_string()),
            seeking_description: a.seeking_description.clone(),
        }
    }
}

/// Artist name with upcoming show count
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A show by an artist, with the hosting venue
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT
        a.id,
        a.name,
        COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
    FROM artists a
    LEFT JOIN shows s ON s.artist_id = a.id
"#;

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every artist, alphabetical.
    pub async fn list(&self, now: DateTime<Utc>) -> Result<Vec<ArtistSummary>, DbError> {
        let query = format!("{SUMMARY_SELECT} GROUP BY a.id, a.name ORDER BY a.name, a.id");
        let rows = sqlx::query_as(&query)
            .bind(now)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Case-insensitive substring search on name.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSummary>, DbError> {
        let query = format!(
            r"{SUMMARY_SELECT} WHERE a.name ILIKE '%' || $2 || '%' ESCAPE '\'
               GROUP BY a.id, a.name ORDER BY a.name, a.id"
        );
        let rows = sqlx::query_as(&query)
            .bind(now)
            .bind(escape_like(term.trim()))
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Artist, DbError> {
        sqlx::query_as("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("artist", id))
    }

    /// Shows by this artist, oldest first.
    pub async fn shows_for_artist(&self, id: i32) -> Result<Vec<ArtistShow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, artist: &NewArtist) -> Result<Artist, DbError> {
        let created = sqlx::query_as(
            r#"
            INSERT INTO artists (
                name, city, state, phone, genres,
                image_link, facebook_link, website_link,
                seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.genres)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, artist: &NewArtist) -> Result<Artist, DbError> {
        sqlx::query_as(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                genres = $6,
                image_link = $7,
                facebook_link = $8,
                website_link = $9,
                seeking_venue = $10,
                seeking_description = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.genres)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("artist", id));
        }
        Ok(())
    }
}
