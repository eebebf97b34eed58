//! Show repository - the artist/venue join table

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::NewShow;

/// Show record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Show {
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

/// Show with both sides of the join resolved, for `/shows`
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every show, soonest first.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                v.id AS venue_id,
                v.name AS venue_name,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a show. Unknown artist or venue surfaces as `DbError::ForeignKey`.
    pub async fn create(&self, show: &NewShow) -> Result<Show, DbError> {
        let created = sqlx::query_as(
            r#"
            INSERT INTO shows (artist_id, venue_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, artist_id, venue_id, start_time
            "#,
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::db::repos::{ArtistRepo, VenueRepo};
    use crate::models::{NewArtist, NewVenue};
    use chrono::Duration;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p coursework-server -- --ignored

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool, App::Fyyur).await.expect("migrations");
        pool
    }

    fn venue() -> NewVenue {
        NewVenue {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: None,
            genres: vec!["Jazz".into()],
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn artist() -> NewArtist {
        NewArtist {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: None,
            genres: vec!["Rock n Roll".into()],
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_venue: true,
            seeking_description: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn detail_shows_only_belong_to_venue() {
        let pool = pool().await;
        let venue_a = VenueRepo::new(&pool).create(&venue()).await.unwrap();
        let venue_b = VenueRepo::new(&pool).create(&venue()).await.unwrap();
        let artist = ArtistRepo::new(&pool).create(&artist()).await.unwrap();

        let shows = ShowRepo::new(&pool);
        shows
            .create(&NewShow {
                artist_id: artist.id,
                venue_id: venue_a.id,
                start_time: Utc::now() + Duration::days(30),
            })
            .await
            .unwrap();

        assert_eq!(VenueRepo::new(&pool).shows_for_venue(venue_a.id).await.unwrap().len(), 1);
        assert!(VenueRepo::new(&pool).shows_for_venue(venue_b.id).await.unwrap().is_empty());
        assert_eq!(ArtistRepo::new(&pool).shows_for_artist(artist.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_venue_cascades_to_shows() {
        let pool = pool().await;
        let venue = VenueRepo::new(&pool).create(&venue()).await.unwrap();
        let artist = ArtistRepo::new(&pool).create(&artist()).await.unwrap();
        ShowRepo::new(&pool)
            .create(&NewShow {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: Utc::now(),
            })
            .await
            .unwrap();

        VenueRepo::new(&pool).delete(venue.id).await.unwrap();
        assert!(ArtistRepo::new(&pool).shows_for_artist(artist.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_artist_is_foreign_key_error() {
        let pool = pool().await;
        let venue = VenueRepo::new(&pool).create(&venue()).await.unwrap();

        let err = ShowRepo::new(&pool)
            .create(&NewShow {
                artist_id: i32::MAX,
                venue_id: venue.id,
                start_time: Utc::now(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }));
    }
}
