//! Venue repository
//!
//! - list: grouped by area with upcoming-show counts in one query
//! - get + shows_for_venue: detail page data
//! - create/update/delete: single statements with RETURNING

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::{NewVenue, Scheduled, VenueForm};
use super::escape_like;

/// Venue record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<&Venue> for VenueForm {
    fn from(v: &Venue) -> Self {
        Self {
            name: Some(v.name.clone()),
            city: Some(v.city.clone()),
            state: Some(v.state.clone()),
            address: Some(v.address.clone()),
            phone: v.phone.clone(),
            genres: v.genres.clone(),
            image_link: v.image_link.clone(),
            facebook_link: v.facebook_link.clone(),
            website_link: v.website_link.clone(),
            seeking_talent: v.seeking_talent.then(|| "y".to_string()),
            seeking_description: v.seeking_description.clone(),
        }
    }
}

/// Venue name with its upcoming show count, for lists and search
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Row of the area listing before grouping
#[derive(Debug, Clone, FromRow)]
pub struct AreaVenueRow {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing a city and state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show at a venue, with the performing artist
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Fold rows ordered by (state, city) into areas.
pub fn group_by_area(rows: Vec<AreaVenueRow>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for row in rows {
        let summary = VenueSummary {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        };
        match areas.last_mut() {
            Some(area) if area.city == row.city && area.state == row.state => {
                area.venues.push(summary);
            }
            _ => areas.push(Area {
                city: row.city,
                state: row.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All venues grouped by area, counting shows after `now`.
    pub async fn list_by_area(&self, now: DateTime<Utc>) -> Result<Vec<Area>, DbError> {
        let rows: Vec<AreaVenueRow> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id, v.name, v.city, v.state
            ORDER BY v.state, v.city, v.name, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(group_by_area(rows))
    }

    /// Case-insensitive substring search on name.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE '%' || $1 || '%' ESCAPE '\'
            GROUP BY v.id, v.name
            ORDER BY v.name, v.id
            "#,
        )
        .bind(escape_like(term.trim()))
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i32) -> Result<Venue, DbError> {
        sqlx::query_as("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    /// Shows at this venue, oldest first.
    pub async fn shows_for_venue(&self, id: i32) -> Result<Vec<VenueShow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, venue: &NewVenue) -> Result<Venue, DbError> {
        let created = sqlx::query_as(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, genres,
                image_link, facebook_link, website_link,
                seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.genres)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Replace every editable field of venue `id`.
    pub async fn update(&self, id: i32, venue: &NewVenue) -> Result<Venue, DbError> {
        sqlx::query_as(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                genres = $7,
                image_link = $8,
                facebook_link = $9,
                website_link = $10,
                seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.genres)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))
    }

    /// Delete venue `id`; its shows go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("venue", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, name: &str, city: &str, state: &str, upcoming: i64) -> AreaVenueRow {
        AreaVenueRow {
            id,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            num_upcoming_shows: upcoming,
        }
    }

    #[test]
    fn groups_consecutive_rows() {
        let areas = group_by_area(vec![
            row(1, "The Musical Hop", "San Francisco", "CA", 0),
            row(3, "Park Square Live Music & Coffee", "San Francisco", "CA", 1),
            row(2, "The Dueling Pianos Bar", "New York", "NY", 0),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 1);
        assert_eq!(areas[1].state, "NY");
    }

    #[test]
    fn same_city_different_state_is_separate() {
        let areas = group_by_area(vec![
            row(1, "A", "Portland", "ME", 0),
            row(2, "B", "Portland", "OR", 0),
        ]);
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(group_by_area(Vec::new()).is_empty());
    }

    #[test]
    fn form_from_venue_checks_box() {
        let venue = Venue {
            id: 1,
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: None,
            genres: vec!["Jazz".into()],
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_talent: true,
            seeking_description: None,
        };
        let form = VenueForm::from(&venue);
        assert_eq!(form.seeking_talent.as_deref(), Some("y"));
        assert!(form.validate().is_ok());
    }
}
