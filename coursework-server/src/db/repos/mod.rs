//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Maps constraint violations to DbError instead of check-then-insert
//! - Uses transactions for multi-step operations

pub mod venues;
pub mod artists;
pub mod shows;
pub mod categories;
pub mod questions;
pub mod drinks;

pub use venues::{group_by_area, Area, Venue, VenueRepo, VenueShow, VenueSummary};
pub use artists::{Artist, ArtistRepo, ArtistShow, ArtistSummary};
pub use shows::{Show, ShowListing, ShowRepo};
pub use categories::CategoryRepo;
pub use questions::QuestionRepo;
pub use drinks::DrinkRepo;

/// Escape `%`, `_` and `\` so a search term matches literally inside
/// `ILIKE '%' || $1 || '%' ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
