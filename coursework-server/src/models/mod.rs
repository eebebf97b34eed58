//! Domain models with validation at construction
//!
//! All user input is validated when converting request bodies and forms
//! into these types. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod pagination;
pub mod fields;
pub mod venue;
pub mod artist;
pub mod show;
pub mod question;
pub mod drink;

pub use validation::{FormErrors, ValidationError};
pub use pagination::{Pagination, Paginated, PaginationParams};
pub use venue::{NewVenue, VenueForm};
pub use artist::{ArtistForm, NewArtist};
pub use show::{partition_by_time, NewShow, Scheduled, ShowForm};
pub use question::{
    Category, NewQuestion, Question, QuestionsIntent, QuestionsPost, QuizCategory, QuizRequest,
};
pub use drink::{
    drink_title, CreateDrinkRequest, DrinkChanges, DrinkLong, DrinkShort, Ingredient, RecipeInput,
    UpdateDrinkRequest,
};
