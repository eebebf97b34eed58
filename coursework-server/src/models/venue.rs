//! Venue listing form and validated insert/update payload

use serde::{Deserialize, Serialize};

use super::fields::{self, LINK_LEN, SHORT_TEXT_LEN};
use super::FormErrors;

/// Maximum length for venue and artist names
pub const MAX_NAME_LEN: usize = 120;

/// Raw `application/x-www-form-urlencoded` venue form.
///
/// `genres` is a repeated key; `seeking_talent` is a checkbox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

/// Validated venue fields, ready for INSERT or UPDATE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
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

impl VenueForm {
    /// Display name for flash messages, even when the form is invalid.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<NewVenue, FormErrors> {
        let mut errors = FormErrors::new();

        let name = errors.check(fields::required_text("name", self.name.as_deref(), MAX_NAME_LEN));
        let city = errors.check(fields::required_text("city", self.city.as_deref(), SHORT_TEXT_LEN));
        let state = errors.check(fields::state(self.state.as_deref()));
        let address = errors.check(fields::required_text(
            "address",
            self.address.as_deref(),
            SHORT_TEXT_LEN,
        ));
        let phone = errors.check(fields::phone(self.phone.as_deref()));
        let genres = errors.check(fields::genres(&self.genres));
        let image_link = errors.check(fields::link("image_link", self.image_link.as_deref(), LINK_LEN));
        let facebook_link = errors.check(fields::link(
            "facebook_link",
            self.facebook_link.as_deref(),
            SHORT_TEXT_LEN,
        ));
        let website_link = errors.check(fields::link(
            "website_link",
            self.website_link.as_deref(),
            SHORT_TEXT_LEN,
        ));
        let seeking_description = errors.check(fields::optional_text(
            "seeking_description",
            self.seeking_description.as_deref(),
            LINK_LEN,
        ));

        match (
            name,
            city,
            state,
            address,
            phone,
            genres,
            image_link,
            facebook_link,
            website_link,
            seeking_description,
        ) {
            (
                Some(name),
                Some(city),
                Some(state),
                Some(address),
                Some(phone),
                Some(genres),
                Some(image_link),
                Some(facebook_link),
                Some(website_link),
                Some(seeking_description),
            ) if errors.is_empty() => Ok(NewVenue {
                name,
                city,
                state,
                address,
                phone,
                genres,
                image_link,
                facebook_link,
                website_link,
                seeking_talent: fields::checkbox(self.seeking_talent.as_deref()),
                seeking_description,
            }),
            _ => Err(errors),
        }
    }
}
