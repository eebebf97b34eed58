//! Artist listing form and validated insert/update payload

use serde::{Deserialize, Serialize};

use super::fields::{self, LINK_LEN, SHORT_TEXT_LEN};
use super::venue::MAX_NAME_LEN;
use super::FormErrors;

/// Raw artist form; same shape as the venue form minus `address`,
/// with `seeking_venue` as the checkbox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

/// Validated artist fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
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

impl ArtistForm {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<NewArtist, FormErrors> {
        let mut errors = FormErrors::new();

        let name = errors.check(fields::required_text("name", self.name.as_deref(), MAX_NAME_LEN));
        let city = errors.check(fields::required_text("city", self.city.as_deref(), SHORT_TEXT_LEN));
        let state = errors.check(fields::state(self.state.as_deref()));
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
                Some(phone),
                Some(genres),
                Some(image_link),
                Some(facebook_link),
                Some(website_link),
                Some(seeking_description),
            ) if errors.is_empty() => Ok(NewArtist {
                name,
                city,
                state,
                phone,
                genres,
                image_link,
                facebook_link,
                website_link,
                seeking_venue: fields::checkbox(self.seeking_venue.as_deref()),
                seeking_description,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_artist() {
        let form = ArtistForm {
            name: Some("Guns N Petals".into()),
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            phone: Some("326-123-5000".into()),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: Some("y".into()),
            ..Default::default()
        };

        let artist = form.validate().unwrap();
        assert_eq!(artist.genres, vec!["Rock n Roll"]);
        assert!(artist.seeking_venue);
        assert_eq!(artist.image_link, None);
    }

    #[test]
    fn bad_links_reported_per_field() {
        let form = ArtistForm {
            name: Some("Matt Quevedo".into()),
            city: Some("New York".into()),
            state: Some("NY".into()),
            genres: vec!["Jazz".into()],
            facebook_link: Some("facebook.com/mattquevedo".into()),
            image_link: Some("ftp://images/matt.png".into()),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["image_link", "facebook_link"]);
    }

    #[test]
    fn missing_name_is_the_only_error() {
        let form = ArtistForm {
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            genres: vec!["Jazz".into()],
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name"]);
    }

    #[test]
    fn blank_genres_and_state_rejected_together() {
        let form = ArtistForm {
            name: Some("The Wild Sax Band".into()),
            city: Some("San Francisco".into()),
            state: Some("ZZ".into()),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["state", "genres"]);
    }
}
