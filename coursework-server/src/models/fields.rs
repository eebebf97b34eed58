//! Field-level validators shared by the listing forms

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Limit for short text columns (city, address, phone, links)
pub const SHORT_TEXT_LEN: usize = 120;

/// Limit for image links
pub const LINK_LEN: usize = 500;

/// Genres offered by the listing forms
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Two-letter state codes offered by the listing forms
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("invalid phone regex"));

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("invalid link regex"));

/// Trimmed, non-empty, bounded text.
pub fn required_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(value.to_owned())
}

/// Trimmed, bounded text where blank means absent.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        Some(v) => Ok(Some(v.to_owned())),
    }
}

/// Optional phone number in `XXX-XXX-XXXX` form.
pub fn phone(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(phone) = optional_text("phone", value, SHORT_TEXT_LEN)? else {
        return Ok(None);
    };

    if !PHONE_RE.is_match(&phone) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            reason: "must look like 123-456-7890",
        });
    }

    Ok(Some(phone))
}

/// Optional http(s) link.
pub fn link(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(url) = optional_text(field, value, max)? else {
        return Ok(None);
    };

    if !LINK_RE.is_match(&url) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an http:// or https:// link",
        });
    }

    Ok(Some(url))
}

/// Two-letter state code from [`STATES`], case-insensitive.
pub fn state(value: Option<&str>) -> Result<String, ValidationError> {
    let code = required_text("state", value, 2)
        .map_err(|e| match e {
            ValidationError::TooLong { .. } => ValidationError::InvalidVariant {
                field: "state",
                value: value.unwrap_or_default().to_owned(),
            },
            other => other,
        })?
        .to_uppercase();

    if !STATES.contains(&code.as_str()) {
        return Err(ValidationError::InvalidVariant {
            field: "state",
            value: code,
        });
    }

    Ok(code)
}

/// At least one genre, each from [`GENRES`]; duplicates dropped, order kept.
pub fn genres(values: &[String]) -> Result<Vec<String>, ValidationError> {
    let mut picked: Vec<String> = Vec::with_capacity(values.len());

    for raw in values {
        let genre = raw.trim();
        if genre.is_empty() {
            continue;
        }
        let Some(known) = GENRES.iter().find(|g| g.eq_ignore_ascii_case(genre)) else {
            return Err(ValidationError::InvalidVariant {
                field: "genres",
                value: genre.to_owned(),
            });
        };
        if !picked.iter().any(|p| p == known) {
            picked.push((*known).to_owned());
        }
    }

    if picked.is_empty() {
        return Err(ValidationError::Empty { field: "genres" });
    }

    Ok(picked)
}

/// HTML checkbox: present with any value except "false"/"n"/"off" means checked.
pub fn checkbox(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => false,
        Some(v) => !matches!(v.as_str(), "" | "false" | "n" | "no" | "off" | "0"),
    }
}
