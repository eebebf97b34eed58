//! Which coursework application a server process runs

use std::fmt;
use std::str::FromStr;

/// The three independent applications served by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum App {
    /// Venue/artist/show booking site (HTML)
    Fyyur,
    /// Trivia question API (JSON)
    Trivia,
    /// Coffee shop drink API (JSON, JWT permissions)
    Coffee,
}

impl App {
    pub const ALL: [App; 3] = [App::Fyyur, App::Trivia, App::Coffee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fyyur => "fyyur",
            Self::Trivia => "trivia",
            Self::Coffee => "coffee",
        }
    }

    /// Whether errors are rendered as HTML pages instead of JSON
    pub fn renders_html(&self) -> bool {
        matches!(self, Self::Fyyur)
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown app '{0}' (expected fyyur, trivia or coffee)")]
pub struct UnknownApp(String);

impl FromStr for App {
    type Err = UnknownApp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fyyur" => Ok(Self::Fyyur),
            "trivia" => Ok(Self::Trivia),
            "coffee" | "coffee-shop" => Ok(Self::Coffee),
            _ => Err(UnknownApp(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        for app in App::ALL {
            assert_eq!(app.as_str().parse::<App>().unwrap(), app);
        }
        assert_eq!("Coffee-Shop".parse::<App>().unwrap(), App::Coffee);
        assert!("blog".parse::<App>().is_err());
    }

    #[test]
    fn only_fyyur_renders_html() {
        assert!(App::Fyyur.renders_html());
        assert!(!App::Trivia.renders_html());
        assert!(!App::Coffee.renders_html());
    }
}
