//! HTML templates for the booking site
//!
//! Templates are compiled into the binary and loaded into one shared
//! minijinja environment on first use.

use chrono::{DateTime, Utc};
use minijinja::{Environment, ErrorKind};
use once_cell::sync::Lazy;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("venues.html", include_str!("../../templates/venues.html")),
    ("show_venue.html", include_str!("../../templates/show_venue.html")),
    ("artists.html", include_str!("../../templates/artists.html")),
    ("show_artist.html", include_str!("../../templates/show_artist.html")),
    ("search.html", include_str!("../../templates/search.html")),
    ("shows.html", include_str!("../../templates/shows.html")),
    ("forms/venue.html", include_str!("../../templates/forms/venue.html")),
    ("forms/artist.html", include_str!("../../templates/forms/artist.html")),
    ("forms/show.html", include_str!("../../templates/forms/show.html")),
    ("errors/404.html", include_str!("../../templates/errors/404.html")),
    ("errors/500.html", include_str!("../../templates/errors/500.html")),
];

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_filter("datetime", datetime);
    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, "Template failed to compile: {}", e);
        }
    }
    env
});

/// Render template `name` with `ctx`.
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, minijinja::Error> {
    ENV.get_template(name)?.render(ctx)
}

/// Format an RFC 3339 timestamp.
///
/// - `full`: `Wednesday May, 21, 2019 at 9:30PM`
/// - `medium` (default): `Wed 05, 21, 2019 9:30PM`
pub fn datetime(value: String, format: Option<String>) -> Result<String, minijinja::Error> {
    let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            minijinja::Error::new(ErrorKind::InvalidOperation, "not an RFC 3339 timestamp")
                .with_source(e)
        })?;

    let pattern = match format.as_deref().unwrap_or("medium") {
        "full" => "%A %B, %-d, %Y at %-I:%M%p",
        "medium" => "%a %m, %d, %Y %-I:%M%p",
        other => {
            return Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("unknown datetime format '{other}'"),
            ))
        }
    };

    Ok(parsed.format(pattern).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn datetime_formats() {
        let value = "2019-05-21T21:30:00Z".to_string();
        assert_eq!(
            datetime(value.clone(), Some("full".into())).unwrap(),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
        assert_eq!(datetime(value, None).unwrap(), "Tue 05, 21, 2019 9:30PM");
    }

    #[test]
    fn datetime_rejects_unknown_format() {
        assert!(datetime("2019-05-21T21:30:00Z".into(), Some("short".into())).is_err());
        assert!(datetime("yesterday".into(), None).is_err());
    }

    #[test]
    fn every_template_compiles() {
        for (name, _) in TEMPLATES {
            assert!(ENV.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn home_renders_flash() {
        let html = render(
            "home.html",
            context! { flash => vec!["Venue The Musical Hop was successfully listed!"] },
        )
        .unwrap();
        assert!(html.contains("Venue The Musical Hop was successfully listed!"));
    }

    #[test]
    fn detail_pages_wire_delete_buttons() {
        let html = render(
            "show_venue.html",
            context! { venue => context! { id => 7, name => "The Musical Hop" } },
        )
        .unwrap();
        assert!(html.contains(r#"data-delete="/venues/7""#));
        assert!(html.contains("button.dataset.delete, { method: \"DELETE\" }"));
        assert!(html.contains("body.redirect"));

        let html = render(
            "show_artist.html",
            context! { artist => context! { id => 4, name => "Guns N Petals" } },
        )
        .unwrap();
        assert!(html.contains(r#"data-delete="/artists/4""#));
        assert!(html.contains("button.dataset.delete"));
    }

    #[test]
    fn error_pages_render() {
        assert!(render("errors/404.html", context! {}).unwrap().contains("404"));
        assert!(render("errors/500.html", context! {}).unwrap().contains("500"));
    }
}
