//! Show form parsing and past/upcoming classification

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FormErrors, ValidationError};

/// Accepted `start_time` layouts, tried in order after RFC 3339.
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Raw show form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowForm {
    pub artist_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_time: Option<String>,
}

/// Validated show fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    pub fn validate(&self) -> Result<NewShow, FormErrors> {
        let mut errors = FormErrors::new();

        let artist_id = errors.check(parse_id("artist_id", self.artist_id.as_deref()));
        let venue_id = errors.check(parse_id("venue_id", self.venue_id.as_deref()));
        let start_time = errors.check(parse_start_time(self.start_time.as_deref()));

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_id(field: &'static str, value: Option<&str>) -> Result<i32, ValidationError> {
    let raw = value.map(str::trim).ok_or(ValidationError::Missing { field })?;
    if raw.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive number",
        }),
    }
}

/// Parse a submitted start time; naive times are taken as UTC.
pub fn parse_start_time(value: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    const FIELD: &str = "start_time";

    let raw = value.map(str::trim).ok_or(ValidationError::Missing { field: FIELD })?;
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidFormat {
            field: FIELD,
            reason: "expected YYYY-MM-DD HH:MM:SS",
        })
}

/// Anything with a start time can be split into past and upcoming.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

/// Split into (past, upcoming) relative to `now`; a show starting exactly
/// at `now` counts as past. Input order is preserved within each half.
pub fn partition_by_time<T: Scheduled>(shows: Vec<T>, now: DateTime<Utc>) -> (Vec<T>, Vec<T>) {
    shows.into_iter().partition(|s| s.start_time() <= now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct At(DateTime<Utc>);

    impl Scheduled for At {
        fn start_time(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn parses_form_layouts() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        for raw in [
            "2035-04-01 20:00:00",
            "2035-04-01 20:00",
            "2035-04-01T20:00",
            "2035-04-01T20:00:00.000Z",
            "2035-04-01T22:00:00+02:00",
        ] {
            assert_eq!(parse_start_time(Some(raw)).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_garbage_time() {
        assert!(matches!(
            parse_start_time(Some("next tuesday")).unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert_eq!(
            parse_start_time(None).unwrap_err(),
            ValidationError::Missing { field: "start_time" }
        );
    }

    #[test]
    fn show_form_validation() {
        let form = ShowForm {
            artist_id: Some("4".into()),
            venue_id: Some("1".into()),
            start_time: Some("2019-05-21 21:30:00".into()),
        };
        let show = form.validate().unwrap();
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 1);

        let form = ShowForm {
            artist_id: Some("abc".into()),
            venue_id: Some("-1".into()),
            start_time: None,
        };
        let fields: Vec<_> = form.validate().unwrap_err().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["artist_id", "venue_id", "start_time"]);
    }

    #[test]
    fn partition_splits_on_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let shows = vec![
            At(Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap()),
            At(Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap()),
            At(now),
            At(Utc.with_ymd_and_hms(2035, 4, 8, 20, 0, 0).unwrap()),
        ];

        let (past, upcoming) = partition_by_time(shows, now);
        assert_eq!(past.len(), 2);
        assert_eq!(upcoming.len(), 2);
        assert!(upcoming[0].0 < upcoming[1].0);
    }
}
