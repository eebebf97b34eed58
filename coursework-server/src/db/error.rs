/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Unique constraint violated (e.g. duplicate drink title)
    #[error("conflict: {constraint}")]
    Conflict { constraint: String },

    /// Referenced row does not exist (e.g. show for an unknown artist)
    #[error("missing reference: {constraint}")]
    ForeignKey { constraint: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let constraint = db.constraint().unwrap_or("unknown").to_owned();
            if db.is_unique_violation() {
                return Self::Conflict { constraint };
            }
            if db.is_foreign_key_violation() {
                return Self::ForeignKey { constraint };
            }
        }
        Self::Sqlx(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_stays_sqlx() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("venue", 7);
        assert_eq!(err.to_string(), "not found: venue '7'");
    }
}
