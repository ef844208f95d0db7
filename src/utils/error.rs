use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not enough available seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: u32, available: i32 },

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error")]
    MigrationError(#[from] MigrateError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InsufficientSeats { .. } => "INSUFFICIENT_SEATS",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::MigrationError(_) => "MIGRATION_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// True for failures caused by the caller's input rather than the store.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::NotFound(_)
                | AppError::Conflict(_)
                | AppError::InsufficientSeats { .. }
        )
    }

    /// Rejections log at warn, store and setup failures at error.
    pub fn log(&self) {
        if self.is_rejection() {
            warn!(code = self.code(), message = %self, "Request rejected");
            return;
        }
        match self {
            AppError::DatabaseError(e) => {
                error!(code = self.code(), error = ?e, "Database error");
            }
            AppError::MigrationError(e) => {
                error!(code = self.code(), error = ?e, "Migration error");
            }
            _ => {
                error!(code = self.code(), message = %self, "Application error");
            }
        }
    }

    /// Wraps and logs a failed database call.
    pub(crate) fn logged(err: sqlx::Error) -> Self {
        let err = AppError::DatabaseError(err);
        err.log();
        err
    }

    /// Maps constraint violations on insert to domain errors; anything else
    /// stays a database error.
    pub(crate) fn from_constraint(err: sqlx::Error, unique: &str, foreign_key: &str) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::Conflict(unique.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::NotFound(foreign_key.to_string());
            }
        }
        AppError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_for_not_found_and_database() {
        let not_found = AppError::NotFound("Event with id 7".to_string());
        let database = AppError::DatabaseError(sqlx::Error::PoolTimedOut);

        assert_eq!(not_found.code(), "NOT_FOUND");
        assert_eq!(database.code(), "DATABASE_ERROR");
        assert!(not_found.is_rejection());
        assert!(!database.is_rejection());
    }

    #[test]
    fn test_insufficient_seats_message() {
        let err = AppError::InsufficientSeats {
            requested: 5,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Not enough available seats: requested 5, available 3"
        );
        assert_eq!(err.code(), "INSUFFICIENT_SEATS");
    }

    #[test]
    fn test_logged_wraps_as_database_error() {
        let err = AppError::logged(sqlx::Error::PoolClosed);
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::PoolClosed)));
        assert!(!err.is_rejection());
        assert!(AppError::Conflict("taken".to_string()).is_rejection());
    }

    #[test]
    fn test_from_constraint_passes_through_other_errors() {
        let err = AppError::from_constraint(sqlx::Error::RowNotFound, "dup", "missing");
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::RowNotFound)));
    }
}
