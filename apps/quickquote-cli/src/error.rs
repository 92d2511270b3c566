//! # CLI Error Type
//!
//! The one error type every command returns.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in QuickQuote                             │
//! │                                                                         │
//! │  quickquote estimate --project Attic                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<(), CliError>                                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── DbError::NotFound { .. } ────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Core Error? ─── CoreError::UnknownProjectType ── CliError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr:  [UNKNOWN_PROJECT_TYPE] Unknown project type: Attic            │
//! │  --json:  {"code":"UNKNOWN_PROJECT_TYPE","message":"Unknown ..."}       │
//! │  exit status 2                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use quickquote_core::{CoreError, ValidationError};
use quickquote_store::DbError;

use crate::config::ConfigError;

/// Error reported to the user when a command fails.
///
/// ## Serialization
/// Under `--json` this is printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Quote not found: 9f0c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Saved quote or favorite not found
    NotFound,

    /// A flag or stored value failed validation
    ValidationError,

    /// Room size unusable by the estimate engine
    InvalidArea,

    /// Project type missing from the rate table
    UnknownProjectType,

    /// Rate table file could not be parsed or validated
    InvalidRateTable,

    /// Local store operation failed
    DatabaseError,

    /// Environment configuration is invalid
    ConfigError,

    /// Reading or writing a file failed
    IoError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// The code as printed, e.g. `NOT_FOUND`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidArea => "INVALID_AREA",
            ErrorCode::UnknownProjectType => "UNKNOWN_PROJECT_TYPE",
            ErrorCode::InvalidRateTable => "INVALID_RATE_TABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status: `2` for problems with what the user typed,
    /// `1` for everything else.
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorCode::NotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidArea
            | ErrorCode::UnknownProjectType => 2,
            _ => 1,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to CLI errors.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CliError::not_found(&entity, &id),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Could not open the quote database")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization(e) => {
                tracing::error!("Could not encode stored value: {}", e);
                CliError::internal("Could not encode stored value")
            }
            DbError::PoolExhausted => {
                CliError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if !err.is_input_error() {
            tracing::error!("Rate table rejected: {}", err);
        }
        let code = match &err {
            CoreError::InvalidArea { .. } => ErrorCode::InvalidArea,
            CoreError::UnknownProjectType(_) => ErrorCode::UnknownProjectType,
            CoreError::InvalidRateTable { .. } => ErrorCode::InvalidRateTable,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Could not encode output: {}", err))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CliError {}

/// Convenience type alias for command results.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_screaming_code() {
        let err = CliError::not_found("Quote", "abc");
        assert_eq!(err.to_string(), "[NOT_FOUND] Quote not found: abc");
    }

    #[test]
    fn test_json_shape() {
        let err = CliError::validation("size is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "size is required");
    }

    #[test]
    fn test_as_str_matches_serde() {
        for code in [
            ErrorCode::NotFound,
            ErrorCode::InvalidArea,
            ErrorCode::UnknownProjectType,
            ErrorCode::InvalidRateTable,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
            ErrorCode::IoError,
            ErrorCode::Internal,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = CoreError::UnknownProjectType("Attic".to_string()).into();
        assert_eq!(err.code, ErrorCode::UnknownProjectType);
        assert_eq!(err.message, "Unknown project type: Attic");
        assert_eq!(err.code.exit_status(), 2);

        let err: CliError = CoreError::InvalidRateTable {
            reason: "eof".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidRateTable);
        assert_eq!(err.code.exit_status(), 1);
    }

    #[test]
    fn test_db_error_mapping() {
        let err: CliError = DbError::not_found("Favorite", "x").into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: CliError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }
}
