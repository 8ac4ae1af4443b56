//! # Console Error Type
//!
//! What the operator sees when a command fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  Command function                                                      │
//! │  ConsoleResult<()>                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Bad number or text? ─── ConsoleError::validation() ─────┐             │
//! │         │                                                │             │
//! │         ▼                                                ▼             │
//! │  Store error? ───────── DbError ─► From ─────────► ConsoleError        │
//! │         │                                                │             │
//! │         ▼                                                ▼             │
//! │  Menu loop: NotFound / Validation / Constraint  → print, keep going   │
//! │             EndOfInput                          → exit cleanly        │
//! │             Io                                  → stop, return Err    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal store details (SQL text, driver messages) are logged with
//! `tracing` and replaced by a generic message.

use std::fmt;
use std::io;

use quill_core::ValidationError;
use quill_db::DbError;

/// Printed whenever a number was expected and something else was typed.
pub const INVALID_NUMBER_MESSAGE: &str =
    "Invalid input format. Please enter valid numeric values.";

/// Printed for an unrecognised menu choice.
pub const INVALID_CHOICE_MESSAGE: &str = "Invalid choice. Please try again.";

/// Printed when a typed line is not valid UTF-8.
pub const INVALID_TEXT_MESSAGE: &str = "Input was not valid text. Please try again.";

/// Error returned from console commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleError {
    /// Category used by the menu loop to decide whether to continue
    pub code: ErrorCode,

    /// Line shown to the operator
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Book or customer id does not exist
    NotFound,

    /// Typed input was malformed or broke a field rule
    ValidationError,

    /// The store rejected the write (duplicate email)
    ConstraintViolation,

    /// Store operation failed
    DatabaseError,

    /// Anything else
    Internal,

    /// Operator input ended (Ctrl-D, closed pipe)
    EndOfInput,

    /// Console stream could not be read or written
    Io,
}

impl ConsoleError {
    /// Creates a new console error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConsoleError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error, e.g. "Book with ID 7 not found."
    pub fn not_found(entity: &str, id: &str) -> Self {
        ConsoleError::new(
            ErrorCode::NotFound,
            format!("{} with ID {} not found.", entity, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::ValidationError, message)
    }

    /// A number was expected.
    pub fn invalid_number() -> Self {
        ConsoleError::validation(INVALID_NUMBER_MESSAGE)
    }

    /// Unknown menu code.
    pub fn invalid_choice() -> Self {
        ConsoleError::validation(INVALID_CHOICE_MESSAGE)
    }

    /// The line could not be decoded as UTF-8.
    pub fn invalid_text() -> Self {
        ConsoleError::validation(INVALID_TEXT_MESSAGE)
    }

    /// Input stream is exhausted.
    pub fn end_of_input() -> Self {
        ConsoleError::new(ErrorCode::EndOfInput, "End of input")
    }

    /// True when the menu loop must stop rather than report and continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self.code, ErrorCode::Io | ErrorCode::EndOfInput)
    }
}

/// Converts database errors to console errors.
impl From<DbError> for ConsoleError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ConsoleError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                // SQLite reports "<table>.<column>"
                let column = field.rsplit('.').next().unwrap_or(&field).to_string();
                ConsoleError::new(
                    ErrorCode::ConstraintViolation,
                    format!("The {} '{}' is already in use.", column, value),
                )
            }
            DbError::Validation(e) => ConsoleError::from(e),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ConsoleError::new(ErrorCode::ConstraintViolation, "Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but show a generic message
                tracing::error!("Database query failed: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ConsoleError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ConsoleError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ConsoleError::new(ErrorCode::Internal, "Database operation failed")
            }
        }
    }
}

/// Field rule failures, worded for the operator.
impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidFormat { .. } => ConsoleError::invalid_number(),
            ValidationError::OutOfRange { field, min, max } if max == i64::MAX => {
                let field = field.replace('_', " ");
                if min == 0 {
                    ConsoleError::validation(format!("The {} cannot be negative.", field))
                } else {
                    ConsoleError::validation(format!("The {} must be at least {}.", field, min))
                }
            }
            ValidationError::MustBePositive { field } => ConsoleError::validation(format!(
                "The {} must be greater than zero.",
                field.replace('_', " ")
            )),
            other => ConsoleError::validation(other.to_string()),
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        ConsoleError::new(ErrorCode::Io, format!("Console I/O failed: {}", err))
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConsoleError {}

/// Result type for console commands.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_keeps_wording() {
        let err = ConsoleError::from(DbError::not_found("Customer", 9));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Customer with ID 9 not found.");
    }

    #[test]
    fn test_duplicate_email_names_the_column() {
        let err = ConsoleError::from(DbError::duplicate("customers.email", "a@x.com"));
        assert_eq!(err.code, ErrorCode::ConstraintViolation);
        assert_eq!(err.message, "The email 'a@x.com' is already in use.");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ConsoleError::from(DbError::QueryFailed("near \"SELEC\": syntax error".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_validation_wording() {
        let err = ConsoleError::from(ValidationError::OutOfRange {
            field: "quantity_in_stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
        assert_eq!(err.message, "The quantity in stock cannot be negative.");

        let err = ConsoleError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
        assert_eq!(err.message, "The quantity must be greater than zero.");

        let err = ConsoleError::from(ValidationError::InvalidFormat {
            field: "book id".to_string(),
            reason: "expected a whole number".to_string(),
        });
        assert_eq!(err.message, INVALID_NUMBER_MESSAGE);
    }

    #[test]
    fn test_fatal_codes() {
        assert!(ConsoleError::end_of_input().is_fatal());
        assert!(ConsoleError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone")).is_fatal());
        assert!(!ConsoleError::invalid_choice().is_fatal());
        assert!(!ConsoleError::invalid_text().is_fatal());
    }
}
