//! Unified error type for accessors, the query cache and the session layer.

use thiserror::Error;

#[derive(Debug, Error)]
/// Every failure the crate can surface to a caller.
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The backend reported an error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Amount was zero, negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Input failed validation before reaching the backend
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// A row was missing or outside the current scope
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Kind of row, e.g. `"expense"`
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// No account is registered for this email
    #[error("No user registered for '{email}'")]
    UserNotFound {
        /// Email used to log in
        email: String,
    },

    /// Legacy household id does not exist
    #[error("Household '{id}' not found")]
    HouseholdNotFound {
        /// Household identifier
        id: String,
    },

    /// Clearing household tags would leave rows sharing a logical key
    #[error("Cannot merge households: {}", .conflicts.join("; "))]
    MergeConflict {
        /// One line per colliding key
        conflicts: Vec<String>,
    },

    /// A concurrent fetch of the same key failed while this reader waited
    #[error("Fetch of '{key}' failed: {message}")]
    FetchFailed {
        /// Cache key that was being fetched
        key: String,
        /// Error reported by the fetch that ran
        message: String,
    },

    /// A query state carried neither data nor an error
    #[error("Query finished without data")]
    EmptyQuery,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable missing or invalid
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
