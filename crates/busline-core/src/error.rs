//! Error types for the booking client library.

use std::path::PathBuf;

use thiserror::Error;

use crate::display::Notice;

/// Comprehensive error type for all booking operations.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Local state storage errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Required form fields are missing for the current wizard step
    #[error("Missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The booking service refused the request (400/422)
    #[error("Request rejected: {detail}")]
    Rejected { status: u16, detail: String },
    /// The booking service has no such resource
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    /// The booking service requires authentication
    #[error("Authentication required")]
    Unauthorized,
    /// No usable response was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The booking service failed while handling the request
    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },
    /// Cancellation is only allowed for confirmed bookings
    #[error("Booking #{id} is {status} and cannot be cancelled")]
    NotCancellable {
        id: u64,
        status: crate::models::BookingStatus,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating storage errors with optional context.
pub struct StorageErrorBuilder {
    message: String,
}

impl StorageErrorBuilder {
    /// Create a new storage error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> BookingError {
        BookingError::Storage {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BookingError {
        BookingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BookingError {
    /// Creates a builder for storage errors.
    pub fn storage(message: impl Into<String>) -> StorageErrorBuilder {
        StorageErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a failed blocking task join.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// True for failures that happened before the service answered, or
    /// where the service itself broke. These get a generic notice.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Server { .. })
    }

    /// Map the error onto the notice shown to the user.
    ///
    /// Service rejections carry their detail verbatim; transport and server
    /// failures collapse into `fallback`.
    pub fn notice(&self, fallback: &str) -> Notice {
        match self {
            Self::Rejected { detail, .. } | Self::NotFound { detail } => {
                Notice::error(detail.clone())
            }
            Self::Validation { .. } | Self::InvalidInput { .. } | Self::NotCancellable { .. } => {
                Notice::warning(self.to_string())
            }
            _ => Notice::error(fallback.to_string()),
        }
    }
}

/// Specialized extension trait for storage-related Results.
pub trait DatabaseResultExt<T> {
    /// Map storage errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BookingError::storage(message).with_source(e))
    }
}

/// Result type alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;
