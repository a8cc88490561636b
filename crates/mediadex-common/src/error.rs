//! Common error types used throughout mediadex.
//!
//! Provider-level failures have their own typed error in the main crate; this
//! type covers the conditions shared by every layer.

/// Common error type for mediadex.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested item was not found.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
