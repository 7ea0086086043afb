//! Error types for the interchange codec.

use thiserror::Error;

/// Errors produced while encoding or decoding interchange JSON.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The text is not valid JSON or does not match the entity layout.
    #[error("malformed interchange JSON at {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("failed to encode interchange JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// A well-formed entity appeared where another kind was required.
    #[error("expected a {expected} entity at {location}, found {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: &'static str,
        location: String,
    },

    #[error("invalid angle key '{key}' at {location}")]
    InvalidAngleKey { key: String, location: String },

    /// The map keys a candela value is filed under disagree with its own angles.
    #[error(
        "candela value for ({vertical}, {horizontal}) filed under ({key_vertical}, {key_horizontal})"
    )]
    AngleKeyMismatch {
        vertical: f64,
        horizontal: f64,
        key_vertical: f64,
        key_horizontal: f64,
    },
}

impl InterchangeError {
    pub(crate) fn unexpected_kind(
        expected: &'static str,
        found: &'static str,
        location: impl Into<String>,
    ) -> Self {
        Self::UnexpectedKind {
            expected,
            found,
            location: location.into(),
        }
    }
}

/// Result type for interchange operations.
pub type Result<T> = std::result::Result<T, InterchangeError>;
