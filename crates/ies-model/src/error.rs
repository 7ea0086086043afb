//! Error types for the photometric data model.

use thiserror::Error;

/// Errors raised by document lookups and entity construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// No field with this name has been added to the document.
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// No keyword with this name (or its upper-cased form) exists.
    #[error("keyword not found: {name}")]
    KeywordNotFound { name: String },

    /// Neither a field nor a keyword answers to this name.
    #[error("attribute not found: {name}")]
    AttributeNotFound { name: String },

    /// A token could not be read as the expected number type.
    #[error("invalid {expected} value '{token}'")]
    InvalidNumber {
        token: String,
        expected: &'static str,
    },

    /// A keyword line is missing its `[NAME]` bracket pair.
    #[error("malformed keyword line '{text}'")]
    MalformedKeyword { text: String },

    /// A field that should hold a count holds something else.
    #[error("field {name} is not a valid count: {value}")]
    NotACount { name: String, value: String },

    /// The candela value belongs to a different document.
    #[error("candela value at ({vertical}, {horizontal}) is not owned by this document")]
    ForeignCandela { vertical: f64, horizontal: f64 },
}

impl ModelError {
    /// Create a FieldNotFound error.
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }

    /// Create a KeywordNotFound error.
    pub fn keyword_not_found(name: impl Into<String>) -> Self {
        Self::KeywordNotFound { name: name.into() }
    }

    /// Create an InvalidNumber error.
    pub fn invalid_number(token: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidNumber {
            token: token.into(),
            expected,
        }
    }

    /// Returns true for the "name not found" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FieldNotFound { .. } | Self::KeywordNotFound { .. } | Self::AttributeNotFound { .. }
        )
    }
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
