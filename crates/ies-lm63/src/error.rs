//! Error types for LM-63 file reading.

use std::fmt;
use std::path::PathBuf;

use ies_model::ModelError;
use thiserror::Error;

/// Coarse classification of a read failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file does not start with the LM-63-2002 signature.
    Format,
    /// Row widths, angle counts or the candela grid disagree with the header.
    Structural,
    /// A name lookup on the document failed.
    Lookup,
    /// A token is not a valid integer or real.
    Numeric,
    /// The file could not be opened or read.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Format => "format",
            Self::Structural => "structural",
            Self::Lookup => "lookup",
            Self::Numeric => "numeric",
            Self::Io => "io",
        };
        f.write_str(label)
    }
}

/// Angle axis of the candela grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Errors that can occur when reading an LM-63 file.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum Lm63Error {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// First line is not the expected signature.
    #[error("not a valid LM-63-2002 file: expected '{expected}' on line 1, found '{found}'")]
    InvalidSignature {
        expected: &'static str,
        found: String,
    },

    /// Header keyword line without a `[NAME]` pair.
    #[error("line {line}: malformed keyword '{text}'")]
    MalformedKeyword { line: usize, text: String },

    /// A field row with the wrong number of tokens.
    #[error("line {line}: field row {row} expects {expected} values, found {actual}")]
    FieldRowWidth {
        line: usize,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A token that is not a valid number of the expected type.
    #[error("line {line}: invalid {expected} value '{token}'")]
    InvalidNumber {
        line: usize,
        token: String,
        expected: &'static str,
    },

    /// A declared angle count that is not a non-negative whole number.
    #[error("field {name} is not a valid count: {value}")]
    InvalidCount { name: &'static str, value: String },

    /// An angle line that runs past the declared count for its axis.
    #[error("line {line}: {axis} angle list overflows: expected {expected} angles, found {actual}")]
    AngleCountMismatch {
        line: usize,
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// The same angle listed twice on one axis.
    #[error("line {line}: duplicate {axis} angle {angle}")]
    DuplicateAngle { line: usize, axis: Axis, angle: f64 },

    /// A candela row carrying more values than the current sweep has left.
    #[error(
        "line {line}: candela row for horizontal angle {horizontal} has {actual} values but only {expected} vertical angles remain"
    )]
    CandelaRowOverflow {
        line: usize,
        horizontal: f64,
        expected: usize,
        actual: usize,
    },

    /// Input ended before the named section was complete.
    #[error("unexpected end of input in {section}: expected {expected}, found {actual}")]
    UnexpectedEof {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Document lookup failure.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for LM-63 operations.
pub type Result<T> = std::result::Result<T, Lm63Error>;

impl Lm63Error {
    /// Create an InvalidNumber error.
    pub fn invalid_number(line: usize, token: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidNumber {
            line,
            token: token.into(),
            expected,
        }
    }

    /// Attach a line number to a model-level parse failure.
    pub(crate) fn at_line(line: usize, error: ModelError) -> Self {
        match error {
            ModelError::InvalidNumber { token, expected } => Self::InvalidNumber {
                line,
                token,
                expected,
            },
            ModelError::MalformedKeyword { text } => Self::MalformedKeyword { line, text },
            other => Self::Model(other),
        }
    }

    /// Which family of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::Io(_) => ErrorKind::Io,
            Self::InvalidSignature { .. } => ErrorKind::Format,
            Self::InvalidNumber { .. } => ErrorKind::Numeric,
            Self::Model(error) if error.is_not_found() => ErrorKind::Lookup,
            Self::Model(ModelError::InvalidNumber { .. }) => ErrorKind::Numeric,
            Self::MalformedKeyword { .. }
            | Self::FieldRowWidth { .. }
            | Self::InvalidCount { .. }
            | Self::AngleCountMismatch { .. }
            | Self::DuplicateAngle { .. }
            | Self::CandelaRowOverflow { .. }
            | Self::UnexpectedEof { .. }
            | Self::Model(_) => ErrorKind::Structural,
        }
    }

    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }
}
