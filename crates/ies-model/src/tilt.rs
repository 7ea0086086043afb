use std::fmt;

use serde::{Deserialize, Serialize};

/// The `TILT=` directive that closes the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Tilt {
    /// `TILT=NONE`
    None,
    /// `TILT=INCLUDE`; the tilt table lines that follow, verbatim.
    Include { lines: Vec<String> },
    /// `TILT=<filename>` referencing an external tilt file.
    File { name: String },
}

impl Tilt {
    /// Classify the text after `TILT=`.
    pub fn from_directive(value: &str) -> Self {
        match value.trim() {
            "NONE" => Self::None,
            "INCLUDE" => Self::Include { lines: Vec::new() },
            other => Self::File {
                name: other.to_string(),
            },
        }
    }

    pub fn is_include(&self) -> bool {
        matches!(self, Self::Include { .. })
    }

    /// The directive value as it appears in a file.
    pub fn directive(&self) -> &str {
        match self {
            Self::None => "NONE",
            Self::Include { .. } => "INCLUDE",
            Self::File { name } => name,
        }
    }
}

impl fmt::Display for Tilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TILT={}", self.directive())
    }
}
