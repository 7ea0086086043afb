use std::fmt;

use crate::error::{ModelError, Result};

/// One `[NAME]value` metadata entry from the file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub name: String,
    pub value: String,
}

impl Keyword {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse a header line of the form `[NAME]value`.
    ///
    /// The name is the text between the first `[` and the first `]`; the value
    /// is everything after that `]`, kept verbatim.
    pub fn from_line(line: &str) -> Result<Self> {
        let malformed = || ModelError::MalformedKeyword {
            text: line.to_string(),
        };
        let (_, rest) = line.split_once('[').ok_or_else(malformed)?;
        let (name, value) = rest.split_once(']').ok_or_else(malformed)?;
        Ok(Self::new(name, value))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_value() {
        let keyword = Keyword::from_line("[MANUFAC]Acme Lighting").unwrap();
        assert_eq!(keyword.name, "MANUFAC");
        assert_eq!(keyword.value, "Acme Lighting");
    }

    #[test]
    fn empty_value_is_allowed() {
        let keyword = Keyword::from_line("[TEST]").unwrap();
        assert_eq!(keyword.name, "TEST");
        assert_eq!(keyword.value, "");
    }

    #[test]
    fn rejects_unclosed_bracket() {
        let err = Keyword::from_line("[TEST no close").unwrap_err();
        assert!(matches!(err, ModelError::MalformedKeyword { .. }));
    }

    #[test]
    fn displays_as_name_value() {
        assert_eq!(Keyword::new("LAMP", "LED").to_string(), "LAMP: LED");
    }
}
