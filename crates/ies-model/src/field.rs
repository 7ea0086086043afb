//! Positional header fields.
//!
//! The two numeric rows after the `TILT=` directive carry fixed-position
//! values. Their names come from a fixed vocabulary; position `i` of row `r`
//! is always `FIELD_ROWS[r][i]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

pub const NUM_LAMPS: &str = "num_lamps";
pub const LUMENS_PER_LAMP: &str = "lumens_per_lamp";
pub const CANDELA_MULTIPLIER: &str = "candela_multiplier";
pub const NUM_VERTICAL_ANGLES: &str = "num_vertical_angles";
pub const NUM_HORIZONTAL_ANGLES: &str = "num_horizontal_angles";
pub const PHOTOMETRIC_TYPE: &str = "photometric_type";
pub const UNITS_TYPE: &str = "units_type";
pub const WIDTH: &str = "width";
pub const LENGTH: &str = "length";
pub const HEIGHT: &str = "height";
pub const BALLAST_FACTOR: &str = "ballast_factor";
/// Reserved slot in row 1. Parsed for column fidelity, never interpreted.
pub const FUTURE_USE: &str = "future_use";
pub const INPUT_WATTS: &str = "input_watts";

/// Field names of the first numeric row, by position.
pub const FIELD_ROW_0: [&str; 10] = [
    NUM_LAMPS,
    LUMENS_PER_LAMP,
    CANDELA_MULTIPLIER,
    NUM_VERTICAL_ANGLES,
    NUM_HORIZONTAL_ANGLES,
    PHOTOMETRIC_TYPE,
    UNITS_TYPE,
    WIDTH,
    LENGTH,
    HEIGHT,
];

/// Field names of the second numeric row, by position.
pub const FIELD_ROW_1: [&str; 3] = [BALLAST_FACTOR, FUTURE_USE, INPUT_WATTS];

pub const FIELD_ROWS: [&[&str]; 2] = [&FIELD_ROW_0, &FIELD_ROW_1];

/// Look up the name vocabulary for a field row.
pub fn field_row(index: usize) -> Option<&'static [&'static str]> {
    FIELD_ROWS.get(index).copied()
}

/// Integer or real value of a header field.
///
/// Tokens containing a `.` are reals, everything else is an integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
}

impl FieldValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Real(value) => value,
        }
    }

    /// Interpret the value as a non-negative count.
    ///
    /// Reals are accepted when they carry no fractional part.
    pub fn as_count(self) -> Option<usize> {
        match self {
            Self::Integer(value) => usize::try_from(value).ok(),
            Self::Real(value) if value >= 0.0 && value.fract() == 0.0 => {
                usize::try_from(value as u64).ok()
            }
            Self::Real(_) => None,
        }
    }
}

impl FromStr for FieldValue {
    type Err = ModelError;

    fn from_str(token: &str) -> Result<Self> {
        if token.contains('.') {
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Self::Real)
                .ok_or_else(|| ModelError::invalid_number(token, "real"))
        } else {
            token
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| ModelError::invalid_number(token, "integer"))
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value:?}"),
        }
    }
}

/// A named scalar from one of the two header rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_decimal_point() {
        assert_eq!("1".parse::<FieldValue>().unwrap(), FieldValue::Integer(1));
        assert_eq!("-1".parse::<FieldValue>().unwrap(), FieldValue::Integer(-1));
        assert_eq!("1.0".parse::<FieldValue>().unwrap(), FieldValue::Real(1.0));
        assert_eq!("0.5".parse::<FieldValue>().unwrap(), FieldValue::Real(0.5));
    }

    #[test]
    fn rejects_bad_tokens() {
        let err = "abc".parse::<FieldValue>().unwrap_err();
        assert_eq!(err, ModelError::invalid_number("abc", "integer"));
        let err = "1.2.3".parse::<FieldValue>().unwrap_err();
        assert_eq!(err, ModelError::invalid_number("1.2.3", "real"));
    }

    #[test]
    fn rejects_non_finite_reals() {
        for token in ["1.0e999", "-1.0e999", "nan.", "inf.0"] {
            let err = token.parse::<FieldValue>().unwrap_err();
            assert_eq!(err, ModelError::invalid_number(token, "real"));
        }
        assert!("nan".parse::<FieldValue>().is_err());
    }

    #[test]
    fn counts() {
        assert_eq!(FieldValue::Integer(37).as_count(), Some(37));
        assert_eq!(FieldValue::Real(5.0).as_count(), Some(5));
        assert_eq!(FieldValue::Real(5.5).as_count(), None);
        assert_eq!(FieldValue::Integer(-1).as_count(), None);
    }

    #[test]
    fn row_vocabulary() {
        assert_eq!(field_row(0).map(<[_]>::len), Some(10));
        assert_eq!(field_row(1), Some(&FIELD_ROW_1[..]));
        assert!(field_row(2).is_none());
        assert_eq!(FIELD_ROW_0[3], NUM_VERTICAL_ANGLES);
    }

    #[test]
    fn display_keeps_real_marker() {
        assert_eq!(Field::new(BALLAST_FACTOR, 1.0).to_string(), "ballast_factor: 1.0");
        assert_eq!(Field::new(NUM_LAMPS, 1_i64).to_string(), "num_lamps: 1");
    }
}
