//! Parsers for single lines of the numeric sections.
//!
//! Each function takes the 1-based line number of its input so failures can
//! point at the offending line.

use std::collections::VecDeque;

use ies_model::{CandelaValue, Field, FieldValue, field_row};

use crate::error::{Lm63Error, Result};
use crate::tokenizer::split_line;

/// Parse one of the two positional field rows.
///
/// Token `i` becomes the field named by position `i` of the row vocabulary.
/// The token count must equal the row width exactly.
pub fn parse_field_row(text: &str, row: usize, line: usize) -> Result<Vec<Field>> {
    let names = field_row(row).unwrap_or(&[]);
    let tokens = split_line(text);
    if tokens.len() != names.len() {
        return Err(Lm63Error::FieldRowWidth {
            line,
            row,
            expected: names.len(),
            actual: tokens.len(),
        });
    }
    names
        .iter()
        .zip(&tokens)
        .map(|(name, token)| {
            let value = token
                .parse::<FieldValue>()
                .map_err(|error| Lm63Error::at_line(line, error))?;
            Ok(Field::new(*name, value))
        })
        .collect()
}

/// Parse a line of angles (or any list of reals).
pub fn parse_real_row(text: &str, line: usize) -> Result<Vec<f64>> {
    split_line(text)
        .iter()
        .map(|token| parse_real(token, line))
        .collect()
}

/// Parse one line of the candela grid for `horizontal`.
///
/// Each token is paired with the next angle popped from `pending`, the
/// vertical angles still owed by the current sweep. When `pending` comes back
/// empty the sweep for `horizontal` is complete. Nothing is consumed if the
/// line fails to parse.
pub fn parse_candela_row(
    text: &str,
    horizontal: f64,
    pending: &mut VecDeque<f64>,
    line: usize,
) -> Result<Vec<CandelaValue>> {
    let samples = parse_real_row(text, line)?;
    if samples.len() > pending.len() {
        return Err(Lm63Error::CandelaRowOverflow {
            line,
            horizontal,
            expected: pending.len(),
            actual: samples.len(),
        });
    }
    let consumed = samples.len();
    Ok(samples
        .into_iter()
        .zip(pending.drain(..consumed))
        .map(|(value, vertical)| CandelaValue::new(vertical, horizontal, value))
        .collect())
}

fn parse_real(token: &str, line: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Lm63Error::invalid_number(line, token, "real"))
}
