use std::fmt;

use crate::document::{DocumentId, IesDocument};
use crate::error::{ModelError, Result};

/// One luminous-intensity sample at a (vertical, horizontal) angle pair.
///
/// A value added to an [`IesDocument`] remembers the document's id; detached
/// values have no parent.
#[derive(Debug, Clone)]
pub struct CandelaValue {
    pub vertical: f64,
    pub horizontal: f64,
    pub value: f64,
    parent: Option<DocumentId>,
}

impl CandelaValue {
    pub fn new(vertical: f64, horizontal: f64, value: f64) -> Self {
        Self {
            vertical,
            horizontal,
            value,
            parent: None,
        }
    }

    /// The `(vertical, horizontal)` identity key.
    pub fn key(&self) -> (f64, f64) {
        (self.vertical, self.horizontal)
    }

    pub fn parent(&self) -> Option<DocumentId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: DocumentId) {
        self.parent = Some(parent);
    }

    /// Raw value scaled by the owning document's candela multiplier and
    /// ballast factor.
    pub fn computed_value(&self, document: &IesDocument) -> Result<f64> {
        self.computed_value_with(document, CandelaScale::default())
    }

    /// Like [`computed_value`](Self::computed_value) with caller overrides.
    pub fn computed_value_with(&self, document: &IesDocument, scale: CandelaScale) -> Result<f64> {
        if self.parent != Some(document.id()) {
            return Err(ModelError::ForeignCandela {
                vertical: self.vertical,
                horizontal: self.horizontal,
            });
        }
        Ok(self.value * scale.factor(document)?)
    }
}

/// Structural equality: the parent handle is not compared.
impl PartialEq for CandelaValue {
    fn eq(&self, other: &Self) -> bool {
        self.vertical == other.vertical
            && self.horizontal == other.horizontal
            && self.value == other.value
    }
}

impl fmt::Display for CandelaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): {}", self.vertical, self.horizontal, self.value)
    }
}

/// Overrides for the multipliers applied to raw candela samples.
///
/// Unset multipliers fall back to the document's `candela_multiplier` and
/// `ballast_factor` fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CandelaScale {
    pub candela_multiplier: Option<f64>,
    pub ballast_factor: Option<f64>,
}

impl CandelaScale {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_candela_multiplier(mut self, multiplier: f64) -> Self {
        self.candela_multiplier = Some(multiplier);
        self
    }

    #[must_use]
    pub fn with_ballast_factor(mut self, ballast_factor: f64) -> Self {
        self.ballast_factor = Some(ballast_factor);
        self
    }

    /// Combined factor `candela_multiplier * ballast_factor` for a document.
    pub fn factor(&self, document: &IesDocument) -> Result<f64> {
        let multiplier = match self.candela_multiplier {
            Some(value) => value,
            None => document.candela_multiplier()?,
        };
        let ballast_factor = match self.ballast_factor {
            Some(value) => value,
            None => document.ballast_factor()?,
        };
        Ok(multiplier * ballast_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BALLAST_FACTOR, CANDELA_MULTIPLIER};

    fn scaled_document() -> IesDocument {
        let mut document = IesDocument::new();
        document.add_field_parts(CANDELA_MULTIPLIER, 2.0);
        document.add_field_parts(BALLAST_FACTOR, 0.9);
        document.add_candela_parts(0.0, 0.0, 100.0);
        document
    }

    #[test]
    fn computed_value_applies_both_multipliers() {
        let document = scaled_document();
        let value = document.candela_at(0.0, 0.0).unwrap();
        let computed = value.computed_value(&document).unwrap();
        assert!((computed - 180.0).abs() < 1e-9);
    }

    #[test]
    fn overrides_replace_document_fields() {
        let document = scaled_document();
        let value = document.candela_at(0.0, 0.0).unwrap();
        let scale = CandelaScale::new().with_ballast_factor(1.0);
        let computed = value.computed_value_with(&document, scale).unwrap();
        assert!((computed - 200.0).abs() < 1e-9);
    }

    #[test]
    fn detached_value_is_rejected() {
        let document = scaled_document();
        let detached = CandelaValue::new(0.0, 0.0, 100.0);
        assert!(matches!(
            detached.computed_value(&document),
            Err(ModelError::ForeignCandela { .. })
        ));
    }

    #[test]
    fn missing_multiplier_field_is_a_lookup_error() {
        let mut document = IesDocument::new();
        document.add_candela_parts(0.0, 0.0, 1.0);
        let value = document.candela_at(0.0, 0.0).unwrap();
        let err = value.computed_value(&document).unwrap_err();
        assert_eq!(err, ModelError::field_not_found(CANDELA_MULTIPLIER));
    }

    #[test]
    fn equality_ignores_parent() {
        let document = scaled_document();
        let owned = document.candela_at(0.0, 0.0).unwrap();
        assert_eq!(owned, &CandelaValue::new(0.0, 0.0, 100.0));
    }
}
