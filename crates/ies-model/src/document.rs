//! The document aggregate.
//!
//! An [`IesDocument`] owns every keyword, field and candela value of one
//! photometric file. Keywords and fields keep insertion order; candela values
//! live in a vertical → horizontal index that always iterates in ascending
//! angular order, whatever order they were added in.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::candela::{CandelaScale, CandelaValue};
use crate::error::{ModelError, Result};
use crate::field::{
    BALLAST_FACTOR, CANDELA_MULTIPLIER, Field, FieldValue, NUM_HORIZONTAL_ANGLES,
    NUM_VERTICAL_ANGLES,
};
use crate::keyword::Keyword;
use crate::tilt::Tilt;

/// Totally ordered angle key, in degrees.
pub type Angle = OrderedFloat<f64>;

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Non-owning handle a candela value keeps to its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// Result of a name lookup that may resolve to either a field or a keyword.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute<'a> {
    Field(&'a Field),
    Keyword(&'a Keyword),
}

impl fmt::Display for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => field.fmt(f),
            Self::Keyword(keyword) => keyword.fmt(f),
        }
    }
}

/// A parsed (or programmatically built) IES photometric document.
#[derive(Debug)]
pub struct IesDocument {
    id: DocumentId,
    pub filename: Option<String>,
    pub tilt: Option<Tilt>,
    keywords: IndexMap<String, Keyword>,
    fields: IndexMap<String, Field>,
    candela_values: BTreeMap<Angle, BTreeMap<Angle, CandelaValue>>,
}

impl IesDocument {
    pub fn new() -> Self {
        Self {
            id: DocumentId::next(),
            filename: None,
            tilt: None,
            keywords: IndexMap::new(),
            fields: IndexMap::new(),
            candela_values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    // ---------------------------------------------------------------------
    // Keywords
    // ---------------------------------------------------------------------

    /// Add a keyword, or overwrite the value of the keyword already stored
    /// under the same name.
    pub fn add_keyword(&mut self, keyword: Keyword) -> &mut Keyword {
        match self.keywords.entry(keyword.name.clone()) {
            indexmap::map::Entry::Occupied(entry) => {
                let existing = entry.into_mut();
                existing.value = keyword.value;
                existing
            }
            indexmap::map::Entry::Vacant(entry) => entry.insert(keyword),
        }
    }

    pub fn add_keyword_parts(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Keyword {
        self.add_keyword(Keyword::new(name, value))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> + '_ {
        self.keywords.values()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Look a keyword up by its literal name, then by its upper-cased name.
    pub fn get_keyword(&self, name: &str) -> Result<&Keyword> {
        self.keywords
            .get(name)
            .or_else(|| self.keywords.get(&name.to_uppercase()))
            .ok_or_else(|| ModelError::keyword_not_found(name))
    }

    // ---------------------------------------------------------------------
    // Fields
    // ---------------------------------------------------------------------

    /// Add a field, or overwrite the value of the field already stored under
    /// the same name.
    pub fn add_field(&mut self, field: Field) -> &mut Field {
        match self.fields.entry(field.name.clone()) {
            indexmap::map::Entry::Occupied(entry) => {
                let existing = entry.into_mut();
                existing.value = field.value;
                existing
            }
            indexmap::map::Entry::Vacant(entry) => entry.insert(field),
        }
    }

    pub fn add_field_parts(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> &mut Field {
        self.add_field(Field::new(name, value))
    }

    /// Merge a batch of fields with the same overwrite rule as
    /// [`add_field`](Self::add_field).
    pub fn extend_fields<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        for field in fields {
            self.add_field(field);
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.values()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn get_field(&self, name: &str) -> Result<&Field> {
        self.fields
            .get(name)
            .ok_or_else(|| ModelError::field_not_found(name))
    }

    /// Resolve a name against the fields first, then the keywords.
    pub fn lookup(&self, name: &str) -> Result<Attribute<'_>> {
        if let Ok(field) = self.get_field(name) {
            return Ok(Attribute::Field(field));
        }
        self.get_keyword(name)
            .map(Attribute::Keyword)
            .map_err(|_| ModelError::AttributeNotFound {
                name: name.to_string(),
            })
    }

    pub fn field_f64(&self, name: &str) -> Result<f64> {
        self.get_field(name).map(|field| field.value.as_f64())
    }

    /// Read a field that must hold a non-negative whole number.
    pub fn field_count_value(&self, name: &str) -> Result<usize> {
        let field = self.get_field(name)?;
        field.value.as_count().ok_or_else(|| ModelError::NotACount {
            name: name.to_string(),
            value: field.value.to_string(),
        })
    }

    pub fn candela_multiplier(&self) -> Result<f64> {
        self.field_f64(CANDELA_MULTIPLIER)
    }

    pub fn ballast_factor(&self) -> Result<f64> {
        self.field_f64(BALLAST_FACTOR)
    }

    pub fn num_vertical_angles(&self) -> Result<usize> {
        self.field_count_value(NUM_VERTICAL_ANGLES)
    }

    pub fn num_horizontal_angles(&self) -> Result<usize> {
        self.field_count_value(NUM_HORIZONTAL_ANGLES)
    }

    // ---------------------------------------------------------------------
    // Candela grid
    // ---------------------------------------------------------------------

    /// Add a candela value under its `(vertical, horizontal)` key.
    ///
    /// An existing value at the same key keeps its place and takes the new
    /// sample. Either way the stored value is parented to this document.
    pub fn add_candela_value(&mut self, mut candela: CandelaValue) -> &mut CandelaValue {
        candela.set_parent(self.id);
        let row = self
            .candela_values
            .entry(OrderedFloat(candela.vertical))
            .or_default();
        match row.entry(OrderedFloat(candela.horizontal)) {
            std::collections::btree_map::Entry::Occupied(entry) => {
                let existing = entry.into_mut();
                existing.value = candela.value;
                existing
            }
            std::collections::btree_map::Entry::Vacant(entry) => entry.insert(candela),
        }
    }

    pub fn add_candela_parts(
        &mut self,
        vertical: f64,
        horizontal: f64,
        value: f64,
    ) -> &mut CandelaValue {
        self.add_candela_value(CandelaValue::new(vertical, horizontal, value))
    }

    pub fn candela_at(&self, vertical: f64, horizontal: f64) -> Option<&CandelaValue> {
        self.candela_values
            .get(&OrderedFloat(vertical))?
            .get(&OrderedFloat(horizontal))
    }

    pub fn candela_count(&self) -> usize {
        self.candela_values.values().map(BTreeMap::len).sum()
    }

    /// Distinct vertical angles present in the grid, ascending.
    pub fn vertical_angles(&self) -> Vec<f64> {
        self.candela_values.keys().map(|angle| angle.0).collect()
    }

    /// Distinct horizontal angles present in the grid, ascending.
    pub fn horizontal_angles(&self) -> Vec<f64> {
        let angles: BTreeSet<Angle> = self
            .candela_values
            .values()
            .flat_map(|row| row.keys().copied())
            .collect();
        angles.into_iter().map(|angle| angle.0).collect()
    }

    /// Candela values as `(vertical, horizontal, value)`, ascending by
    /// vertical angle and then by horizontal angle.
    pub fn iter_candela(&self) -> impl Iterator<Item = (f64, f64, &CandelaValue)> + '_ {
        self.candela_values.iter().flat_map(|(vertical, row)| {
            row.iter()
                .map(move |(horizontal, candela)| (vertical.0, horizontal.0, candela))
        })
    }

    /// Same order as [`iter_candela`](Self::iter_candela), yielding
    /// `raw * candela_multiplier * ballast_factor`.
    ///
    /// Fails up front when a multiplier is neither overridden nor present as
    /// a field.
    pub fn iter_candela_computed(
        &self,
        scale: CandelaScale,
    ) -> Result<impl Iterator<Item = (f64, f64, f64)> + '_> {
        let factor = scale.factor(self)?;
        Ok(self
            .iter_candela()
            .map(move |(vertical, horizontal, candela)| {
                (vertical, horizontal, candela.value * factor)
            }))
    }
}

impl Default for IesDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a new document: it gets its own id and its candela values are
/// re-parented to it.
impl Clone for IesDocument {
    fn clone(&self) -> Self {
        let id = DocumentId::next();
        let mut candela_values = self.candela_values.clone();
        for candela in candela_values.values_mut().flat_map(BTreeMap::values_mut) {
            candela.set_parent(id);
        }
        Self {
            id,
            filename: self.filename.clone(),
            tilt: self.tilt.clone(),
            keywords: self.keywords.clone(),
            fields: self.fields.clone(),
            candela_values,
        }
    }
}

/// Structural equality over content; document identity is ignored.
impl PartialEq for IesDocument {
    fn eq(&self, other: &Self) -> bool {
        self.filename == other.filename
            && self.tilt == other.tilt
            && self.keywords == other.keywords
            && self.fields == other.fields
            && self.candela_values == other.candela_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::NUM_LAMPS;

    #[test]
    fn readding_keyword_overwrites_in_place() {
        let mut document = IesDocument::new();
        document.add_keyword_parts("TEST", "first");
        document.add_keyword_parts("MANUFAC", "Acme");
        document.add_keyword_parts("TEST", "second");

        assert_eq!(document.keyword_count(), 2);
        assert_eq!(document.get_keyword("TEST").unwrap().value, "second");
        let names: Vec<&str> = document.keywords().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["TEST", "MANUFAC"]);
    }

    #[test]
    fn keyword_lookup_falls_back_to_upper_case() {
        let mut document = IesDocument::new();
        document.add_keyword_parts("LUMCAT", "X-100");
        assert_eq!(document.get_keyword("lumcat").unwrap().value, "X-100");
        assert_eq!(
            document.get_keyword("lumcatx").unwrap_err(),
            ModelError::keyword_not_found("lumcatx")
        );
    }

    #[test]
    fn lookup_prefers_fields_over_keywords() {
        let mut document = IesDocument::new();
        document.add_field_parts(NUM_LAMPS, 1_i64);
        document.add_keyword_parts("num_lamps", "shadowed");
        document.add_keyword_parts("LAMP", "LED");

        assert!(matches!(document.lookup(NUM_LAMPS), Ok(Attribute::Field(_))));
        assert!(matches!(document.lookup("lamp"), Ok(Attribute::Keyword(_))));
        assert_eq!(
            document.lookup("nothing").unwrap_err(),
            ModelError::AttributeNotFound {
                name: "nothing".to_string()
            }
        );
    }

    #[test]
    fn readding_field_overwrites_value() {
        let mut document = IesDocument::new();
        document.add_field_parts(NUM_LAMPS, 1_i64);
        document.add_field_parts(NUM_LAMPS, 2_i64);
        assert_eq!(document.field_count(), 1);
        assert_eq!(document.get_field(NUM_LAMPS).unwrap().value, FieldValue::Integer(2));
    }

    #[test]
    fn candela_values_iterate_sorted() {
        let mut document = IesDocument::new();
        document.add_candela_parts(90.0, 180.0, 4.0);
        document.add_candela_parts(0.0, 180.0, 2.0);
        document.add_candela_parts(90.0, 0.0, 3.0);
        document.add_candela_parts(0.0, 0.0, 1.0);

        let values: Vec<f64> = document.iter_candela().map(|(_, _, c)| c.value).collect();
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0]);
        // restartable
        assert_eq!(document.iter_candela().count(), 4);
        assert_eq!(document.vertical_angles(), [0.0, 90.0]);
        assert_eq!(document.horizontal_angles(), [0.0, 180.0]);
    }

    #[test]
    fn candela_values_are_parented() {
        let mut document = IesDocument::new();
        document.add_candela_parts(0.0, 0.0, 1.0);
        document.add_candela_parts(0.0, 0.0, 5.0);
        assert_eq!(document.candela_count(), 1);
        let (_, _, candela) = document.iter_candela().next().unwrap();
        assert_eq!(candela.parent(), Some(document.id()));
        assert_eq!(candela.value, 5.0);
    }

    #[test]
    fn clone_reparents_values() {
        let mut document = IesDocument::new().with_filename("a.ies");
        document.add_candela_parts(0.0, 0.0, 1.0);
        let copy = document.clone();

        assert_ne!(copy.id(), document.id());
        assert_eq!(copy, document);
        let (_, _, candela) = copy.iter_candela().next().unwrap();
        assert_eq!(candela.parent(), Some(copy.id()));
    }

    #[test]
    fn computed_iteration_uses_fields() {
        let mut document = IesDocument::new();
        document.add_field_parts(CANDELA_MULTIPLIER, 2.0);
        document.add_field_parts(BALLAST_FACTOR, 0.9);
        document.add_candela_parts(0.0, 0.0, 100.0);

        let computed: Vec<(f64, f64, f64)> = document
            .iter_candela_computed(CandelaScale::default())
            .unwrap()
            .collect();
        assert_eq!(computed.len(), 1);
        assert!((computed[0].2 - 180.0).abs() < 1e-9);
    }

    #[test]
    fn count_fields_reject_fractions() {
        let mut document = IesDocument::new();
        document.add_field_parts(NUM_VERTICAL_ANGLES, 2.5);
        assert!(matches!(
            document.num_vertical_angles(),
            Err(ModelError::NotACount { .. })
        ));
    }
}
