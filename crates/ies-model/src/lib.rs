//! In-memory model of an IES LM-63 photometric document.
//!
//! A document holds three kinds of entities:
//!
//! - [`Keyword`]: `[NAME]value` metadata from the header
//! - [`Field`]: a named integer or real from the two positional header rows
//! - [`CandelaValue`]: an intensity sample at a (vertical, horizontal) angle
//!
//! # Example
//!
//! ```
//! use ies_model::{CandelaScale, IesDocument, field};
//!
//! let mut doc = IesDocument::new();
//! doc.add_field_parts(field::CANDELA_MULTIPLIER, 2.0);
//! doc.add_field_parts(field::BALLAST_FACTOR, 0.5);
//! doc.add_candela_parts(90.0, 0.0, 10.0);
//! doc.add_candela_parts(0.0, 0.0, 40.0);
//!
//! let computed: Vec<_> = doc
//!     .iter_candela_computed(CandelaScale::default())
//!     .unwrap()
//!     .collect();
//! assert_eq!(computed, vec![(0.0, 0.0, 40.0), (90.0, 0.0, 10.0)]);
//! ```

mod candela;
mod document;
mod error;
pub mod field;
mod keyword;
mod tilt;

pub use candela::{CandelaScale, CandelaValue};
pub use document::{Angle, Attribute, DocumentId, IesDocument};
pub use error::{ModelError, Result};
pub use field::{FIELD_ROWS, Field, FieldValue, field_row};
pub use keyword::Keyword;
pub use tilt::Tilt;
