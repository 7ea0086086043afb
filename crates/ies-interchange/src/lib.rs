//! JSON interchange format for IES photometric documents.
//!
//! A document is written as a tree of tagged entities:
//!
//! ```json
//! {
//!   "kind": "document",
//!   "filename": "a.ies",
//!   "tilt": { "mode": "none" },
//!   "keywords": [{ "kind": "keyword", "name": "TEST", "value": "x" }],
//!   "fields": [{ "kind": "field", "name": "num_lamps", "value": 1 }],
//!   "candela_values": {
//!     "0": { "0": { "kind": "candela_value", "vertical": 0.0, "horizontal": 0.0, "value": 100.0 } }
//!   }
//! }
//! ```
//!
//! Importing rebuilds the document through its own mutation API, so the
//! result is structurally equal to the source document.
//!
//! ```
//! use ies_interchange::{export_interchange, import_interchange};
//! use ies_model::IesDocument;
//!
//! let mut doc = IesDocument::new();
//! doc.add_keyword_parts("TEST", "example");
//! doc.add_candela_parts(0.0, 0.0, 100.0);
//!
//! let text = export_interchange(&doc).unwrap();
//! let copy = import_interchange(&text).unwrap();
//! assert_eq!(copy, doc);
//! assert_ne!(copy.id(), doc.id());
//! ```

mod codec;
mod entity;
mod error;

pub use codec::{export_interchange, export_interchange_pretty, import_interchange};
pub use entity::{
    CandelaRecord, DocumentRecord, Entity, FieldRecord, KeywordRecord, angle_key,
};
pub use error::{InterchangeError, Result};
