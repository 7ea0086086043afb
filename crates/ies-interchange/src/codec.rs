//! Document-level export and import.

use ies_model::IesDocument;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::entity::Entity;
use crate::error::{InterchangeError, Result};

/// Encode a document as compact interchange JSON.
pub fn export_interchange(document: &IesDocument) -> Result<String> {
    let text = Entity::from(document).encode()?;
    debug!(
        document = %document.id(),
        bytes = text.len(),
        "exported interchange JSON"
    );
    Ok(text)
}

/// Encode a document as indented interchange JSON.
pub fn export_interchange_pretty(document: &IesDocument) -> Result<String> {
    Entity::from(document).encode_pretty()
}

/// Decode interchange JSON into a new document.
///
/// The result compares equal to the exported document but has its own
/// identity, and every candela value is parented to it.
pub fn import_interchange(text: &str) -> Result<IesDocument> {
    let document = Entity::decode(text)?
        .into_document()
        .inspect_err(|error| warn!(%error, "rejecting interchange document"))?;
    debug!(
        document = %document.id(),
        keywords = document.keyword_count(),
        fields = document.field_count(),
        candela_values = document.candela_count(),
        "imported interchange JSON"
    );
    Ok(document)
}

/// Deserialize with JSON-path context in error messages.
pub(crate) fn from_str_with_path<T: DeserializeOwned>(text: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        let error = InterchangeError::Malformed {
            path,
            message: err.into_inner().to_string(),
        };
        warn!(%error, "malformed interchange JSON");
        error
    })
}
