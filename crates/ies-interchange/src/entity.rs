//! Tagged entity records.
//!
//! Every entity serializes as a JSON object whose `kind` member names it.
//! Documents nest their keywords, fields and candela values as entities of
//! their own, each carrying its own tag.

use ies_model::{CandelaValue, Field, FieldValue, IesDocument, Keyword, Tilt};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::codec::from_str_with_path;
use crate::error::{InterchangeError, Result};

/// One encoded entity, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Document(DocumentRecord),
    Keyword(KeywordRecord),
    Field(FieldRecord),
    CandelaValue(CandelaRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandelaRecord {
    pub vertical: f64,
    pub horizontal: f64,
    pub value: f64,
}

/// A document with its nested entities.
///
/// `candela_values` maps vertical angle to horizontal angle to candela value,
/// with both angles written as map keys via [`angle_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub tilt: Option<Tilt>,
    #[serde(default)]
    pub keywords: Vec<Entity>,
    #[serde(default)]
    pub fields: Vec<Entity>,
    #[serde(default)]
    pub candela_values: IndexMap<String, IndexMap<String, Entity>>,
}

/// Map key for an angle: the shortest text that parses back to it.
pub fn angle_key(angle: f64) -> String {
    angle.to_string()
}

fn parse_angle_key(key: &str, location: &str) -> Result<f64> {
    key.trim()
        .parse::<f64>()
        .map_err(|_| InterchangeError::InvalidAngleKey {
            key: key.to_string(),
            location: location.to_string(),
        })
}

impl Entity {
    /// The `kind` tag this entity serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Document(_) => "document",
            Self::Keyword(_) => "keyword",
            Self::Field(_) => "field",
            Self::CandelaValue(_) => "candela_value",
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn encode_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a single entity of any kind.
    pub fn decode(text: &str) -> Result<Self> {
        from_str_with_path(text)
    }

    pub fn into_keyword(self) -> Result<Keyword> {
        keyword_at(self, "$")
    }

    pub fn into_field(self) -> Result<Field> {
        field_at(self, "$")
    }

    /// Rebuild a free-standing candela value; it gains a parent once added to
    /// a document.
    pub fn into_candela_value(self) -> Result<CandelaValue> {
        candela_at(self, "$")
    }

    /// Rebuild a document, re-adding every nested entity through the
    /// document's own `add_*` operations.
    pub fn into_document(self) -> Result<IesDocument> {
        match self {
            Self::Document(record) => record.into_document(),
            other => Err(InterchangeError::unexpected_kind(
                "document",
                other.kind(),
                "$",
            )),
        }
    }
}

impl DocumentRecord {
    fn into_document(self) -> Result<IesDocument> {
        let mut document = IesDocument::new();
        document.filename = self.filename;
        document.tilt = self.tilt;

        for (index, entity) in self.keywords.into_iter().enumerate() {
            document.add_keyword(keyword_at(entity, &format!("keywords[{index}]"))?);
        }
        for (index, entity) in self.fields.into_iter().enumerate() {
            document.add_field(field_at(entity, &format!("fields[{index}]"))?);
        }
        for (vertical_key, sweep) in self.candela_values {
            let key_vertical =
                parse_angle_key(&vertical_key, &format!("candela_values[{vertical_key:?}]"))?;
            for (horizontal_key, entity) in sweep {
                let location = format!("candela_values[{vertical_key:?}][{horizontal_key:?}]");
                let key_horizontal = parse_angle_key(&horizontal_key, &location)?;
                let candela = candela_at(entity, &location)?;
                if candela.vertical != key_vertical || candela.horizontal != key_horizontal {
                    return Err(InterchangeError::AngleKeyMismatch {
                        vertical: candela.vertical,
                        horizontal: candela.horizontal,
                        key_vertical,
                        key_horizontal,
                    });
                }
                document.add_candela_value(candela);
            }
        }
        Ok(document)
    }
}

fn keyword_at(entity: Entity, location: &str) -> Result<Keyword> {
    match entity {
        Entity::Keyword(record) => Ok(Keyword::new(record.name, record.value)),
        other => Err(InterchangeError::unexpected_kind(
            "keyword",
            other.kind(),
            location,
        )),
    }
}

fn field_at(entity: Entity, location: &str) -> Result<Field> {
    match entity {
        Entity::Field(record) => Ok(Field::new(record.name, record.value)),
        other => Err(InterchangeError::unexpected_kind(
            "field",
            other.kind(),
            location,
        )),
    }
}

fn candela_at(entity: Entity, location: &str) -> Result<CandelaValue> {
    match entity {
        Entity::CandelaValue(record) => Ok(CandelaValue::new(
            record.vertical,
            record.horizontal,
            record.value,
        )),
        other => Err(InterchangeError::unexpected_kind(
            "candela_value",
            other.kind(),
            location,
        )),
    }
}

impl From<&Keyword> for Entity {
    fn from(keyword: &Keyword) -> Self {
        Self::Keyword(KeywordRecord {
            name: keyword.name.clone(),
            value: keyword.value.clone(),
        })
    }
}

impl From<&Field> for Entity {
    fn from(field: &Field) -> Self {
        Self::Field(FieldRecord {
            name: field.name.clone(),
            value: field.value,
        })
    }
}

impl From<&CandelaValue> for Entity {
    fn from(candela: &CandelaValue) -> Self {
        Self::CandelaValue(CandelaRecord {
            vertical: candela.vertical,
            horizontal: candela.horizontal,
            value: candela.value,
        })
    }
}

impl From<&IesDocument> for Entity {
    fn from(document: &IesDocument) -> Self {
        let mut candela_values: IndexMap<String, IndexMap<String, Entity>> = IndexMap::new();
        for (vertical, horizontal, candela) in document.iter_candela() {
            candela_values
                .entry(angle_key(vertical))
                .or_default()
                .insert(angle_key(horizontal), Entity::from(candela));
        }
        Self::Document(DocumentRecord {
            filename: document.filename.clone(),
            tilt: document.tilt.clone(),
            keywords: document.keywords().map(Entity::from).collect(),
            fields: document.fields().map(Entity::from).collect(),
            candela_values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_encodes_with_its_kind() {
        let entity = Entity::from(&Keyword::new("MANUFAC", "Acme"));
        assert_eq!(
            entity.encode().unwrap(),
            r#"{"kind":"keyword","name":"MANUFAC","value":"Acme"}"#
        );
    }

    #[test]
    fn keyword_decodes_back() {
        let text = r#"{"kind":"keyword","name":"LUMCAT","value":"DL-6"}"#;
        let keyword = Entity::decode(text).unwrap().into_keyword().unwrap();
        assert_eq!(keyword, Keyword::new("LUMCAT", "DL-6"));

        let err = Entity::decode(text).unwrap().into_document().unwrap_err();
        assert!(matches!(
            err,
            InterchangeError::UnexpectedKind {
                expected: "document",
                ..
            }
        ));
    }

    #[test]
    fn field_keeps_integer_and_real_apart() {
        let integer = Entity::from(&Field::new("num_lamps", 3_i64)).encode().unwrap();
        let real = Entity::from(&Field::new("width", 3.0)).encode().unwrap();
        assert_eq!(integer, r#"{"kind":"field","name":"num_lamps","value":3}"#);
        assert_eq!(real, r#"{"kind":"field","name":"width","value":3.0}"#);

        let field = Entity::decode(&real).unwrap().into_field().unwrap();
        assert_eq!(field.value, FieldValue::Real(3.0));
        let field = Entity::decode(&integer).unwrap().into_field().unwrap();
        assert_eq!(field.value, FieldValue::Integer(3));
    }

    #[test]
    fn decoded_candela_value_has_no_parent() {
        let text = r#"{"kind":"candela_value","vertical":45.0,"horizontal":90.0,"value":12.5}"#;
        let candela = Entity::decode(text).unwrap().into_candela_value().unwrap();
        assert_eq!(candela.key(), (45.0, 90.0));
        assert_eq!(candela.value, 12.5);
        assert_eq!(candela.parent(), None);
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let entity = Entity::from(&Keyword::new("TEST", "x"));
        let err = entity.into_field().unwrap_err();
        assert!(matches!(
            err,
            InterchangeError::UnexpectedKind {
                expected: "field",
                found: "keyword",
                ..
            }
        ));
    }

    #[test]
    fn angle_keys_are_shortest_text() {
        assert_eq!(angle_key(0.0), "0");
        assert_eq!(angle_key(22.5), "22.5");
        assert_eq!(angle_key(90.0), "90");
        assert_eq!(parse_angle_key("22.5", "$").unwrap(), 22.5);
        assert!(parse_angle_key("north", "$").is_err());
    }
}
