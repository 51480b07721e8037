//! Legacy block-list records.
//!
//! Older rows store rich text as a flat list of blocks plus an out-of-line
//! entity map:
//!
//! ```json
//! {"blocks": [{"type": "unstyled", "text": "see docs here",
//!              "entityRanges": [{"key": 0, "offset": 4, "length": 4}]}],
//!  "entityMap": {"0": {"type": "LINK", "data": {"url": "http://z"}}}}
//! ```
//!
//! Records are only ever read: [`convert_legacy`] turns them into a
//! [`Document`](crate::Document) and the record is dropped.

mod convert;

pub use convert::{convert_legacy, splice_entity_ranges};

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::document::null_as_default;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyRecord {
    pub blocks: Vec<LegacyBlock>,
    pub entity_map: EntityMap,
}

impl LegacyRecord {
    /// Decodes the `blocks` array and `entityMap` value of a stored record.
    ///
    /// Blocks and entities are decoded one by one; the ones that fail are
    /// dropped and reported.
    pub fn from_parts(blocks: &[Value], entity_map: &Value, sink: &dyn DiagnosticSink) -> Self {
        let blocks = blocks
            .iter()
            .enumerate()
            .filter_map(|(block, value)| match LegacyBlock::deserialize(value) {
                Ok(decoded) => Some(decoded),
                Err(err) => {
                    sink.report(&Diagnostic::MalformedBlock {
                        block,
                        message: err.to_string(),
                    });
                    None
                }
            })
            .collect();
        Self {
            blocks,
            entity_map: EntityMap::from_value(entity_map, sink),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyBlock {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: LegacyBlockType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "entityRanges", default, deserialize_with = "null_as_default")]
    pub entity_ranges: Vec<EntityRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LegacyBlockType {
    #[default]
    Unstyled,
    Atomic,
    Other(String),
}

impl From<String> for LegacyBlockType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "unstyled" => LegacyBlockType::Unstyled,
            "atomic" => LegacyBlockType::Atomic,
            _ => LegacyBlockType::Other(s),
        }
    }
}

/// A span of block text bound to an entity.
///
/// `offset` and `length` count UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityRange {
    #[serde(deserialize_with = "entity_key")]
    pub key: String,
    pub offset: usize,
    pub length: usize,
}

impl EntityRange {
    pub fn new(key: impl Into<String>, offset: usize, length: usize) -> Self {
        Self {
            key: key.into(),
            offset,
            length,
        }
    }
}

/// Keys are written as numbers but the map is keyed by strings.
fn entity_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid entity key {other}"))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Entity {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: EntityType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: EntityData,
}

impl Entity {
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: EntityType::Image,
            data: EntityData {
                src: Some(src.into()),
                ..EntityData::default()
            },
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self {
            kind: EntityType::Link,
            data: EntityData {
                url: Some(url.into()),
                ..EntityData::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EntityType {
    Image,
    Link,
    Other(String),
}

impl Default for EntityType {
    fn default() -> Self {
        EntityType::Other(String::new())
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "IMAGE" => EntityType::Image,
            "LINK" => EntityType::Link,
            _ => EntityType::Other(s),
        }
    }
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Image => "IMAGE",
            EntityType::Link => "LINK",
            EntityType::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntityData {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

impl EntityData {
    /// Link destination; some producers wrote `href` instead of `url`.
    pub fn link_target(&self) -> Option<&str> {
        self.url.as_deref().or(self.href.as_deref())
    }
}

/// Entities by key, in stored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMap {
    entities: IndexMap<String, Entity>,
}

impl EntityMap {
    /// Accepts an object keyed by entity key, or an array indexed by key.
    /// Anything else, `null` included, is an empty map.
    pub fn from_value(value: &Value, sink: &dyn DiagnosticSink) -> Self {
        let entries: Vec<(String, &Value)> = match value {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Vec::new(),
        };
        entries
            .into_iter()
            .filter_map(|(key, value)| match Entity::deserialize(value) {
                Ok(entity) => Some((key, entity)),
                Err(err) => {
                    sink.report(&Diagnostic::MalformedEntity {
                        key,
                        message: err.to_string(),
                    });
                    None
                }
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, entity: Entity) {
        self.entities.insert(key.into(), entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<(String, Entity)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (String, Entity)>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}
