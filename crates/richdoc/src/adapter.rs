//! Normalizes stored rich-text values into a [`Document`].
//!
//! A stored value is one of:
//!
//! 1. not JSON at all: read as an empty document;
//! 2. an object with a `blocks` array and an `entityMap` key (any value,
//!    `null` included): a [`LegacyRecord`], converted block by block;
//! 3. anything else: an editor tree, returned as stored.
//!
//! Reading never fails. Each recovery is reported to the adapter's
//! [`DiagnosticSink`], which ignores everything unless one is installed with
//! [`Adapter::with_diagnostics`].

use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink, IgnoreDiagnostics};
use crate::document::{Block, Document, Inline, Node};
use crate::legacy::{convert_legacy, LegacyRecord};
use richdoc_util::shape::{array_property, has_own_property};

const BLOCKS_KEY: &str = "blocks";
const ENTITY_MAP_KEY: &str = "entityMap";

/// The shape a stored value was recognized as.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentFormat {
    Legacy(LegacyRecord),
    Tree(Document),
    /// Valid JSON that is neither of the above (a bare string, a number, an
    /// object whose `type` or `content` have the wrong types, ...).
    Unrecognized,
}

impl ContentFormat {
    /// Classifies a parsed value.
    pub fn detect(value: Value, sink: &dyn DiagnosticSink) -> Self {
        if let Some(blocks) = array_property(&value, BLOCKS_KEY) {
            if has_own_property(&value, ENTITY_MAP_KEY) {
                let entity_map = &value[ENTITY_MAP_KEY];
                return ContentFormat::Legacy(LegacyRecord::from_parts(blocks, entity_map, sink));
            }
        }
        if !value.is_object() {
            return ContentFormat::Unrecognized;
        }
        match serde_json::from_value::<Document>(value) {
            Ok(doc) => ContentFormat::Tree(doc),
            Err(_) => ContentFormat::Unrecognized,
        }
    }

    /// Parses and classifies a stored string; `None` when it is not JSON.
    pub fn parse(input: &str, sink: &dyn DiagnosticSink) -> Option<Self> {
        match serde_json::from_str::<Value>(input) {
            Ok(value) => Some(Self::detect(value, sink)),
            Err(err) => {
                sink.report(&Diagnostic::InvalidJson {
                    message: err.to_string(),
                });
                None
            }
        }
    }
}

/// Reads stored rich-text values.
#[derive(Debug, Clone, Default)]
pub struct Adapter<S = IgnoreDiagnostics> {
    sink: S,
}

impl Adapter {
    pub fn new() -> Self {
        Self {
            sink: IgnoreDiagnostics,
        }
    }

    /// An adapter reporting its recoveries to `sink`. Output is identical to
    /// [`Adapter::new`].
    pub fn with_diagnostics<S: DiagnosticSink>(sink: S) -> Adapter<S> {
        Adapter { sink }
    }
}

impl<S: DiagnosticSink> Adapter<S> {
    /// Reads a stored value into a document.
    pub fn parse(&self, input: &str) -> Document {
        match ContentFormat::parse(input, &self.sink) {
            Some(format) => self.resolve(format),
            None => Document::new(),
        }
    }

    /// Reads an already parsed value into a document.
    pub fn parse_value(&self, value: Value) -> Document {
        self.resolve(ContentFormat::detect(value, &self.sink))
    }

    fn resolve(&self, format: ContentFormat) -> Document {
        match format {
            ContentFormat::Legacy(record) => convert_legacy(&record, &self.sink),
            ContentFormat::Tree(doc) => {
                if self.sink.enabled() {
                    report_raw_nodes(doc.nodes(), &self.sink);
                }
                doc
            }
            ContentFormat::Unrecognized => {
                self.sink.report(&Diagnostic::UnrecognizedRoot);
                Document::new()
            }
        }
    }
}

/// Reads a stored rich-text value into a document, silently recovering from
/// malformed input.
///
/// # Example
///
/// ```
/// use richdoc::parse_document;
///
/// let doc = parse_document(r#"{"blocks": [{"type": "unstyled", "text": "a\n\nb"}], "entityMap": {}}"#);
/// assert_eq!(doc.blocks().count(), 3);
///
/// assert!(parse_document("not json").is_empty());
/// ```
pub fn parse_document(input: &str) -> Document {
    Adapter::new().parse(input)
}

fn node_kind(raw: &Value) -> String {
    raw.get("type")
        .and_then(Value::as_str)
        .unwrap_or("untyped")
        .to_owned()
}

fn report_raw<T>(node: &Node<T>, sink: &dyn DiagnosticSink) {
    if let Some(raw) = node.raw() {
        sink.report(&Diagnostic::RawNode {
            kind: node_kind(raw),
        });
    }
}

fn report_raw_nodes(nodes: &[Node<Block>], sink: &dyn DiagnosticSink) {
    for node in nodes {
        report_raw(node, sink);
        let Some(block) = node.typed() else {
            continue;
        };
        match block {
            Block::Paragraph(p) => report_raw_inlines(p.nodes(), sink),
            Block::Heading(h) => report_raw_inlines(h.nodes(), sink),
            Block::BulletList(list) | Block::OrderedList(list) => {
                for item in list.nodes() {
                    report_raw(item, sink);
                    if let Some(item) = item.typed() {
                        report_raw_nodes(item.nodes(), sink);
                    }
                }
            }
            Block::Image(_) => {}
        }
    }
}

fn report_raw_inlines(inlines: &[Node<Inline>], sink: &dyn DiagnosticSink) {
    for inline in inlines {
        report_raw(inline, sink);
        if let Some(Inline::Text(run)) = inline.typed() {
            for mark in run.mark_nodes() {
                report_raw(mark, sink);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn detects_legacy_with_empty_or_null_entity_map() {
        for map in [json!({}), json!(null), json!([])] {
            let value = json!({"blocks": [], "entityMap": map});
            assert!(matches!(
                ContentFormat::detect(value, &IgnoreDiagnostics),
                ContentFormat::Legacy(_)
            ));
        }
    }

    #[test]
    fn blocks_without_entity_map_is_a_tree() {
        let value = json!({"blocks": [{"text": "x"}]});
        match ContentFormat::detect(value.clone(), &IgnoreDiagnostics) {
            ContentFormat::Tree(doc) => {
                assert!(doc.is_empty());
                assert_eq!(serde_json::to_value(&doc).unwrap(), value);
            }
            other => panic!("expected tree, got {other:?}"),
        }
    }

    #[test]
    fn non_array_blocks_is_a_tree() {
        let value = json!({"blocks": "nope", "entityMap": {}});
        assert!(matches!(
            ContentFormat::detect(value, &IgnoreDiagnostics),
            ContentFormat::Tree(_)
        ));
    }

    #[test]
    fn non_objects_are_unrecognized() {
        for value in [json!("text"), json!(3), json!([1]), json!(null)] {
            assert_eq!(
                ContentFormat::detect(value, &IgnoreDiagnostics),
                ContentFormat::Unrecognized
            );
        }
        assert_eq!(
            ContentFormat::detect(json!({"content": 5}), &IgnoreDiagnostics),
            ContentFormat::Unrecognized
        );
    }

    #[test]
    fn invalid_json_is_reported_once() {
        let seen = RefCell::new(Vec::new());
        let adapter = Adapter::with_diagnostics(|d: &Diagnostic| seen.borrow_mut().push(d.clone()));
        assert!(adapter.parse("{").is_empty());
        let seen = seen.into_inner();
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], Diagnostic::InvalidJson { .. }));
    }

    #[test]
    fn raw_tree_nodes_are_reported() {
        let seen = RefCell::new(Vec::new());
        let adapter = Adapter::with_diagnostics(|d: &Diagnostic| seen.borrow_mut().push(d.clone()));
        adapter.parse(
            &json!({"type": "doc", "content": [
                {"type": "table"},
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [
                            {"type": "text", "text": "x", "marks": [{"type": "highlight"}]}
                        ]}
                    ]}
                ]}
            ]})
            .to_string(),
        );
        assert_eq!(
            seen.into_inner(),
            vec![
                Diagnostic::RawNode { kind: "table".into() },
                Diagnostic::RawNode { kind: "highlight".into() },
            ]
        );
    }

    #[test]
    fn parse_value_skips_string_parsing() {
        let doc = Adapter::new().parse_value(json!({"type": "doc", "content": []}));
        assert!(doc.is_empty());
    }
}
