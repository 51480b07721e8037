//! Editor tree document model.
//!
//! The editing widget persists documents as nested JSON trees:
//!
//! ```json
//! {"type": "doc", "content": [
//!   {"type": "paragraph", "content": [
//!     {"type": "text", "text": "see "},
//!     {"type": "text", "text": "docs", "marks": [{"type": "link", "attrs": {"href": "http://z"}}]}
//!   ]}
//! ]}
//! ```
//!
//! Every node that fails to decode as one of the known kinds is kept as
//! [`Node::Raw`], so a stored tree re-serializes the way it was read even
//! when it carries nodes this crate does not understand. Renderers skip raw
//! nodes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Free-form node attributes.
pub type Attrs = Map<String, Value>;

/// A key that is absent (`None`), stored as `null` (`Some(None)`), or set.
pub type Nullable<T> = Option<Option<T>>;

const DOC_TYPE: &str = "doc";

/// Decodes `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps an explicit `null` apart from a missing key; pair with
/// `default` and `skip_serializing_if = "Option::is_none"`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn present<T>(field: &Nullable<Vec<T>>) -> &[T] {
    match field {
        Some(Some(items)) => items,
        _ => &[],
    }
}

fn attr<'a>(attrs: &'a Nullable<Attrs>, key: &str) -> Option<&'a Value> {
    match attrs {
        Some(Some(attrs)) => attrs.get(key),
        _ => None,
    }
}

fn attrs_from<const N: usize>(entries: [(&str, Option<Value>); N]) -> Nullable<Attrs> {
    Some(Some(
        entries
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_owned(), v)))
            .collect(),
    ))
}

// ── Nodes ──────────────────────────────────────────────────────────────────

/// A tree node that either decoded as `T` or is kept verbatim.
///
/// A node is only typed when the typed value serializes back to exactly the
/// stored JSON; anything else (unknown kinds, wrong field types, a `null`
/// where a string belongs) stays raw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node<T> {
    Typed(T),
    Raw(Value),
}

impl<T> Node<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Node::Typed(t) => Some(t),
            Node::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            Node::Typed(_) => None,
            Node::Raw(v) => Some(v),
        }
    }
}

impl<T: Serialize + DeserializeOwned> Node<T> {
    pub fn decode(value: Value) -> Self {
        match T::deserialize(&value) {
            Ok(typed) if serde_json::to_value(&typed).is_ok_and(|back| back == value) => {
                Node::Typed(typed)
            }
            _ => Node::Raw(value),
        }
    }
}

impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for Node<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Node::decode)
    }
}

impl<T> From<T> for Node<T> {
    fn from(t: T) -> Self {
        Node::Typed(t)
    }
}

fn typed<T>(nodes: &[Node<T>]) -> impl Iterator<Item = &T> {
    nodes.iter().filter_map(Node::typed)
}

// ── Document ───────────────────────────────────────────────────────────────

/// The canonical rich-text tree: an ordered sequence of blocks.
///
/// The block sequence can only be replaced as a whole; there is no API for
/// editing individual blocks in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    kind: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    content: Nullable<Vec<Node<Block>>>,
    #[serde(flatten)]
    extra: Attrs,
}

impl Document {
    /// An empty `doc`.
    pub fn new() -> Self {
        Self {
            kind: Some(Some(DOC_TYPE.to_owned())),
            content: Some(Some(Vec::new())),
            extra: Attrs::new(),
        }
    }

    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let mut doc = Self::new();
        doc.replace_content(blocks);
        doc
    }

    /// All top-level nodes, raw ones included.
    pub fn nodes(&self) -> &[Node<Block>] {
        present(&self.content)
    }

    /// Top-level blocks that decoded to a known kind.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        typed(self.nodes())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// Replaces the whole block sequence.
    pub fn replace_content(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.content = Some(Some(blocks.into_iter().map(Node::Typed).collect()));
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ── Blocks ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    BulletList(List),
    OrderedList(List),
    Image(Image),
}

impl Block {
    pub fn paragraph(inlines: Vec<Inline>) -> Self {
        Block::Paragraph(Paragraph::new(inlines))
    }

    pub fn heading(level: u8, inlines: Vec<Inline>) -> Self {
        Block::Heading(Heading {
            attrs: attrs_from([("level", Some(Value::from(level)))]),
            content: inline_content(inlines),
            extra: Attrs::new(),
        })
    }

    pub fn bullet_list(items: Vec<ListItem>) -> Self {
        Block::BulletList(List::new(items))
    }

    pub fn ordered_list(items: Vec<ListItem>) -> Self {
        Block::OrderedList(List::new(items))
    }

    pub fn image(src: impl Into<String>, alt: Option<String>) -> Self {
        Block::Image(Image {
            attrs: attrs_from([
                ("src", Some(Value::String(src.into()))),
                ("alt", alt.map(Value::String)),
            ]),
            extra: Attrs::new(),
        })
    }
}

fn inline_content(inlines: Vec<Inline>) -> Nullable<Vec<Node<Inline>>> {
    if inlines.is_empty() {
        None
    } else {
        Some(Some(inlines.into_iter().map(Node::Typed).collect()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Nullable<Vec<Node<Inline>>>,
    /// Node-level keys other than the above, such as an editor-assigned `id`.
    #[serde(flatten)]
    pub extra: Attrs,
}

impl Paragraph {
    /// An empty inline list is stored without a `content` key, the way the
    /// editor writes empty paragraphs.
    pub fn new(inlines: Vec<Inline>) -> Self {
        Self {
            content: inline_content(inlines),
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &[Node<Inline>] {
        present(&self.content)
    }

    pub fn inlines(&self) -> impl Iterator<Item = &Inline> {
        typed(self.nodes())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Nullable<Vec<Node<Inline>>>,
    #[serde(flatten)]
    pub extra: Attrs,
}

impl Heading {
    /// `attrs.level` clamped to `1..=6`; 1 when missing or not a number.
    pub fn level(&self) -> u8 {
        attr(&self.attrs, "level")
            .and_then(Value::as_u64)
            .map_or(1, |level| level.clamp(1, 6) as u8)
    }

    pub fn nodes(&self) -> &[Node<Inline>] {
        present(&self.content)
    }

    pub fn inlines(&self) -> impl Iterator<Item = &Inline> {
        typed(self.nodes())
    }
}

/// Shared shape of `bulletList` and `orderedList`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Nullable<Vec<Node<ListItem>>>,
    #[serde(flatten)]
    pub extra: Attrs,
}

impl List {
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            content: Some(Some(items.into_iter().map(Node::Typed).collect())),
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &[Node<ListItem>] {
        present(&self.content)
    }

    pub fn items(&self) -> impl Iterator<Item = &ListItem> {
        typed(self.nodes())
    }

    /// First number of an ordered list.
    pub fn start(&self) -> u64 {
        attr(&self.attrs, "start")
            .and_then(Value::as_u64)
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListItemType {
    #[default]
    #[serde(rename = "listItem")]
    ListItem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(rename = "type")]
    kind: ListItemType,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Nullable<Vec<Node<Block>>>,
    #[serde(flatten)]
    pub extra: Attrs,
}

impl ListItem {
    /// A list item wrapping one paragraph.
    pub fn new(inlines: Vec<Inline>) -> Self {
        Self {
            content: Some(Some(vec![Node::Typed(Block::paragraph(inlines))])),
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &[Node<Block>] {
        present(&self.content)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        typed(self.nodes())
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }
}

/// Attributes are kept as stored (the editor writes `"alt": null` and
/// `"title": null` by default) and read through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(flatten)]
    pub extra: Attrs,
}

impl Image {
    /// Empty when the upload never completed.
    pub fn src(&self) -> &str {
        attr(&self.attrs, "src")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn alt(&self) -> Option<&str> {
        attr(&self.attrs, "alt").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        attr(&self.attrs, "title").and_then(Value::as_str)
    }
}

// ── Inlines ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text(TextRun),
    HardBreak(HardBreak),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub marks: Nullable<Vec<Node<Mark>>>,
    #[serde(flatten)]
    pub extra: Attrs,
}

impl TextRun {
    pub fn mark_nodes(&self) -> &[Node<Mark>] {
        present(&self.marks)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardBreak {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(flatten)]
    pub extra: Attrs,
}

impl Inline {
    pub fn plain(text: impl Into<String>) -> Self {
        Inline::Text(TextRun {
            text: text.into(),
            ..TextRun::default()
        })
    }

    pub fn linked(text: impl Into<String>, href: impl Into<String>) -> Self {
        Inline::plain(text).with_mark(Mark::link(href))
    }

    pub fn hard_break() -> Self {
        Inline::HardBreak(HardBreak::default())
    }

    /// Adds a mark. A hard break carries no marks and is returned unchanged.
    pub fn with_mark(self, mark: Mark) -> Self {
        match self {
            Inline::Text(mut run) => {
                if let Some(Some(marks)) = &mut run.marks {
                    marks.push(Node::Typed(mark));
                } else {
                    run.marks = Some(Some(vec![Node::Typed(mark)]));
                }
                Inline::Text(run)
            }
            other => other,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Inline::Text(run) => Some(&run.text),
            Inline::HardBreak(_) => None,
        }
    }

    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        let marks = match self {
            Inline::Text(run) => run.mark_nodes(),
            Inline::HardBreak(_) => &[],
        };
        typed(marks)
    }

    /// Marks with repeats of the same kind removed, first occurrence kept.
    pub fn effective_marks(&self) -> Vec<&Mark> {
        let mut seen: Vec<MarkKind> = Vec::with_capacity(4);
        self.marks()
            .filter(|mark| {
                let kind = mark.kind();
                if seen.contains(&kind) {
                    false
                } else {
                    seen.push(kind);
                    true
                }
            })
            .collect()
    }
}

// ── Marks ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold(PlainMark),
    Italic(PlainMark),
    Underline(PlainMark),
    Link(LinkMark),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Link,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlainMark {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(flatten)]
    pub extra: Attrs,
}

/// `attrs.href` plus whatever else the editor stored (`target`, `rel`,
/// `class`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkMark {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub attrs: Nullable<Attrs>,
    #[serde(flatten)]
    pub extra: Attrs,
}

impl LinkMark {
    pub fn href(&self) -> Option<&str> {
        attr(&self.attrs, "href").and_then(Value::as_str)
    }
}

impl Mark {
    pub fn bold() -> Self {
        Mark::Bold(PlainMark::default())
    }

    pub fn italic() -> Self {
        Mark::Italic(PlainMark::default())
    }

    pub fn underline() -> Self {
        Mark::Underline(PlainMark::default())
    }

    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link(LinkMark {
            attrs: attrs_from([("href", Some(Value::String(href.into())))]),
            extra: Attrs::new(),
        })
    }

    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Bold(_) => MarkKind::Bold,
            Mark::Italic(_) => MarkKind::Italic,
            Mark::Underline(_) => MarkKind::Underline,
            Mark::Link(_) => MarkKind::Link,
        }
    }

    /// Link destination; `None` for other marks and for links without one.
    pub fn href(&self) -> Option<&str> {
        match self {
            Mark::Link(link) => link.href(),
            _ => None,
        }
    }
}
