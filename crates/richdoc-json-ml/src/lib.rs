//! richdoc-json-ml: JsonML display trees.
//!
//! JsonML represents HTML trees as nested JSON arrays:
//! `[tag, attrs, ...children]` where attrs is `null` or a key→value map.
//! The structured renderer builds these trees; UI layers either consume the
//! JSON form ([`JsonMlNode::to_json`]) or the HTML string ([`to_html`]).

use serde_json::{Map, Value};

// ── Types ──────────────────────────────────────────────────────────────────

/// Elements rendered without children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// A tag name, or the fragment marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Named tag (e.g. `"p"`, `"strong"`)
    Named(String),
    /// Empty string; children are emitted without a wrapper element
    Fragment,
}

impl Tag {
    pub fn is_fragment(&self) -> bool {
        matches!(self, Tag::Fragment)
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Named(s) => s,
            Tag::Fragment => "",
        }
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.name())
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Tag::Fragment
        } else {
            Tag::Named(s.to_owned())
        }
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Tag::Fragment
        } else {
            Tag::Named(s)
        }
    }
}

/// A node in the JsonML tree: either a text leaf or an element.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonMlNode {
    /// Text content leaf
    Text(String),
    /// Element: `[tag, attrs, ...children]`
    Element(JsonMlElement),
}

/// A JsonML element: tag, optional attributes, and children.
///
/// Attributes are an ordered `Vec<(key, value)>` so output is deterministic
/// and follows insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonMlElement {
    pub tag: Tag,
    pub attrs: Option<Vec<(String, String)>>,
    pub children: Vec<JsonMlNode>,
}

impl JsonMlElement {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            attrs: None,
            children: Vec::new(),
        }
    }

    pub fn fragment() -> Self {
        Self::new(Tag::Fragment)
    }

    /// Appends an attribute, keeping earlier ones in place.
    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs
            .get_or_insert_with(Vec::new)
            .push((key.to_owned(), value.into()));
        self
    }

    pub fn child(mut self, node: JsonMlNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = JsonMlNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Looks up an attribute value by key.
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl From<JsonMlElement> for JsonMlNode {
    fn from(el: JsonMlElement) -> Self {
        JsonMlNode::Element(el)
    }
}

impl JsonMlNode {
    pub fn text(s: impl Into<String>) -> Self {
        JsonMlNode::Text(s.into())
    }

    /// Array form: text leaves become strings, elements become
    /// `[tag, attrs|null, ...children]`.
    pub fn to_json(&self) -> Value {
        match self {
            JsonMlNode::Text(s) => Value::String(s.clone()),
            JsonMlNode::Element(el) => {
                let mut arr = Vec::with_capacity(el.children.len() + 2);
                arr.push(Value::String(el.tag.name().to_owned()));
                arr.push(match &el.attrs {
                    Some(attrs) => Value::Object(
                        attrs
                            .iter()
                            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                            .collect::<Map<String, Value>>(),
                    ),
                    None => Value::Null,
                });
                arr.extend(el.children.iter().map(JsonMlNode::to_json));
                Value::Array(arr)
            }
        }
    }

    /// Concatenated text of every leaf below this node.
    pub fn text_content(&self) -> String {
        walk(self)
            .filter_map(|node| match node {
                JsonMlNode::Text(s) => Some(s.as_str()),
                JsonMlNode::Element(_) => None,
            })
            .collect()
    }
}

// ── HTML serializer ────────────────────────────────────────────────────────

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Serialize a [`JsonMlNode`] to an HTML string.
///
/// - `tab`: indentation string (e.g. `"  "`); use `""` for compact output.
/// - `indent`: current indentation prefix (used in recursion).
pub fn to_html(node: &JsonMlNode, tab: &str, indent: &str) -> String {
    match node {
        JsonMlNode::Text(s) => format!("{}{}", indent, escape_text(s)),
        JsonMlNode::Element(el) => element_to_html(el, tab, indent),
    }
}

fn element_to_html(el: &JsonMlElement, tab: &str, indent: &str) -> String {
    let is_fragment = el.tag.is_fragment();
    let children_indent = if is_fragment {
        indent.to_owned()
    } else {
        format!("{}{}", indent, tab)
    };
    let do_indent = !tab.is_empty();

    // Inline content (text and phrasing elements) is never reflowed, so
    // indentation only applies to block-level children.
    let inline_children = el.children.iter().all(is_inline);

    let children_str = if inline_children {
        el.children.iter().map(|c| to_html(c, "", "")).collect::<String>()
    } else {
        let mut s = String::new();
        for (i, child) in el.children.iter().enumerate() {
            if do_indent && (!is_fragment || i > 0) {
                s.push('\n');
            }
            s.push_str(&to_html(child, tab, &children_indent));
        }
        s
    };

    if is_fragment {
        return children_str;
    }

    let tag_str = el.tag.name();
    let mut attr_str = String::new();
    if let Some(attrs) = &el.attrs {
        for (k, v) in attrs {
            attr_str.push(' ');
            attr_str.push_str(k);
            attr_str.push_str("=\"");
            attr_str.push_str(&escape_attr(v));
            attr_str.push('"');
        }
    }

    if el.tag.is_void() {
        return format!("{}<{}{} />", indent, tag_str, attr_str);
    }

    let closing_indent = if do_indent && !inline_children {
        format!("\n{}", indent)
    } else {
        String::new()
    };
    format!(
        "{}<{}{}>{}{}</{}>",
        indent, tag_str, attr_str, children_str, closing_indent, tag_str
    )
}

const INLINE_TAGS: &[&str] = &["a", "b", "br", "code", "em", "i", "s", "span", "strong", "u"];

fn is_inline(node: &JsonMlNode) -> bool {
    match node {
        JsonMlNode::Text(_) => true,
        JsonMlNode::Element(el) => INLINE_TAGS.contains(&el.tag.name()),
    }
}

// ── Walker ─────────────────────────────────────────────────────────────────

/// An iterator that walks a [`JsonMlNode`] tree depth-first (pre-order).
pub struct JsonMlWalker<'a> {
    stack: Vec<&'a JsonMlNode>,
}

impl<'a> JsonMlWalker<'a> {
    pub fn new(root: &'a JsonMlNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for JsonMlWalker<'a> {
    type Item = &'a JsonMlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let JsonMlNode::Element(el) = node {
            // Push children in reverse so the first child is popped first
            self.stack.extend(el.children.iter().rev());
        }
        Some(node)
    }
}

/// Walk a [`JsonMlNode`] tree, yielding each node depth-first.
pub fn walk(node: &JsonMlNode) -> JsonMlWalker<'_> {
    JsonMlWalker::new(node)
}
