use richdoc_util::is_blank;

use crate::adapter::ContentFormat;
use crate::config::PlainTextOptions;
use crate::diagnostics::IgnoreDiagnostics;
use crate::document::{Block, Document, Inline, ListItem};
use crate::legacy::{LegacyBlockType, LegacyRecord};

const BULLET: &str = "• ";

/// Reduces a stored rich-text value to plain prose.
///
/// Input that is not JSON is returned verbatim. Legacy records give the text
/// of their non-atomic blocks, one per line. Document trees are reduced by
/// [`plain_text_of`]. Anything that reduces to blank text, or is valid JSON
/// of no known shape, gives `options.placeholder`.
///
/// # Example
///
/// ```
/// use richdoc::render::plain_text;
/// use richdoc::PlainTextOptions;
///
/// let stored = r#"{"type": "doc", "content": [{"type": "bulletList", "content": [
///     {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "x"}]}]},
///     {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "y"}]}]}
/// ]}]}"#;
/// assert_eq!(plain_text(stored, &PlainTextOptions::default()), "• x\n• y");
/// assert_eq!(plain_text("not json", &PlainTextOptions::default()), "not json");
/// ```
pub fn plain_text(input: &str, options: &PlainTextOptions) -> String {
    let Some(format) = ContentFormat::parse(input, &IgnoreDiagnostics) else {
        return input.to_owned();
    };
    let text = match format {
        ContentFormat::Legacy(record) => legacy_text(&record),
        ContentFormat::Tree(doc) => document_text(&doc),
        ContentFormat::Unrecognized => String::new(),
    };
    or_placeholder(text, options)
}

/// Reduces a document to plain prose.
///
/// Paragraphs and headings give their text runs joined by a single space;
/// lists give one `"• "`-prefixed line per item; images give nothing. Block
/// results are joined by newlines, empty ones included. Only when the whole
/// text is blank does the placeholder replace it.
pub fn plain_text_of(doc: &Document, options: &PlainTextOptions) -> String {
    or_placeholder(document_text(doc), options)
}

fn or_placeholder(text: String, options: &PlainTextOptions) -> String {
    if is_blank(&text) {
        options.placeholder.clone()
    } else {
        text
    }
}

fn legacy_text(record: &LegacyRecord) -> String {
    record
        .blocks
        .iter()
        .filter(|block| block.kind != LegacyBlockType::Atomic)
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn document_text(doc: &Document) -> String {
    doc.blocks()
        .filter_map(block_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn block_text(block: &Block) -> Option<String> {
    match block {
        Block::Paragraph(p) => Some(inline_text(p.inlines())),
        Block::Heading(h) => Some(inline_text(h.inlines())),
        Block::BulletList(list) | Block::OrderedList(list) => Some(
            list.items()
                .map(|item| format!("{BULLET}{}", item_text(item)))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Block::Image(_) => None,
    }
}

fn item_text(item: &ListItem) -> String {
    item.paragraphs()
        .map(|p| inline_text(p.inlines()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn inline_text<'a>(inlines: impl Iterator<Item = &'a Inline>) -> String {
    inlines
        .filter_map(Inline::text)
        .collect::<Vec<_>>()
        .join(" ")
}
