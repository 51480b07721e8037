use richdoc_util::Utf16Text;

use super::{EntityMap, EntityRange, EntityType, LegacyBlock, LegacyBlockType, LegacyRecord};
use crate::diagnostics::{Diagnostic, DiagnosticSink, IgnoreDiagnostics};
use crate::document::{Block, Document, Inline};

/// Converts a legacy record into a document, block by block.
///
/// Each legacy block yields zero or more blocks in order:
///
/// - `atomic` blocks yield one image when their first entity range resolves
///   to an `IMAGE` entity, nothing otherwise;
/// - `unstyled` blocks without entity ranges, and blocks of any other type,
///   yield one paragraph per `\n`-separated line (an empty line gives an
///   empty paragraph);
/// - `unstyled` blocks with entity ranges yield a single paragraph, their
///   newlines flattened to spaces, spliced by [`splice_entity_ranges`].
pub fn convert_legacy(record: &LegacyRecord, sink: &dyn DiagnosticSink) -> Document {
    Document::from_blocks(
        record
            .blocks
            .iter()
            .enumerate()
            .flat_map(|(index, block)| convert_block(index, block, &record.entity_map, sink)),
    )
}

fn convert_block(
    index: usize,
    block: &LegacyBlock,
    entity_map: &EntityMap,
    sink: &dyn DiagnosticSink,
) -> Vec<Block> {
    match &block.kind {
        LegacyBlockType::Atomic => atomic_image(index, block, entity_map, sink)
            .into_iter()
            .collect(),
        LegacyBlockType::Unstyled if !block.entity_ranges.is_empty() => {
            let text = block.text.split('\n').collect::<Vec<_>>().join(" ");
            let inlines = splice(index, &text, &block.entity_ranges, entity_map, sink);
            vec![Block::paragraph(inlines)]
        }
        LegacyBlockType::Unstyled => line_paragraphs(&block.text),
        LegacyBlockType::Other(kind) => {
            sink.report(&Diagnostic::UnknownBlockType {
                block: index,
                kind: kind.clone(),
            });
            line_paragraphs(&block.text)
        }
    }
}

fn line_paragraphs(text: &str) -> Vec<Block> {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                Block::paragraph(Vec::new())
            } else {
                Block::paragraph(vec![Inline::plain(line)])
            }
        })
        .collect()
}

fn atomic_image(
    index: usize,
    block: &LegacyBlock,
    entity_map: &EntityMap,
    sink: &dyn DiagnosticSink,
) -> Option<Block> {
    let Some(range) = block.entity_ranges.first() else {
        sink.report(&Diagnostic::AtomicWithoutEntity { block: index });
        return None;
    };
    let Some(entity) = entity_map.get(&range.key) else {
        sink.report(&Diagnostic::MissingEntity {
            block: index,
            key: range.key.clone(),
        });
        return None;
    };
    match entity.kind {
        EntityType::Image => Some(Block::image(
            entity.data.src.clone().unwrap_or_default(),
            entity.data.alt.clone(),
        )),
        _ => {
            sink.report(&Diagnostic::NonImageAtomic {
                block: index,
                key: range.key.clone(),
                kind: entity.kind.as_str().to_owned(),
            });
            None
        }
    }
}

/// Splits `text` into inlines at the given entity ranges.
///
/// Ranges are visited by ascending offset. Text between ranges becomes plain
/// inlines; a range bound to a `LINK` entity becomes a linked inline, any
/// other range stays plain. A range that starts inside text already
/// consumed by an earlier range is clipped to start where that range ended,
/// so no text is ever emitted twice. With no ranges the whole text is one
/// plain inline.
pub fn splice_entity_ranges(
    text: &str,
    ranges: &[EntityRange],
    entity_map: &EntityMap,
) -> Vec<Inline> {
    splice(0, text, ranges, entity_map, &IgnoreDiagnostics)
}

struct Spliced {
    cursor: usize,
    inlines: Vec<Inline>,
}

fn splice(
    block: usize,
    text: &str,
    ranges: &[EntityRange],
    entity_map: &EntityMap,
    sink: &dyn DiagnosticSink,
) -> Vec<Inline> {
    if ranges.is_empty() {
        return vec![Inline::plain(text)];
    }

    let source = Utf16Text::new(text);
    let len = source.len();

    let mut sorted: Vec<&EntityRange> = ranges.iter().collect();
    sorted.sort_by_key(|range| range.offset);

    let init = Spliced {
        cursor: 0,
        inlines: Vec::new(),
    };
    let Spliced {
        cursor,
        mut inlines,
    } = sorted.into_iter().fold(init, |mut acc, range| {
        let end = range.offset.saturating_add(range.length);
        if end > len {
            sink.report(&Diagnostic::RangeOutOfBounds { block, end, len });
        }
        let start = if range.offset < acc.cursor {
            sink.report(&Diagnostic::OverlappingRange {
                block,
                offset: range.offset,
                cursor: acc.cursor,
            });
            acc.cursor
        } else {
            range.offset
        };
        let end = end.min(len);

        if start > acc.cursor {
            let gap = source.slice(acc.cursor, start);
            if !gap.is_empty() {
                acc.inlines.push(Inline::plain(gap));
            }
        }
        if end > start {
            let span = source.slice(start, end);
            acc.inlines
                .push(span_inline(block, span, range, entity_map, sink));
        }
        acc.cursor = acc.cursor.max(end).max(start.min(len));
        acc
    });

    if cursor < len {
        inlines.push(Inline::plain(source.slice_from(cursor)));
    }
    inlines
}

fn span_inline(
    block: usize,
    span: String,
    range: &EntityRange,
    entity_map: &EntityMap,
    sink: &dyn DiagnosticSink,
) -> Inline {
    let Some(entity) = entity_map.get(&range.key) else {
        sink.report(&Diagnostic::MissingEntity {
            block,
            key: range.key.clone(),
        });
        return Inline::plain(span);
    };
    match (&entity.kind, entity.data.link_target()) {
        (EntityType::Link, Some(href)) => Inline::linked(span, href),
        (kind, _) => {
            sink.report(&Diagnostic::UnlinkedEntity {
                block,
                key: range.key.clone(),
                kind: kind.as_str().to_owned(),
            });
            Inline::plain(span)
        }
    }
}
