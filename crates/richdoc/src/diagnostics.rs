//! Degradation reports.
//!
//! Converting stored content never fails: every malformed input degrades to
//! a partial or empty result. Callers that want to see those degradations
//! install a [`DiagnosticSink`]; by default nothing is reported anywhere.

use thiserror::Error;

/// One best-effort recovery made while reading stored content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("content is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("content root is neither a legacy record nor a document tree")]
    UnrecognizedRoot,

    #[error("legacy block {block} could not be decoded: {message}")]
    MalformedBlock { block: usize, message: String },

    #[error("legacy entity {key:?} could not be decoded: {message}")]
    MalformedEntity { key: String, message: String },

    #[error("legacy block {block} has unknown type {kind:?}, converted to paragraphs")]
    UnknownBlockType { block: usize, kind: String },

    #[error("atomic block {block} has no entity range")]
    AtomicWithoutEntity { block: usize },

    #[error("atomic block {block} references entity {key:?} of type {kind:?}, not an image")]
    NonImageAtomic {
        block: usize,
        key: String,
        kind: String,
    },

    #[error("block {block} references missing entity {key:?}")]
    MissingEntity { block: usize, key: String },

    #[error("entity {key:?} of type {kind:?} in block {block} kept as plain text")]
    UnlinkedEntity {
        block: usize,
        key: String,
        kind: String,
    },

    #[error("entity range at offset {offset} in block {block} overlaps text consumed up to {cursor}")]
    OverlappingRange {
        block: usize,
        offset: usize,
        cursor: usize,
    },

    #[error("entity range ending at {end} exceeds block {block} text length {len}")]
    RangeOutOfBounds { block: usize, end: usize, len: usize },

    #[error("unrecognized {kind:?} node kept as-is")]
    RawNode { kind: String },
}

/// Receives diagnostics emitted during conversion.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);

    /// Whether reports are consumed at all; lets producers skip work that
    /// only exists to build diagnostics.
    fn enabled(&self) -> bool {
        true
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreDiagnostics;

impl DiagnosticSink for IgnoreDiagnostics {
    fn report(&self, _diagnostic: &Diagnostic) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Forwards diagnostics to the `log` facade at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        log::warn!(target: "richdoc", "{diagnostic}");
    }

    fn enabled(&self) -> bool {
        log::log_enabled!(target: "richdoc", log::Level::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_are_sinks() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.clone());
        sink.report(&Diagnostic::UnrecognizedRoot);
        assert!(sink.enabled());
        assert_eq!(seen.into_inner(), vec![Diagnostic::UnrecognizedRoot]);
    }

    #[test]
    fn ignore_is_disabled() {
        assert!(!IgnoreDiagnostics.enabled());
        IgnoreDiagnostics.report(&Diagnostic::UnrecognizedRoot);
    }

    #[test]
    fn messages_name_the_location() {
        let d = Diagnostic::MissingEntity {
            block: 2,
            key: "7".into(),
        };
        assert_eq!(d.to_string(), "block 2 references missing entity \"7\"");
    }
}
