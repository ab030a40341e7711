//! A location-carrying diagnostic note, shared by the lexer, parser, and
//! validator error types, plus the one-line/detailed rendering pair they all
//! build on.

use crate::source::Source;
use crate::source::Span;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteKind {
    General,
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub kind: NoteKind,
    pub message: String,
    pub span: Option<Span>,
}

impl Note {
    pub fn general(message: impl Into<String>) -> Self {
        Self { kind: NoteKind::General, message: message.into(), span: None }
    }

    pub fn help(message: impl Into<String>) -> Self {
        Self { kind: NoteKind::Help, message: message.into(), span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

pub type Notes = SmallVec<[Note; 2]>;

/// Renders a one-line `name:line:col: message` summary for `span` against
/// `source`, the format used by `Display` impls across the error taxonomy.
pub fn format_oneline(source: &Source, span: Span, message: &str) -> String {
    let pos = crate::loc::SourcePosition::from_offset(source, span.start);
    format!("{}:{}:{}: {message}", source.name(), pos.line, pos.utf8_column)
}

/// Renders a multi-line, caret-annotated diagnostic: header, source excerpt,
/// and any notes.
pub fn format_detailed(source: &Source, span: Span, message: &str, notes: &Notes) -> String {
    let pos = crate::loc::SourcePosition::from_offset(source, span.start);
    let mut out = format!(
        "error: {message}\n  --> {}:{}:{}\n",
        source.name(), pos.line, pos.utf8_column,
    );
    out.push_str(&crate::loc::render_excerpt(source, span));
    out.push('\n');
    for note in notes {
        let prefix = match note.kind {
            NoteKind::General => "note",
            NoteKind::Help => "help",
        };
        out.push_str(&format!("  = {prefix}: {}\n", note.message));
    }
    out
}
