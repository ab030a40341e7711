use crate::diagnostic::Notes;
use crate::source::Source;
use crate::source::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    UnterminatedBlockString,
    InvalidEscapeSequence,
    InvalidNumber,
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("{}", self.message())]
pub struct LexError {
    kind: LexErrorKind,
    span: Span,
    notes: Notes,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span, notes: Notes::new() }
    }

    pub fn with_notes(kind: LexErrorKind, span: Span, notes: Notes) -> Self {
        Self { kind, span, notes }
    }

    pub fn kind(&self) -> &LexErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter(c) => format!("Unexpected character: `{c}`"),
            LexErrorKind::UnterminatedString => "Unterminated string literal".to_string(),
            LexErrorKind::UnterminatedBlockString => "Unterminated block string literal".to_string(),
            LexErrorKind::InvalidEscapeSequence => "Invalid escape sequence in string literal".to_string(),
            LexErrorKind::InvalidNumber => "Invalid number literal".to_string(),
        }
    }

    pub fn format_oneline(&self, source: &Source) -> String {
        crate::diagnostic::format_oneline(source, self.span, &self.message())
    }

    pub fn format_detailed(&self, source: &Source) -> String {
        crate::diagnostic::format_detailed(source, self.span, &self.message(), &self.notes)
    }
}
