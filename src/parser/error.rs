use crate::diagnostic::Notes;
use crate::lexer::LexError;
use crate::source::Source;
use crate::source::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: String, found: String },
    UnexpectedEof { expected: String },
    LexerError,
    UnclosedDelimiter { delimiter: &'static str },
    DuplicateObjectField { name: String },
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("{}", self.message())]
pub struct ParseError {
    kind: ParseErrorKind,
    span: Span,
    notes: Notes,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span, notes: Notes::new() }
    }

    pub fn with_notes(kind: ParseErrorKind, span: Span, notes: Notes) -> Self {
        Self { kind, span, notes }
    }

    pub fn from_lex_error(err: LexError) -> Self {
        Self {
            kind: ParseErrorKind::LexerError,
            span: err.span(),
            notes: err.notes().clone(),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                format!("Expected {expected}, found {found}")
            }
            ParseErrorKind::UnexpectedEof { expected } => {
                format!("Expected {expected}, found <EOF>")
            }
            ParseErrorKind::LexerError => "Invalid token".to_string(),
            ParseErrorKind::UnclosedDelimiter { delimiter } => {
                format!("Unclosed `{delimiter}`")
            }
            ParseErrorKind::DuplicateObjectField { name } => {
                format!("Duplicate input object field `{name}`")
            }
        }
    }

    pub fn format_oneline(&self, source: &Source) -> String {
        crate::diagnostic::format_oneline(source, self.span, &self.message())
    }

    pub fn format_detailed(&self, source: &Source) -> String {
        crate::diagnostic::format_detailed(source, self.span, &self.message(), &self.notes)
    }
}
