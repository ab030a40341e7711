//! A named chunk of GraphQL source text and the byte-offset spans into it
//! that every token, AST node, and diagnostic is anchored to.

use std::sync::Arc;

/// Owns the text of a single GraphQL document (query, or, inline request
/// body) along with a name used in diagnostics (`"<request>"` when no
/// better name is available).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    name: Arc<str>,
    text: Arc<str>,
}

impl Source {
    pub fn new(name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self { name: name.into(), text: text.into() }
    }

    pub fn anonymous(text: impl Into<Arc<str>>) -> Self {
        Self::new("<request>", text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A half-open `[start, end)` byte-offset range into a [`Source`].
///
/// `start == end` is a valid, zero-width span (used for EOF tokens).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn text<'a>(&self, source: &'a Source) -> &'a str {
        &source.text()[self.start as usize..self.end as usize]
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The smallest span containing both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}
