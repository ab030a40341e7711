//! Derives human-facing `(line, column)` positions from byte spans, with
//! dual UTF-8/UTF-16 column tracking (editors and `graphql-js` disagree on
//! which one a "column" counts in, so we hand back both).

use crate::source::Source;
use crate::source::Span;

/// A 1-based line/column position, in both UTF-8 and UTF-16 code units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: u32,
    pub utf8_column: u32,
    pub utf16_column: u32,
}

impl SourcePosition {
    /// Scans `source` from the start to compute the position of byte offset
    /// `offset`. O(n) in the offset; callers needing many positions out of
    /// one source should prefer [`line_index`] and bisect it instead.
    pub fn from_offset(source: &Source, offset: u32) -> Self {
        let text = source.text();
        let mut line = 1u32;
        let mut utf8_column = 1u32;
        let mut utf16_column = 1u32;
        for (byte_idx, ch) in text.char_indices() {
            if byte_idx as u32 >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                utf8_column = 1;
                utf16_column = 1;
            } else {
                utf8_column += 1;
                utf16_column += ch.len_utf16() as u32;
            }
        }
        Self { line, utf8_column, utf16_column }
    }
}

/// Byte offsets of the start of each line in `source`, for fast repeated
/// position lookups (e.g. rendering many diagnostics against one document).
pub fn line_index(source: &Source) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (idx, ch) in source.text().char_indices() {
        if ch == '\n' {
            starts.push((idx + 1) as u32);
        }
    }
    starts
}

/// A one-line, caret-annotated excerpt of `source` around `span`, for
/// detailed diagnostic rendering.
pub fn render_excerpt(source: &Source, span: Span) -> String {
    let text = source.text();
    let line_starts = line_index(source);
    let line_idx = match line_starts.binary_search(&span.start) {
        Ok(i) => i,
        Err(i) => i.saturating_sub(1),
    };
    let line_start = line_starts[line_idx] as usize;
    let line_end = text[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(text.len());
    let line_text = &text[line_start..line_end];

    let pos = SourcePosition::from_offset(source, span.start);
    let caret_indent = " ".repeat(pos.utf8_column.saturating_sub(1) as usize);
    let caret_width = span.len().max(1) as usize;
    format!(
        "{line_text}\n{caret_indent}{}",
        "^".repeat(caret_width),
    )
}
