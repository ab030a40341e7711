//! Turns GraphQL source text into a stream of [`Token`]s.
//!
//! Ignored characters (whitespace, commas, `#`-comments, the UTF-8 BOM) are
//! consumed between tokens and never produce their own `Token`.

mod error;
mod token;

pub use error::LexError;
pub use error::LexErrorKind;
pub use token::Token;
pub use token::TokenKind;

use crate::source::Source;
use crate::source::Span;

pub struct Lexer<'a> {
    source: &'a Source,
    bytes: &'a [u8],
    pos: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self { source, bytes: source.text().as_bytes(), pos: 0 }
    }

    /// Lexes the entire source into a token vector, stopping at the first
    /// error (which is returned instead).
    pub fn tokenize(source: &'a Source) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos as usize).copied()
    }

    fn peek_at(&self, offset: u32) -> Option<u8> {
        self.bytes.get((self.pos + offset) as usize).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn skip_ignored(&mut self) {
        loop {
            match self.peek() {
                Some(b'\xef') if self.bytes[self.pos as usize..].starts_with(b"\xef\xbb\xbf") => {
                    self.pos += 3;
                }
                Some(b' ' | b'\t' | b'\n' | b'\r' | b',') => {
                    self.pos += 1;
                }
                Some(b'#') => {
                    match memchr::memchr(b'\n', &self.bytes[self.pos as usize..]) {
                        Some(rel) => self.pos += rel as u32,
                        None => self.pos = self.bytes.len() as u32,
                    }
                }
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_ignored();

        let start = self.pos;
        let Some(b) = self.peek() else {
            return Ok(Token { kind: TokenKind::Eof, span: Span::new(start, start) });
        };

        let kind = match b {
            b'!' => { self.bump(); TokenKind::Bang }
            b'$' => { self.bump(); TokenKind::Dollar }
            b'&' => { self.bump(); TokenKind::Amp }
            b'(' => { self.bump(); TokenKind::ParenL }
            b')' => { self.bump(); TokenKind::ParenR }
            b'.' => {
                if self.peek_at(1) == Some(b'.') && self.peek_at(2) == Some(b'.') {
                    self.pos += 3;
                    TokenKind::Spread
                } else {
                    self.bump();
                    return Err(LexError::new(
                        LexErrorKind::UnexpectedCharacter('.'),
                        Span::new(start, self.pos),
                    ));
                }
            }
            b':' => { self.bump(); TokenKind::Colon }
            b'=' => { self.bump(); TokenKind::Equals }
            b'@' => { self.bump(); TokenKind::At }
            b'[' => { self.bump(); TokenKind::BracketL }
            b']' => { self.bump(); TokenKind::BracketR }
            b'{' => { self.bump(); TokenKind::BraceL }
            b'|' => { self.bump(); TokenKind::Pipe }
            b'}' => { self.bump(); TokenKind::BraceR }
            b'_' | b'A'..=b'Z' | b'a'..=b'z' => self.lex_name(),
            b'-' | b'0'..=b'9' => self.lex_number()?,
            b'"' => self.lex_string()?,
            _ => {
                let ch = self.source.text()[start as usize..].chars().next().unwrap();
                self.pos += ch.len_utf8() as u32;
                return Err(LexError::new(
                    LexErrorKind::UnexpectedCharacter(ch),
                    Span::new(start, self.pos),
                ));
            }
        };

        Ok(Token { kind, span: Span::new(start, self.pos) })
    }

    fn lex_name(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(), Some(b'_' | b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9')) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.bytes[start as usize..self.pos as usize]).unwrap();
        TokenKind::Name(text.to_string())
    }

    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(LexError::new(LexErrorKind::InvalidNumber, Span::new(self.pos, self.pos + 1)));
                }
            }
            Some(b'1'..=b'9') => {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            _ => return Err(LexError::new(LexErrorKind::InvalidNumber, Span::new(start, self.pos + 1))),
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(LexError::new(LexErrorKind::InvalidNumber, Span::new(start, self.pos)));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(LexError::new(LexErrorKind::InvalidNumber, Span::new(start, self.pos)));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start as usize..self.pos as usize]).unwrap().to_string();
        Ok(if is_float { TokenKind::Float(text) } else { TokenKind::Int(text) })
    }

    fn lex_string(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        debug_assert_eq!(self.peek(), Some(b'"'));

        if self.peek_at(1) == Some(b'"') && self.peek_at(2) == Some(b'"') {
            return self.lex_block_string();
        }

        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(LexError::new(LexErrorKind::UnterminatedString, Span::new(start, self.pos)));
                }
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'"') => { value.push('"'); self.pos += 1; }
                        Some(b'\\') => { value.push('\\'); self.pos += 1; }
                        Some(b'/') => { value.push('/'); self.pos += 1; }
                        Some(b'b') => { value.push('\u{8}'); self.pos += 1; }
                        Some(b'f') => { value.push('\u{c}'); self.pos += 1; }
                        Some(b'n') => { value.push('\n'); self.pos += 1; }
                        Some(b'r') => { value.push('\r'); self.pos += 1; }
                        Some(b't') => { value.push('\t'); self.pos += 1; }
                        Some(b'u') => {
                            self.pos += 1;
                            let hex_start = self.pos as usize;
                            if self.bytes.len() < hex_start + 4 {
                                return Err(LexError::new(LexErrorKind::InvalidEscapeSequence, Span::new(start, self.pos)));
                            }
                            let hex = std::str::from_utf8(&self.bytes[hex_start..hex_start + 4])
                                .ok()
                                .and_then(|s| u32::from_str_radix(s, 16).ok())
                                .and_then(char::from_u32)
                                .ok_or_else(|| LexError::new(
                                    LexErrorKind::InvalidEscapeSequence,
                                    Span::new(start, self.pos + 4),
                                ))?;
                            value.push(hex);
                            self.pos += 4;
                        }
                        _ => {
                            return Err(LexError::new(LexErrorKind::InvalidEscapeSequence, Span::new(start, self.pos)));
                        }
                    }
                }
                Some(_) => {
                    let ch = self.source.text()[self.pos as usize..].chars().next().unwrap();
                    value.push(ch);
                    self.pos += ch.len_utf8() as u32;
                }
            }
        }
        Ok(TokenKind::String(value))
    }

    fn lex_block_string(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        self.pos += 3;
        let mut raw = String::new();
        loop {
            match self.peek() {
                None => return Err(LexError::new(LexErrorKind::UnterminatedBlockString, Span::new(start, self.pos))),
                Some(b'"') if self.peek_at(1) == Some(b'"') && self.peek_at(2) == Some(b'"') => {
                    self.pos += 3;
                    break;
                }
                Some(b'\\') if self.peek_at(1) == Some(b'"') && self.peek_at(2) == Some(b'"') && self.peek_at(3) == Some(b'"') => {
                    raw.push_str("\"\"\"");
                    self.pos += 4;
                }
                Some(_) => {
                    let ch = self.source.text()[self.pos as usize..].chars().next().unwrap();
                    raw.push(ch);
                    self.pos += ch.len_utf8() as u32;
                }
            }
        }
        Ok(TokenKind::BlockString(dedent_block_string(&raw)))
    }
}

/// Implements the GraphQL spec's `BlockStringValue` algorithm: strips a
/// common leading-whitespace indent from every line but the first, and trims
/// leading/trailing all-blank lines.
fn dedent_block_string(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min();

    let mut out_lines: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out_lines.push((*line).to_string());
        } else if let Some(indent) = common_indent {
            out_lines.push(line.chars().skip(indent).collect());
        } else {
            out_lines.push((*line).to_string());
        }
    }

    while out_lines.first().is_some_and(|l| l.trim().is_empty()) {
        out_lines.remove(0);
    }
    while out_lines.last().is_some_and(|l| l.trim().is_empty()) {
        out_lines.pop();
    }

    out_lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(text: &str) -> Vec<TokenKind> {
        let source = Source::anonymous(text.to_string());
        Lexer::tokenize(&source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_punctuation_and_names() {
        assert_eq!(
            tokenize("query Foo($x: Int!) { field }"),
            vec![
                TokenKind::Name("query".into()),
                TokenKind::Name("Foo".into()),
                TokenKind::ParenL,
                TokenKind::Dollar,
                TokenKind::Name("x".into()),
                TokenKind::Colon,
                TokenKind::Name("Int".into()),
                TokenKind::Bang,
                TokenKind::ParenR,
                TokenKind::BraceL,
                TokenKind::Name("field".into()),
                TokenKind::BraceR,
                TokenKind::Eof,
            ],
        );
    }

    #[test]
    fn lexes_spread() {
        assert_eq!(tokenize("...Foo"), vec![TokenKind::Spread, TokenKind::Name("Foo".into()), TokenKind::Eof]);
    }

    #[test]
    fn single_dot_is_an_error() {
        let source = Source::anonymous(".".to_string());
        let err = Lexer::tokenize(&source).unwrap_err();
        assert_eq!(err.kind(), &LexErrorKind::UnexpectedCharacter('.'));
    }

    #[test]
    fn lexes_numbers() {
        assert_eq!(tokenize("42 -7 3.14 1e10 -2.5e-3"), vec![
            TokenKind::Int("42".into()),
            TokenKind::Int("-7".into()),
            TokenKind::Float("3.14".into()),
            TokenKind::Float("1e10".into()),
            TokenKind::Float("-2.5e-3".into()),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn lexes_escaped_string() {
        assert_eq!(tokenize(r#""hi\nA""#), vec![TokenKind::String("hi\nA".into()), TokenKind::Eof]);
    }

    #[test]
    fn leading_zero_followed_by_a_digit_is_an_error() {
        let source = Source::anonymous("00".to_string());
        let err = Lexer::tokenize(&source).unwrap_err();
        assert_eq!(err.kind(), &LexErrorKind::InvalidNumber);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let source = Source::anonymous("\"abc".to_string());
        let err = Lexer::tokenize(&source).unwrap_err();
        assert_eq!(err.kind(), &LexErrorKind::UnterminatedString);
    }

    #[test]
    fn dedents_block_strings() {
        assert_eq!(
            tokenize("\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n  \"\"\""),
            vec![TokenKind::BlockString("Hello,\n  World!\n\nYours,\n  GraphQL.".into()), TokenKind::Eof],
        );
    }

    #[test]
    fn comments_and_commas_are_ignored() {
        assert_eq!(tokenize("# a comment\nfoo, ,bar"), vec![
            TokenKind::Name("foo".into()),
            TokenKind::Name("bar".into()),
            TokenKind::Eof,
        ]);
    }
}
