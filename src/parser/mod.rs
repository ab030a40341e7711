//! A recursive-descent parser from GraphQL source text straight to
//! [`crate::ast`], with no intermediate CST.

mod error;

pub use error::ParseError;
pub use error::ParseErrorKind;

use crate::ast;
use crate::lexer::Lexer;
use crate::lexer::Token;
use crate::lexer::TokenKind;
use crate::source::Source;
use crate::source::Span;
use indexmap::IndexMap;

pub struct Parser<'a> {
    source: &'a Source,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source) -> Result<Self, ParseError> {
        let tokens = Lexer::tokenize(source).map_err(ParseError::from_lex_error)?;
        Ok(Self { source, tokens, pos: 0 })
    }

    pub fn parse_document(source: &'a Source) -> Result<ast::Document, ParseError> {
        let mut parser = Parser::new(source)?;
        let doc = parser.document()?;
        parser.expect_eof()?;
        Ok(doc)
    }

    pub fn parse_value_standalone(source: &'a Source) -> Result<ast::SpannedValue, ParseError> {
        let mut parser = Parser::new(source)?;
        let value = parser.value(true)?;
        parser.expect_eof()?;
        Ok(value)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.unexpected("<EOF>"))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let tok = self.current();
        if tok.kind == TokenKind::Eof {
            ParseError::new(ParseErrorKind::UnexpectedEof { expected: expected.to_string() }, tok.span)
        } else {
            ParseError::new(
                ParseErrorKind::UnexpectedToken { expected: expected.to_string(), found: tok.kind.describe() },
                tok.span,
            )
        }
    }

    fn expect_punct(&mut self, kind: TokenKind, name: &str) -> Result<Span, ParseError> {
        if self.current().kind == kind {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(name))
        }
    }

    fn eat_punct(&mut self, kind: TokenKind) -> bool {
        if self.current().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_name(&mut self) -> Result<ast::Name, ParseError> {
        match &self.current().kind {
            TokenKind::Name(value) => {
                let value = value.clone();
                let span = self.advance().span;
                Ok(ast::Name { value, span })
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(&self.current().kind, TokenKind::Name(n) if n == keyword)
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ---- Documents ----

    fn document(&mut self) -> Result<ast::Document, ParseError> {
        let mut definitions = Vec::new();
        while !self.at_eof() {
            definitions.push(self.definition()?);
        }
        Ok(ast::Document { definitions })
    }

    fn definition(&mut self) -> Result<ast::Definition, ParseError> {
        if self.peek_keyword("query") || self.peek_keyword("mutation") || self.current().kind == TokenKind::BraceL {
            Ok(ast::Definition::Operation(self.operation_definition()?))
        } else if self.peek_keyword("fragment") {
            Ok(ast::Definition::Fragment(self.fragment_definition()?))
        } else {
            Err(self.unexpected("`query`, `mutation`, `fragment`, or `{`"))
        }
    }

    fn operation_definition(&mut self) -> Result<ast::OperationDefinition, ParseError> {
        let start = self.current().span;

        if self.current().kind == TokenKind::BraceL {
            let selection_set = self.selection_set()?;
            return Ok(ast::OperationDefinition {
                operation_type: ast::OperationType::Query,
                name: None,
                variable_definitions: Vec::new(),
                directives: Vec::new(),
                span: start.merge(&selection_set.span),
                selection_set,
            });
        }

        let operation_type = if self.eat_keyword("query") {
            ast::OperationType::Query
        } else if self.eat_keyword("mutation") {
            ast::OperationType::Mutation
        } else if self.eat_keyword("subscription") {
            ast::OperationType::Subscription
        } else {
            return Err(self.unexpected("`query`, `mutation`, or `subscription`"));
        };

        let name = if let TokenKind::Name(_) = &self.current().kind {
            Some(self.expect_name()?)
        } else {
            None
        };

        let variable_definitions = if self.current().kind == TokenKind::ParenL {
            self.variable_definitions()?
        } else {
            Vec::new()
        };

        let directives = self.directives()?;
        let selection_set = self.selection_set()?;

        Ok(ast::OperationDefinition {
            operation_type,
            name,
            variable_definitions,
            directives,
            span: start.merge(&selection_set.span),
            selection_set,
        })
    }

    fn fragment_definition(&mut self) -> Result<ast::FragmentDefinition, ParseError> {
        let start = self.current().span;
        self.eat_keyword("fragment");
        let name = self.expect_name()?;
        if name.value == "on" {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken { expected: "a fragment name other than `on`".to_string(), found: "`on`".to_string() },
                name.span,
            ));
        }
        if !self.eat_keyword("on") {
            return Err(self.unexpected("`on`"));
        }
        let type_condition = self.expect_name()?;
        let directives = self.directives()?;
        let selection_set = self.selection_set()?;
        Ok(ast::FragmentDefinition {
            name,
            type_condition,
            directives,
            span: start.merge(&selection_set.span),
            selection_set,
        })
    }

    // ---- Selections ----

    fn selection_set(&mut self) -> Result<ast::SelectionSet, ParseError> {
        let open = self.expect_punct(TokenKind::BraceL, "`{`")?;
        let mut selections = Vec::new();
        while self.current().kind != TokenKind::BraceR {
            if self.at_eof() {
                return Err(ParseError::new(ParseErrorKind::UnclosedDelimiter { delimiter: "{" }, open));
            }
            selections.push(self.selection()?);
        }
        let close = self.advance().span;
        Ok(ast::SelectionSet { selections, span: open.merge(&close) })
    }

    fn selection(&mut self) -> Result<ast::Selection, ParseError> {
        if self.current().kind == TokenKind::Spread {
            self.fragment_selection()
        } else {
            Ok(ast::Selection::Field(self.field()?))
        }
    }

    fn fragment_selection(&mut self) -> Result<ast::Selection, ParseError> {
        let start = self.advance().span; // `...`

        if self.peek_keyword("on") || self.current().kind == TokenKind::At || self.current().kind == TokenKind::BraceL {
            let type_condition = if self.eat_keyword("on") {
                Some(self.expect_name()?)
            } else {
                None
            };
            let directives = self.directives()?;
            let selection_set = self.selection_set()?;
            return Ok(ast::Selection::InlineFragment(ast::InlineFragment {
                type_condition,
                directives,
                span: start.merge(&selection_set.span),
                selection_set,
            }));
        }

        let name = self.expect_name()?;
        let directives = self.directives()?;
        let span = directives.last().map(|d| start.merge(&d.span)).unwrap_or_else(|| start.merge(&name.span));
        Ok(ast::Selection::FragmentSpread(ast::FragmentSpread { name, directives, span }))
    }

    fn field(&mut self) -> Result<ast::Field, ParseError> {
        let first = self.expect_name()?;
        let (alias, name) = if self.eat_punct(TokenKind::Colon) {
            (Some(first), self.expect_name()?)
        } else {
            (None, first)
        };

        let arguments = if self.current().kind == TokenKind::ParenL {
            self.arguments()?
        } else {
            Vec::new()
        };
        let directives = self.directives()?;
        let selection_set = if self.current().kind == TokenKind::BraceL {
            Some(self.selection_set()?)
        } else {
            None
        };

        let mut span = alias.as_ref().map(|a| a.span).unwrap_or(name.span).merge(&name.span);
        if let Some(ss) = &selection_set {
            span = span.merge(&ss.span);
        }
        Ok(ast::Field { alias, name, arguments, directives, selection_set, span })
    }

    fn arguments(&mut self) -> Result<Vec<ast::Argument>, ParseError> {
        let open = self.expect_punct(TokenKind::ParenL, "`(`")?;
        let mut args = Vec::new();
        while self.current().kind != TokenKind::ParenR {
            if self.at_eof() {
                return Err(ParseError::new(ParseErrorKind::UnclosedDelimiter { delimiter: "(" }, open));
            }
            let name = self.expect_name()?;
            self.expect_punct(TokenKind::Colon, "`:`")?;
            let value = self.value(false)?;
            args.push(ast::Argument { name, value });
        }
        self.advance();
        Ok(args)
    }

    fn directives(&mut self) -> Result<Vec<ast::Directive>, ParseError> {
        let mut directives = Vec::new();
        while self.current().kind == TokenKind::At {
            let start = self.advance().span;
            let name = self.expect_name()?;
            let arguments = if self.current().kind == TokenKind::ParenL {
                self.arguments()?
            } else {
                Vec::new()
            };
            let span = arguments.last().map(|a| start.merge(&a.value.span)).unwrap_or_else(|| start.merge(&name.span));
            directives.push(ast::Directive { name, arguments, span });
        }
        Ok(directives)
    }

    fn variable_definitions(&mut self) -> Result<Vec<ast::VariableDefinition>, ParseError> {
        let open = self.expect_punct(TokenKind::ParenL, "`(`")?;
        let mut defs = Vec::new();
        while self.current().kind != TokenKind::ParenR {
            if self.at_eof() {
                return Err(ParseError::new(ParseErrorKind::UnclosedDelimiter { delimiter: "(" }, open));
            }
            self.expect_punct(TokenKind::Dollar, "`$`")?;
            let name = self.expect_name()?;
            self.expect_punct(TokenKind::Colon, "`:`")?;
            let var_type = self.type_ref()?;
            let default_value = if self.eat_punct(TokenKind::Equals) {
                Some(self.value(true)?)
            } else {
                None
            };
            defs.push(ast::VariableDefinition { name, var_type, default_value });
        }
        self.advance();
        Ok(defs)
    }

    // ---- Types ----

    fn type_ref(&mut self) -> Result<ast::TypeRef, ParseError> {
        let base = if self.current().kind == TokenKind::BracketL {
            let open = self.advance().span;
            let inner = self.type_ref()?;
            let close = self.expect_punct(TokenKind::BracketR, "`]`")?;
            ast::TypeRef::List { of: Box::new(inner), span: open.merge(&close) }
        } else {
            let name = self.expect_name()?;
            ast::TypeRef::Named { name: name.value, span: name.span }
        };

        if self.current().kind == TokenKind::Bang {
            let bang = self.advance().span;
            Ok(ast::TypeRef::NonNull { span: base.span().merge(&bang), of: Box::new(base) })
        } else {
            Ok(base)
        }
    }

    // ---- Values ----

    /// `is_const` forbids `Variable` values, as required for default values
    /// (`VariableDefinition.default_value`, input object/directive default
    /// values at the schema level).
    fn value(&mut self, is_const: bool) -> Result<ast::SpannedValue, ParseError> {
        let tok = self.current().clone();
        match &tok.kind {
            TokenKind::Dollar => {
                if is_const {
                    return Err(self.unexpected("a constant value"));
                }
                self.advance();
                let name = self.expect_name()?;
                Ok(ast::SpannedValue { value: ast::Value::Variable(name.value), span: tok.span.merge(&name.span) })
            }
            TokenKind::Int(raw) => {
                let raw = raw.clone();
                self.advance();
                let n: i64 = raw.parse().map_err(|_| {
                    ParseError::new(ParseErrorKind::UnexpectedToken { expected: "a valid Int".into(), found: raw.clone() }, tok.span)
                })?;
                Ok(ast::SpannedValue { value: ast::Value::Int(n), span: tok.span })
            }
            TokenKind::Float(raw) => {
                let n: f64 = raw.parse().unwrap();
                self.advance();
                Ok(ast::SpannedValue { value: ast::Value::Float(n), span: tok.span })
            }
            TokenKind::String(s) | TokenKind::BlockString(s) => {
                let s = s.clone();
                self.advance();
                Ok(ast::SpannedValue { value: ast::Value::String(s), span: tok.span })
            }
            TokenKind::Name(name) => {
                let value = match name.as_str() {
                    "true" => ast::Value::Boolean(true),
                    "false" => ast::Value::Boolean(false),
                    "null" => ast::Value::Null,
                    other => ast::Value::Enum(other.to_string()),
                };
                self.advance();
                Ok(ast::SpannedValue { value, span: tok.span })
            }
            TokenKind::BracketL => self.list_value(is_const),
            TokenKind::BraceL => self.object_value(is_const),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn list_value(&mut self, is_const: bool) -> Result<ast::SpannedValue, ParseError> {
        let open = self.advance().span;
        let mut values = Vec::new();
        while self.current().kind != TokenKind::BracketR {
            if self.at_eof() {
                return Err(ParseError::new(ParseErrorKind::UnclosedDelimiter { delimiter: "[" }, open));
            }
            values.push(self.value(is_const)?);
        }
        let close = self.advance().span;
        Ok(ast::SpannedValue { value: ast::Value::List(values), span: open.merge(&close) })
    }

    fn object_value(&mut self, is_const: bool) -> Result<ast::SpannedValue, ParseError> {
        let open = self.advance().span;
        let mut fields = IndexMap::new();
        while self.current().kind != TokenKind::BraceR {
            if self.at_eof() {
                return Err(ParseError::new(ParseErrorKind::UnclosedDelimiter { delimiter: "{" }, open));
            }
            let name = self.expect_name()?;
            self.expect_punct(TokenKind::Colon, "`:`")?;
            let value = self.value(is_const)?;
            if fields.insert(name.value.clone(), value).is_some() {
                return Err(ParseError::new(ParseErrorKind::DuplicateObjectField { name: name.value }, name.span));
            }
        }
        let close = self.advance().span;
        Ok(ast::SpannedValue { value: ast::Value::Object(fields), span: open.merge(&close) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ast::Document {
        let source = Source::anonymous(text.to_string());
        Parser::parse_document(&source).unwrap()
    }

    #[test]
    fn parses_shorthand_query() {
        let doc = parse("{ field }");
        assert_eq!(doc.definitions.len(), 1);
        let ast::Definition::Operation(op) = &doc.definitions[0] else { panic!() };
        assert_eq!(op.operation_type, ast::OperationType::Query);
        assert_eq!(op.selection_set.selections.len(), 1);
    }

    #[test]
    fn parses_named_query_with_variables_and_arguments() {
        let doc = parse("query Foo($x: Int = 1) { field(arg: $x) { nested } }");
        let ast::Definition::Operation(op) = &doc.definitions[0] else { panic!() };
        assert_eq!(op.name.as_ref().unwrap().value, "Foo");
        assert_eq!(op.variable_definitions.len(), 1);
        assert_eq!(op.variable_definitions[0].default_value.as_ref().unwrap().value, ast::Value::Int(1));
    }

    #[test]
    fn parses_fragment_and_spreads() {
        let doc = parse("{ ...Named ... on Foo { bar } } fragment Named on Foo { baz }");
        let ast::Definition::Operation(op) = &doc.definitions[0] else { panic!() };
        assert_eq!(op.selection_set.selections.len(), 2);
        assert!(matches!(op.selection_set.selections[0], ast::Selection::FragmentSpread(_)));
        assert!(matches!(op.selection_set.selections[1], ast::Selection::InlineFragment(_)));
    }

    #[test]
    fn rejects_variables_in_default_values() {
        let source = Source::anonymous("query Foo($x: Int = $y) { field }".to_string());
        let err = Parser::parse_document(&source).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    fn unclosed_brace_is_an_error() {
        let source = Source::anonymous("{ field".to_string());
        let err = Parser::parse_document(&source).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::UnclosedDelimiter { delimiter: "{" });
    }

    #[test]
    fn duplicate_object_field_is_an_error() {
        let source = Source::anonymous("{ field(arg: {a: 1, a: 2}) }".to_string());
        let err = Parser::parse_document(&source).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::DuplicateObjectField { name } if name == "a"));
    }

    #[test]
    fn fragment_named_on_is_an_error() {
        let source = Source::anonymous("fragment on on on { on }".to_string());
        let err = Parser::parse_document(&source).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    fn parses_subscription_operations() {
        let doc = parse("subscription Sub { field }");
        let ast::Definition::Operation(op) = &doc.definitions[0] else { panic!() };
        assert_eq!(op.operation_type, ast::OperationType::Subscription);
    }
}
