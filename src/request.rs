//! The host-facing request facade: parse once, validate once, execute as
//! many times as the host likes (spec.md §6's `newRequest`/`run`/`print`).

use crate::ast;
use crate::errors::Errors;
use crate::executor;
use crate::executor::ExecutionResult;
use crate::parser::ParseError;
use crate::parser::Parser;
use crate::printer;
use crate::schema::Schema;
use crate::source::Source;
use crate::validator;
use crate::validator::ValidationError;
use crate::value::Value;
use indexmap::IndexMap;

#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum RequestError {
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// `options` passed to [`Request::new`]: the initial root value a resolver
/// sees for the operation's top-level fields, the raw (pre-coercion)
/// variable values, and which operation to run when a document defines more
/// than one.
#[derive(Default)]
pub struct ExecutionOptions {
    pub root_value: Value,
    pub variable_values: IndexMap<String, Value>,
    pub operation_name: Option<String>,
}

pub struct Request<'a> {
    schema: &'a Schema,
    document: ast::Document,
    options: ExecutionOptions,
}

impl<'a> Request<'a> {
    /// Parses and validates `query_text`, per spec.md §6. Syntax errors
    /// short-circuit validation (a document that didn't parse has nothing
    /// to validate).
    #[tracing::instrument(skip_all, name = "request::new")]
    pub fn new(schema: &'a Schema, query_text: impl Into<String>, options: ExecutionOptions) -> Result<Self, Errors<RequestError>> {
        let source = Source::anonymous(query_text.into());
        let document = Parser::parse_document(&source).map_err(|err| Errors::new(vec![RequestError::Syntax(err)]))?;

        if let Err(errors) = validator::validate(&document) {
            return Err(Errors::new(errors.into_iter().map(RequestError::Validation).collect()));
        }

        Ok(Self { schema, document, options })
    }

    /// Canonical re-serialization of the parsed document.
    pub fn print(&self) -> String {
        printer::print_document(&self.document)
    }

    /// Executes the request. Never returns a `Result`: execution failures
    /// (unknown operation, variable coercion, resolver errors, ...) are
    /// reported inside the returned envelope's `errors` list.
    pub fn run(&self) -> ExecutionResult {
        executor::execute(
            self.schema,
            &self.document,
            self.options.operation_name.as_deref(),
            &self.options.variable_values,
            self.options.root_value.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;
    use crate::types::ObjectType;
    use crate::types::Type;
    use crate::types::TypeRef as T;
    use crate::types::TypeRefInit as TI;
    use std::sync::Arc;

    fn test_schema() -> Schema {
        let query = Arc::new(ObjectType::new(
            "Query",
            [Field::new("hello", TI::eager(T::Named(Type::String))).with_resolver(|_| Ok("world".into()))],
        ));
        Schema::builder(query).build().unwrap()
    }

    #[test]
    fn runs_a_well_formed_query() {
        let schema = test_schema();
        let request = Request::new(&schema, "{ hello }", ExecutionOptions::default()).unwrap();
        let result = request.run();
        assert!(result.errors.is_empty());
    }

    #[test]
    fn rejects_a_syntax_error() {
        let schema = test_schema();
        let err = Request::new(&schema, "{ hello", ExecutionOptions::default()).unwrap_err();
        assert!(matches!(err.items()[0], RequestError::Syntax(_)));
    }

    #[test]
    fn rejects_an_unknown_fragment_spread() {
        let schema = test_schema();
        let err = Request::new(&schema, "{ ...Missing }", ExecutionOptions::default()).unwrap_err();
        assert!(matches!(err.items()[0], RequestError::Validation(_)));
    }

    #[test]
    fn print_reproduces_canonical_source() {
        let schema = test_schema();
        let request = Request::new(&schema, "{ hello }", ExecutionOptions::default()).unwrap();
        assert_eq!(request.print(), "{\n    hello\n}\n");
    }
}
