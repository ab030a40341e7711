use crate::ast;
use crate::executor::error::ExecutionError;
use crate::executor::error::PathSegment;
use crate::schema::Schema;
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-request execution state: shared read-only across every resolver
/// invocation, with the error list synchronized for concurrent sibling
/// resolution (spec.md §5 -- "only the errors vector requires mutual
/// exclusion").
pub struct ExecutionContext<'a> {
    pub schema: &'a Schema,
    pub fragments: HashMap<&'a str, &'a ast::FragmentDefinition>,
    pub variables: IndexMap<String, Value>,
    errors: Mutex<Vec<ExecutionError>>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(schema: &'a Schema, fragments: HashMap<&'a str, &'a ast::FragmentDefinition>, variables: IndexMap<String, Value>) -> Self {
        Self { schema, fragments, variables, errors: Mutex::new(Vec::new()) }
    }

    pub fn push_error(&self, message: impl Into<String>, path: Vec<PathSegment>, span: Option<crate::source::Span>) {
        let error = ExecutionError::new(message, path, span);
        tracing::warn!(message = %error.message, "execution error recorded");
        self.errors.lock().unwrap().push(error);
    }

    pub fn into_errors(self) -> Vec<ExecutionError> {
        self.errors.into_inner().unwrap()
    }
}

pub fn field_path(path: &[PathSegment], response_key: &str) -> Vec<PathSegment> {
    let mut out = path.to_vec();
    out.push(PathSegment::Field(response_key.to_string()));
    out
}

pub fn index_path(path: &[PathSegment], index: usize) -> Vec<PathSegment> {
    let mut out = path.to_vec();
    out.push(PathSegment::Index(index));
    out
}
