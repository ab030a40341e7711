use crate::ast;
use crate::value::Value;
use std::sync::Arc;

pub type SerializeFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;
pub type ParseValueFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;
pub type ParseLiteralFn = Arc<dyn Fn(&ast::Value) -> Result<Value, String> + Send + Sync>;

/// A custom scalar, with the three conversion functions every scalar
/// (built-in or custom) needs: result-value serialization, input-value
/// coercion, and input-literal coercion.
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub serialize: SerializeFn,
    pub parse_value: ParseValueFn,
    pub parse_literal: ParseLiteralFn,
}

impl ScalarType {
    pub fn new(
        name: impl Into<String>,
        serialize: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        parse_value: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        parse_literal: impl Fn(&ast::Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            serialize: Arc::new(serialize),
            parse_value: Arc::new(parse_value),
            parse_literal: Arc::new(parse_literal),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for ScalarType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
