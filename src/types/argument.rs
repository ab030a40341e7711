use crate::types::LazyTypeRef;
use crate::types::TypeRefInit;
use crate::value::Value;

/// A named, typed input parameter to a [`Field`](crate::types::Field) or
/// [`Directive`](crate::types::Directive).
#[derive(Debug)]
pub struct Argument {
    pub name: String,
    pub description: Option<String>,
    type_ref: LazyTypeRef,
    pub default_value: Option<Value>,
}

impl Argument {
    pub fn new(
        name: impl Into<String>,
        type_ref: TypeRefInit,
        default_value: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            type_ref: LazyTypeRef::new(type_ref),
            default_value,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn type_ref(&self) -> &crate::types::TypeRef {
        self.type_ref.get()
    }
}
