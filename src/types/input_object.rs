use crate::types::LazyTypeRef;
use crate::types::TypeRefInit;
use crate::value::Value;
use indexmap::IndexMap;

pub struct InputField {
    pub name: String,
    pub description: Option<String>,
    type_ref: LazyTypeRef,
    pub default_value: Option<Value>,
}

impl InputField {
    pub fn new(name: impl Into<String>, type_ref: TypeRefInit, default_value: Option<Value>) -> Self {
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

pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, InputField>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = InputField>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl std::fmt::Debug for InputObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputObjectType").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for InputObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
