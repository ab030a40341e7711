use crate::types::Field;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;

pub type ResolveTypeFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, Field>,
    pub resolve_type: Option<ResolveTypeFn>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
            resolve_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_resolve_type(mut self, f: impl Fn(&Value) -> Option<String> + Send + Sync + 'static) -> Self {
        self.resolve_type = Some(Arc::new(f));
        self
    }
}

impl std::fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceType").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for InterfaceType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
