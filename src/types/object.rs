use crate::types::Field;
use crate::types::InterfaceType;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;

pub type IsTypeOfFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, Field>,
    pub interfaces: Vec<Arc<InterfaceType>>,
    pub is_type_of: Option<IsTypeOfFn>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
            interfaces: Vec::new(),
            is_type_of: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_interfaces(mut self, interfaces: impl IntoIterator<Item = Arc<InterfaceType>>) -> Self {
        self.interfaces = interfaces.into_iter().collect();
        self
    }

    pub fn with_is_type_of(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.is_type_of = Some(Arc::new(f));
        self
    }

    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces.iter().any(|i| i.name == interface_name)
    }
}

impl std::fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectType").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
