use crate::types::ObjectType;
use crate::value::Value;
use std::sync::Arc;

pub type ResolveTypeFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub possible_types: Vec<Arc<ObjectType>>,
    pub resolve_type: Option<ResolveTypeFn>,
}

impl UnionType {
    pub fn new(name: impl Into<String>, possible_types: impl IntoIterator<Item = Arc<ObjectType>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            possible_types: possible_types.into_iter().collect(),
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

    pub fn contains(&self, type_name: &str) -> bool {
        self.possible_types.iter().any(|t| t.name == type_name)
    }
}

impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for UnionType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
