use crate::types::deprecation::DeprecationState;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: DeprecationState,
}

impl EnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None, deprecation: DeprecationState::NotDeprecated }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: IndexMap<String, EnumValue>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = EnumValue>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: values.into_iter().map(|v| (v.name.clone(), v)).collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
