use crate::types::Argument;
use indexmap::IndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveLocation {
    Field,
    FragmentSpread,
    InlineFragment,
}

/// A directive definition (`@skip`/`@include` are the only ones the
/// executor evaluates; custom directive dispatch is out of scope).
pub struct Directive {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: IndexMap<String, Argument>,
}

impl Directive {
    pub fn new(
        name: impl Into<String>,
        locations: impl IntoIterator<Item = DirectiveLocation>,
        arguments: impl IntoIterator<Item = Argument>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: locations.into_iter().collect(),
            arguments: arguments.into_iter().map(|a| (a.name.clone(), a)).collect(),
        }
    }
}

impl std::fmt::Debug for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directive").field("name", &self.name).finish_non_exhaustive()
    }
}
