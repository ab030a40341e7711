use crate::types::deprecation::DeprecationState;
use crate::types::Argument;
use crate::types::LazyTypeRef;
use crate::types::TypeRefInit;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;

/// What a [`Field`]'s resolver sees: the already-completed parent value and
/// this field's already-coerced argument values (variables substituted,
/// defaults applied).
pub struct ResolveContext<'a> {
    pub parent: &'a Value,
    pub arguments: &'a IndexMap<String, Value>,
}

pub type ResolveResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

/// Resolvers are the only place in this crate allowed to do I/O or block;
/// the executor calls them off the sibling-field `rayon` pool.
pub type ResolveFn = Arc<dyn Fn(&ResolveContext) -> ResolveResult + Send + Sync>;

/// A field on an [`ObjectType`](crate::types::ObjectType) or
/// [`InterfaceType`](crate::types::InterfaceType).
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub arguments: IndexMap<String, Argument>,
    pub deprecation: DeprecationState,
    type_ref: LazyTypeRef,
    resolve: Option<ResolveFn>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRefInit) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: IndexMap::new(),
            deprecation: DeprecationState::NotDeprecated,
            type_ref: LazyTypeRef::new(type_ref),
            resolve: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments = arguments.into_iter().map(|a| (a.name.clone(), a)).collect();
        self
    }

    pub fn with_resolver(
        mut self,
        resolve: impl Fn(&ResolveContext) -> ResolveResult + Send + Sync + 'static,
    ) -> Self {
        self.resolve = Some(Arc::new(resolve));
        self
    }

    pub fn with_deprecation(mut self, deprecation: DeprecationState) -> Self {
        self.deprecation = deprecation;
        self
    }

    pub fn type_ref(&self) -> &crate::types::TypeRef {
        self.type_ref.get()
    }

    pub fn resolver(&self) -> Option<&ResolveFn> {
        self.resolve.as_ref()
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish_non_exhaustive()
    }
}
