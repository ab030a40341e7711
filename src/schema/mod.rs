//! Host-assembled schemas: a `Schema` is never parsed from SDL. A host
//! builds `Type` values directly (see `crate::types`) and hands the root
//! query/mutation types to [`Schema::builder`], which walks the reachable
//! type graph, checks it for consistency, and attaches the introspection
//! meta-schema.

mod builder;
mod error;
pub mod introspection;

pub use builder::SchemaBuilder;
pub use error::SchemaError;

use crate::types::Directive;
use crate::types::ObjectType;
use crate::types::Type;
use indexmap::IndexMap;
use std::sync::Arc;

pub struct Schema {
    pub(crate) query: Arc<ObjectType>,
    pub(crate) mutation: Option<Arc<ObjectType>>,
    pub(crate) types: IndexMap<String, Type>,
    pub(crate) directives: IndexMap<String, Directive>,
    pub(crate) interface_possible_types: IndexMap<String, Vec<Arc<ObjectType>>>,
}

impl Schema {
    pub fn builder(query: Arc<ObjectType>) -> SchemaBuilder {
        SchemaBuilder::new(query)
    }

    /// `newSchema`: assembles a schema from a query root and an optional
    /// mutation root in one call, for hosts that don't need the builder's
    /// incremental configuration.
    pub fn new(
        query: Arc<ObjectType>,
        mutation: Option<Arc<ObjectType>>,
    ) -> Result<Schema, crate::errors::Errors<SchemaError>> {
        let mut builder = Schema::builder(query);
        if let Some(mutation) = mutation {
            builder = builder.mutation(mutation);
        }
        builder.build().map_err(crate::errors::Errors::new)
    }

    pub fn query_type(&self) -> &Arc<ObjectType> {
        &self.query
    }

    pub fn mutation_type(&self) -> Option<&Arc<ObjectType>> {
        self.mutation.as_ref()
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    pub fn get_directive(&self, name: &str) -> Option<&Directive> {
        self.directives.get(name)
    }

    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.directives.values()
    }

    /// The root object type for an operation of the given type, per
    /// `spec.md` §4.6 ("operation root selection").
    pub fn root_type(&self, operation_type: crate::ast::OperationType) -> Option<&Arc<ObjectType>> {
        match operation_type {
            crate::ast::OperationType::Query => Some(&self.query),
            crate::ast::OperationType::Mutation => self.mutation.as_ref(),
            crate::ast::OperationType::Subscription => None,
        }
    }

    /// Every Object type registered in the schema that declares
    /// `implements` for the named interface, per `spec.md` §3
    /// ("possible-types set is built by the schema").
    pub fn interface_possible_types(&self, interface_name: &str) -> &[Arc<ObjectType>] {
        self.interface_possible_types.get(interface_name).map(Vec::as_slice).unwrap_or(&[])
    }
}
