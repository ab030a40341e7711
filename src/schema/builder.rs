use crate::schema::Schema;
use crate::schema::SchemaError;
use crate::types::Argument;
use crate::types::Directive;
use crate::types::DirectiveLocation;
use crate::types::ObjectType;
use crate::types::Type;
use crate::types::TypeRef;
use crate::types::TypeRefInit;
use indexmap::IndexMap;
use std::sync::Arc;

pub struct SchemaBuilder {
    query: Arc<ObjectType>,
    mutation: Option<Arc<ObjectType>>,
}

impl SchemaBuilder {
    pub fn new(query: Arc<ObjectType>) -> Self {
        Self { query, mutation: None }
    }

    pub fn mutation(mut self, mutation: Arc<ObjectType>) -> Self {
        self.mutation = Some(mutation);
        self
    }

    #[tracing::instrument(skip_all, name = "schema::assemble")]
    pub fn build(self) -> Result<Schema, Vec<SchemaError>> {
        let mut ctx = BuildContext { types: IndexMap::new(), errors: Vec::new() };

        ctx.visit_object(&self.query);
        if let Some(mutation) = &self.mutation {
            ctx.visit_object(mutation);
        }
        crate::schema::introspection::install(&mut ctx.types);

        if !ctx.errors.is_empty() {
            tracing::warn!(error_count = ctx.errors.len(), "schema assembly found validation errors");
            return Err(ctx.errors);
        }

        let mut directives = IndexMap::new();
        directives.insert(
            "skip".to_string(),
            Directive::new(
                "skip",
                [DirectiveLocation::Field, DirectiveLocation::FragmentSpread, DirectiveLocation::InlineFragment],
                [Argument::new("if", TypeRefInit::eager(TypeRef::NonNull(Box::new(TypeRef::Named(Type::Boolean)))), None)],
            ),
        );
        directives.insert(
            "include".to_string(),
            Directive::new(
                "include",
                [DirectiveLocation::Field, DirectiveLocation::FragmentSpread, DirectiveLocation::InlineFragment],
                [Argument::new("if", TypeRefInit::eager(TypeRef::NonNull(Box::new(TypeRef::Named(Type::Boolean)))), None)],
            ),
        );

        let mut interface_possible_types: IndexMap<String, Vec<Arc<ObjectType>>> = IndexMap::new();
        for type_ in ctx.types.values() {
            if let Type::Object(object) = type_ {
                for interface in &object.interfaces {
                    interface_possible_types.entry(interface.name.clone()).or_default().push(Arc::clone(object));
                }
            }
        }

        tracing::debug!(type_count = ctx.types.len(), "schema assembled");
        Ok(Schema { query: self.query, mutation: self.mutation, types: ctx.types, directives, interface_possible_types })
    }
}

struct BuildContext {
    types: IndexMap<String, Type>,
    errors: Vec<SchemaError>,
}

enum RegisterOutcome {
    New,
    AlreadyPresent,
    Conflict,
}

impl BuildContext {
    fn register(&mut self, type_: Type) -> RegisterOutcome {
        let name = type_.name().to_string();
        if let Some(existing) = self.types.get(&name) {
            return if same_identity(existing, &type_) {
                RegisterOutcome::AlreadyPresent
            } else {
                RegisterOutcome::Conflict
            };
        }
        if name.starts_with("__") {
            self.errors.push(SchemaError::ReservedTypeName(name.clone()));
        } else if !is_valid_name(&name) {
            self.errors.push(SchemaError::InvalidTypeName(name.clone()));
        }
        self.types.insert(name, type_);
        RegisterOutcome::New
    }

    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        self.visit_type(type_ref.named_type());
    }

    fn visit_type(&mut self, type_: &Type) {
        match self.register(type_.clone()) {
            RegisterOutcome::AlreadyPresent => return,
            RegisterOutcome::Conflict => {
                self.errors.push(SchemaError::DuplicateTypeName(type_.name().to_string()));
                return;
            }
            RegisterOutcome::New => {}
        }
        match type_ {
            Type::Object(o) => self.visit_object_children(o),
            Type::Interface(i) => self.visit_interface_children(i),
            Type::Union(u) => self.visit_union(u),
            Type::InputObject(io) => self.visit_input_object(io),
            Type::Enum(e) => {
                if e.values.is_empty() {
                    self.errors.push(SchemaError::EmptyEnum(e.name.clone()));
                }
                for value_name in e.values.keys() {
                    if !is_valid_name(value_name) {
                        self.errors.push(SchemaError::InvalidEnumValueName(value_name.clone(), e.name.clone()));
                    }
                }
            }
            Type::Scalar(_) | Type::Boolean | Type::Float | Type::Id | Type::Int | Type::String => {}
        }
    }

    /// Entry point for root (query/mutation) object types, and the only
    /// place that registers an object before recursing into it -- every
    /// other reference comes in through [`Self::visit_type_ref`].
    fn visit_object(&mut self, object: &Arc<ObjectType>) {
        match self.register(Type::Object(Arc::clone(object))) {
            RegisterOutcome::AlreadyPresent => return,
            RegisterOutcome::Conflict => {
                self.errors.push(SchemaError::DuplicateTypeName(object.name.clone()));
                return;
            }
            RegisterOutcome::New => {}
        }
        self.visit_object_children(object);
    }

    fn visit_object_children(&mut self, object: &Arc<ObjectType>) {
        if object.fields.is_empty() {
            self.errors.push(SchemaError::EmptyObject(object.name.clone()));
        }
        for field in object.fields.values() {
            if field.name.starts_with("__") {
                self.errors.push(SchemaError::ReservedFieldName(field.name.clone(), object.name.clone()));
            } else if !is_valid_name(&field.name) {
                self.errors.push(SchemaError::InvalidFieldName(field.name.clone(), object.name.clone()));
            }
            self.visit_type_ref(field.type_ref());
            if !field.type_ref().is_output_type() {
                self.errors.push(SchemaError::NonOutputType(
                    field.name.clone(), object.name.clone(), field.type_ref().to_string(),
                ));
            }
            for arg in field.arguments.values() {
                self.visit_argument(arg, &object.name);
            }
        }
        for interface in &object.interfaces {
            self.visit_interface(interface);
            self.check_interface_contract(object, interface);
        }
    }

    fn visit_interface(&mut self, interface: &Arc<crate::types::InterfaceType>) {
        match self.register(Type::Interface(Arc::clone(interface))) {
            RegisterOutcome::AlreadyPresent => return,
            RegisterOutcome::Conflict => {
                self.errors.push(SchemaError::DuplicateTypeName(interface.name.clone()));
                return;
            }
            RegisterOutcome::New => {}
        }
        self.visit_interface_children(interface);
    }

    fn visit_interface_children(&mut self, interface: &Arc<crate::types::InterfaceType>) {
        for field in interface.fields.values() {
            if !is_valid_name(&field.name) {
                self.errors.push(SchemaError::InvalidFieldName(field.name.clone(), interface.name.clone()));
            }
            self.visit_type_ref(field.type_ref());
            for arg in field.arguments.values() {
                self.visit_argument(arg, &interface.name);
            }
        }
    }

    fn visit_union(&mut self, union: &Arc<crate::types::UnionType>) {
        if union.possible_types.is_empty() {
            self.errors.push(SchemaError::EmptyUnion(union.name.clone()));
        }
        for possible_type in &union.possible_types {
            self.visit_object(possible_type);
        }
    }

    fn visit_input_object(&mut self, input_object: &Arc<crate::types::InputObjectType>) {
        if input_object.fields.is_empty() {
            self.errors.push(SchemaError::EmptyInputObject(input_object.name.clone()));
        }
        for field in input_object.fields.values() {
            if !is_valid_name(&field.name) {
                self.errors.push(SchemaError::InvalidFieldName(field.name.clone(), input_object.name.clone()));
            }
            self.visit_type_ref(field.type_ref());
            if !field.type_ref().is_input_type() {
                self.errors.push(SchemaError::NonInputType(
                    field.name.clone(), input_object.name.clone(), field.type_ref().to_string(),
                ));
            }
        }
    }

    fn visit_argument(&mut self, argument: &Argument, owner: &str) {
        if !is_valid_name(&argument.name) {
            self.errors.push(SchemaError::InvalidArgumentName(argument.name.clone(), owner.to_string()));
        }
        self.visit_type_ref(argument.type_ref());
        if !argument.type_ref().is_input_type() {
            self.errors.push(SchemaError::NonInputType(
                argument.name.clone(), owner.to_string(), argument.type_ref().to_string(),
            ));
        }
    }

    fn check_interface_contract(&mut self, object: &ObjectType, interface: &crate::types::InterfaceType) {
        for (field_name, interface_field) in &interface.fields {
            let Some(object_field) = object.fields.get(field_name) else {
                self.errors.push(SchemaError::InterfaceFieldMissing {
                    interface: interface.name.clone(),
                    object: object.name.clone(),
                    field: field_name.clone(),
                });
                continue;
            };
            if object_field.type_ref() != interface_field.type_ref() {
                self.errors.push(SchemaError::InterfaceFieldTypeMismatch {
                    interface: interface.name.clone(),
                    object: object.name.clone(),
                    field: field_name.clone(),
                    expected: interface_field.type_ref().to_string(),
                    found: object_field.type_ref().to_string(),
                });
            }
            for (argument_name, interface_argument) in &interface_field.arguments {
                let Some(object_argument) = object_field.arguments.get(argument_name) else {
                    self.errors.push(SchemaError::InterfaceArgumentMissing {
                        interface: interface.name.clone(),
                        object: object.name.clone(),
                        field: field_name.clone(),
                        argument: argument_name.clone(),
                    });
                    continue;
                };
                if object_argument.type_ref() != interface_argument.type_ref() {
                    self.errors.push(SchemaError::InterfaceArgumentTypeMismatch {
                        interface: interface.name.clone(),
                        object: object.name.clone(),
                        field: field_name.clone(),
                        argument: argument_name.clone(),
                        expected: interface_argument.type_ref().to_string(),
                        found: object_argument.type_ref().to_string(),
                    });
                }
            }
            for (argument_name, object_argument) in &object_field.arguments {
                if interface_field.arguments.contains_key(argument_name) {
                    continue;
                }
                let is_required = !object_argument.type_ref().is_nullable() && object_argument.default_value.is_none();
                if is_required {
                    self.errors.push(SchemaError::InterfaceAdditionalRequiredArgument {
                        interface: interface.name.clone(),
                        object: object.name.clone(),
                        field: field_name.clone(),
                        argument: argument_name.clone(),
                    });
                }
            }
        }
    }
}

/// Matches GraphQL's `Name` grammar production, `/^[_A-Za-z][_0-9A-Za-z]*$/`.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn same_identity(a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::Scalar(a), Type::Scalar(b)) => Arc::ptr_eq(a, b),
        (Type::Object(a), Type::Object(b)) => Arc::ptr_eq(a, b),
        (Type::Interface(a), Type::Interface(b)) => Arc::ptr_eq(a, b),
        (Type::Union(a), Type::Union(b)) => Arc::ptr_eq(a, b),
        (Type::Enum(a), Type::Enum(b)) => Arc::ptr_eq(a, b),
        (Type::InputObject(a), Type::InputObject(b)) => Arc::ptr_eq(a, b),
        (Type::Boolean, Type::Boolean)
        | (Type::Float, Type::Float)
        | (Type::Id, Type::Id)
        | (Type::Int, Type::Int)
        | (Type::String, Type::String) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::types::Field;
    use crate::types::InterfaceType;
    use crate::types::TypeRefInit as TI;

    #[test]
    fn rejects_an_object_argument_with_a_mismatched_type() {
        let node = Arc::new(
            InterfaceType::new(
                "Node",
                [Field::new("item", TI::eager(TypeRef::Named(Type::String)))
                    .with_arguments([Argument::new("id", TI::eager(TypeRef::Named(Type::String)), None)])],
            ),
        );
        let thing = Arc::new(
            ObjectType::new(
                "Thing",
                [Field::new("item", TI::eager(TypeRef::Named(Type::String)))
                    .with_arguments([Argument::new("id", TI::eager(TypeRef::Named(Type::Int)), None)])],
            )
            .with_interfaces([Arc::clone(&node)]),
        );
        let errors = Schema::builder(thing).build().unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, SchemaError::InterfaceArgumentTypeMismatch { .. })));
    }

    #[test]
    fn rejects_an_additional_required_argument_on_an_interface_field() {
        let node = Arc::new(InterfaceType::new("Node", [Field::new("item", TI::eager(TypeRef::Named(Type::String)))]));
        let thing = Arc::new(
            ObjectType::new(
                "Thing",
                [Field::new("item", TI::eager(TypeRef::Named(Type::String)))
                    .with_arguments([Argument::new("id", TI::eager(TypeRef::NonNull(Box::new(TypeRef::Named(Type::String)))), None)])],
            )
            .with_interfaces([Arc::clone(&node)]),
        );
        let errors = Schema::builder(thing).build().unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, SchemaError::InterfaceAdditionalRequiredArgument { .. })));
    }

    #[test]
    fn allows_an_additional_optional_argument_on_an_interface_field() {
        let node = Arc::new(InterfaceType::new("Node", [Field::new("item", TI::eager(TypeRef::Named(Type::String)))]));
        let thing = Arc::new(
            ObjectType::new(
                "Thing",
                [Field::new("item", TI::eager(TypeRef::Named(Type::String)))
                    .with_arguments([Argument::new("id", TI::eager(TypeRef::Named(Type::String)), None)])],
            )
            .with_interfaces([Arc::clone(&node)]),
        );
        let schema = Schema::builder(thing).build();
        assert!(schema.is_ok());
    }

    #[test]
    fn rejects_a_type_name_that_does_not_match_the_name_grammar() {
        let query = Arc::new(ObjectType::new("Que-ry", [Field::new("ok", TI::eager(TypeRef::Named(Type::String)))]));
        let errors = Schema::builder(query).build().unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, SchemaError::InvalidTypeName(_))));
    }
}
