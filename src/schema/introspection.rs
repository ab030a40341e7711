//! The introspection meta-schema (`__Schema`, `__Type`, `__Field`,
//! `__InputValue`, `__EnumValue`, `__Directive`, `__TypeKind`) and the value
//! trees for the `__schema`/`__type` meta-fields the executor injects at the
//! query root, plus `__typename` on every composite type.
//!
//! Most meta-type fields carry no explicit resolver: they rely on the
//! executor's default property-lookup resolver against the `Value::Object`
//! trees built by [`schema_value`]/[`type_value`] below, exactly like a
//! host's own object-shaped field values would. `__Type.fields` and
//! `__Type.enumValues` are the exception: they read their own
//! `includeDeprecated` argument at resolve time, so they carry a real
//! resolver instead.

use crate::schema::Schema;
use crate::types::Argument;
use crate::types::EnumType;
use crate::types::EnumValue as TypeEnumValue;
use crate::types::Field;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ResolveContext;
use crate::types::ResolveResult;
use crate::types::Type;
use crate::types::TypeRef;
use crate::types::TypeRefInit;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;
use std::sync::OnceLock;

pub const META_SCHEMA_FIELD: &str = "__schema";
pub const META_TYPE_FIELD: &str = "__type";
pub const META_TYPENAME_FIELD: &str = "__typename";

fn named(t: Type) -> TypeRef {
    TypeRef::Named(t)
}

fn non_null(t: TypeRef) -> TypeRef {
    TypeRef::NonNull(Box::new(t))
}

fn list(t: TypeRef) -> TypeRef {
    TypeRef::List(Box::new(t))
}

/// The full set of introspection meta-types, tied together with
/// [`OnceLock`]-backed self-references for `__Type`'s recursive shape
/// (`ofType`, `fields[].type`, ...).
pub struct MetaTypes {
    pub type_kind: Arc<EnumType>,
    pub input_value: Arc<ObjectType>,
    pub enum_value: Arc<ObjectType>,
    pub field: Arc<ObjectType>,
    pub type_: Arc<ObjectType>,
    pub directive: Arc<ObjectType>,
    pub schema: Arc<ObjectType>,
}

fn build() -> MetaTypes {
    let type_kind = Arc::new(EnumType::new(
        "__TypeKind",
        [
            TypeEnumValue::new("SCALAR"),
            TypeEnumValue::new("OBJECT"),
            TypeEnumValue::new("INTERFACE"),
            TypeEnumValue::new("UNION"),
            TypeEnumValue::new("ENUM"),
            TypeEnumValue::new("INPUT_OBJECT"),
            TypeEnumValue::new("LIST"),
            TypeEnumValue::new("NON_NULL"),
        ],
    ));

    let type_cell: Arc<OnceLock<Arc<ObjectType>>> = Arc::new(OnceLock::new());
    let type_ref = {
        let cell = type_cell.clone();
        move || TypeRef::Named(Type::Object(cell.get().expect("__Type tied knot not yet closed").clone()))
    };

    let input_value = {
        let type_ref = type_ref.clone();
        Arc::new(ObjectType::new("__InputValue", [
            Field::new("name", TypeRefInit::eager(non_null(named(Type::String)))),
            Field::new("description", TypeRefInit::eager(named(Type::String))),
            Field::new("type", TypeRefInit::lazy(move || non_null(type_ref()))),
            Field::new("defaultValue", TypeRefInit::eager(named(Type::String))),
        ]))
    };

    let enum_value = Arc::new(ObjectType::new("__EnumValue", [
        Field::new("name", TypeRefInit::eager(non_null(named(Type::String)))),
        Field::new("description", TypeRefInit::eager(named(Type::String))),
        Field::new("isDeprecated", TypeRefInit::eager(non_null(named(Type::Boolean)))),
        Field::new("deprecationReason", TypeRefInit::eager(named(Type::String))),
    ]));

    let field_cell: Arc<OnceLock<Arc<ObjectType>>> = Arc::new(OnceLock::new());
    let field_ref = {
        let cell = field_cell.clone();
        move || TypeRef::Named(Type::Object(cell.get().expect("__Field tied knot not yet closed").clone()))
    };

    let field = {
        let type_ref = type_ref.clone();
        let input_value = input_value.clone();
        Arc::new(ObjectType::new("__Field", [
            Field::new("name", TypeRefInit::eager(non_null(named(Type::String)))),
            Field::new("description", TypeRefInit::eager(named(Type::String))),
            Field::new(
                "args",
                TypeRefInit::eager(non_null(list(non_null(named(Type::Object(input_value)))))),
            ),
            Field::new("type", TypeRefInit::lazy(move || non_null(type_ref()))),
            Field::new("isDeprecated", TypeRefInit::eager(non_null(named(Type::Boolean)))),
            Field::new("deprecationReason", TypeRefInit::eager(named(Type::String))),
        ]))
    };
    field_cell.set(field.clone()).ok();

    let type_ = {
        let type_ref1 = type_ref.clone();
        let type_ref2 = type_ref.clone();
        let type_ref3 = type_ref.clone();
        Arc::new(ObjectType::new("__Type", [
            Field::new("kind", TypeRefInit::eager(non_null(named(Type::Enum(type_kind.clone()))))),
            Field::new("name", TypeRefInit::eager(named(Type::String))),
            Field::new("description", TypeRefInit::eager(named(Type::String))),
            Field::new("fields", TypeRefInit::eager(list(non_null(named(Type::Object(field.clone()))))))
                .with_arguments([Argument::new(
                    "includeDeprecated",
                    TypeRefInit::eager(named(Type::Boolean)),
                    Some(Value::Boolean(false)),
                )])
                .with_resolver(filter_deprecated_resolver("fields")),
            Field::new("interfaces", TypeRefInit::lazy(move || list(non_null(type_ref1())))),
            Field::new("possibleTypes", TypeRefInit::lazy(move || list(non_null(type_ref2())))),
            Field::new(
                "enumValues",
                TypeRefInit::eager(list(non_null(named(Type::Object(enum_value.clone()))))),
            )
            .with_arguments([Argument::new(
                "includeDeprecated",
                TypeRefInit::eager(named(Type::Boolean)),
                Some(Value::Boolean(false)),
            )])
            .with_resolver(filter_deprecated_resolver("enumValues")),
            Field::new(
                "inputFields",
                TypeRefInit::eager(list(non_null(named(Type::Object(input_value.clone()))))),
            ),
            Field::new("ofType", TypeRefInit::lazy(move || type_ref3())),
        ]))
    };
    type_cell.set(type_.clone()).ok();

    let directive = {
        let input_value = input_value.clone();
        Arc::new(ObjectType::new("__Directive", [
            Field::new("name", TypeRefInit::eager(non_null(named(Type::String)))),
            Field::new("description", TypeRefInit::eager(named(Type::String))),
            Field::new("locations", TypeRefInit::eager(non_null(list(non_null(named(Type::String)))))),
            Field::new("args", TypeRefInit::eager(non_null(list(non_null(named(Type::Object(input_value))))))),
        ]))
    };

    let schema = Arc::new(ObjectType::new("__Schema", [
        Field::new("description", TypeRefInit::eager(named(Type::String))),
        Field::new("types", TypeRefInit::eager(non_null(list(non_null(named(Type::Object(type_.clone()))))))),
        Field::new("queryType", TypeRefInit::eager(non_null(named(Type::Object(type_.clone()))))),
        Field::new("mutationType", TypeRefInit::eager(named(Type::Object(type_.clone())))),
        Field::new("directives", TypeRefInit::eager(non_null(list(non_null(named(Type::Object(directive.clone()))))))),
    ]));

    MetaTypes { type_kind, input_value, enum_value, field, type_, directive, schema }
}

/// Registers the meta-schema's own types into the schema's type map so that
/// e.g. `__type(name: "__Type")` resolves, without running them back through
/// [`crate::schema::builder`]'s reachability walk (they're fixed and known
/// consistent by construction).
pub fn install(types: &mut IndexMap<String, Type>) {
    let meta = build();
    types.insert("__TypeKind".to_string(), Type::Enum(meta.type_kind));
    types.insert("__InputValue".to_string(), Type::Object(meta.input_value));
    types.insert("__EnumValue".to_string(), Type::Object(meta.enum_value));
    types.insert("__Field".to_string(), Type::Object(meta.field));
    types.insert("__Type".to_string(), Type::Object(meta.type_));
    types.insert("__Directive".to_string(), Type::Object(meta.directive));
    types.insert("__Schema".to_string(), Type::Object(meta.schema));
}

fn type_kind_name(t: &Type) -> &'static str {
    match t {
        Type::Scalar(_) | Type::Boolean | Type::Float | Type::Id | Type::Int | Type::String => "SCALAR",
        Type::Object(_) => "OBJECT",
        Type::Interface(_) => "INTERFACE",
        Type::Union(_) => "UNION",
        Type::Enum(_) => "ENUM",
        Type::InputObject(_) => "INPUT_OBJECT",
    }
}

fn type_ref_value(type_ref: &TypeRef) -> Value {
    let mut map = IndexMap::new();
    match type_ref {
        TypeRef::NonNull(inner) => {
            map.insert("kind".to_string(), Value::Enum("NON_NULL".to_string()));
            map.insert("name".to_string(), Value::Null);
            map.insert("ofType".to_string(), type_ref_value(inner));
            map.insert("fields".to_string(), Value::Null);
            map.insert("interfaces".to_string(), Value::Null);
            map.insert("possibleTypes".to_string(), Value::Null);
            map.insert("enumValues".to_string(), Value::Null);
            map.insert("inputFields".to_string(), Value::Null);
            map.insert("description".to_string(), Value::Null);
        }
        TypeRef::List(inner) => {
            map.insert("kind".to_string(), Value::Enum("LIST".to_string()));
            map.insert("name".to_string(), Value::Null);
            map.insert("ofType".to_string(), type_ref_value(inner));
            map.insert("fields".to_string(), Value::Null);
            map.insert("interfaces".to_string(), Value::Null);
            map.insert("possibleTypes".to_string(), Value::Null);
            map.insert("enumValues".to_string(), Value::Null);
            map.insert("inputFields".to_string(), Value::Null);
            map.insert("description".to_string(), Value::Null);
        }
        TypeRef::Named(type_) => return named_type_value(type_),
    }
    Value::Object(map)
}

fn named_type_value(type_: &Type) -> Value {
    let mut map = IndexMap::new();
    map.insert("kind".to_string(), Value::Enum(type_kind_name(type_).to_string()));
    map.insert("name".to_string(), Value::String(type_.name().to_string()));
    map.insert("description".to_string(), type_.clone().description_value());
    map.insert("ofType".to_string(), Value::Null);

    let fields_value = type_
        .fields()
        .map(|fields| Value::List(fields.values().map(field_value).collect()))
        .unwrap_or(Value::Null);
    map.insert("fields".to_string(), fields_value);

    map.insert(
        "interfaces".to_string(),
        match type_ {
            Type::Object(o) => Value::List(o.interfaces.iter().map(|i| named_type_value(&Type::Interface(i.clone()))).collect()),
            _ => Value::Null,
        },
    );
    map.insert(
        "possibleTypes".to_string(),
        match type_ {
            Type::Union(u) => Value::List(u.possible_types.iter().map(|o| named_type_value(&Type::Object(o.clone()))).collect()),
            _ => Value::Null,
        },
    );
    map.insert(
        "enumValues".to_string(),
        match type_ {
            Type::Enum(e) => Value::List(e.values.values().map(enum_value_value).collect()),
            _ => Value::Null,
        },
    );
    map.insert(
        "inputFields".to_string(),
        match type_ {
            Type::InputObject(io) => Value::List(io.fields.values().map(input_value_value).collect()),
            _ => Value::Null,
        },
    );

    Value::Object(map)
}

/// Resolver for `__Type.fields`/`__Type.enumValues`: the precomputed value
/// tree under `list_field_name` always carries every entry, deprecated or
/// not, each tagged with `isDeprecated`; this filters by the field's own
/// `includeDeprecated` argument at resolve time instead of baking the
/// default into the tree (matching spec.md §4.7).
fn filter_deprecated_resolver(list_field_name: &'static str) -> impl Fn(&ResolveContext) -> ResolveResult {
    move |ctx: &ResolveContext| {
        let include_deprecated = ctx.arguments.get("includeDeprecated").and_then(Value::as_bool).unwrap_or(false);
        let Value::Object(parent) = ctx.parent else {
            return Ok(Value::Null);
        };
        let Some(Value::List(items)) = parent.get(list_field_name) else {
            return Ok(Value::Null);
        };
        if include_deprecated {
            return Ok(Value::List(items.clone()));
        }
        let filtered = items
            .iter()
            .filter(|item| !matches!(item, Value::Object(o) if matches!(o.get("isDeprecated"), Some(Value::Boolean(true)))))
            .cloned()
            .collect();
        Ok(Value::List(filtered))
    }
}

fn field_value(field: &Field) -> Value {
    let mut map = IndexMap::new();
    map.insert("name".to_string(), Value::String(field.name.clone()));
    map.insert("description".to_string(), field.description.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("args".to_string(), Value::List(field.arguments.values().map(input_value_value).collect()));
    map.insert("type".to_string(), type_ref_value(field.type_ref()));
    map.insert("isDeprecated".to_string(), Value::Boolean(field.deprecation.is_deprecated()));
    map.insert(
        "deprecationReason".to_string(),
        field.deprecation.reason().map(|r| Value::String(r.to_string())).unwrap_or(Value::Null),
    );
    Value::Object(map)
}

fn input_value_value(argument: &Argument) -> Value {
    let mut map = IndexMap::new();
    map.insert("name".to_string(), Value::String(argument.name.clone()));
    map.insert("description".to_string(), argument.description.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("type".to_string(), type_ref_value(argument.type_ref()));
    map.insert("defaultValue".to_string(), Value::Null);
    Value::Object(map)
}

fn enum_value_value(value: &TypeEnumValue) -> Value {
    let mut map = IndexMap::new();
    map.insert("name".to_string(), Value::String(value.name.clone()));
    map.insert("description".to_string(), value.description.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert("isDeprecated".to_string(), Value::Boolean(value.deprecation.is_deprecated()));
    map.insert(
        "deprecationReason".to_string(),
        value.deprecation.reason().map(|r| Value::String(r.to_string())).unwrap_or(Value::Null),
    );
    Value::Object(map)
}

fn directive_location_name(location: crate::types::DirectiveLocation) -> &'static str {
    match location {
        crate::types::DirectiveLocation::Field => "FIELD",
        crate::types::DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
        crate::types::DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
    }
}

fn directive_value(directive: &crate::types::Directive) -> Value {
    let mut map = IndexMap::new();
    map.insert("name".to_string(), Value::String(directive.name.clone()));
    map.insert("description".to_string(), directive.description.clone().map(Value::String).unwrap_or(Value::Null));
    map.insert(
        "locations".to_string(),
        Value::List(directive.locations.iter().map(|l| Value::Enum(directive_location_name(*l).to_string())).collect()),
    );
    map.insert("args".to_string(), Value::List(directive.arguments.values().map(input_value_value).collect()));
    Value::Object(map)
}

/// The value tree for the `__schema` meta-field.
pub fn schema_value(schema: &Schema) -> Value {
    let mut map = IndexMap::new();
    map.insert("description".to_string(), Value::Null);
    map.insert(
        "types".to_string(),
        Value::List(schema.types().map(named_type_value).collect()),
    );
    map.insert("queryType".to_string(), named_type_value(&Type::Object(schema.query_type().clone())));
    map.insert(
        "mutationType".to_string(),
        schema.mutation_type().map(|m| named_type_value(&Type::Object(m.clone()))).unwrap_or(Value::Null),
    );
    map.insert(
        "directives".to_string(),
        Value::List(schema.directives().map(directive_value).collect()),
    );
    Value::Object(map)
}

/// The value tree for the `__type(name: ...)` meta-field.
pub fn type_value_by_name(schema: &Schema, name: &str) -> Value {
    schema.get_type(name).map(named_type_value).unwrap_or(Value::Null)
}

trait DescriptionValue {
    fn description_value(self) -> Value;
}

impl DescriptionValue for Type {
    fn description_value(self) -> Value {
        let description = match &self {
            Type::Scalar(t) => t.description.clone(),
            Type::Object(t) => t.description.clone(),
            Type::Interface(t) => t.description.clone(),
            Type::Union(t) => t.description.clone(),
            Type::Enum(t) => t.description.clone(),
            Type::InputObject(t) => t.description.clone(),
            Type::Boolean | Type::Float | Type::Id | Type::Int | Type::String => None,
        };
        description.map(Value::String).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use crate::request::ExecutionOptions;
    use crate::request::Request;
    use crate::schema::Schema;
    use crate::types::DeprecationState;
    use crate::types::Field;
    use crate::types::ObjectType;
    use crate::types::Type;
    use crate::types::TypeRef as T;
    use crate::types::TypeRefInit as TI;
    use crate::value::Value;
    use std::sync::Arc;

    fn schema_with_a_deprecated_field() -> Schema {
        let widget = Arc::new(ObjectType::new(
            "Widget",
            [
                Field::new("name", TI::eager(T::Named(Type::String))),
                Field::new("legacyName", TI::eager(T::Named(Type::String)))
                    .with_deprecation(DeprecationState::Deprecated { reason: Some("use name".to_string()) }),
            ],
        ));
        let query = Arc::new(ObjectType::new(
            "Query",
            [Field::new("widget", TI::eager(T::Named(Type::Object(widget)))).with_resolver(|_| Ok(Value::Null))],
        ));
        Schema::builder(query).build().unwrap()
    }

    #[test]
    fn type_fields_hides_deprecated_fields_by_default() {
        let schema = schema_with_a_deprecated_field();
        let request = Request::new(
            &schema,
            r#"{ __type(name: "Widget") { fields { name } } }"#,
            ExecutionOptions::default(),
        )
        .unwrap();
        let result = request.run();
        assert!(result.errors.is_empty());
        let Value::Object(data) = &result.data else { panic!() };
        let Value::Object(type_) = &data["__type"] else { panic!() };
        let Value::List(fields) = &type_["fields"] else { panic!() };
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn type_fields_includes_deprecated_fields_when_asked() {
        let schema = schema_with_a_deprecated_field();
        let request = Request::new(
            &schema,
            r#"{ __type(name: "Widget") { fields(includeDeprecated: true) { name } } }"#,
            ExecutionOptions::default(),
        )
        .unwrap();
        let result = request.run();
        assert!(result.errors.is_empty());
        let Value::Object(data) = &result.data else { panic!() };
        let Value::Object(type_) = &data["__type"] else { panic!() };
        let Value::List(fields) = &type_["fields"] else { panic!() };
        assert_eq!(fields.len(), 2);
    }
}
