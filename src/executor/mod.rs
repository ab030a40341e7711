//! The execution engine: operation selection, variable coercion, field
//! collection, resolver dispatch, and value completion (spec.md §4.6).

mod collect;
mod context;
mod error;
mod resolve;

pub use error::ExecutionError;
pub use error::PathSegment;

use crate::ast;
use crate::coercion;
use crate::schema::Schema;
use crate::value::Value;
use context::ExecutionContext;
use indexmap::IndexMap;
use std::collections::HashMap;

/// The `{data, errors}` envelope `Request::run` always returns; it never
/// surfaces a `Result` at this boundary (spec.md §6/§7).
#[derive(Debug, serde::Serialize)]
pub struct ExecutionResult {
    pub data: Value,
    pub errors: Vec<ExecutionError>,
}

impl ExecutionResult {
    fn entry_error(message: impl Into<String>) -> Self {
        Self { data: Value::Null, errors: vec![ExecutionError::new(message, Vec::new(), None)] }
    }
}

#[tracing::instrument(skip_all, name = "executor::execute")]
pub fn execute(
    schema: &Schema,
    document: &ast::Document,
    operation_name: Option<&str>,
    variable_values: &IndexMap<String, Value>,
    root_value: Value,
) -> ExecutionResult {
    let mut operations: HashMap<&str, &ast::OperationDefinition> = HashMap::new();
    let mut fragments: HashMap<&str, &ast::FragmentDefinition> = HashMap::new();
    for definition in &document.definitions {
        match definition {
            ast::Definition::Operation(operation) => {
                let key = operation.name.as_ref().map(|n| n.value.as_str()).unwrap_or("");
                operations.insert(key, operation);
            }
            ast::Definition::Fragment(fragment) => {
                fragments.insert(fragment.name.value.as_str(), fragment);
            }
        }
    }

    let operation = match operation_name {
        Some(name) => match operations.get(name) {
            Some(operation) => *operation,
            None => return ExecutionResult::entry_error(format!("Unknown operation `{name}`")),
        },
        None => {
            if operations.len() == 1 {
                *operations.values().next().unwrap()
            } else {
                return ExecutionResult::entry_error(
                    "An operation name is required when a document defines more than one operation",
                );
            }
        }
    };

    let Some(root_type) = schema.root_type(operation.operation_type) else {
        return ExecutionResult::entry_error(format!("The schema does not support `{}` operations", operation.operation_type));
    };

    let variables = match coercion::get_variable_values(schema, &operation.variable_definitions, variable_values) {
        Ok(variables) => variables,
        Err(error) => return ExecutionResult::entry_error(error.to_string()),
    };

    let ctx = ExecutionContext::new(schema, fragments, variables);
    let is_query_root = operation.operation_type == ast::OperationType::Query;
    let serial = operation.operation_type == ast::OperationType::Mutation;

    let data = resolve::execute_operation(&ctx, root_type, &root_value, &operation.selection_set, serial, is_query_root);
    let errors = ctx.into_errors();

    ExecutionResult { data, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::schema::Schema;
    use crate::source::Source;
    use crate::types::Field;
    use crate::types::InterfaceType;
    use crate::types::ObjectType;
    use crate::types::Type;
    use crate::types::TypeRef as T;
    use crate::types::TypeRefInit as TI;
    use std::sync::Arc;
    use std::sync::Mutex;

    fn parse(text: &str) -> ast::Document {
        let source = Source::anonymous(text.to_string());
        Parser::parse_document(&source).unwrap()
    }

    fn run(schema: &Schema, query: &str) -> ExecutionResult {
        run_with(schema, query, None, IndexMap::new(), Value::Null)
    }

    fn run_with(
        schema: &Schema,
        query: &str,
        operation_name: Option<&str>,
        variables: IndexMap<String, Value>,
        root_value: Value,
    ) -> ExecutionResult {
        let document = parse(query);
        execute(schema, &document, operation_name, &variables, root_value)
    }

    fn object(pairs: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn resolves_and_aliases_a_simple_field() {
        let query = Arc::new(ObjectType::new(
            "Query",
            [Field::new("hello", TI::eager(T::NonNull(Box::new(T::Named(Type::String)))))
                .with_resolver(|_ctx| Ok("world".into()))],
        ));
        let schema = Schema::builder(query).build().unwrap();

        let result = run(&schema, "{ greeting: hello }");
        assert!(result.errors.is_empty());
        assert_eq!(result.data, object([("greeting", "world".into())]));
    }

    #[test]
    fn typename_meta_field_reports_the_runtime_object_type() {
        let query = Arc::new(ObjectType::new("Query", [Field::new("hello", TI::eager(T::Named(Type::String)))]));
        let schema = Schema::builder(query).build().unwrap();

        let result = run(&schema, "{ __typename }");
        assert!(result.errors.is_empty());
        assert_eq!(result.data, object([("__typename", "Query".into())]));
    }

    #[test]
    fn skip_directive_omits_the_field_it_decorates() {
        let query = Arc::new(ObjectType::new(
            "Query",
            [
                Field::new("a", TI::eager(T::Named(Type::String))).with_resolver(|_| Ok("a".into())),
                Field::new("b", TI::eager(T::Named(Type::String))).with_resolver(|_| Ok("b".into())),
            ],
        ));
        let schema = Schema::builder(query).build().unwrap();

        let result = run(&schema, "{ a @skip(if: true) b }");
        assert!(result.errors.is_empty());
        assert_eq!(result.data, object([("b", "b".into())]));
    }

    #[test]
    fn nullable_field_error_is_caught_at_the_field_itself() {
        let query = Arc::new(ObjectType::new(
            "Query",
            [
                Field::new("ok", TI::eager(T::Named(Type::String))).with_resolver(|_| Ok("fine".into())),
                Field::new("bad", TI::eager(T::Named(Type::String)))
                    .with_resolver(|_| Err("boom".into())),
            ],
        ));
        let schema = Schema::builder(query).build().unwrap();

        let result = run(&schema, "{ ok bad }");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "boom");
        assert_eq!(result.data, object([("ok", "fine".into()), ("bad", Value::Null)]));
    }

    #[test]
    fn non_null_field_error_propagates_to_the_nearest_nullable_ancestor() {
        let inner = Arc::new(ObjectType::new(
            "Inner",
            [Field::new("required", TI::eager(T::NonNull(Box::new(T::Named(Type::String)))))
                .with_resolver(|_| Err("missing".into()))],
        ));
        let query = Arc::new(ObjectType::new(
            "Query",
            [Field::new("wrapper", TI::eager(T::Named(Type::Object(inner))))
                .with_resolver(|_| Ok(Value::Object(IndexMap::new())))],
        ));
        let schema = Schema::builder(query).build().unwrap();

        let result = run(&schema, "{ wrapper { required } }");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.data, object([("wrapper", Value::Null)]));
    }

    #[test]
    fn a_null_list_element_under_non_null_nulls_the_whole_list() {
        let query = Arc::new(ObjectType::new(
            "Query",
            [Field::new("items", TI::eager(T::List(Box::new(T::NonNull(Box::new(T::Named(Type::String)))))))
                .with_resolver(|_| Ok(Value::List(vec![Value::String("a".to_string()), Value::Null])))],
        ));
        let schema = Schema::builder(query).build().unwrap();

        let result = run(&schema, "{ items }");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.data, object([("items", Value::Null)]));
    }

    #[test]
    fn mutation_siblings_run_serially_in_source_order() {
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let order_a = Arc::clone(&order);
        let order_b = Arc::clone(&order);

        let query = Arc::new(ObjectType::new("Query", [Field::new("noop", TI::eager(T::Named(Type::String)))]));
        let mutation = Arc::new(ObjectType::new(
            "Mutation",
            [
                Field::new("first", TI::eager(T::Named(Type::String))).with_resolver(move |_| {
                    order_a.lock().unwrap().push("first");
                    Ok("1".into())
                }),
                Field::new("second", TI::eager(T::Named(Type::String))).with_resolver(move |_| {
                    order_b.lock().unwrap().push("second");
                    Ok("2".into())
                }),
            ],
        ));
        let schema = Schema::builder(query).mutation(mutation).build().unwrap();

        let result = run(&schema, "mutation { first second }");
        assert!(result.errors.is_empty());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn abstract_type_resolves_via_resolve_type_closure() {
        let animal_interface = Arc::new(
            InterfaceType::new("Animal", [Field::new("name", TI::eager(T::Named(Type::String)))])
                .with_resolve_type(|_value| Some("Cat".to_string())),
        );
        let cat = Arc::new(
            ObjectType::new(
                "Cat",
                [Field::new("name", TI::eager(T::Named(Type::String)))
                    .with_resolver(|ctx| Ok(ctx.parent.clone()))],
            )
            .with_interfaces([Arc::clone(&animal_interface)]),
        );
        let query = Arc::new(ObjectType::new(
            "Query",
            [
                // registers `Cat` with the schema so it's a known possible
                // type for `Animal`; the field itself isn't queried here.
                Field::new("cat", TI::eager(T::Named(Type::Object(Arc::clone(&cat)))))
                    .with_resolver(|_| Ok(Value::Null)),
                Field::new("pet", TI::eager(T::Named(Type::Interface(Arc::clone(&animal_interface)))))
                    .with_resolver(|_| Ok(Value::String("Whiskers".to_string()))),
            ],
        ));
        let schema = Schema::builder(query).build().unwrap();

        let result = run(&schema, "{ pet { __typename name } }");
        assert!(result.errors.is_empty());
        assert_eq!(
            result.data,
            object([("pet", object([("__typename", "Cat".into()), ("name", "Whiskers".into())]))])
        );
    }
}
