//! Field resolution and value completion: spec.md §4.6's "Resolution" and
//! "Value completion" steps, plus the sibling-field concurrency of §5.

use crate::ast;
use crate::coercion;
use crate::executor::collect::collect_fields;
use crate::executor::context::field_path;
use crate::executor::context::index_path;
use crate::executor::context::ExecutionContext;
use crate::executor::error::PathSegment;
use crate::schema::introspection;
use crate::types::ObjectType;
use crate::types::ResolveContext;
use crate::types::Type;
use crate::types::TypeRef;
use crate::value::Value;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// Runs one operation's root selection set to completion, collapsing any
/// unresolved non-null propagation at the root into a null `data` value
/// (spec.md §6: the wire envelope's `data` is always `<value>|null`).
pub fn execute_operation<'a>(
    ctx: &ExecutionContext<'a>,
    root_type: &Arc<ObjectType>,
    root_value: &Value,
    selection_set: &'a ast::SelectionSet,
    serial: bool,
    is_query_root: bool,
) -> Value {
    let mut grouped = IndexMap::new();
    let mut visited = HashSet::new();
    collect_fields(ctx, root_type, selection_set, &mut visited, &mut grouped);
    match execute_grouped_fields(ctx, root_type, root_value, &grouped, serial, is_query_root, &[]) {
        Ok(value) => value,
        Err(()) => Value::Null,
    }
}

fn execute_grouped_fields<'a>(
    ctx: &ExecutionContext<'a>,
    object_type: &Arc<ObjectType>,
    object_value: &Value,
    grouped: &IndexMap<String, Vec<&'a ast::Field>>,
    serial: bool,
    is_query_root: bool,
    path: &[PathSegment],
) -> Result<Value, ()> {
    let entries: Vec<(&str, &Vec<&ast::Field>)> = grouped.iter().map(|(k, v)| (k.as_str(), v)).collect();

    let results: Vec<Result<(String, Value), ()>> = if serial {
        entries
            .iter()
            .map(|&(key, fields)| resolve_and_complete_field(ctx, object_type, object_value, key, fields, is_query_root, path))
            .collect()
    } else {
        entries
            .par_iter()
            .map(|&(key, fields)| resolve_and_complete_field(ctx, object_type, object_value, key, fields, is_query_root, path))
            .collect()
    };

    if results.iter().any(Result::is_err) {
        return Err(());
    }
    Ok(Value::Object(results.into_iter().map(Result::unwrap).collect()))
}

fn resolve_and_complete_field<'a>(
    ctx: &ExecutionContext<'a>,
    object_type: &Arc<ObjectType>,
    object_value: &Value,
    response_key: &str,
    field_asts: &[&'a ast::Field],
    is_query_root: bool,
    path: &[PathSegment],
) -> Result<(String, Value), ()> {
    let first_field = field_asts[0];
    let name = first_field.name.value.as_str();

    if name == introspection::META_TYPENAME_FIELD {
        return Ok((response_key.to_string(), Value::String(object_type.name.clone())));
    }
    if is_query_root && name == introspection::META_SCHEMA_FIELD {
        return Ok((response_key.to_string(), introspection::schema_value(ctx.schema)));
    }
    if is_query_root && name == introspection::META_TYPE_FIELD {
        return Ok((response_key.to_string(), resolve_meta_type_field(ctx, first_field)));
    }

    let Some(field_def) = object_type.fields.get(name) else {
        // Unknown field: spec.md §4.6 -- "resolves to nothing (no error)";
        // the validator, not the executor, is responsible for catching this.
        return Ok((response_key.to_string(), Value::Null));
    };

    let sub_path = field_path(path, response_key);

    let arguments = match coercion::get_argument_values(&field_def.arguments, &first_field.arguments, &ctx.variables) {
        Ok(arguments) => arguments,
        Err(error) => {
            ctx.push_error(error.to_string(), sub_path, Some(first_field.span));
            return if field_def.type_ref().is_nullable() {
                Ok((response_key.to_string(), Value::Null))
            } else {
                Err(())
            };
        }
    };

    let resolve_context = ResolveContext { parent: object_value, arguments: &arguments };
    let raw_result = match field_def.resolver() {
        Some(resolver) => {
            tracing::debug!(field = name, "dispatching resolver");
            resolver(&resolve_context)
        }
        None => Ok(default_resolve(object_value, name)),
    };

    match raw_result {
        Ok(raw) => match complete_value(field_def.type_ref(), raw, field_asts, ctx, &sub_path) {
            Ok(value) => Ok((response_key.to_string(), value)),
            Err(()) => Err(()),
        },
        Err(error) => {
            ctx.push_error(error.to_string(), sub_path, Some(first_field.span));
            if field_def.type_ref().is_nullable() {
                Ok((response_key.to_string(), Value::Null))
            } else {
                Err(())
            }
        }
    }
}

fn resolve_meta_type_field(ctx: &ExecutionContext, field: &ast::Field) -> Value {
    let type_name_ref = TypeRef::NonNull(Box::new(TypeRef::Named(Type::String)));
    let type_name = field
        .arguments
        .iter()
        .find(|a| a.name.value == "name")
        .and_then(|a| coercion::value_from_ast(&a.value, &type_name_ref, &ctx.variables).ok())
        .and_then(|v| v.as_str().map(str::to_string));
    match type_name {
        Some(name) => introspection::type_value_by_name(ctx.schema, &name),
        None => Value::Null,
    }
}

/// The default resolver: "property lookup, call it if callable" against a
/// resolver-returned `Value::Object`, standing in for the original source's
/// reflection-based `defaultResolveFn`.
fn default_resolve(parent: &Value, field_name: &str) -> Value {
    match parent {
        Value::Object(map) => map.get(field_name).cloned().map(Value::force).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// `completeValue`: enforces non-null, then dispatches to the type-kind
/// specific completion. Swallows a child's non-null violation to `Null`
/// here whenever this position is itself nullable; otherwise re-propagates.
fn complete_value<'a>(
    type_ref: &TypeRef,
    raw: Value,
    field_asts: &[&'a ast::Field],
    ctx: &ExecutionContext<'a>,
    path: &[PathSegment],
) -> Result<Value, ()> {
    if let TypeRef::NonNull(inner) = type_ref {
        return match complete_value_inner(inner, raw, field_asts, ctx, path) {
            Ok(value) if value.is_null() => {
                ctx.push_error("Cannot return null for non-nullable field", path.to_vec(), first_span(field_asts));
                Err(())
            }
            Ok(value) => Ok(value),
            Err(()) => Err(()),
        };
    }

    match complete_value_inner(type_ref, raw, field_asts, ctx, path) {
        Ok(value) => Ok(value),
        Err(()) => Ok(Value::Null),
    }
}

fn complete_value_inner<'a>(
    type_ref: &TypeRef,
    raw: Value,
    field_asts: &[&'a ast::Field],
    ctx: &ExecutionContext<'a>,
    path: &[PathSegment],
) -> Result<Value, ()> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    match type_ref {
        TypeRef::NonNull(_) => unreachable!("stripped by complete_value"),
        TypeRef::List(inner) => match raw {
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let item_path = index_path(path, index);
                    out.push(complete_value(inner, item, field_asts, ctx, &item_path)?);
                }
                Ok(Value::List(out))
            }
            _ => {
                ctx.push_error("Expected a list for a list-typed field", path.to_vec(), first_span(field_asts));
                Err(())
            }
        },
        TypeRef::Named(Type::Object(object)) => complete_composite(Arc::clone(object), raw, field_asts, ctx, path),
        TypeRef::Named(Type::Interface(interface)) => {
            let possible_types = ctx.schema.interface_possible_types(&interface.name);
            complete_abstract(possible_types, interface.resolve_type.as_ref(), raw, field_asts, ctx, path)
        }
        TypeRef::Named(Type::Union(union)) => {
            complete_abstract(&union.possible_types, union.resolve_type.as_ref(), raw, field_asts, ctx, path)
        }
        TypeRef::Named(Type::Enum(enum_type)) => match raw.as_str() {
            Some(name) if enum_type.values.contains_key(name) => Ok(Value::Enum(name.to_string())),
            _ => {
                ctx.push_error(format!("Invalid enum value for `{}`", enum_type.name), path.to_vec(), first_span(field_asts));
                Err(())
            }
        },
        TypeRef::Named(Type::Scalar(scalar)) => match (scalar.serialize)(&raw) {
            Ok(value) => Ok(value),
            Err(reason) => {
                ctx.push_error(reason, path.to_vec(), first_span(field_asts));
                Err(())
            }
        },
        TypeRef::Named(Type::Boolean) => match raw {
            Value::Boolean(_) => Ok(raw),
            _ => type_mismatch(ctx, path, field_asts, "Boolean"),
        },
        TypeRef::Named(Type::Int) => match raw {
            Value::Int(_) => Ok(raw),
            _ => type_mismatch(ctx, path, field_asts, "Int"),
        },
        TypeRef::Named(Type::Float) => match raw {
            Value::Float(_) => Ok(raw),
            Value::Int(n) => Ok(Value::Float(n as f64)),
            _ => type_mismatch(ctx, path, field_asts, "Float"),
        },
        TypeRef::Named(Type::String) => match raw {
            Value::String(_) => Ok(raw),
            _ => type_mismatch(ctx, path, field_asts, "String"),
        },
        TypeRef::Named(Type::Id) => match raw {
            Value::String(_) => Ok(raw),
            Value::Int(n) => Ok(Value::String(n.to_string())),
            _ => type_mismatch(ctx, path, field_asts, "ID"),
        },
        TypeRef::Named(Type::InputObject(_)) => {
            ctx.push_error("Input object cannot appear in output position", path.to_vec(), first_span(field_asts));
            Err(())
        }
    }
}

fn type_mismatch<'a>(ctx: &ExecutionContext<'a>, path: &[PathSegment], field_asts: &[&'a ast::Field], expected: &str) -> Result<Value, ()> {
    ctx.push_error(format!("Expected a value coercible to `{expected}`"), path.to_vec(), first_span(field_asts));
    Err(())
}

fn first_span(field_asts: &[&ast::Field]) -> Option<crate::source::Span> {
    field_asts.first().map(|f| f.span)
}

/// Merges selection sets across every field AST sharing a response name,
/// then resolves and completes the merged field set against the resolved
/// object value, spec.md §4.6's Object-completion step.
fn complete_composite<'a>(
    object_type: Arc<ObjectType>,
    raw: Value,
    field_asts: &[&'a ast::Field],
    ctx: &ExecutionContext<'a>,
    path: &[PathSegment],
) -> Result<Value, ()> {
    let mut grouped = IndexMap::new();
    let mut visited = HashSet::new();
    for field in field_asts {
        if let Some(selection_set) = &field.selection_set {
            collect_fields(ctx, &object_type, selection_set, &mut visited, &mut grouped);
        }
    }
    execute_grouped_fields(ctx, &object_type, &raw, &grouped, false, false, path)
}

/// Resolves an abstract (Interface/Union) result to a concrete Object type
/// via `resolveType`, falling back to the first possible type whose
/// `isTypeOf` accepts the value, per spec.md §4.6.
type ResolveTypeFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

fn complete_abstract<'a>(
    possible_types: &[Arc<ObjectType>],
    resolve_type: Option<&ResolveTypeFn>,
    raw: Value,
    field_asts: &[&'a ast::Field],
    ctx: &ExecutionContext<'a>,
    path: &[PathSegment],
) -> Result<Value, ()> {
    let resolved_name = resolve_type
        .and_then(|f| f(&raw))
        .or_else(|| possible_types.iter().find(|o| o.is_type_of.as_ref().is_some_and(|f| f(&raw))).map(|o| o.name.clone()));

    let Some(resolved_name) = resolved_name else {
        ctx.push_error("Could not resolve a concrete type for an abstract value", path.to_vec(), first_span(field_asts));
        return Err(());
    };
    let Some(object_type) = possible_types.iter().find(|o| o.name == resolved_name).cloned() else {
        ctx.push_error(format!("`{resolved_name}` is not a possible type here"), path.to_vec(), first_span(field_asts));
        return Err(());
    };
    complete_composite(object_type, raw, field_asts, ctx, path)
}
