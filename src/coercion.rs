//! AST-literal and variable coercion: `typeFromAST`, `valueFromAST`,
//! `getArgumentValues`, `getVariableValues`, restored from the
//! commented-out (never-shipped) bodies in the original reference
//! implementation rather than guessed at.

use crate::ast;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::Type;
use crate::types::TypeRef;
use crate::value::Value;
use indexmap::IndexMap;

#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum CoercionError {
    #[error("Unknown type `{0}`")]
    UnknownType(String),

    #[error("Variable `${0}` is required but was not provided")]
    VariableRequired(String),

    #[error("Variable `${name}` of type `{expected}` could not be coerced: {reason}")]
    VariableCoercion { name: String, expected: String, reason: String },

    #[error("Argument `{name}` of type `{expected}` could not be coerced: {reason}")]
    ArgumentCoercion { name: String, expected: String, reason: String },

    #[error("Argument `{0}` is required but was not provided")]
    ArgumentRequired(String),
}

/// Resolves a parsed type reference (`[Int!]!`) against a schema's named
/// types, the `typeFromAST` utility.
pub fn type_from_ast(schema: &Schema, type_ref: &ast::TypeRef) -> Option<TypeRef> {
    match type_ref {
        ast::TypeRef::Named { name, .. } => {
            let type_ = builtin_or_named(schema, name)?;
            Some(TypeRef::Named(type_))
        }
        ast::TypeRef::List { of, .. } => Some(TypeRef::List(Box::new(type_from_ast(schema, of)?))),
        ast::TypeRef::NonNull { of, .. } => Some(TypeRef::NonNull(Box::new(type_from_ast(schema, of)?))),
    }
}

fn builtin_or_named(schema: &Schema, name: &str) -> Option<Type> {
    match name {
        "Boolean" => Some(Type::Boolean),
        "Float" => Some(Type::Float),
        "ID" => Some(Type::Id),
        "Int" => Some(Type::Int),
        "String" => Some(Type::String),
        other => schema.get_type(other).cloned(),
    }
}

/// Converts an AST literal (with variables already resolved into `Value`s)
/// into a runtime `Value`, coercing it to `expected_type` along the way --
/// `valueFromAST`. `variables` holds the already-coerced variable values for
/// the current request.
pub fn value_from_ast(
    ast_value: &ast::SpannedValue,
    expected_type: &TypeRef,
    variables: &IndexMap<String, Value>,
) -> Result<Value, String> {
    if let ast::Value::Variable(name) = &ast_value.value {
        return match variables.get(name) {
            Some(value) => Ok(value.clone()),
            None => Ok(Value::Null),
        };
    }

    if let ast::Value::Null = &ast_value.value {
        if let TypeRef::NonNull(_) = expected_type {
            return Err(format!("`null` provided for non-null type `{expected_type}`"));
        }
        return Ok(Value::Null);
    }

    if let TypeRef::NonNull(inner) = expected_type {
        return value_from_ast(ast_value, inner, variables);
    }

    match expected_type {
        TypeRef::List(of) => match &ast_value.value {
            ast::Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(value_from_ast(item, of, variables)?);
                }
                Ok(Value::List(out))
            }
            // A bare value coerces to a single-element list (spec §4.3).
            _ => Ok(Value::List(vec![value_from_ast(ast_value, of, variables)?])),
        },
        TypeRef::Named(Type::InputObject(input_object)) => match &ast_value.value {
            ast::Value::Object(fields) => {
                let mut out = IndexMap::new();
                for (field_name, field_def) in &input_object.fields {
                    let value = match fields.get(field_name) {
                        Some(v) => value_from_ast(v, field_def.type_ref(), variables)?,
                        None => match &field_def.default_value {
                            Some(default) => default.clone(),
                            None if !field_def.type_ref().is_nullable() => {
                                return Err(format!("Missing required field `{field_name}`"));
                            }
                            None => Value::Null,
                        },
                    };
                    out.insert(field_name.clone(), value);
                }
                Ok(Value::Object(out))
            }
            _ => Err(format!("Expected an input object literal for `{}`", input_object.name)),
        },
        TypeRef::Named(Type::Enum(enum_type)) => match &ast_value.value {
            ast::Value::Enum(name) if enum_type.values.contains_key(name) => Ok(Value::Enum(name.clone())),
            ast::Value::Enum(name) => Err(format!("`{name}` is not a value of enum `{}`", enum_type.name)),
            _ => Err(format!("Expected an enum literal for `{}`", enum_type.name)),
        },
        TypeRef::Named(Type::Scalar(scalar)) => (scalar.parse_literal)(&ast_value.value),
        TypeRef::Named(Type::Boolean) => match &ast_value.value {
            ast::Value::Boolean(b) => Ok(Value::Boolean(*b)),
            _ => Err("Expected a Boolean literal".to_string()),
        },
        TypeRef::Named(Type::Int) => match &ast_value.value {
            ast::Value::Int(n) => Ok(Value::Int(*n)),
            _ => Err("Expected an Int literal".to_string()),
        },
        TypeRef::Named(Type::Float) => match &ast_value.value {
            ast::Value::Float(n) => Ok(Value::Float(*n)),
            ast::Value::Int(n) => Ok(Value::Float(*n as f64)),
            _ => Err("Expected a Float literal".to_string()),
        },
        TypeRef::Named(Type::String) | TypeRef::Named(Type::Id) => match &ast_value.value {
            ast::Value::String(s) => Ok(Value::String(s.clone())),
            ast::Value::Int(n) if matches!(expected_type, TypeRef::Named(Type::Id)) => Ok(Value::String(n.to_string())),
            _ => Err("Expected a String literal".to_string()),
        },
        TypeRef::Named(Type::Object(_)) | TypeRef::Named(Type::Interface(_)) | TypeRef::Named(Type::Union(_)) => {
            Err("Output types cannot appear in input position".to_string())
        }
        TypeRef::NonNull(_) => unreachable!("stripped above"),
    }
}

/// `getVariableValues`: coerces the raw, client-provided variable JSON
/// against each operation variable's declared type, applying default values
/// and rejecting missing required variables.
///
/// The original reference implementation's `getVariableValue` always
/// returned `nil`; this restores the commented-out intended behavior.
pub fn get_variable_values(
    schema: &Schema,
    variable_definitions: &[ast::VariableDefinition],
    provided: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, CoercionError> {
    let mut out = IndexMap::new();
    for def in variable_definitions {
        let expected_type = type_from_ast(schema, &def.var_type)
            .ok_or_else(|| CoercionError::UnknownType(def.var_type.to_string()))?;

        let raw = provided.get(&def.name.value);
        let value = match raw {
            Some(value) => coerce_variable_value(value, &expected_type).map_err(|reason| {
                CoercionError::VariableCoercion { name: def.name.value.clone(), expected: expected_type.to_string(), reason }
            })?,
            None => match &def.default_value {
                Some(default) => value_from_ast(default, &expected_type, &IndexMap::new()).map_err(|reason| {
                    CoercionError::VariableCoercion { name: def.name.value.clone(), expected: expected_type.to_string(), reason }
                })?,
                None if !expected_type.is_nullable() => {
                    return Err(CoercionError::VariableRequired(def.name.value.clone()));
                }
                None => Value::Null,
            },
        };
        out.insert(def.name.value.clone(), value);
    }
    Ok(out)
}

fn coerce_variable_value(value: &Value, expected_type: &TypeRef) -> Result<Value, String> {
    if value.is_null() {
        if let TypeRef::NonNull(_) = expected_type {
            return Err(format!("`null` provided for non-null type `{expected_type}`"));
        }
        return Ok(Value::Null);
    }
    if let TypeRef::NonNull(inner) = expected_type {
        return coerce_variable_value(value, inner);
    }
    match expected_type {
        TypeRef::List(of) => match value {
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(coerce_variable_value(item, of)?);
                }
                Ok(Value::List(out))
            }
            other => Ok(Value::List(vec![coerce_variable_value(other, of)?])),
        },
        TypeRef::Named(Type::InputObject(input_object)) => match value {
            Value::Object(fields) => {
                let mut out = IndexMap::new();
                for (field_name, field_def) in &input_object.fields {
                    let coerced = match fields.get(field_name) {
                        Some(v) => coerce_variable_value(v, field_def.type_ref())?,
                        None => match &field_def.default_value {
                            Some(default) => default.clone(),
                            None if !field_def.type_ref().is_nullable() => {
                                return Err(format!("Missing required field `{field_name}`"));
                            }
                            None => Value::Null,
                        },
                    };
                    out.insert(field_name.clone(), coerced);
                }
                Ok(Value::Object(out))
            }
            _ => Err(format!("Expected an object for `{}`", input_object.name)),
        },
        TypeRef::Named(Type::Enum(enum_type)) => match value.as_str() {
            Some(name) if enum_type.values.contains_key(name) => Ok(Value::Enum(name.to_string())),
            Some(name) => Err(format!("`{name}` is not a value of enum `{}`", enum_type.name)),
            None => Err(format!("Expected a string enum value for `{}`", enum_type.name)),
        },
        TypeRef::Named(Type::Scalar(scalar)) => (scalar.parse_value)(value),
        TypeRef::Named(Type::Boolean) => value.as_bool().map(Value::Boolean).ok_or_else(|| "Expected a Boolean".to_string()),
        TypeRef::Named(Type::Int) => value.as_i64().map(Value::Int).ok_or_else(|| "Expected an Int".to_string()),
        TypeRef::Named(Type::Float) => match value {
            Value::Float(f) => Ok(Value::Float(*f)),
            Value::Int(n) => Ok(Value::Float(*n as f64)),
            _ => Err("Expected a Float".to_string()),
        },
        TypeRef::Named(Type::String) | TypeRef::Named(Type::Id) => {
            value.as_str().map(|s| Value::String(s.to_string())).ok_or_else(|| "Expected a String".to_string())
        }
        TypeRef::Named(Type::Object(_)) | TypeRef::Named(Type::Interface(_)) | TypeRef::Named(Type::Union(_)) => {
            Err("Output types cannot appear in input position".to_string())
        }
        TypeRef::NonNull(_) => unreachable!("stripped above"),
    }
}

/// `getArgumentValues`: coerces a field or directive's AST arguments into
/// runtime values, falling back to each argument's default only when the
/// coerced value is entirely absent (not merely `null`).
pub fn get_argument_values(
    argument_defs: &IndexMap<String, Argument>,
    provided: &[ast::Argument],
    variables: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, CoercionError> {
    let mut out = IndexMap::new();
    for (name, def) in argument_defs {
        let found = provided.iter().find(|a| &a.name.value == name);
        let value = match found {
            Some(arg) => value_from_ast(&arg.value, def.type_ref(), variables).map_err(|reason| {
                CoercionError::ArgumentCoercion { name: name.clone(), expected: def.type_ref().to_string(), reason }
            })?,
            None => match &def.default_value {
                Some(default) => default.clone(),
                None if !def.type_ref().is_nullable() => {
                    return Err(CoercionError::ArgumentRequired(name.clone()));
                }
                None => Value::Null,
            },
        };
        out.insert(name.clone(), value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;
    use crate::types::ObjectType;
    use crate::types::TypeRefInit;
    use std::sync::Arc;

    fn int_source() -> ast::SpannedValue {
        ast::SpannedValue { value: ast::Value::Int(3), span: crate::source::Span::new(0, 1) }
    }

    #[test]
    fn coerces_scalar_literal() {
        let vars = IndexMap::new();
        let value = value_from_ast(&int_source(), &TypeRef::Named(Type::Int), &vars).unwrap();
        assert_eq!(value, Value::Int(3));
    }

    #[test]
    fn single_value_coerces_into_list() {
        let vars = IndexMap::new();
        let value = value_from_ast(&int_source(), &TypeRef::List(Box::new(TypeRef::Named(Type::Int))), &vars).unwrap();
        assert_eq!(value, Value::List(vec![Value::Int(3)]));
    }

    #[test]
    fn null_rejected_for_non_null() {
        let vars = IndexMap::new();
        let null = ast::SpannedValue { value: ast::Value::Null, span: crate::source::Span::new(0, 1) };
        let err = value_from_ast(&null, &TypeRef::NonNull(Box::new(TypeRef::Named(Type::Int))), &vars).unwrap_err();
        assert!(err.contains("non-null"));
    }

    #[test]
    fn missing_argument_falls_back_to_default() {
        let mut defs = IndexMap::new();
        defs.insert(
            "x".to_string(),
            Argument::new("x", TypeRefInit::eager(TypeRef::Named(Type::Int)), Some(Value::Int(42))),
        );
        let values = get_argument_values(&defs, &[], &IndexMap::new()).unwrap();
        assert_eq!(values.get("x"), Some(&Value::Int(42)));
    }

    #[test]
    fn required_argument_missing_is_an_error() {
        let mut defs = IndexMap::new();
        defs.insert(
            "x".to_string(),
            Argument::new("x", TypeRefInit::eager(TypeRef::NonNull(Box::new(TypeRef::Named(Type::Int)))), None),
        );
        let err = get_argument_values(&defs, &[], &IndexMap::new()).unwrap_err();
        assert_eq!(err, CoercionError::ArgumentRequired("x".to_string()));
    }

    #[test]
    fn required_variable_missing_is_an_error() {
        let query = Arc::new(ObjectType::new("Query", [Field::new("f", TypeRefInit::eager(TypeRef::Named(Type::Int)))]));
        let schema = Schema::builder(query).build().unwrap();
        let defs = vec![ast::VariableDefinition {
            name: ast::Name { value: "x".to_string(), span: crate::source::Span::new(0, 1) },
            var_type: ast::TypeRef::NonNull {
                of: Box::new(ast::TypeRef::Named { name: "Int".to_string(), span: crate::source::Span::new(0, 1) }),
                span: crate::source::Span::new(0, 1),
            },
            default_value: None,
        }];
        let err = get_variable_values(&schema, &defs, &IndexMap::new()).unwrap_err();
        assert_eq!(err, CoercionError::VariableRequired("x".to_string()));
    }
}
