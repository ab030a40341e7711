//! `collectFields`: flattens fragment spreads and inline fragments into a
//! single response-name-keyed field group, honoring `@skip`/`@include` and
//! fragment type-condition matching (spec.md §4.6), both of which the
//! original source hard-codes to `true` in commented-out scaffolding.

use crate::ast;
use crate::executor::context::ExecutionContext;
use crate::types::ObjectType;
use crate::types::Type;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

pub fn collect_fields<'a>(
    ctx: &ExecutionContext<'a>,
    runtime_type: &Arc<ObjectType>,
    selection_set: &'a ast::SelectionSet,
    visited_fragments: &mut HashSet<&'a str>,
    acc: &mut IndexMap<String, Vec<&'a ast::Field>>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if !should_include(ctx, &field.directives) {
                    continue;
                }
                acc.entry(field.response_key().to_string()).or_default().push(field);
            }
            ast::Selection::InlineFragment(inline) => {
                if !should_include(ctx, &inline.directives) {
                    continue;
                }
                let matches = match &inline.type_condition {
                    Some(condition) => fragment_condition_matches(ctx, runtime_type, &condition.value),
                    None => true,
                };
                if matches {
                    collect_fields(ctx, runtime_type, &inline.selection_set, visited_fragments, acc);
                }
            }
            ast::Selection::FragmentSpread(spread) => {
                if !should_include(ctx, &spread.directives) {
                    continue;
                }
                let name = spread.name.value.as_str();
                if visited_fragments.contains(name) {
                    continue;
                }
                let Some(fragment) = ctx.fragments.get(name).copied() else {
                    continue;
                };
                if !should_include(ctx, &fragment.directives) {
                    continue;
                }
                if !fragment_condition_matches(ctx, runtime_type, &fragment.type_condition.value) {
                    continue;
                }
                visited_fragments.insert(name);
                collect_fields(ctx, runtime_type, &fragment.selection_set, visited_fragments, acc);
            }
        }
    }
}

fn should_include(ctx: &ExecutionContext, directives: &[ast::Directive]) -> bool {
    let skip = find_directive(directives, "skip").map(|d| directive_if_value(ctx, d)).unwrap_or(false);
    let include = find_directive(directives, "include").map(|d| directive_if_value(ctx, d)).unwrap_or(true);
    !skip && include
}

fn find_directive<'d>(directives: &'d [ast::Directive], name: &str) -> Option<&'d ast::Directive> {
    directives.iter().find(|d| d.name.value == name)
}

fn directive_if_value(ctx: &ExecutionContext, directive: &ast::Directive) -> bool {
    let Some(argument) = directive.arguments.iter().find(|a| a.name.value == "if") else {
        return false;
    };
    match &argument.value.value {
        ast::Value::Boolean(b) => *b,
        ast::Value::Variable(name) => ctx.variables.get(name).and_then(|v| v.as_bool()).unwrap_or(false),
        _ => false,
    }
}

/// `doesFragmentConditionMatch`: a named type condition matches the runtime
/// object type directly, or, for abstract conditions, iff the runtime type
/// is a member of that interface/union's possible-types set.
fn fragment_condition_matches(ctx: &ExecutionContext, runtime_type: &Arc<ObjectType>, type_condition: &str) -> bool {
    match ctx.schema.get_type(type_condition) {
        Some(Type::Object(object)) => object.name == runtime_type.name,
        Some(Type::Interface(interface)) => runtime_type.implements(&interface.name),
        Some(Type::Union(union)) => union.contains(&runtime_type.name),
        _ => false,
    }
}
