//! Canonical AST-to-text printing (spec.md §4.5), reimplemented as a
//! recursive `fmt::Display`-driven printer rather than the original
//! source's mutable wrap-stack visitor (`internal/language/printer.go`):
//! idiomatic Rust expresses "emit this section only if non-empty" through
//! ordinary conditionals instead of a stack of pending open/close strings.

use crate::ast;
use std::fmt;
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Prints a whole document: definitions joined by a blank line, with a
/// trailing newline.
pub fn print_document(document: &ast::Document) -> String {
    let mut out = String::new();
    for (i, definition) in document.definitions.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        write_definition(&mut out, definition, 0);
    }
    out.push('\n');
    out
}

/// Prints a single value AST node (the printer's second entry point,
/// mirroring `parseValue`'s standalone counterpart).
pub fn print_value(value: &ast::Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_definition(out: &mut String, definition: &ast::Definition, indent: usize) {
    match definition {
        ast::Definition::Operation(op) => write_operation(out, op, indent),
        ast::Definition::Fragment(frag) => write_fragment(out, frag, indent),
    }
}

fn write_operation(out: &mut String, op: &ast::OperationDefinition, indent: usize) {
    if op.name.is_none() {
        write_selection_set(out, &op.selection_set, indent);
        return;
    }

    let _ = write!(out, "{} {}", op.operation_type, op.name.as_ref().unwrap().value);

    if !op.variable_definitions.is_empty() {
        out.push('(');
        for (i, def) in op.variable_definitions.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_variable_definition(out, def);
        }
        out.push(')');
    }

    write_directives(out, &op.directives);
    out.push(' ');
    write_selection_set(out, &op.selection_set, indent);
}

fn write_variable_definition(out: &mut String, def: &ast::VariableDefinition) {
    let _ = write!(out, "${}: {}", def.name.value, def.var_type);
    if let Some(default) = &def.default_value {
        out.push_str(" = ");
        write_value(out, &default.value);
    }
}

fn write_fragment(out: &mut String, fragment: &ast::FragmentDefinition, indent: usize) {
    let _ = write!(out, "fragment {} on {}", fragment.name.value, fragment.type_condition.value);
    write_directives(out, &fragment.directives);
    out.push(' ');
    write_selection_set(out, &fragment.selection_set, indent);
}

fn write_selection_set(out: &mut String, selection_set: &ast::SelectionSet, indent: usize) {
    out.push('{');
    let inner_indent = indent + 1;
    for selection in &selection_set.selections {
        out.push('\n');
        out.push_str(&INDENT.repeat(inner_indent));
        write_selection(out, selection, inner_indent);
    }
    out.push('\n');
    out.push_str(&INDENT.repeat(indent));
    out.push('}');
}

fn write_selection(out: &mut String, selection: &ast::Selection, indent: usize) {
    match selection {
        ast::Selection::Field(field) => write_field(out, field, indent),
        ast::Selection::FragmentSpread(spread) => {
            let _ = write!(out, "...{}", spread.name.value);
            write_directives(out, &spread.directives);
        }
        ast::Selection::InlineFragment(inline) => {
            out.push_str("...");
            if let Some(condition) = &inline.type_condition {
                let _ = write!(out, " on {}", condition.value);
            }
            write_directives(out, &inline.directives);
            out.push(' ');
            write_selection_set(out, &inline.selection_set, indent);
        }
    }
}

fn write_field(out: &mut String, field: &ast::Field, indent: usize) {
    if let Some(alias) = &field.alias {
        let _ = write!(out, "{}: ", alias.value);
    }
    out.push_str(&field.name.value);

    if !field.arguments.is_empty() {
        out.push('(');
        for (i, argument) in field.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_argument(out, argument);
        }
        out.push(')');
    }

    write_directives(out, &field.directives);

    if let Some(selection_set) = &field.selection_set {
        out.push(' ');
        write_selection_set(out, selection_set, indent);
    }
}

fn write_argument(out: &mut String, argument: &ast::Argument) {
    let _ = write!(out, "{}: ", argument.name.value);
    write_value(out, &argument.value.value);
}

fn write_directives(out: &mut String, directives: &[ast::Directive]) {
    for directive in directives {
        let _ = write!(out, " @{}", directive.name.value);
        if !directive.arguments.is_empty() {
            out.push('(');
            for (i, argument) in directive.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_argument(out, argument);
            }
            out.push(')');
        }
    }
}

fn write_value(out: &mut String, value: &ast::Value) {
    match value {
        ast::Value::Variable(name) => {
            let _ = write!(out, "${name}");
        }
        ast::Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        ast::Value::Float(n) => out.push_str(&format_float(*n)),
        ast::Value::String(s) => write_json_string(out, s),
        ast::Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        ast::Value::Null => out.push_str("null"),
        ast::Value::Enum(name) => out.push_str(name),
        ast::Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, &item.value);
            }
            out.push(']');
        }
        ast::Value::Object(fields) => {
            out.push('{');
            for (i, (name, field_value)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{name}: ");
                write_value(out, &field_value.value);
            }
            out.push('}');
        }
    }
}

/// Formats a coerced float back into a lexeme that reparses as `Float`
/// rather than `Int` (the GraphQL grammar requires a fractional part or an
/// exponent), since `ast::Value::Float` stores the parsed `f64`, not the
/// original lexeme.
fn format_float(n: f64) -> String {
    let text = n.to_string();
    if text.contains('.') || text.contains('e') || text.contains('E') { text } else { format!("{text}.0") }
}

fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for ast::Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", print_document(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::source::Source;

    fn parse(text: &str) -> ast::Document {
        let source = Source::anonymous(text.to_string());
        Parser::parse_document(&source).unwrap()
    }

    #[test]
    fn prints_a_named_query_with_indentation() {
        let doc = parse("query Foo($id: ID!) { user(id: $id) { name friends { name } } }");
        let printed = print_document(&doc);
        assert_eq!(
            printed,
            "query Foo($id: ID!) {\n    user(id: $id) {\n        name\n        friends {\n            name\n        }\n    }\n}\n"
        );
    }

    #[test]
    fn prints_an_anonymous_query_without_a_header() {
        let doc = parse("{ a b }");
        let printed = print_document(&doc);
        assert_eq!(printed, "{\n    a\n    b\n}\n");
    }

    #[test]
    fn prints_an_alias_and_directive() {
        let doc = parse("{ x: a @include(if: true) }");
        let printed = print_document(&doc);
        assert_eq!(printed, "{\n    x: a @include(if: true)\n}\n");
    }

    #[test]
    fn float_literals_always_reprint_with_a_fractional_part() {
        let value = ast::Value::Float(4.0);
        assert_eq!(print_value(&value), "4.0");

        let value = ast::Value::Float(4.5);
        assert_eq!(print_value(&value), "4.5");
    }

    #[test]
    fn strings_are_json_escaped() {
        let value = ast::Value::String("a\n\"b\"".to_string());
        assert_eq!(print_value(&value), "\"a\\n\\\"b\\\"\"");
    }

    #[test]
    fn round_trips_through_parse_and_print() {
        let original = "mutation Create {\n    create(input: {name: \"a\", tags: [1, 2]}) {\n        id\n    }\n}\n";
        let doc = parse(original);
        assert_eq!(print_document(&doc), original);
    }
}
