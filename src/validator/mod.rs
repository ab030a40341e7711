//! A small, deliberately incomplete validator: only the rules the executor's
//! own correctness already depends on. Full GraphQL validation (type-aware
//! rules, variable usage analysis, ...) is out of scope -- see `SPEC_FULL.md`.

mod error;

pub use error::ValidationError;

use crate::ast;
use std::collections::HashMap;
use std::collections::HashSet;

pub fn validate(document: &ast::Document) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_operation_names(document, &mut errors);
    check_fragment_names(document, &mut errors);
    check_known_fragments(document, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn operations(document: &ast::Document) -> impl Iterator<Item = &ast::OperationDefinition> {
    document.definitions.iter().filter_map(|d| match d {
        ast::Definition::Operation(op) => Some(op),
        ast::Definition::Fragment(_) => None,
    })
}

fn fragments(document: &ast::Document) -> impl Iterator<Item = &ast::FragmentDefinition> {
    document.definitions.iter().filter_map(|d| match d {
        ast::Definition::Fragment(f) => Some(f),
        ast::Definition::Operation(_) => None,
    })
}

fn check_operation_names(document: &ast::Document, errors: &mut Vec<ValidationError>) {
    let ops: Vec<&ast::OperationDefinition> = operations(document).collect();

    if ops.len() > 1 && ops.iter().any(|op| op.name.is_none()) {
        errors.push(ValidationError::LoneAnonymousOperationViolation);
    }

    let mut seen = HashSet::new();
    for op in &ops {
        if let Some(name) = &op.name
            && !seen.insert(name.value.clone())
        {
            errors.push(ValidationError::DuplicateOperationName(name.value.clone()));
        }
    }
}

fn check_fragment_names(document: &ast::Document, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for fragment in fragments(document) {
        if !seen.insert(fragment.name.value.clone()) {
            errors.push(ValidationError::DuplicateFragmentName(fragment.name.value.clone()));
        }
    }
}

fn check_known_fragments(document: &ast::Document, errors: &mut Vec<ValidationError>) {
    let defined: HashMap<&str, &ast::FragmentDefinition> =
        fragments(document).map(|f| (f.name.value.as_str(), f)).collect();
    let mut reported = HashSet::new();

    let mut check_selection_set = |selection_set: &ast::SelectionSet, errors: &mut Vec<ValidationError>| {
        fn walk<'a>(
            selection_set: &'a ast::SelectionSet,
            defined: &HashMap<&str, &'a ast::FragmentDefinition>,
            reported: &mut HashSet<String>,
            errors: &mut Vec<ValidationError>,
        ) {
            for selection in &selection_set.selections {
                match selection {
                    ast::Selection::Field(field) => {
                        if let Some(nested) = &field.selection_set {
                            walk(nested, defined, reported, errors);
                        }
                    }
                    ast::Selection::InlineFragment(inline) => {
                        walk(&inline.selection_set, defined, reported, errors);
                    }
                    ast::Selection::FragmentSpread(spread) => {
                        if !defined.contains_key(spread.name.value.as_str()) {
                            if reported.insert(spread.name.value.clone()) {
                                errors.push(ValidationError::UnknownFragment(spread.name.value.clone()));
                            }
                        }
                    }
                }
            }
        }
        walk(selection_set, &defined, &mut reported, errors);
    };

    for op in operations(document) {
        check_selection_set(&op.selection_set, errors);
    }
    for fragment in fragments(document) {
        check_selection_set(&fragment.selection_set, errors);
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
    fn accepts_well_formed_document() {
        let doc = parse("query Foo { field } fragment F on Bar { field }");
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn rejects_duplicate_operation_names() {
        let doc = parse("query Foo { a } query Foo { b }");
        let errs = validate(&doc).unwrap_err();
        assert!(errs.contains(&ValidationError::DuplicateOperationName("Foo".to_string())));
    }

    #[test]
    fn rejects_anonymous_operation_alongside_named_one() {
        let doc = parse("{ a } query Foo { b }");
        let errs = validate(&doc).unwrap_err();
        assert!(errs.contains(&ValidationError::LoneAnonymousOperationViolation));
    }

    #[test]
    fn rejects_unknown_fragment_spread() {
        let doc = parse("{ ...Missing }");
        let errs = validate(&doc).unwrap_err();
        assert!(errs.contains(&ValidationError::UnknownFragment("Missing".to_string())));
    }

    #[test]
    fn rejects_duplicate_fragment_names() {
        let doc = parse("{ ...F } fragment F on Bar { a } fragment F on Bar { b }");
        let errs = validate(&doc).unwrap_err();
        assert!(errs.contains(&ValidationError::DuplicateFragmentName("F".to_string())));
    }
}
