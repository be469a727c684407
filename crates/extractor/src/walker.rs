//! Depth-first walk over type expressions
//!
//! Reference nodes are the edges of the dependency graph between reflections.
//! The walker reports each of them in left-to-right order and leaves
//! deduplication to the caller.

use docsync_core::error::{Error, Result};
use docsync_core::reflection::{Reflection, ReflectionId, Signature, SomeType, TypeParameter};

/// Walk `ty` and call `on_reference` for every reference into the document
///
/// References without a document target (standard library or external
/// package symbols) are not reported, but their type arguments are walked.
/// Fails with [`Error::UnsupportedTypeKind`] on a type kind the model does not
/// know.
pub fn walk_type<F>(ty: &SomeType, on_reference: &mut F) -> Result<()>
where
    F: FnMut(ReflectionId),
{
    match ty {
        SomeType::Intrinsic(_) | SomeType::Literal(_) => Ok(()),
        SomeType::Reference(reference) => {
            if let Some(id) = reference.target_id() {
                on_reference(id);
            }
            walk_types(&reference.type_arguments, on_reference)
        }
        SomeType::Array(array) => walk_type(&array.element_type, on_reference),
        SomeType::Union(union) => walk_types(&union.types, on_reference),
        SomeType::Intersection(intersection) => walk_types(&intersection.types, on_reference),
        SomeType::Tuple(tuple) => walk_types(&tuple.elements, on_reference),
        SomeType::TypeOperator(operator) => walk_type(&operator.target, on_reference),
        SomeType::Conditional(conditional) => {
            walk_type(&conditional.check_type, on_reference)?;
            walk_type(&conditional.extends_type, on_reference)?;
            walk_type(&conditional.true_type, on_reference)?;
            walk_type(&conditional.false_type, on_reference)
        }
        SomeType::Mapped(mapped) => {
            walk_type(&mapped.parameter_type, on_reference)?;
            walk_type(&mapped.template_type, on_reference)
        }
        SomeType::IndexedAccess(access) => {
            walk_type(&access.object_type, on_reference)?;
            walk_type(&access.index_type, on_reference)
        }
        SomeType::Reflection(reflection) => walk_declaration(&reflection.declaration, on_reference),
        SomeType::Unsupported { kind, .. } => Err(Error::unsupported_type_kind(kind.clone())),
    }
}

fn walk_types<F>(types: &[SomeType], on_reference: &mut F) -> Result<()>
where
    F: FnMut(ReflectionId),
{
    for ty in types {
        walk_type(ty, on_reference)?;
    }
    Ok(())
}

/// Inline declaration: its signatures when it is a function type, otherwise
/// the members of the object literal
fn walk_declaration<F>(declaration: &Reflection, on_reference: &mut F) -> Result<()>
where
    F: FnMut(ReflectionId),
{
    if !declaration.signatures.is_empty() {
        return walk_signatures(&declaration.signatures, on_reference);
    }

    for child in &declaration.children {
        walk_type_parameters(&child.type_parameters, on_reference)?;
        if let Some(ty) = &child.type_ {
            walk_type(ty, on_reference)?;
        }
        walk_signatures(&child.signatures, on_reference)?;
    }
    Ok(())
}

/// Walk type parameters, parameter types and the return type of each signature
pub fn walk_signatures<F>(signatures: &[Signature], on_reference: &mut F) -> Result<()>
where
    F: FnMut(ReflectionId),
{
    for signature in signatures {
        walk_type_parameters(&signature.type_parameters, on_reference)?;
        for parameter in &signature.parameters {
            if let Some(ty) = &parameter.type_ {
                walk_type(ty, on_reference)?;
            }
        }
        if let Some(ty) = &signature.type_ {
            walk_type(ty, on_reference)?;
        }
    }
    Ok(())
}

/// Walk the constraint and default of each type parameter
pub fn walk_type_parameters<F>(parameters: &[TypeParameter], on_reference: &mut F) -> Result<()>
where
    F: FnMut(ReflectionId),
{
    for parameter in parameters {
        if let Some(constraint) = &parameter.type_ {
            walk_type(constraint, on_reference)?;
        }
        if let Some(default) = &parameter.default {
            walk_type(default, on_reference)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SomeType {
        serde_json::from_value(value).expect("valid type expression")
    }

    fn references(ty: &SomeType) -> Result<Vec<u64>> {
        let mut found = Vec::new();
        walk_type(ty, &mut |id: ReflectionId| found.push(id.0))?;
        Ok(found)
    }

    #[test]
    fn test_array_of_reference_reports_only_the_element() {
        let ty = parse(json!({
            "type": "reference",
            "name": "Array",
            "package": "typescript",
            "target": { "sourceFileName": "lib.es5.d.ts", "qualifiedName": "Array" },
            "typeArguments": [{ "type": "reference", "name": "Ref", "target": 12 }]
        }));

        assert_eq!(references(&ty).expect("walk succeeds"), vec![12]);
    }

    #[test]
    fn test_array_type_walks_element() {
        let ty = parse(json!({
            "type": "array",
            "elementType": { "type": "reference", "name": "Interval", "target": 3 }
        }));

        assert_eq!(references(&ty).expect("walk succeeds"), vec![3]);
    }

    #[test]
    fn test_depth_first_left_to_right_order() {
        let ty = parse(json!({
            "type": "union",
            "types": [
                { "type": "reference", "name": "A", "target": 1,
                  "typeArguments": [{ "type": "reference", "name": "B", "target": 2 }] },
                { "type": "intersection", "types": [
                    { "type": "reference", "name": "C", "target": 3 },
                    { "type": "tuple", "elements": [
                        { "type": "reference", "name": "D", "target": 4 },
                        { "type": "intrinsic", "name": "number" }
                    ]}
                ]},
                { "type": "typeOperator", "operator": "keyof",
                  "target": { "type": "reference", "name": "E", "target": 5 } },
                { "type": "conditional",
                  "checkType": { "type": "reference", "name": "F", "target": 6 },
                  "extendsType": { "type": "literal", "value": "x" },
                  "trueType": { "type": "reference", "name": "G", "target": 7 },
                  "falseType": { "type": "reference", "name": "H", "target": 8 } },
                { "type": "mapped", "parameter": "K",
                  "parameterType": { "type": "reference", "name": "I", "target": 9 },
                  "templateType": { "type": "reference", "name": "J", "target": 10 } },
                { "type": "indexedAccess",
                  "objectType": { "type": "reference", "name": "K", "target": 11 },
                  "indexType": { "type": "reference", "name": "L", "target": 12 } }
            ]
        }));

        assert_eq!(
            references(&ty).expect("walk succeeds"),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
        );
    }

    #[test]
    fn test_does_not_deduplicate() {
        let ty = parse(json!({
            "type": "union",
            "types": [
                { "type": "reference", "name": "Date", "target": 7 },
                { "type": "reference", "name": "Date", "target": 7 }
            ]
        }));

        assert_eq!(references(&ty).expect("walk succeeds"), vec![7, 7]);
    }

    #[test]
    fn test_function_type_declaration() {
        let ty = parse(json!({
            "type": "reflection",
            "declaration": {
                "id": 100,
                "name": "__type",
                "kind": 65536,
                "signatures": [{
                    "id": 101,
                    "name": "__type",
                    "kind": 4096,
                    "typeParameters": [{
                        "id": 102,
                        "name": "T",
                        "kind": 131072,
                        "type": { "type": "reference", "name": "Constraint", "target": 1 },
                        "default": { "type": "reference", "name": "Fallback", "target": 2 }
                    }],
                    "parameters": [{
                        "id": 103,
                        "name": "value",
                        "kind": 32768,
                        "type": { "type": "reference", "name": "Value", "target": 3 }
                    }],
                    "type": { "type": "reference", "name": "Output", "target": 4 }
                }]
            }
        }));

        assert_eq!(references(&ty).expect("walk succeeds"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_object_literal_declaration() {
        let ty = parse(json!({
            "type": "reflection",
            "declaration": {
                "id": 200,
                "name": "__type",
                "kind": 65536,
                "children": [
                    { "id": 201, "name": "locale", "kind": 1024,
                      "type": { "type": "reference", "name": "Locale", "target": 5 } },
                    { "id": 202, "name": "weekStartsOn", "kind": 1024,
                      "type": { "type": "union", "types": [
                          { "type": "literal", "value": 0 },
                          { "type": "reference", "name": "Day", "target": 6 }
                      ]}},
                    { "id": 203, "name": "format", "kind": 2048,
                      "signatures": [{ "id": 204, "name": "format", "kind": 4096,
                        "type": { "type": "reference", "name": "FormatResult", "target": 7 } }] }
                ]
            }
        }));

        assert_eq!(references(&ty).expect("walk succeeds"), vec![5, 6, 7]);
    }

    #[test]
    fn test_unsupported_kind_is_fatal() {
        let ty = parse(json!({
            "type": "union",
            "types": [
                { "type": "reference", "name": "A", "target": 1 },
                { "type": "predicate", "name": "value", "asserts": false }
            ]
        }));

        let err = references(&ty).expect_err("predicate is not supported");
        assert!(matches!(
            err,
            Error::UnsupportedTypeKind { ref kind } if kind == "predicate"
        ));
    }

    #[test]
    fn test_legacy_reference_id() {
        let ty = parse(json!({ "type": "reference", "name": "Locale", "id": 33 }));
        assert_eq!(references(&ty).expect("walk succeeds"), vec![33]);
    }

    #[test]
    fn test_leaves_report_nothing() {
        for ty in [
            parse(json!({ "type": "intrinsic", "name": "string" })),
            parse(json!({ "type": "literal", "value": 42 })),
            parse(json!({ "type": "reference", "name": "T", "refersToTypeParameter": true })),
        ] {
            assert_eq!(references(&ty).expect("walk succeeds"), Vec::<u64>::new());
        }
    }
}
