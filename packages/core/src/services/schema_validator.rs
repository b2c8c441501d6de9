//! Built-in Structural Validator
//!
//! Synchronous type-conformance check of a committed document against the
//! governing model. This is the one validator every coordinated pass runs;
//! richer rule checking (formats, ranges, cross-field constraints) belongs
//! to validator plugins.
//!
//! Checking is permissive where the schema is silent: regions with no
//! schema, unknown `type` strings, and `null` values (an unset form field)
//! all pass. References resolve through the schema resolver before
//! inspection; an unresolvable reference degrades to "no schema known" and
//! the region passes.

use crate::models::{SchemaNode, SchemaShape, ValidationIssue, ValidationOutcome};
use crate::services::schema_resolver::SchemaResolver;
use serde_json::Value;

/// Validate `document` against `model`, collecting one issue per type
/// mismatch. Mismatched regions are not descended further.
pub fn validate_structure(
    document: &Value,
    model: &SchemaNode,
    resolver: &SchemaResolver<'_>,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::valid();
    let mut path = Vec::new();
    check_node(document, model, resolver, &mut path, &mut outcome);
    outcome
}

fn check_node(
    value: &Value,
    node: &SchemaNode,
    resolver: &SchemaResolver<'_>,
    path: &mut Vec<String>,
    outcome: &mut ValidationOutcome,
) {
    if let SchemaShape::Reference(pointer) = node.shape() {
        let resolved = resolver.resolve_reference(pointer);
        return check_node(value, &resolved, resolver, path, outcome);
    }

    // Null means the field is unset, not mistyped.
    if value.is_null() {
        return;
    }

    if let Some(expected) = &node.kind {
        if !kind_matches(expected, value) {
            outcome.push(ValidationIssue::new(
                path.clone(),
                format!("expected {expected}, found {}", kind_of(value)),
            ));
            return;
        }
    }

    match node.shape() {
        SchemaShape::Object(properties) => {
            if let Value::Object(map) = value {
                for (name, child) in properties {
                    if let Some(child_value) = map.get(name) {
                        path.push(name.clone());
                        check_node(child_value, child, resolver, path, outcome);
                        path.pop();
                    }
                }
            }
        }
        SchemaShape::Array(items) => {
            if let Value::Array(elements) = value {
                for (index, element) in elements.iter().enumerate() {
                    path.push(index.to_string());
                    check_node(element, items, resolver, path, outcome);
                    path.pop();
                }
            }
        }
        _ => {}
    }
}

fn kind_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        // Unknown type strings are not this validator's business.
        _ => true,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
