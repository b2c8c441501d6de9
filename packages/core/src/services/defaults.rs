//! Default Synthesizer
//!
//! Given a (possibly partial) value, a field path, and the root model, this
//! module computes the default value that applies at that path:
//!
//! - object-typed nodes recursively merge their properties' defaults,
//!   with an explicit node-level default winning per key over synthesized
//!   child defaults (first-writer-wins)
//! - for any other node, a present value always beats a schema default
//!
//! "Absent" (`None`) and "empty" (null / zero-entry container) are different
//! predicates: this module only distinguishes absent from present; emptiness
//! belongs to the merge policy layer.

use crate::models::{FieldPath, SchemaNode, SchemaShape};
use crate::services::schema_resolver::SchemaResolver;
use serde_json::{Map, Value};

/// Recursion ceiling for default synthesis.
///
/// Self-referential definitions (e.g. a person whose `friend` is another
/// person) describe infinitely deep documents; synthesis stops contributing
/// defaults past this depth instead of recursing without bound.
const MAX_DEFAULTS_DEPTH: usize = 64;

/// Compute the default value applying at `path` under `model`.
///
/// Returns `None` when the schema declares no default for the location (and,
/// for object nodes, none of the children contribute one). A present leaf
/// `value` is returned unchanged - an existing value always beats a schema
/// default.
pub fn compute_defaults(
    value: Option<&Value>,
    path: &FieldPath,
    model: &SchemaNode,
    resolver: &SchemaResolver<'_>,
) -> Option<Value> {
    compute_at(value, path, model, resolver, 0)
}

fn compute_at(
    value: Option<&Value>,
    path: &FieldPath,
    model: &SchemaNode,
    resolver: &SchemaResolver<'_>,
    depth: usize,
) -> Option<Value> {
    if depth > MAX_DEFAULTS_DEPTH {
        return None;
    }

    let node = resolver.find_schema(path, model);
    let schema_default = node.default.clone();

    match node.shape() {
        SchemaShape::Object(properties) => {
            // Descent already happened via find_schema; recurse per property
            // with the matching slice of the value and an empty path.
            let mut child_defaults = Map::new();
            for (name, child) in properties {
                let child_value = value.and_then(|v| v.get(name));
                if let Some(synthesized) =
                    compute_at(child_value, &FieldPath::root(), child, resolver, depth + 1)
                {
                    child_defaults.insert(name.clone(), synthesized);
                }
            }
            if child_defaults.is_empty() {
                schema_default
            } else {
                let synthesized = Value::Object(child_defaults);
                match schema_default {
                    // First-writer-wins: the node-level default keeps its
                    // keys, child defaults fill in the rest.
                    Some(explicit) => Some(overlay(explicit, synthesized)),
                    None => Some(synthesized),
                }
            }
        }
        _ => match value {
            Some(existing) => Some(existing.clone()),
            None => schema_default,
        },
    }
}

/// Overlay `preferred` over `fallback`, per key at every nesting level where
/// both sides are objects. A `null` preferred value never displaces the
/// fallback; any other conflict resolves in favor of `preferred`.
pub fn overlay(preferred: Value, fallback: Value) -> Value {
    match (preferred, fallback) {
        (Value::Null, fallback) => fallback,
        (Value::Object(preferred), Value::Object(mut merged)) => {
            for (key, value) in preferred {
                let combined = match merged.remove(&key) {
                    Some(existing) => overlay(value, existing),
                    None => value,
                };
                merged.insert(key, combined);
            }
            Value::Object(merged)
        }
        (preferred, _) => preferred,
    }
}
