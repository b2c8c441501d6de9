//! Value Merge Policy
//!
//! Decides, for a single field update, what value actually gets committed:
//! the caller's input verbatim, the input overlaid onto synthesized
//! defaults, or a cleared empty document.
//!
//! # Emptiness
//!
//! A value is "empty" when it is absent, the `null` sentinel, or a
//! structured container with zero entries. This is a different predicate
//! from the absent/present distinction used by default synthesis.
//!
//! # Policy
//!
//! - A field that already held a committed value keeps the caller's input
//!   untouched - defaults only apply to first-time population
//! - Defaults apply when the input is empty and defaults exist, or when a
//!   non-empty whole-document update explicitly requests merging
//! - An empty whole-document update with no defaults clears to `{}`
//! - Everything else passes through unchanged

use crate::models::{FieldPath, SchemaNode};
use crate::services::defaults::{compute_defaults, overlay};
use crate::services::schema_resolver::SchemaResolver;
use serde_json::{Map, Value};

/// One field update, as handed to the merge policy.
#[derive(Debug)]
pub struct UpdateRequest<'a> {
    /// Caller-supplied value; `None` means the caller supplied nothing.
    pub input_value: Option<Value>,
    /// Value committed at the path before this update, if any.
    pub previous_value: Option<&'a Value>,
    /// Location being updated; the root path denotes the whole document.
    pub path: &'a FieldPath,
    /// Root schema model governing the document.
    pub model: &'a SchemaNode,
    /// Caller preference: merge defaults into a non-empty whole-document
    /// update instead of taking the input as-is.
    pub merge_defaults: bool,
}

/// True when the value is absent, `null`, or a zero-entry container.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Resolve the value to commit for one update.
///
/// An absent input on a pass-through branch commits `null` - the engine
/// always commits a concrete JSON value.
pub fn resolve_update(request: UpdateRequest<'_>, resolver: &SchemaResolver<'_>) -> Value {
    let UpdateRequest {
        input_value,
        previous_value,
        path,
        model,
        merge_defaults,
    } = request;

    // Defaults never override a field that already held a committed value.
    if previous_value.is_some() {
        return input_value.unwrap_or(Value::Null);
    }

    let default_value = compute_defaults(input_value.as_ref(), path, model, resolver);
    let has_defaults = default_value.is_some();
    let whole_document = path.is_root();
    let input_empty = is_empty_value(input_value.as_ref());

    if has_defaults && (input_empty || (whole_document && merge_defaults)) {
        // Caller-supplied values take priority over defaults, per key, at
        // every nesting level the overlay reaches.
        let defaults = default_value.unwrap_or(Value::Null);
        return overlay(input_value.unwrap_or(Value::Null), defaults);
    }

    if input_empty && whole_document && !has_defaults {
        return Value::Object(Map::new());
    }

    input_value.unwrap_or(Value::Null)
}
