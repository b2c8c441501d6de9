//! In-Memory Form Store
//!
//! Reference [`FormStore`](crate::store::FormStore) implementation backed by
//! an `RwLock<Value>`. Suitable for tests and for hosts that keep form state
//! in process; production hosts typically adapt their own state container to
//! the `FormStore` trait instead.

use crate::models::FieldPath;
use crate::store::{FormStore, StoreError};
use serde_json::{Map, Value};
use std::sync::RwLock;

/// Process-local document store.
///
/// Commits splice the value into a fresh copy of the document and swap it in
/// whole - readers never observe a partially-edited document.
#[derive(Debug)]
pub struct MemoryFormStore {
    document: RwLock<Value>,
}

impl MemoryFormStore {
    /// Create a store with no committed document yet.
    ///
    /// The document reads as `null` until the first commit; the service
    /// layer treats a `null` document as "never populated", so first-time
    /// updates still pick up schema defaults.
    pub fn new() -> Self {
        Self::with_document(Value::Null)
    }

    /// Create a store holding the given initial document.
    pub fn with_document(document: Value) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

impl Default for MemoryFormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore for MemoryFormStore {
    fn document(&self) -> Value {
        self.document
            .read()
            .expect("form document lock poisoned")
            .clone()
    }

    fn commit(&self, path: &FieldPath, value: Value) -> Result<(), StoreError> {
        let mut guard = self.document.write().expect("form document lock poisoned");
        if path.is_root() {
            *guard = value;
            return Ok(());
        }
        let mut next = guard.clone();
        splice(&mut next, path.segments(), value).map_err(|reason| StoreError::CommitFailed {
            path: path.to_dotted(),
            reason,
        })?;
        *guard = next;
        Ok(())
    }
}

/// Write `value` at `segments` inside `target`, creating intermediate
/// objects as needed. Scalar intermediates are replaced by fresh objects;
/// array segments must stay within `0..=len`.
fn splice(target: &mut Value, segments: &[String], value: Value) -> Result<(), String> {
    let (head, rest) = segments
        .split_first()
        .expect("splice requires at least one segment");

    match target {
        Value::Array(items) => {
            let index: usize = head
                .parse()
                .map_err(|_| format!("segment '{head}' is not an array index"))?;
            if index > items.len() {
                return Err(format!(
                    "index {index} out of bounds for array of length {}",
                    items.len()
                ));
            }
            if index == items.len() {
                items.push(Value::Object(Map::new()));
            }
            if rest.is_empty() {
                items[index] = value;
                Ok(())
            } else {
                splice(&mut items[index], rest, value)
            }
        }
        Value::Object(map) => {
            if rest.is_empty() {
                map.insert(head.clone(), value);
                return Ok(());
            }
            let child = map
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() && !child.is_array() {
                *child = Value::Object(Map::new());
            }
            splice(child, rest, value)
        }
        other => {
            *other = Value::Object(Map::new());
            splice(other, segments, value)
        }
    }
}
