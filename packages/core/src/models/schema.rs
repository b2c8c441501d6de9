//! Schema Node Types
//!
//! This module contains the recursive schema description used by FormSpace to
//! describe the shape of a form document. Schemas follow the Pure JSON
//! pattern: a node is a plain JSON object with a handful of recognized keys
//! (`type`, `properties`, `items`, `default`, `$ref`, `definitions`) and
//! deserializes directly via serde.
//!
//! ## Structural Inspection
//!
//! Code never probes optional fields directly to decide how to descend.
//! Every structural decision goes through [`SchemaNode::shape`], which
//! classifies a node as exactly one of four kinds:
//!
//! - `Reference` - carries `$ref`, fully determined by indirection
//! - `Object` - carries `properties`
//! - `Array` - carries `items`
//! - `Leaf` - anything else (primitives, or no schema known)
//!
//! ## Example Schema
//!
//! ```json
//! {
//!   "type": "object",
//!   "properties": {
//!     "status": { "type": "string", "default": "OPEN" },
//!     "owner": { "$ref": "#/definitions/person" }
//!   },
//!   "definitions": {
//!     "person": { "type": "object", "properties": { "name": { "type": "string" } } }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fixed pointer prefix for references into the definitions table.
///
/// Any `$ref` not of the form `#/definitions/<name>[/...]` is unresolvable.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Recursive description of the permitted document shape at one location.
///
/// All fields are optional; an entirely empty node means "no schema known"
/// and is the fail-closed result of unresolvable references and structural
/// navigation misses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Value kind this node describes ("object", "array", "string", ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Child schema per property name. Present iff this node is object-typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    /// Child schema for array elements. Present iff this node is array-typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    /// Declared default value for this location (an arbitrary fragment).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Pointer into the definitions table. When present it fully determines
    /// the node by indirection and must resolve before structural inspection.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Shared definitions, addressable only through `#/definitions/<name>`.
    /// Meaningful on the root model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<BTreeMap<String, SchemaNode>>,
}

/// Structural classification of a schema node.
///
/// Exactly one kind applies to any node; `$ref` takes precedence over
/// structure, `properties` over `items`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaShape<'a> {
    /// Node is fully determined by indirection through the definitions table.
    Reference(&'a str),
    /// Object-typed node with declared properties.
    Object(&'a BTreeMap<String, SchemaNode>),
    /// Array-typed node with an element schema.
    Array(&'a SchemaNode),
    /// Primitive node, or no schema known.
    Leaf,
}

impl SchemaNode {
    /// The empty node: no schema known. Fail-closed result for unresolvable
    /// references and navigation past the described shape.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Classify this node for structural descent.
    pub fn shape(&self) -> SchemaShape<'_> {
        if let Some(pointer) = &self.reference {
            return SchemaShape::Reference(pointer);
        }
        if let Some(properties) = &self.properties {
            return SchemaShape::Object(properties);
        }
        if let Some(items) = &self.items {
            return SchemaShape::Array(items);
        }
        SchemaShape::Leaf
    }

    /// Parse a schema node from a JSON value.
    ///
    /// Unrecognized keys are ignored, matching the permissive treatment of
    /// schema documents everywhere else in the engine.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}
