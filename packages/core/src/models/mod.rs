//! Data Models
//!
//! This module contains the core data structures used throughout FormSpace:
//!
//! - `SchemaNode` / `SchemaShape` - Recursive schema description of the document shape
//! - `FieldPath` - Dotted path addressing into documents and schemas
//! - `ValidationIssue` / `ValidationOutcome` / `ValidationReport` - Validation pass results
//!
//! Form documents themselves are plain `serde_json::Value` trees; the engine
//! never mutates a document in place, every operation returns a new value.

mod path;
mod schema;
mod validation;

pub use path::FieldPath;
pub use schema::{SchemaNode, SchemaShape, DEFINITIONS_PREFIX};
pub use validation::{ValidationIssue, ValidationOutcome, ValidationReport};
