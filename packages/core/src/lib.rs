//! FormSpace Core Form-State Engine
//!
//! This crate computes the next committed value of a dynamically-typed form
//! document whenever a field changes, and coordinates the validation pass
//! that follows every commit.
//!
//! # Architecture
//!
//! - **Schema-described documents**: form data is plain `serde_json::Value`,
//!   governed by a declarative model with `properties`, `items`, `default`,
//!   and `$ref` into a `definitions` table
//! - **Store-agnostic**: committed state lives behind the [`store::FormStore`]
//!   trait; an in-memory reference implementation is included
//! - **Event-driven**: commits, model/view replacements, and validation
//!   reports broadcast to subscribers as [`store::FormEvent`]s
//! - **Pluggable validation**: asynchronous validator plugins run
//!   concurrently after every commit and aggregate into one report
//!
//! # Modules
//!
//! - [`models`] - Data structures (FieldPath, SchemaNode, validation types)
//! - [`services`] - Business services (FormService, SchemaResolver, etc.)
//! - [`store`] - Document store trait, in-memory store, and form events

pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use models::*;
pub use services::*;
pub use store::*;
