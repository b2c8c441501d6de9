//! Business Services
//!
//! This module contains the core form-engine services:
//!
//! - `FormService` - Update resolution and validation coordination
//! - `SchemaResolver` - Reference resolution and model navigation
//! - `defaults` - Default value synthesis over the model tree
//! - `update_policy` - The merge policy deciding the committed value
//! - `schema_validator` - Built-in structural type checking
//! - `Diagnostics` - Injected sink for resolution warnings and debug notes
//!
//! Services coordinate between the store layer and the schema model,
//! implementing the update lifecycle and orchestrating validation passes.

pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod form_service;
pub mod schema_resolver;
pub mod schema_validator;
pub mod update_policy;

pub use defaults::{compute_defaults, overlay};
pub use diagnostics::{Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use error::FormServiceError;
pub use form_service::{FormService, FormValidator, UpdateOptions};
pub use schema_resolver::SchemaResolver;
pub use schema_validator::validate_structure;
pub use update_policy::{is_empty_value, resolve_update, UpdateRequest};
