//! Service Layer Error Types
//!
//! This module defines error types for service-layer operations. Most schema
//! problems deliberately do NOT surface here: unresolvable references and
//! structural navigation misses degrade locally to an empty schema node (see
//! `services::schema_resolver`). What remains are the failures the host must
//! see - a failing validator plugin and a store that refused a commit.

use crate::store::StoreError;
use thiserror::Error;

/// Form engine operation errors
///
/// Provides high-level error types for coordinator operations, with detailed
/// context and proper error chaining.
#[derive(Error, Debug)]
pub enum FormServiceError {
    /// A registered validator plugin failed. Propagated to the caller
    /// unretried; the triggering commit has already been applied.
    #[error("Validator '{name}' failed: {source}")]
    ValidatorFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The document store rejected a commit.
    #[error("Store operation failed: {0}")]
    StoreFailed(#[from] StoreError),

    /// A schema model or view document could not be interpreted.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl FormServiceError {
    /// Create a validator failure error
    pub fn validator_failed(name: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ValidatorFailed {
            name: name.into(),
            source,
        }
    }

    /// Create an invalid model error
    pub fn invalid_model(msg: impl Into<String>) -> Self {
        Self::InvalidModel(msg.into())
    }
}
