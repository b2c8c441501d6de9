//! Form Events
//!
//! This module defines the notifications the engine emits toward its host
//! whenever committed form state changes. Events follow the observer
//! pattern: the engine broadcasts them over a tokio broadcast channel and
//! any number of subscribers (UI bridges, persistence layers, test probes)
//! receive them asynchronously without coupling to the engine internals.
//!
//! # Event Flow
//!
//! 1. An update request resolves to a final value
//! 2. `ValueChanged` is emitted once the value is committed to the store
//! 3. The validation pass runs against the committed document
//! 4. `ValidationCompleted` is emitted with the aggregated report

use crate::models::{FieldPath, SchemaNode, ValidationReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notifications emitted by the form engine.
///
/// Serializes with an internally-tagged `type` discriminator so hosts can
/// dispatch on a single field. The `ValidationCompleted` payload inlines the
/// report fields (`errors`, `outcome`, `generatedAt`) next to the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormEvent {
    /// The value at `path` was committed as `value`.
    #[serde(rename_all = "camelCase")]
    ValueChanged { path: FieldPath, value: Value },

    /// The governing schema model was replaced.
    #[serde(rename_all = "camelCase")]
    ModelReplaced { model: SchemaNode },

    /// The view description was replaced.
    #[serde(rename_all = "camelCase")]
    ViewReplaced { view: Value },

    /// A coordinated validation pass finished for the committed document.
    ValidationCompleted(ValidationReport),
}

impl FormEvent {
    /// Get a string representation of the event type
    ///
    /// Useful for debugging, logging, and consumers that route events by
    /// kind without inspecting payloads.
    pub fn event_type(&self) -> &str {
        match self {
            FormEvent::ValueChanged { .. } => "form:value-changed",
            FormEvent::ModelReplaced { .. } => "form:model-replaced",
            FormEvent::ViewReplaced { .. } => "form:view-replaced",
            FormEvent::ValidationCompleted(_) => "form:validation-completed",
        }
    }
}
