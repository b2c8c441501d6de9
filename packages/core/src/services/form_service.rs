//! Form Service - Update Resolution & Validation Coordination
//!
//! This module provides the main business logic layer for form updates:
//!
//! - Resolving one field update into the value actually committed
//!   (merge policy + default synthesis + schema navigation)
//! - Emitting committed-state notifications over a broadcast channel
//! - Coordinating the validation pass that follows every commit
//!
//! # Update Lifecycle
//!
//! 1. **Resolving** - read the committed document, compute the final value.
//!    If it deep-equals the previous value at the path (and validation is
//!    not forced) the update is an idempotent no-op: no commit, no events.
//! 2. **Committing & Validating** - commit, emit `ValueChanged`, re-read the
//!    committed document (validation observes the NEW document), run the
//!    built-in structural validator inline, run every registered validator
//!    plugin concurrently, aggregate everything into one report, emit
//!    `ValidationCompleted`.
//!
//! # Staleness
//!
//! In-flight plugin validators are never cancelled. Instead each pass takes
//! a sequence number; a pass that is no longer the newest at emit time drops
//! its report, so a slow validator from a superseded commit cannot overwrite
//! the report of a newer one.

use crate::models::{FieldPath, SchemaNode, ValidationOutcome, ValidationReport};
use crate::services::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::services::error::FormServiceError;
use crate::services::schema_resolver::SchemaResolver;
use crate::services::schema_validator::validate_structure;
use crate::services::update_policy::{resolve_update, UpdateRequest};
use crate::store::{FormEvent, FormStore};
use async_trait::async_trait;
use futures::future;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Broadcast channel capacity for form events.
///
/// 128 provides sufficient headroom for burst updates while limiting memory
/// overhead. Observer lag is acceptable - subscribers track current state,
/// not event history.
const FORM_EVENT_CHANNEL_CAPACITY: usize = 128;

/// Caller preferences for one update.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Merge synthesized defaults into a non-empty whole-document update.
    pub merge_defaults: bool,
    /// Run the validation pass even when the resolved value is unchanged.
    pub force_validation: bool,
}

/// Asynchronous validator plugin.
///
/// Plugins receive the committed document after every update and report
/// issues as a [`ValidationOutcome`]. A plugin failure aborts the pass and
/// propagates to the caller; the commit it was validating stays applied.
#[async_trait]
pub trait FormValidator: Send + Sync {
    /// Plugin name, used in diagnostics and failure errors.
    fn name(&self) -> &str;

    /// Validate the committed document.
    async fn validate(&self, document: &Value) -> anyhow::Result<ValidationOutcome>;
}

/// Coordinates update resolution, commits, and validation for one form.
///
/// The committed document lives behind the injected [`FormStore`]; the
/// service reads it fresh immediately before acting and never mutates it in
/// place. Events are broadcast to any number of subscribers.
pub struct FormService {
    store: Arc<dyn FormStore>,
    model: RwLock<SchemaNode>,
    validators: Vec<Arc<dyn FormValidator>>,
    diagnostics: Arc<dyn Diagnostics>,
    event_tx: broadcast::Sender<FormEvent>,
    pass_counter: AtomicU64,
}

impl FormService {
    /// Create a service over a store and a root schema model, reporting
    /// diagnostics through `tracing`.
    pub fn new(store: Arc<dyn FormStore>, model: SchemaNode) -> Self {
        Self::with_diagnostics(store, model, Arc::new(TracingDiagnostics))
    }

    /// Create a service with an injected diagnostics sink.
    pub fn with_diagnostics(
        store: Arc<dyn FormStore>,
        model: SchemaNode,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(FORM_EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            model: RwLock::new(model),
            validators: Vec::new(),
            diagnostics,
            event_tx,
            pass_counter: AtomicU64::new(0),
        }
    }

    /// Register a validator plugin. Plugins run concurrently on every
    /// validation pass, in registration order within the aggregated report.
    pub fn register_validator(&mut self, validator: Arc<dyn FormValidator>) {
        self.validators.push(validator);
    }

    /// Builder-style [`register_validator`](Self::register_validator).
    pub fn with_validator(mut self, validator: Arc<dyn FormValidator>) -> Self {
        self.register_validator(validator);
        self
    }

    /// Subscribe to form events. Each subscriber receives every event
    /// emitted after the point of subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.event_tx.subscribe()
    }

    /// Current root schema model.
    pub fn model(&self) -> SchemaNode {
        self.model.read().expect("model lock poisoned").clone()
    }

    /// Replace the root schema model and notify subscribers.
    pub fn replace_model(&self, model: SchemaNode) {
        *self.model.write().expect("model lock poisoned") = model.clone();
        self.emit(FormEvent::ModelReplaced { model });
    }

    /// Replace the root schema model from a raw JSON document, as received
    /// from a host over the wire.
    ///
    /// # Errors
    ///
    /// `FormServiceError::InvalidModel` when the document does not parse as
    /// a schema node. The current model stays in place.
    pub fn replace_model_from_value(&self, model: Value) -> Result<(), FormServiceError> {
        let parsed = SchemaNode::from_value(&model)
            .map_err(|err| FormServiceError::invalid_model(err.to_string()))?;
        self.replace_model(parsed);
        Ok(())
    }

    /// Replace the view description and notify subscribers. The view is
    /// host-owned; the engine only relays it.
    pub fn replace_view(&self, view: Value) {
        self.emit(FormEvent::ViewReplaced { view });
    }

    /// Apply one field update and coordinate the validation pass that
    /// follows it.
    ///
    /// `value` is the caller-supplied input (`None` when the caller supplied
    /// nothing); the committed value may differ after default synthesis. See
    /// the module docs for the full lifecycle.
    ///
    /// # Errors
    ///
    /// - `FormServiceError::StoreFailed` when the store rejects the commit
    /// - `FormServiceError::ValidatorFailed` when a plugin fails; earlier
    ///   events of the pass have already been emitted
    pub async fn update_value(
        &self,
        path: &FieldPath,
        value: Option<Value>,
        options: UpdateOptions,
    ) -> Result<(), FormServiceError> {
        let model = self.model();
        let resolver = SchemaResolver::for_model(&model, self.diagnostics.as_ref());

        let document = self.store.document();
        let previous = previous_value(&document, path);
        let final_value = resolve_update(
            UpdateRequest {
                input_value: value,
                previous_value: previous.as_ref(),
                path,
                model: &model,
                merge_defaults: options.merge_defaults,
            },
            &resolver,
        );

        // Idempotent no-op: the equality check runs against the RESOLVED
        // value, so an update whose raw input matches the previous value
        // still validates when default synthesis changed the outcome.
        if !options.force_validation && previous.as_ref() == Some(&final_value) {
            self.diagnostics
                .debug(&format!("Value at '{path}' unchanged, skipping validation"));
            return Ok(());
        }

        let pass = self.pass_counter.fetch_add(1, Ordering::SeqCst) + 1;

        self.store.commit(path, final_value.clone())?;
        self.emit(FormEvent::ValueChanged {
            path: path.clone(),
            value: final_value,
        });

        // Validation observes the committed document, not the pre-update one.
        let committed = self.store.document();
        let structural = validate_structure(&committed, &model, &resolver);
        let plugin_outcomes = self.run_validators(&committed).await?;

        let mut combined = ValidationOutcome::valid();
        for outcome in plugin_outcomes {
            combined.merge(outcome);
        }
        combined.merge(structural);

        if self.pass_counter.load(Ordering::SeqCst) != pass {
            self.diagnostics
                .debug(&format!("Dropping stale validation report for pass {pass}"));
            return Ok(());
        }

        self.emit(FormEvent::ValidationCompleted(ValidationReport::from_outcome(
            combined,
        )));
        Ok(())
    }

    /// Run all registered plugins against the committed document.
    ///
    /// Uniform join over a possibly-empty plugin set: zero plugins return
    /// immediately without polling anything; otherwise all plugins run
    /// concurrently and results come back in registration order.
    async fn run_validators(
        &self,
        document: &Value,
    ) -> Result<Vec<ValidationOutcome>, FormServiceError> {
        if self.validators.is_empty() {
            return Ok(Vec::new());
        }
        let pending: Vec<_> = self
            .validators
            .iter()
            .map(|validator| validator.validate(document))
            .collect();
        let results = future::join_all(pending).await;
        self.validators
            .iter()
            .zip(results)
            .map(|(validator, result)| {
                result.map_err(|source| FormServiceError::validator_failed(validator.name(), source))
            })
            .collect()
    }

    fn emit(&self, event: FormEvent) {
        // No subscribers is fine; events are fire-and-forget.
        let _ = self.event_tx.send(event);
    }
}

/// Previous committed value at `path`, distinguishing "never populated"
/// from a committed `null`: a `null` DOCUMENT means the store was never
/// populated, so nothing has a previous value yet.
fn previous_value(document: &Value, path: &FieldPath) -> Option<Value> {
    if document.is_null() {
        return None;
    }
    path.resolve_in(document).cloned()
}
