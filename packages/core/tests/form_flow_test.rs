//! Form Update Flow Tests
//!
//! Integration tests for the full update lifecycle:
//!
//! - Whole-document population with default synthesis
//! - Per-field edits against an already-populated document
//! - The idempotent no-op path for unchanged values
//! - Aggregation of plugin outcomes with the structural validator
//! - Plugin failure propagation
//!
//! Tests drive a `FormService` over the in-memory store and observe the
//! broadcast events a host frontend would consume.

#[cfg(test)]
mod form_flow_tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use formspace_core::{
        FieldPath, FormEvent, FormService, FormValidator, MemoryFormStore, SchemaNode,
        UpdateOptions, ValidationIssue, ValidationOutcome,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::broadcast::error::TryRecvError;

    fn order_model() -> SchemaNode {
        serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "status": {"type": "string", "default": "OPEN"},
                "customer": {"$ref": "#/definitions/customer"},
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "sku": {"type": "string"},
                            "quantity": {"type": "integer"}
                        }
                    }
                }
            },
            "definitions": {
                "customer": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "country": {"type": "string", "default": "PT"}
                    }
                }
            }
        }))
        .expect("order model deserializes")
    }

    fn service() -> FormService {
        FormService::new(Arc::new(MemoryFormStore::new()), order_model())
    }

    /// Validator that rejects orders without a customer name.
    struct RequireCustomerName;

    #[async_trait]
    impl FormValidator for RequireCustomerName {
        fn name(&self) -> &str {
            "require-customer-name"
        }

        async fn validate(&self, document: &Value) -> Result<ValidationOutcome> {
            let named = document
                .pointer("/customer/name")
                .map(|name| name.is_string())
                .unwrap_or(false);
            if named {
                Ok(ValidationOutcome::valid())
            } else {
                Ok(vec![ValidationIssue::new(
                    vec!["customer".into(), "name".into()],
                    "customer name is required",
                )]
                .into_iter()
                .collect())
            }
        }
    }

    struct FailingValidator;

    #[async_trait]
    impl FormValidator for FailingValidator {
        fn name(&self) -> &str {
            "flaky-backend"
        }

        async fn validate(&self, _document: &Value) -> Result<ValidationOutcome> {
            anyhow::bail!("validation backend unavailable")
        }
    }

    #[tokio::test]
    async fn test_populate_then_edit_field() -> Result<()> {
        let service = service();
        let mut events = service.subscribe();

        // First-time population: defaults fill in at every level, including
        // through the customer reference.
        service
            .update_value(&FieldPath::root(), Some(json!({})), UpdateOptions::default())
            .await?;

        match events.recv().await? {
            FormEvent::ValueChanged { path, value } => {
                assert!(path.is_root());
                assert_eq!(
                    value,
                    json!({"status": "OPEN", "customer": {"country": "PT"}})
                );
            }
            other => panic!("expected value change, got {other:?}"),
        }
        assert!(matches!(
            events.recv().await?,
            FormEvent::ValidationCompleted(_)
        ));

        // A later field edit never re-applies defaults over committed data.
        let status = FieldPath::from_dotted("status");
        service
            .update_value(&status, Some(json!("SHIPPED")), UpdateOptions::default())
            .await?;

        match events.recv().await? {
            FormEvent::ValueChanged { path, value } => {
                assert_eq!(path, status);
                assert_eq!(value, json!("SHIPPED"));
            }
            other => panic!("expected value change, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_unchanged_update_emits_nothing() -> Result<()> {
        let service = service();
        let path = FieldPath::from_dotted("customer.name");
        service
            .update_value(&path, Some(json!("Ada")), UpdateOptions::default())
            .await?;

        let mut events = service.subscribe();
        service
            .update_value(&path, Some(json!("Ada")), UpdateOptions::default())
            .await?;
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        // force_validation runs the full pass on the same input.
        service
            .update_value(
                &path,
                Some(json!("Ada")),
                UpdateOptions {
                    force_validation: true,
                    ..Default::default()
                },
            )
            .await?;
        assert!(matches!(events.recv().await?, FormEvent::ValueChanged { .. }));
        assert!(matches!(
            events.recv().await?,
            FormEvent::ValidationCompleted(_)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_plugin_and_structural_issues_aggregate() -> Result<()> {
        let service = service().with_validator(Arc::new(RequireCustomerName));
        let mut events = service.subscribe();

        // No customer name, and a mistyped quantity: one issue from the
        // plugin, one from the structural check, in that order.
        service
            .update_value(
                &FieldPath::root(),
                Some(json!({"items": [{"sku": "A-1", "quantity": "two"}]})),
                UpdateOptions::default(),
            )
            .await?;

        events.recv().await?; // ValueChanged
        match events.recv().await? {
            FormEvent::ValidationCompleted(report) => {
                assert!(!report.is_valid());
                assert_eq!(
                    report.messages_for("customer.name"),
                    Some(&["customer name is required".to_string()][..])
                );
                assert_eq!(
                    report.messages_for("items.0.quantity"),
                    Some(&["expected integer, found string".to_string()][..])
                );
                assert_eq!(report.outcome.issues[0].message, "customer name is required");
                assert_eq!(
                    report.outcome.issues[1].message,
                    "expected integer, found string"
                );
            }
            other => panic!("expected validation report, got {other:?}"),
        }

        // Fixing the document clears the report.
        service
            .update_value(
                &FieldPath::from_dotted("customer.name"),
                Some(json!("Ada")),
                UpdateOptions::default(),
            )
            .await?;
        service
            .update_value(
                &FieldPath::from_dotted("items.0.quantity"),
                Some(json!(2)),
                UpdateOptions::default(),
            )
            .await?;

        let mut last_report = None;
        while let Ok(event) = events.try_recv() {
            if let FormEvent::ValidationCompleted(report) = event {
                last_report = Some(report);
            }
        }
        assert!(last_report.expect("validation reports emitted").is_valid());
        Ok(())
    }

    #[tokio::test]
    async fn test_plugin_failure_aborts_pass_but_keeps_commit() -> Result<()> {
        let service = service().with_validator(Arc::new(FailingValidator));
        let mut events = service.subscribe();

        let path = FieldPath::from_dotted("status");
        let err = service
            .update_value(&path, Some(json!("SHIPPED")), UpdateOptions::default())
            .await
            .expect_err("plugin failure must surface");
        assert!(err.to_string().contains("flaky-backend"));

        // The value change preceded validation; no report follows.
        assert!(matches!(events.recv().await?, FormEvent::ValueChanged { .. }));
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
        Ok(())
    }

    #[tokio::test]
    async fn test_merge_defaults_option_fills_gaps() -> Result<()> {
        let service = service();
        let mut events = service.subscribe();

        service
            .update_value(
                &FieldPath::root(),
                Some(json!({"status": "REVIEW"})),
                UpdateOptions {
                    merge_defaults: true,
                    ..Default::default()
                },
            )
            .await?;

        match events.recv().await? {
            FormEvent::ValueChanged { value, .. } => {
                assert_eq!(
                    value,
                    json!({"status": "REVIEW", "customer": {"country": "PT"}})
                );
            }
            other => panic!("expected value change, got {other:?}"),
        }
        Ok(())
    }
}
