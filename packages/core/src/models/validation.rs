//! Validation Result Types
//!
//! This module defines the data carried by one validation pass:
//!
//! - [`ValidationIssue`] - a single error record (path segments + message)
//! - [`ValidationOutcome`] - all issues produced by one validator run
//! - [`ValidationReport`] - the aggregated, path-indexed report emitted to
//!   the host after every commit
//!
//! Outcomes are created per pass and discarded after aggregation; the report
//! is rebuilt wholesale on every commit, never incrementally updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single validation error with the path it applies to.
///
/// Validators report paths as raw segment lists; aggregation remaps them to
/// the document's dotted path syntax when building the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path segments into the document. Empty segments denote the root.
    pub path: Vec<String>,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue at the given path segments.
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Create an issue at the document root.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(Vec::new(), message)
    }
}

/// The result of one validator run: an ordered list of issues.
///
/// An empty outcome means the validator found nothing to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Issues in the order the validator produced them.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    /// An outcome with no issues.
    pub fn valid() -> Self {
        Self::default()
    }

    /// True if this outcome carries no issues.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Append one issue.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Absorb another outcome, preserving issue order.
    pub fn merge(&mut self, other: ValidationOutcome) {
        self.issues.extend(other.issues);
    }
}

impl FromIterator<ValidationIssue> for ValidationOutcome {
    fn from_iter<I: IntoIterator<Item = ValidationIssue>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

/// Path-indexed summary of one coordinated validation pass.
///
/// `errors` maps dotted field paths (root is `""`) to message lists in issue
/// order. The raw aggregated outcome travels alongside for consumers that
/// need full detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Dotted field path → ordered error messages.
    pub errors: BTreeMap<String, Vec<String>>,
    /// The combined outcome the report was derived from.
    pub outcome: ValidationOutcome,
    /// When this report was generated.
    pub generated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Build a report by grouping an aggregated outcome's issues by field
    /// path, remapping segment paths to dotted syntax.
    pub fn from_outcome(outcome: ValidationOutcome) -> Self {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in &outcome.issues {
            errors
                .entry(issue.path.join("."))
                .or_default()
                .push(issue.message.clone());
        }
        Self {
            errors,
            outcome,
            generated_at: Utc::now(),
        }
    }

    /// True if the underlying pass found no issues.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for a dotted path, if any.
    pub fn messages_for(&self, path: &str) -> Option<&[String]> {
        self.errors.get(path).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_merge_preserves_order() {
        let mut first = ValidationOutcome::valid();
        first.push(ValidationIssue::new(vec!["a".into()], "first"));

        let mut second = ValidationOutcome::valid();
        second.push(ValidationIssue::new(vec!["a".into()], "second"));
        second.push(ValidationIssue::at_root("third"));

        first.merge(second);
        assert_eq!(first.issues.len(), 3);
        assert_eq!(first.issues[0].message, "first");
        assert_eq!(first.issues[2].message, "third");
    }

    #[test]
    fn test_report_groups_by_dotted_path() {
        let outcome: ValidationOutcome = vec![
            ValidationIssue::new(vec!["customer".into(), "name".into()], "required"),
            ValidationIssue::new(vec!["customer".into(), "name".into()], "too short"),
            ValidationIssue::new(vec!["status".into()], "unknown value"),
        ]
        .into_iter()
        .collect();

        let report = ValidationReport::from_outcome(outcome);
        assert!(!report.is_valid());
        assert_eq!(
            report.messages_for("customer.name"),
            Some(&["required".to_string(), "too short".to_string()][..])
        );
        assert_eq!(
            report.messages_for("status"),
            Some(&["unknown value".to_string()][..])
        );
        assert_eq!(report.messages_for("missing"), None);
    }

    #[test]
    fn test_report_root_issues_use_empty_key() {
        let outcome: ValidationOutcome =
            vec![ValidationIssue::at_root("document must be an object")]
                .into_iter()
                .collect();
        let report = ValidationReport::from_outcome(outcome);
        assert_eq!(
            report.messages_for(""),
            Some(&["document must be an object".to_string()][..])
        );
    }

    #[test]
    fn test_empty_outcome_yields_valid_report() {
        let report = ValidationReport::from_outcome(ValidationOutcome::valid());
        assert!(report.is_valid());
        assert!(report.outcome.is_valid());
    }
}
