//! Error taxonomy for the composition pipeline
//!
//! Every error here is terminal for the composition state it arose from:
//! nothing is retried automatically, and because submission is atomic no
//! error leaves partially applied on-chain state behind.

use thiserror::Error;

use crate::extension::{ExtensionKind, LayoutError, RuleViolation};
use crate::ledger::LedgerError;

/// Errors across the compose, plan, and execute lifecycle.
///
/// - `Configuration` / `Unsupported`: raised at the attachment call, never
///   deferred.
/// - `Compatibility` / `Layout`: raised at plan entry, before any network
///   work.
/// - `Submission`: raised only at execute time; wraps the ledger's rejection
///   verbatim.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A feature's own parameters violate its constraints
    #[error("configuration error ({field}): {reason}")]
    Configuration {
        /// The offending parameter
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Feature exists in the kind set but cannot be composed by this crate
    #[error("unsupported feature: {feature}: {reason}")]
    Unsupported {
        feature: ExtensionKind,
        reason: &'static str,
    },

    /// The requested kind set trips one or more exclusion rules; carries the
    /// complete list, not just the first match
    #[error("incompatible extension set: {}", format_violations(.0))]
    Compatibility(Vec<RuleViolation>),

    /// Computed layout exceeds a hard protocol ceiling
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The ledger boundary failed: a funding query error at plan time, or a
    /// rejected atomic bundle at execute time. No partial effects exist.
    #[error("ledger error: {0}")]
    Submission(#[from] LedgerError),

    /// Invariant violation inside the pipeline; indicates a bug
    #[error("internal error: {0}")]
    Internal(String),
}

fn format_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ComposeError {
    /// Create a configuration error for a named parameter.
    pub fn configuration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }

    /// Error category for metrics and log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "config",
            Self::Unsupported { .. } => "unsupported",
            Self::Compatibility(_) => "compatibility",
            Self::Layout(_) => "layout",
            Self::Submission(_) => "submission",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether retrying the same operation could succeed.
    ///
    /// Only transport-level submission failures qualify; every validation
    /// error is deterministic, and a rejected bundle abandons its mint
    /// identity, so the caller must start a fresh composition either way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Submission(LedgerError::Rpc(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{CompatibilityRule, RULE_TABLE};

    #[test]
    fn compatibility_error_lists_every_violation() {
        let violations: Vec<RuleViolation> = RULE_TABLE[..2]
            .iter()
            .map(|rule| RuleViolation { rule: *rule })
            .collect();
        let err = ComposeError::Compatibility(violations);
        let msg = err.to_string();
        assert!(msg.contains(RULE_TABLE[0].reason));
        assert!(msg.contains(RULE_TABLE[1].reason));
    }

    #[test]
    fn categories_are_stable() {
        assert_eq!(
            ComposeError::configuration("name", "too long").category(),
            "config"
        );
        assert_eq!(
            ComposeError::Submission(LedgerError::Rejected("no".into())).category(),
            "submission"
        );
    }

    #[test]
    fn only_transport_failures_are_retryable() {
        assert!(ComposeError::Submission(LedgerError::Rpc("timeout".into())).is_retryable());
        assert!(!ComposeError::Submission(LedgerError::Rejected("bad".into())).is_retryable());
        assert!(!ComposeError::configuration("fee", "out of range").is_retryable());
    }

    #[test]
    fn display_names_both_kinds_in_a_violation() {
        let rule: CompatibilityRule = RULE_TABLE[0];
        let err = ComposeError::Compatibility(vec![RuleViolation { rule }]);
        let msg = err.to_string();
        assert!(msg.contains(rule.a.name()));
        assert!(msg.contains(rule.b.name()));
    }
}
