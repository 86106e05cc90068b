//! Mutual-exclusion rules between extension kinds
//!
//! The rule table is a fixed deny-list: pairs absent from it are implicitly
//! compatible. Checking runs fully offline so that an invalid combination
//! fails before any network cost is incurred.

use std::collections::BTreeSet;

use super::kind::ExtensionKind;

/// One forbidden unordered pair of kinds, with the reason it is forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityRule {
    pub a: ExtensionKind,
    pub b: ExtensionKind,
    pub reason: &'static str,
}

impl CompatibilityRule {
    /// Symmetric membership test.
    fn matches(&self, x: ExtensionKind, y: ExtensionKind) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// A rule violated by a concrete requested set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleViolation {
    pub rule: CompatibilityRule,
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is incompatible with {}: {}",
            self.rule.a, self.rule.b, self.rule.reason
        )
    }
}

/// The fixed rule table.
///
/// A token that cannot move cannot meaningfully charge a fee, run a transfer
/// hook, or hide transfer amounts; hidden amounts cannot be fee-computed,
/// hook-inspected, or forcibly moved by a delegate that must know the amount.
pub const RULE_TABLE: [CompatibilityRule; 6] = [
    CompatibilityRule {
        a: ExtensionKind::NonTransferable,
        b: ExtensionKind::TransferFee,
        reason: "a non-transferable token cannot charge transfer fees",
    },
    CompatibilityRule {
        a: ExtensionKind::NonTransferable,
        b: ExtensionKind::TransferHook,
        reason: "a non-transferable token never invokes a transfer hook",
    },
    CompatibilityRule {
        a: ExtensionKind::NonTransferable,
        b: ExtensionKind::ConfidentialBalances,
        reason: "a non-transferable token has no transfer amounts to hide",
    },
    CompatibilityRule {
        a: ExtensionKind::ConfidentialBalances,
        b: ExtensionKind::TransferFee,
        reason: "fees cannot be computed over encrypted transfer amounts",
    },
    CompatibilityRule {
        a: ExtensionKind::ConfidentialBalances,
        b: ExtensionKind::TransferHook,
        reason: "hooks cannot inspect encrypted transfer amounts",
    },
    CompatibilityRule {
        a: ExtensionKind::ConfidentialBalances,
        b: ExtensionKind::PermanentDelegate,
        reason: "a delegate cannot move amounts it cannot see",
    },
];

/// Evaluate a requested kind set against the rule table.
///
/// Collects **every** violated rule, not just the first, so the caller sees
/// the complete conflict report in one pass.
pub fn check(requested: &BTreeSet<ExtensionKind>) -> Result<(), Vec<RuleViolation>> {
    let kinds: Vec<ExtensionKind> = requested.iter().copied().collect();
    let mut violations = Vec::new();
    for (i, &x) in kinds.iter().enumerate() {
        for &y in &kinds[i + 1..] {
            for rule in RULE_TABLE {
                if rule.matches(x, y) {
                    violations.push(RuleViolation { rule });
                }
            }
        }
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
