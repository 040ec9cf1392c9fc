//! Ordered rule composition

use super::{default_rules, FraudRule};
use tracing::debug;
use vigil_core::{RiskFactor, Signal};

/// Runs an ordered bank of fraud rules over a signal snapshot
pub struct RuleEngine {
    rules: Vec<Box<dyn FraudRule>>,
}

impl RuleEngine {
    /// Create an engine from an injected rule list.
    ///
    /// `None` or an empty list selects the default nine-rule bank.
    pub fn new(rules: Option<Vec<Box<dyn FraudRule>>>) -> Self {
        let rules = match rules {
            Some(rules) if !rules.is_empty() => rules,
            _ => default_rules(),
        };
        Self { rules }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every rule in order; the output preserves rule order.
    ///
    /// The engine yields to the runtime between rules, so a dropped
    /// request future aborts between detectors rather than running the
    /// whole bank to completion.
    pub async fn evaluate(&self, signals: &[Signal]) -> Vec<RiskFactor> {
        let mut factors = Vec::new();

        for rule in &self.rules {
            if let Some(factor) = rule.evaluate(signals) {
                debug!(rule = rule.name(), score = factor.score, "rule fired");
                factors.push(factor);
            }
            tokio::task::yield_now().await;
        }

        factors
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(None)
    }
}
