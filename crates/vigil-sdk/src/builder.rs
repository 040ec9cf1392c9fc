//! Builder pattern for FraudEvaluator

use crate::config::EvaluatorConfig;
use crate::evaluator::FraudEvaluator;
use std::sync::Arc;
use vigil_runtime::{AnomalyScorer, FraudRule, RuleEngine};

/// Builder for [`FraudEvaluator`]
///
/// Production callers can override the default rule bank, plug in a
/// real scorer, and pin the model version reported on analyses.
#[derive(Default)]
pub struct FraudEvaluatorBuilder {
    rules: Option<Vec<Box<dyn FraudRule>>>,
    scorer: Option<Arc<dyn AnomalyScorer>>,
    config: EvaluatorConfig,
}

impl FraudEvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default rule bank.
    ///
    /// An empty list is treated as "use the defaults".
    pub fn with_rules(mut self, rules: Vec<Box<dyn FraudRule>>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Attach an anomaly scorer; its factors are appended after the
    /// rule factors on every evaluation
    pub fn with_scorer(mut self, scorer: Arc<dyn AnomalyScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_model_version(mut self, model_version: impl Into<String>) -> Self {
        self.config.model_version = model_version.into();
        self
    }

    pub fn build(self) -> FraudEvaluator {
        FraudEvaluator::from_parts(RuleEngine::new(self.rules), self.scorer, self.config)
    }
}
