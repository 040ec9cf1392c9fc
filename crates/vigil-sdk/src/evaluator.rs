//! Session evaluation: rule aggregation, scoring, and verdict mapping

use crate::builder::FraudEvaluatorBuilder;
use crate::config::EvaluatorConfig;
use crate::error::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use vigil_core::{FraudAnalysis, RiskFactor, Signal, Verdict};
use vigil_runtime::{AnomalyScorer, RuleEngine};

/// Model version stamped on analyses unless configured otherwise
pub const DEFAULT_MODEL_VERSION: &str = "1.0.0-dev";

/// Combines the rule engine and an optional anomaly scorer into one
/// confidence score and verdict per session
pub struct FraudEvaluator {
    engine: RuleEngine,
    scorer: Option<Arc<dyn AnomalyScorer>>,
    config: EvaluatorConfig,
}

impl FraudEvaluator {
    pub(crate) fn from_parts(
        engine: RuleEngine,
        scorer: Option<Arc<dyn AnomalyScorer>>,
        config: EvaluatorConfig,
    ) -> Self {
        Self {
            engine,
            scorer,
            config,
        }
    }

    pub fn builder() -> FraudEvaluatorBuilder {
        FraudEvaluatorBuilder::new()
    }

    pub fn model_version(&self) -> &str {
        &self.config.model_version
    }

    /// Evaluate a session's signal snapshot into a fraud analysis.
    ///
    /// Rule factors come first in rule order; scorer factors are
    /// appended. Nothing is persisted here; the caller owns storage,
    /// so a dropped future leaves no partial state behind.
    pub async fn evaluate(&self, session_id: Uuid, signals: &[Signal]) -> Result<FraudAnalysis> {
        let mut risk_factors = self.engine.evaluate(signals).await;

        if let Some(scorer) = &self.scorer {
            risk_factors.extend(scorer.score(signals).await?);
        }

        let confidence_score = weighted_confidence(&risk_factors);
        let verdict = Verdict::from_confidence(confidence_score);

        info!(
            %session_id,
            confidence = confidence_score,
            ?verdict,
            factors = risk_factors.len(),
            "session evaluated"
        );

        Ok(FraudAnalysis {
            session_id,
            verdict,
            confidence_score,
            risk_factors,
            model_version: self.config.model_version.clone(),
            evaluated_at: Utc::now(),
        })
    }
}

impl Default for FraudEvaluator {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Weight-normalized score: `sum(score * weight) / sum(weight)`,
/// zero when nothing fired
fn weighted_confidence(factors: &[RiskFactor]) -> f64 {
    let total_weight: f64 = factors.iter().map(|f| f.weight).sum();
    if total_weight > 0.0 {
        factors.iter().map(|f| f.score * f.weight).sum::<f64>() / total_weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_confidence_empty_is_zero() {
        assert_eq!(weighted_confidence(&[]), 0.0);
    }

    #[test]
    fn test_weighted_confidence_single_factor() {
        let factors = [RiskFactor::new("a", 0.8, 0.25, "")];
        assert!((weighted_confidence(&factors) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_confidence_mixes_by_weight() {
        let factors = [
            RiskFactor::new("a", 0.9, 0.3, ""),
            RiskFactor::new("b", 0.1, 0.1, ""),
        ];
        // (0.9*0.3 + 0.1*0.1) / 0.4 = 0.7
        assert!((weighted_confidence(&factors) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_factors_yield_zero() {
        let factors = [RiskFactor::new("a", 1.0, 0.0, "")];
        assert_eq!(weighted_confidence(&factors), 0.0);
    }
}
