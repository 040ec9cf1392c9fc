//! Pluggable anomaly scorer contract
//!
//! The ML scorer is an external collaborator: the pipeline only
//! assumes the single `score` operation. A mock implementation stands
//! in until a model service is wired up.

use crate::error::Result;
use async_trait::async_trait;
use rand::Rng;
use vigil_core::{RiskFactor, Signal};

/// Factor name emitted by ML scorers
pub const ML_FACTOR_NAME: &str = "ml_anomaly_score";

const ML_FACTOR_WEIGHT: f64 = 0.4;

/// Scoring capability over a session's signal snapshot
///
/// Implementations may emit any number of factors and must not retain
/// the snapshot past the call.
#[async_trait]
pub trait AnomalyScorer: Send + Sync {
    async fn score(&self, signals: &[Signal]) -> Result<Vec<RiskFactor>>;
}

/// Mock scorer: emits one low-confidence factor about half the time
pub struct MockAnomalyScorer;

#[async_trait]
impl AnomalyScorer for MockAnomalyScorer {
    async fn score(&self, signals: &[Signal]) -> Result<Vec<RiskFactor>> {
        if signals.is_empty() {
            return Ok(Vec::new());
        }

        let (emit, score) = {
            let mut rng = rand::thread_rng();
            (rng.gen_bool(0.5), rng.gen_range(0.0..0.5))
        };

        if emit {
            Ok(vec![RiskFactor::new(
                ML_FACTOR_NAME,
                score,
                ML_FACTOR_WEIGHT,
                "ML model anomaly detection score (MOCK)",
            )])
        } else {
            Ok(Vec::new())
        }
    }
}
