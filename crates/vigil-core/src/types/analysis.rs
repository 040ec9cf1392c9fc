//! Risk factors, verdicts, and the fraud analysis record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, weighted risk contribution emitted by a rule or a scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    /// Stable identifier of the emitting rule/scorer
    pub name: String,

    /// Severity in [0, 1]
    pub score: f64,

    /// Aggregation weight in [0, 1]
    pub weight: f64,

    /// Human-readable firing reason
    pub description: String,
}

impl RiskFactor {
    /// Create a risk factor, clamping score and weight into [0, 1]
    pub fn new(
        name: impl Into<String>,
        score: f64,
        weight: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            score: score.clamp(0.0, 1.0),
            weight: weight.clamp(0.0, 1.0),
            description: description.into(),
        }
    }
}

/// Categorical fraud verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Allow,
    Review,
    Block,
}

impl Verdict {
    /// Map a confidence score onto a verdict.
    ///
    /// `< 0.3` allows, `< 0.7` flags for review, anything above blocks.
    pub fn from_confidence(score: f64) -> Self {
        if score < 0.3 {
            Self::Allow
        } else if score < 0.7 {
            Self::Review
        } else {
            Self::Block
        }
    }
}

/// The evaluator's output for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysis {
    pub session_id: Uuid,

    pub verdict: Verdict,

    /// Weight-normalized sum of risk factor scores, in [0, 1]
    pub confidence_score: f64,

    /// Factors in rule order, scorer factors appended last
    pub risk_factors: Vec<RiskFactor>,

    pub model_version: String,

    pub evaluated_at: DateTime<Utc>,
}

impl FraudAnalysis {
    /// Look up a factor by its stable name
    pub fn factor(&self, name: &str) -> Option<&RiskFactor> {
        self.risk_factors.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::from_confidence(0.0), Verdict::Allow);
        assert_eq!(Verdict::from_confidence(0.29), Verdict::Allow);
        assert_eq!(Verdict::from_confidence(0.3), Verdict::Review);
        assert_eq!(Verdict::from_confidence(0.69), Verdict::Review);
        assert_eq!(Verdict::from_confidence(0.7), Verdict::Block);
        assert_eq!(Verdict::from_confidence(1.0), Verdict::Block);
    }

    #[test]
    fn test_verdict_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Verdict::Allow).unwrap(), r#""ALLOW""#);
        assert_eq!(serde_json::to_string(&Verdict::Review).unwrap(), r#""REVIEW""#);
        assert_eq!(serde_json::to_string(&Verdict::Block).unwrap(), r#""BLOCK""#);
    }

    #[test]
    fn test_risk_factor_clamps_ranges() {
        let factor = RiskFactor::new("test_factor", 1.7, -0.2, "clamped");
        assert_eq!(factor.score, 1.0);
        assert_eq!(factor.weight, 0.0);

        let factor = RiskFactor::new("test_factor", 0.45, 0.2, "in range");
        assert_eq!(factor.score, 0.45);
        assert_eq!(factor.weight, 0.2);
    }

    #[test]
    fn test_analysis_factor_lookup() {
        let analysis = FraudAnalysis {
            session_id: Uuid::new_v4(),
            verdict: Verdict::Review,
            confidence_score: 0.5,
            risk_factors: vec![
                RiskFactor::new("bot_signature_detected", 0.95, 0.25, "HeadlessChrome"),
                RiskFactor::new("ml_anomaly_score", 0.2, 0.4, "mock"),
            ],
            model_version: "1.0.0-dev".to_string(),
            evaluated_at: Utc::now(),
        };

        assert!(analysis.factor("bot_signature_detected").is_some());
        assert!(analysis.factor("typing_speed_anomaly").is_none());
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let analysis = FraudAnalysis {
            session_id: Uuid::new_v4(),
            verdict: Verdict::Allow,
            confidence_score: 0.0,
            risk_factors: Vec::new(),
            model_version: "1.0.0-dev".to_string(),
            evaluated_at: Utc::now(),
        };

        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("sessionId").is_some());
        assert!(json.get("confidenceScore").is_some());
        assert!(json.get("riskFactors").is_some());
        assert!(json.get("modelVersion").is_some());
        assert!(json.get("evaluatedAt").is_some());
        assert_eq!(json["verdict"], "ALLOW");
    }
}
