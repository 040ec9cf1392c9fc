//! Evaluator configuration

/// Configuration for [`crate::FraudEvaluator`]
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Version string stamped onto every produced analysis
    pub model_version: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            model_version: crate::evaluator::DEFAULT_MODEL_VERSION.to_string(),
        }
    }
}
