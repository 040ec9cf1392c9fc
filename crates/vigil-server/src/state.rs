//! Shared application state
//!
//! The stores, the rate limiter, and the evaluator are process-wide
//! singletons constructed once at startup and handed to the router by
//! constructor injection.

use crate::config::ServerConfig;
use std::sync::Arc;
use vigil_runtime::{
    AnalysisStore, InMemoryAnalysisStore, InMemorySessionStore, InMemorySignalStore,
    MockAnomalyScorer, RateLimiter, SessionStore, SignalStore,
};
use vigil_sdk::FraudEvaluator;

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub signals: Arc<dyn SignalStore>,
    pub analyses: Arc<dyn AnalysisStore>,
    pub limiter: Arc<RateLimiter>,
    pub evaluator: Arc<FraudEvaluator>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build process-wide state from configuration, with the default
    /// in-memory stores
    pub fn new(config: ServerConfig) -> Self {
        let limiter = if config.rate_limit.enabled {
            RateLimiter::new(config.rate_limit.max_requests_per_minute)
        } else {
            RateLimiter::disabled()
        };

        let mut builder =
            FraudEvaluator::builder().with_model_version(config.evaluator.model_version.clone());
        if config.evaluator.enable_mock_scorer {
            builder = builder.with_scorer(Arc::new(MockAnomalyScorer));
        }

        Self {
            sessions: Arc::new(InMemorySessionStore::new()),
            signals: Arc::new(InMemorySignalStore::new()),
            analyses: Arc::new(InMemoryAnalysisStore::new()),
            limiter: Arc::new(limiter),
            evaluator: Arc::new(builder.build()),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_honors_rate_limit_config() {
        let mut config = ServerConfig::default();
        config.rate_limit.max_requests_per_minute = 7;

        let state = AppState::new(config);
        assert_eq!(state.limiter.limit(), 7);
        assert!(state.limiter.is_enabled());
    }

    #[test]
    fn test_state_with_disabled_limiter() {
        let mut config = ServerConfig::default();
        config.rate_limit.enabled = false;

        let state = AppState::new(config);
        assert!(!state.limiter.is_enabled());
    }

    #[test]
    fn test_state_stamps_model_version() {
        let mut config = ServerConfig::default();
        config.evaluator.model_version = "9.9.9".to_string();

        let state = AppState::new(config);
        assert_eq!(state.evaluator.model_version(), "9.9.9");
    }
}
