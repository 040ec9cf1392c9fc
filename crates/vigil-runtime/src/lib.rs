//! VIGIL Runtime - Execution layer for the fraud detection pipeline
//!
//! This crate provides the storage contracts (with in-memory default
//! implementations), the per-session sliding-window rate limiter,
//! request validation, the behavioral rule bank, and the pluggable
//! anomaly scorer contract.

pub mod error;
pub mod ratelimit;
pub mod rules;
pub mod scorer;
pub mod storage;
pub mod validation;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use ratelimit::{RateLimitDecision, RateLimiter};
pub use rules::{default_rules, FraudRule, RuleEngine};
pub use scorer::{AnomalyScorer, MockAnomalyScorer};
pub use storage::{
    AnalysisStore, InMemoryAnalysisStore, InMemorySessionStore, InMemorySignalStore, SessionStore,
    SignalStore,
};
pub use validation::ValidationErrors;
