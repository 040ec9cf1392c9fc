//! VIGIL Core - Data model for the behavioral fraud detection pipeline
//!
//! This crate defines the typed records shared by every layer of the
//! pipeline: sessions, signals, the canonical signal taxonomy, risk
//! factors, and fraud analyses.

pub mod error;
pub mod types;

// Re-export main types
pub use error::{CoreError, Result};
pub use types::{
    CreateSessionRequest, FraudAnalysis, IncomingSignal, RiskFactor, Session, Signal,
    SignalPayload, SignalType, Verdict,
};
