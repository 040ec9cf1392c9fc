//! Core record types

mod analysis;
mod payload;
mod session;
mod signal;

pub use analysis::{FraudAnalysis, RiskFactor, Verdict};
pub use payload::SignalPayload;
pub use session::{CreateSessionRequest, Session};
pub use signal::{IncomingSignal, Signal, SignalType};
