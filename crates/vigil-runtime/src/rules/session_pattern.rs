//! Session-level shape detection
//!
//! Looks at the whole signal mix rather than any one modality: real
//! sessions carry device and fingerprint telemetry, show pointer
//! activity, and spread their signals over human time scales.

use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.1;
const MIN_SIGNALS_FOR_MOUSE_CHECK: usize = 10;
const RAPID_SESSION_MS: i64 = 1000;
const RAPID_SESSION_MIN_SIGNALS: usize = 20;
const MAX_SIGNALS_PER_SECOND: f64 = 50.0;

pub struct SessionPatternRule;

impl FraudRule for SessionPatternRule {
    fn name(&self) -> &'static str {
        "session_pattern_anomaly"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let mut score: f64 = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        let has_type =
            |t: SignalType| signals.iter().any(|s| s.signal_type == t);

        if !has_type(SignalType::Device) || !has_type(SignalType::Fingerprint) {
            score = score.max(0.7);
            reasons.push("Missing device/fingerprint signals".to_string());
        }

        if signals.len() > MIN_SIGNALS_FOR_MOUSE_CHECK
            && !has_type(SignalType::MouseMove)
            && !has_type(SignalType::MouseClick)
        {
            score = score.max(0.4);
            reasons.push("No mouse activity detected".to_string());
        }

        if let (Some(min_ts), Some(max_ts)) = (
            signals.iter().map(|s| s.timestamp).min(),
            signals.iter().map(|s| s.timestamp).max(),
        ) {
            let duration_ms = max_ts - min_ts;

            if duration_ms < RAPID_SESSION_MS && signals.len() > RAPID_SESSION_MIN_SIGNALS {
                score = score.max(0.8);
                reasons.push(format!(
                    "Rapid session: {} signals in {duration_ms}ms",
                    signals.len()
                ));
            }

            if duration_ms > 0 {
                let rate = signals.len() as f64 / (duration_ms as f64 / 1000.0);
                if rate > MAX_SIGNALS_PER_SECOND {
                    score = score.max(0.6);
                    reasons.push(format!("High signal rate: {rate:.0}/s"));
                }
            }
        }

        if score > 0.0 {
            Some(RiskFactor::new(
                self.name(),
                score,
                WEIGHT,
                reasons.join("; "),
            ))
        } else {
            None
        }
    }
}
