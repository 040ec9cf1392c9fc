//! Typing speed plausibility check
//!
//! The capture SDK estimates words-per-minute on the client. Sustained
//! rates above what trained typists reach indicate scripted input.

use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.15;
const SUPERHUMAN_WPM: f64 = 150.0;
const VERY_FAST_WPM: f64 = 120.0;

pub struct TypingSpeedRule;

impl FraudRule for TypingSpeedRule {
    fn name(&self) -> &'static str {
        "typing_speed_anomaly"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let wpm = signals
            .iter()
            .filter(|s| s.signal_type == SignalType::KeystrokeDynamics)
            .find(|s| s.payload.contains_key("estimatedWpm"))
            .map(|s| s.payload.get_f64("estimatedWpm", 0.0))?;

        if wpm > SUPERHUMAN_WPM {
            let score = (0.6 + (wpm - SUPERHUMAN_WPM) / 200.0).min(0.95);
            Some(RiskFactor::new(
                self.name(),
                score,
                WEIGHT,
                format!("Superhuman typing speed: {wpm:.0} WPM"),
            ))
        } else if wpm > VERY_FAST_WPM {
            let score = 0.3 + (wpm - VERY_FAST_WPM) / 100.0;
            Some(RiskFactor::new(
                self.name(),
                score,
                WEIGHT,
                format!("Very fast typing: {wpm:.0} WPM"),
            ))
        } else {
            None
        }
    }
}
