//! Form interaction anomaly detection
//!
//! Humans take time to fill fields, make corrections, and rarely paste
//! into every input. The SDK emits one form_interaction signal per
//! field; fill times arrive as `timeToFill` or `timeToFillMs`
//! depending on SDK version, so both keys are read.

use super::stats;
use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.15;
const INSTANT_FILL_MS: f64 = 300.0;
const FAST_AVG_FILL_MS: f64 = 500.0;
const MIN_SIGNALS_FOR_CORRECTIONS: usize = 4;
const MIN_SIGNALS_FOR_PASTE: usize = 2;

pub struct FormInteractionRule;

fn time_to_fill(signal: &Signal) -> f64 {
    let fallback = signal.payload.get_f64("timeToFillMs", 0.0);
    signal.payload.get_f64("timeToFill", fallback)
}

impl FraudRule for FormInteractionRule {
    fn name(&self) -> &'static str {
        "form_interaction_anomaly"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let forms: Vec<&Signal> = signals
            .iter()
            .filter(|s| s.signal_type == SignalType::FormInteraction)
            .collect();
        if forms.is_empty() {
            return None;
        }

        let mut score: f64 = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        let fill_times: Vec<f64> = forms
            .iter()
            .map(|s| time_to_fill(s))
            .filter(|v| *v > 0.0)
            .collect();
        if !fill_times.is_empty() {
            let min = fill_times.iter().copied().fold(f64::MAX, f64::min);
            let avg = stats::mean(&fill_times);

            if min < INSTANT_FILL_MS {
                score = score.max(0.85);
                reasons.push(format!("Field filled in {min:.0}ms"));
            } else if avg < FAST_AVG_FILL_MS {
                score = score.max(0.6);
                reasons.push(format!("Average fill time {avg:.0}ms across fields"));
            }
        }

        if forms.len() >= MIN_SIGNALS_FOR_CORRECTIONS
            && forms.iter().all(|s| s.payload.get_i64("corrections", 0) == 0)
        {
            score = score.max(0.4);
            reasons.push("No typing corrections across all fields".to_string());
        }

        if forms.len() > MIN_SIGNALS_FOR_PASTE
            && forms.iter().all(|s| s.payload.get_bool("pasteDetected", false))
        {
            score = score.max(0.5);
            reasons.push("All fields filled via paste".to_string());
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
