//! Keystroke timing anomaly detection
//!
//! Dwell time (key held down) and flight time (between keys) have
//! well-known human ranges. Sub-human averages or machine-flat
//! variance indicate injected keystrokes.

use super::stats;
use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.2;
const MIN_SIGNALS: usize = 5;
const INHUMAN_DWELL_MS: f64 = 20.0;
const FAST_DWELL_MS: f64 = 40.0;
const ROBOTIC_STD_DEV_MS: f64 = 3.0;
const ROBOTIC_MIN_SIGNALS: usize = 20;
const LOW_VARIANCE_STD_DEV_MS: f64 = 8.0;
const LOW_VARIANCE_MIN_SIGNALS: usize = 30;
const RAPID_FLIGHT_MS: f64 = 30.0;
const RAPID_FLIGHT_MIN_SAMPLES: usize = 10;

pub struct KeystrokeDynamicsRule;

impl FraudRule for KeystrokeDynamicsRule {
    fn name(&self) -> &'static str {
        "keystroke_dynamics_anomaly"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let dynamics: Vec<&Signal> = signals
            .iter()
            .filter(|s| s.signal_type == SignalType::KeystrokeDynamics)
            .collect();
        if dynamics.len() < MIN_SIGNALS {
            return None;
        }

        let dwells: Vec<f64> = dynamics
            .iter()
            .map(|s| s.payload.get_f64("dwellTimeMs", 0.0))
            .filter(|v| *v > 0.0)
            .collect();
        let flights: Vec<f64> = dynamics
            .iter()
            .map(|s| s.payload.get_f64("flightTimeMs", 0.0))
            .filter(|v| *v > 0.0)
            .collect();

        let mut score: f64 = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        if !dwells.is_empty() {
            let avg_dwell = stats::mean(&dwells);
            let dwell_std_dev = stats::std_dev(&dwells, avg_dwell);

            if avg_dwell < INHUMAN_DWELL_MS {
                score = score.max(0.9);
                reasons.push(format!("Inhuman typing speed: {avg_dwell:.1}ms dwell time"));
            } else if avg_dwell < FAST_DWELL_MS {
                score = score.max(0.5);
                reasons.push(format!(
                    "Suspiciously fast typing: {avg_dwell:.1}ms dwell time"
                ));
            }

            if dwell_std_dev < ROBOTIC_STD_DEV_MS && dynamics.len() > ROBOTIC_MIN_SIGNALS {
                score = score.max(0.8);
                reasons.push(format!(
                    "Robotic consistency: {dwell_std_dev:.1}ms std deviation"
                ));
            } else if dwell_std_dev < LOW_VARIANCE_STD_DEV_MS
                && dynamics.len() > LOW_VARIANCE_MIN_SIGNALS
            {
                score = score.max(0.5);
                reasons.push(format!(
                    "Low variance in timing: {dwell_std_dev:.1}ms std deviation"
                ));
            }
        }

        if flights.len() > RAPID_FLIGHT_MIN_SAMPLES {
            let avg_flight = stats::mean(&flights);
            if avg_flight < RAPID_FLIGHT_MS {
                score = score.max(0.6);
                reasons.push(format!(
                    "Rapid key transitions: {avg_flight:.1}ms flight time"
                ));
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

#[cfg(test)]
mod tests {
    use super::super::test_support::signal;
    use super::*;
    use serde_json::json;

    fn dynamics(samples: &[(f64, f64)]) -> Vec<Signal> {
        samples
            .iter()
            .enumerate()
            .map(|(i, (dwell, flight))| {
                signal(
                    SignalType::KeystrokeDynamics,
                    1_700_000_000_000 + i as i64 * 200,
                    json!({"dwellTimeMs": dwell, "flightTimeMs": flight}),
                )
            })
            .collect()
    }

    #[test]
    fn test_below_minimum_sample_is_noop() {
        let signals = dynamics(&[(15.0, 10.0); 4]);
        assert!(KeystrokeDynamicsRule.evaluate(&signals).is_none());
    }

    #[test]
    fn test_robotic_typing_fires_at_point_nine() {
        // 30 identical samples at 15ms dwell / 10ms flight: every clause
        // fires, the maximum is the inhuman-dwell 0.9
        let signals = dynamics(&[(15.0, 10.0); 30]);

        let factor = KeystrokeDynamicsRule.evaluate(&signals).unwrap();
        assert_eq!(factor.score, 0.9);
        assert_eq!(factor.weight, 0.2);
        assert!(factor.description.contains("Inhuman typing speed"));
    }

    #[test]
    fn test_fast_but_not_inhuman_dwell() {
        let samples: Vec<(f64, f64)> = (0..6).map(|i| (28.0 + i as f64 * 4.0, 80.0)).collect();
        let factor = KeystrokeDynamicsRule.evaluate(&dynamics(&samples)).unwrap();
        assert_eq!(factor.score, 0.5);
        assert!(factor.description.contains("Suspiciously fast"));
    }

    #[test]
    fn test_flat_variance_needs_sample_count() {
        // Flat 60ms dwell: std dev 0, avg well above the speed bands.
        // 15 samples: robotic clause needs > 20 signals, so no fire.
        assert!(KeystrokeDynamicsRule
            .evaluate(&dynamics(&[(60.0, 80.0); 15]))
            .is_none());

        // 25 samples: robotic consistency fires at 0.8
        let factor = KeystrokeDynamicsRule
            .evaluate(&dynamics(&[(60.0, 80.0); 25]))
            .unwrap();
        assert_eq!(factor.score, 0.8);
        assert!(factor.description.contains("Robotic consistency"));
    }

    #[test]
    fn test_low_variance_band() {
        // Dwell alternating 55/65: mean 60, std dev 5 (between 3 and 8).
        // 35 samples clears the >30 gate for the 0.5 clause.
        let samples: Vec<(f64, f64)> = (0..35)
            .map(|i| (if i % 2 == 0 { 55.0 } else { 65.0 }, 80.0))
            .collect();

        let factor = KeystrokeDynamicsRule.evaluate(&dynamics(&samples)).unwrap();
        assert_eq!(factor.score, 0.5);
        assert!(factor.description.contains("Low variance"));
    }

    #[test]
    fn test_rapid_flight_time() {
        // Human-looking dwell spread, but 12 flight samples averaging 20ms
        let samples: Vec<(f64, f64)> = (0..12)
            .map(|i| (80.0 + (i as f64 * 13.0) % 60.0, 20.0))
            .collect();

        let factor = KeystrokeDynamicsRule.evaluate(&dynamics(&samples)).unwrap();
        assert_eq!(factor.score, 0.6);
        assert!(factor.description.contains("Rapid key transitions"));
    }

    #[test]
    fn test_human_typing_does_not_fire() {
        let samples: Vec<(f64, f64)> = (0..25)
            .map(|i| {
                (
                    80.0 + (i as f64 * 31.0) % 70.0,
                    120.0 + (i as f64 * 17.0) % 90.0,
                )
            })
            .collect();

        assert!(KeystrokeDynamicsRule.evaluate(&dynamics(&samples)).is_none());
    }
}
