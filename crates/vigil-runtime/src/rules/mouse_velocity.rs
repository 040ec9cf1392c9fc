//! Mouse velocity anomaly detection
//!
//! Humans move a pointer in bursts with wide velocity variance. Very
//! high peak velocities or an almost constant velocity profile point
//! to synthetic input.

use super::stats;
use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.15;
const MIN_SIGNALS: usize = 10;
const EXTREME_VELOCITY: f64 = 50.0;
const HIGH_VELOCITY: f64 = 35.0;
const ROBOTIC_CV: f64 = 0.1;
const ROBOTIC_MIN_SIGNALS: usize = 50;

pub struct MouseVelocityRule;

impl FraudRule for MouseVelocityRule {
    fn name(&self) -> &'static str {
        "mouse_velocity_anomaly"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let moves: Vec<&Signal> = signals
            .iter()
            .filter(|s| s.signal_type == SignalType::MouseMove)
            .collect();
        if moves.len() < MIN_SIGNALS {
            return None;
        }

        let velocities: Vec<f64> = moves
            .iter()
            .map(|s| s.payload.get_f64("velocity", 0.0))
            .filter(|v| *v > 0.0)
            .collect();
        if velocities.is_empty() {
            return None;
        }

        let mean = stats::mean(&velocities);
        let max = velocities.iter().copied().fold(f64::MIN, f64::max);
        let std_dev = stats::std_dev(&velocities, mean);
        let cv = if mean > 0.0 { std_dev / mean } else { 0.0 };

        let mut score: f64 = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        if max > EXTREME_VELOCITY {
            score = score.max((0.5 + (max - EXTREME_VELOCITY) / 100.0).min(0.9));
            reasons.push(format!("Extreme velocity: {max:.1} px/ms"));
        } else if max > HIGH_VELOCITY {
            score = score.max(0.3);
            reasons.push(format!("High velocity: {max:.1} px/ms"));
        }

        if cv < ROBOTIC_CV && moves.len() >= ROBOTIC_MIN_SIGNALS {
            score = score.max(0.6);
            reasons.push(format!(
                "Robotic consistency: coefficient of variation {cv:.3}"
            ));
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

    fn moves(velocities: &[f64]) -> Vec<Signal> {
        velocities
            .iter()
            .enumerate()
            .map(|(i, v)| {
                signal(
                    SignalType::MouseMove,
                    1_700_000_000_000 + i as i64 * 16,
                    json!({"velocity": v}),
                )
            })
            .collect()
    }

    #[test]
    fn test_below_minimum_sample_is_noop() {
        let signals = moves(&[90.0; 9]);
        assert!(MouseVelocityRule.evaluate(&signals).is_none());
    }

    #[test]
    fn test_no_positive_velocities_is_noop() {
        let signals = moves(&[0.0; 12]);
        assert!(MouseVelocityRule.evaluate(&signals).is_none());
    }

    #[test]
    fn test_extreme_velocity_score_scales_and_caps() {
        // max 70 -> 0.5 + 20/100 = 0.7
        let mut velocities = vec![5.0; 11];
        velocities.push(70.0);
        let factor = MouseVelocityRule.evaluate(&moves(&velocities)).unwrap();
        assert!((factor.score - 0.7).abs() < 1e-9);
        assert!(factor.description.contains("Extreme velocity"));

        // max 200 saturates at 0.9
        velocities.push(200.0);
        let factor = MouseVelocityRule.evaluate(&moves(&velocities)).unwrap();
        assert_eq!(factor.score, 0.9);
    }

    #[test]
    fn test_high_velocity_band() {
        let mut velocities = vec![5.0; 11];
        velocities.push(40.0);
        let factor = MouseVelocityRule.evaluate(&moves(&velocities)).unwrap();
        assert_eq!(factor.score, 0.3);
        assert!(factor.description.contains("High velocity"));
    }

    #[test]
    fn test_robotic_consistency_needs_fifty_signals() {
        // Constant velocity: CV = 0, but only 20 samples
        assert!(MouseVelocityRule.evaluate(&moves(&[10.0; 20])).is_none());

        let factor = MouseVelocityRule.evaluate(&moves(&[10.0; 50])).unwrap();
        assert_eq!(factor.score, 0.6);
        assert!(factor.description.contains("Robotic consistency"));
        assert_eq!(factor.weight, 0.15);
    }

    #[test]
    fn test_velocity_encoded_as_string_is_read() {
        let signals: Vec<Signal> = (0..12)
            .map(|i| {
                signal(
                    SignalType::MouseMove,
                    1_700_000_000_000 + i,
                    json!({"velocity": "60.0"}),
                )
            })
            .collect();
        let factor = MouseVelocityRule.evaluate(&signals).unwrap();
        assert!(factor.score > 0.5);
    }
}
