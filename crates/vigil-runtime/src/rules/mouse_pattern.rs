//! Mouse trajectory pattern detection
//!
//! Looks at the geometry of the pointer path: long runs of collinear
//! points betray interpolated movement, and coordinates snapping to a
//! coarse grid betray programmatic positioning.

use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.1;
const MIN_SIGNALS: usize = 20;
const COLLINEAR_EPSILON: f64 = 1.0;
const STRAIGHT_RATIO_THRESHOLD: f64 = 0.8;
const GRID_RATIO_THRESHOLD: f64 = 0.5;

pub struct MousePatternRule;

impl FraudRule for MousePatternRule {
    fn name(&self) -> &'static str {
        "mouse_pattern_anomaly"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let mut moves: Vec<&Signal> = signals
            .iter()
            .filter(|s| s.signal_type == SignalType::MouseMove)
            .collect();
        if moves.len() < MIN_SIGNALS {
            return None;
        }
        moves.sort_by_key(|s| s.timestamp);

        let points: Vec<(f64, f64)> = moves
            .iter()
            .map(|s| (s.payload.get_f64("x", 0.0), s.payload.get_f64("y", 0.0)))
            .collect();

        let mut score: f64 = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        let straight = points
            .windows(3)
            .filter(|w| {
                let (x1, y1) = w[0];
                let (x2, y2) = w[1];
                let (x3, y3) = w[2];
                let cross = (y2 - y1) * (x3 - x2) - (y3 - y2) * (x2 - x1);
                cross.abs() < COLLINEAR_EPSILON
            })
            .count();
        let straight_ratio = straight as f64 / (points.len() - 2) as f64;
        if straight_ratio > STRAIGHT_RATIO_THRESHOLD {
            score = score.max(0.7);
            reasons.push(format!(
                "Too many straight-line movements: {:.0}%",
                straight_ratio * 100.0
            ));
        }

        let snapped = points
            .iter()
            .filter(|(x, y)| x.rem_euclid(10.0) < 1.0 && y.rem_euclid(10.0) < 1.0)
            .count();
        let snapped_ratio = snapped as f64 / points.len() as f64;
        if snapped_ratio > GRID_RATIO_THRESHOLD {
            score = score.max(0.5);
            reasons.push(format!(
                "Grid-snapping detected: {:.0}% of points",
                snapped_ratio * 100.0
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

    fn path(points: &[(f64, f64)]) -> Vec<Signal> {
        points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| {
                signal(
                    SignalType::MouseMove,
                    1_700_000_000_000 + i as i64 * 16,
                    json!({"x": x, "y": y}),
                )
            })
            .collect()
    }

    #[test]
    fn test_below_minimum_sample_is_noop() {
        let points: Vec<(f64, f64)> = (0..19).map(|i| (i as f64, i as f64)).collect();
        assert!(MousePatternRule.evaluate(&path(&points)).is_none());
    }

    #[test]
    fn test_straight_line_path_fires() {
        // Perfectly linear diagonal, off-grid so only collinearity fires
        let points: Vec<(f64, f64)> = (0..25)
            .map(|i| (3.0 + i as f64 * 7.0, 4.0 + i as f64 * 7.0))
            .collect();

        let factor = MousePatternRule.evaluate(&path(&points)).unwrap();
        assert_eq!(factor.score, 0.7);
        assert!(factor.description.contains("straight-line"));
    }

    #[test]
    fn test_grid_snapped_path_fires() {
        // Every point on a 10px grid, but alternating direction so the
        // path is not collinear
        let points: Vec<(f64, f64)> = (0..24)
            .map(|i| {
                let step = (i / 2) as f64 * 10.0;
                if i % 2 == 0 {
                    (step, 0.0)
                } else {
                    (step, 10.0)
                }
            })
            .collect();

        let factor = MousePatternRule.evaluate(&path(&points)).unwrap();
        assert_eq!(factor.score, 0.5);
        assert!(factor.description.contains("Grid-snapping"));
    }

    #[test]
    fn test_straight_and_grid_takes_maximum() {
        // Linear path on the grid: both clauses fire, score is the max
        let points: Vec<(f64, f64)> = (0..25).map(|i| (i as f64 * 10.0, 0.0)).collect();

        let factor = MousePatternRule.evaluate(&path(&points)).unwrap();
        assert_eq!(factor.score, 0.7);
    }

    #[test]
    fn test_natural_curve_does_not_fire() {
        // A parabola-ish sweep with jitter off the grid
        let points: Vec<(f64, f64)> = (0..30)
            .map(|i| {
                let x = 13.0 + i as f64 * 17.3;
                let y = 7.0 + (i as f64 * 0.7).sin() * 80.0 + i as f64 * 3.1;
                (x, y)
            })
            .collect();

        assert!(MousePatternRule.evaluate(&path(&points)).is_none());
    }
}
