//! Headless browser detection
//!
//! Headless environments leave gaps a real browser does not: absent or
//! degenerate canvas/WebGL/audio fingerprints, software rasterizers,
//! the `navigator.webdriver` flag, and an empty plugin list. The rule
//! reads the first fingerprint and first device signal and takes the
//! strongest firing clause.

use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalPayload, SignalType};

const WEIGHT: f64 = 0.2;
const MIN_CANVAS_LEN: usize = 8;

pub struct HeadlessBrowserRule;

/// Missing, empty, or the literal `"0"` placeholder some SDKs emit
fn fingerprint_absent(payload: &SignalPayload, key: &str) -> bool {
    match payload.get_str(key) {
        Some(value) => value.is_empty() || value == "0",
        None => true,
    }
}

impl FraudRule for HeadlessBrowserRule {
    fn name(&self) -> &'static str {
        "headless_browser_detected"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let fingerprint = signals
            .iter()
            .find(|s| s.signal_type == SignalType::Fingerprint)
            .map(|s| &s.payload);
        let device = signals
            .iter()
            .find(|s| s.signal_type == SignalType::Device)
            .map(|s| &s.payload);

        let mut score: f64 = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        if let Some(fp) = fingerprint {
            let canvas_invalid = fingerprint_absent(fp, "canvas")
                || fp.get_str("canvas").is_some_and(|c| c.len() < MIN_CANVAS_LEN);
            if canvas_invalid {
                score = score.max(0.6);
                reasons.push("Missing/invalid canvas fingerprint".to_string());
            }

            if fingerprint_absent(fp, "webgl") {
                score = score.max(0.5);
                reasons.push("Missing WebGL fingerprint".to_string());
            }

            if let Some(renderer) = fp.get_str("webglRenderer") {
                let software = renderer.contains("SwiftShader")
                    || (renderer.contains("Mesa") && renderer.contains("llvmpipe"));
                if software {
                    score = score.max(0.7);
                    reasons.push(format!("Software renderer detected: {renderer}"));
                }
            }

            if fingerprint_absent(fp, "audio") {
                score = score.max(0.4);
                reasons.push("Missing audio fingerprint".to_string());
            }
        }

        if let Some(dev) = device {
            if dev.get_bool("webdriver", false) {
                score = score.max(0.95);
                reasons.push("navigator.webdriver is true".to_string());
            }

            if dev.get_i64("pluginCount", -1) == 0 {
                score = score.max(0.5);
                reasons.push("No browser plugins detected".to_string());
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

    fn healthy_fingerprint() -> Signal {
        signal(
            SignalType::Fingerprint,
            1_700_000_000_000,
            json!({
                "canvas": "a1b2c3d4e5f6a7b8",
                "webgl": "d4c3b2a1",
                "webglRenderer": "NVIDIA GeForce RTX 3080/PCIe/SSE2",
                "audio": "124.04347527516074",
            }),
        )
    }

    fn healthy_device() -> Signal {
        signal(
            SignalType::Device,
            1_700_000_000_000,
            json!({"webdriver": false, "pluginCount": 5}),
        )
    }

    #[test]
    fn test_no_relevant_signals_is_noop() {
        let signals = vec![signal(SignalType::Scroll, 1_700_000_000_000, json!({}))];
        assert!(HeadlessBrowserRule.evaluate(&signals).is_none());
    }

    #[test]
    fn test_healthy_browser_does_not_fire() {
        let signals = vec![healthy_fingerprint(), healthy_device()];
        assert!(HeadlessBrowserRule.evaluate(&signals).is_none());
    }

    #[test]
    fn test_webdriver_flag_dominates() {
        let signals = vec![
            healthy_fingerprint(),
            signal(
                SignalType::Device,
                1_700_000_000_000,
                json!({"webdriver": true, "pluginCount": 5}),
            ),
        ];

        let factor = HeadlessBrowserRule.evaluate(&signals).unwrap();
        assert_eq!(factor.score, 0.95);
        assert!(factor.description.contains("navigator.webdriver"));
    }

    #[test]
    fn test_degenerate_fingerprint_clauses() {
        // Empty canvas, "0" webgl, SwiftShader renderer, missing audio:
        // the renderer clause's 0.7 is the maximum
        let signals = vec![signal(
            SignalType::Fingerprint,
            1_700_000_000_000,
            json!({
                "canvas": "",
                "webgl": "0",
                "webglRenderer": "Google SwiftShader",
            }),
        )];

        let factor = HeadlessBrowserRule.evaluate(&signals).unwrap();
        assert_eq!(factor.score, 0.7);
        assert!(factor.description.contains("canvas"));
        assert!(factor.description.contains("WebGL"));
        assert!(factor.description.contains("Software renderer"));
        assert!(factor.description.contains("audio"));
    }

    #[test]
    fn test_short_canvas_hash_is_invalid() {
        let signals = vec![signal(
            SignalType::Fingerprint,
            1_700_000_000_000,
            json!({
                "canvas": "abc123",
                "webgl": "d4c3b2a1",
                "webglRenderer": "NVIDIA GeForce RTX 3080",
                "audio": "124.04",
            }),
        )];

        let factor = HeadlessBrowserRule.evaluate(&signals).unwrap();
        assert_eq!(factor.score, 0.6);
        assert!(factor.description.contains("canvas"));
    }

    #[test]
    fn test_mesa_llvmpipe_is_software_renderer() {
        let signals = vec![signal(
            SignalType::Fingerprint,
            1_700_000_000_000,
            json!({
                "canvas": "a1b2c3d4e5f6a7b8",
                "webgl": "d4c3b2a1",
                "webglRenderer": "Mesa/X.org, llvmpipe (LLVM 15.0.7)",
                "audio": "124.04",
            }),
        )];

        let factor = HeadlessBrowserRule.evaluate(&signals).unwrap();
        assert_eq!(factor.score, 0.7);
    }

    #[test]
    fn test_zero_plugins_without_fingerprint_signal() {
        let signals = vec![signal(
            SignalType::Device,
            1_700_000_000_000,
            json!({"webdriver": false, "pluginCount": 0}),
        )];

        let factor = HeadlessBrowserRule.evaluate(&signals).unwrap();
        assert_eq!(factor.score, 0.5);
        assert!(factor.description.contains("plugins"));
    }

    #[test]
    fn test_missing_plugin_count_does_not_fire() {
        let signals = vec![
            healthy_fingerprint(),
            signal(
                SignalType::Device,
                1_700_000_000_000,
                json!({"webdriver": false}),
            ),
        ];
        assert!(HeadlessBrowserRule.evaluate(&signals).is_none());
    }
}
