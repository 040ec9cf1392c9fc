//! Cross-signal fingerprint consistency checks
//!
//! Compares the device signal against the fingerprint signal for
//! contradictions: timezone disagreement, degenerate screen geometry,
//! and a device language absent from the fingerprinted language list.

use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.1;
const MAX_TIMEZONE_DRIFT_MINUTES: i64 = 60;

pub struct FingerprintAnomalyRule;

impl FraudRule for FingerprintAnomalyRule {
    fn name(&self) -> &'static str {
        "fingerprint_anomaly"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let fingerprint = signals
            .iter()
            .find(|s| s.signal_type == SignalType::Fingerprint)
            .map(|s| &s.payload)?;
        let device = signals
            .iter()
            .find(|s| s.signal_type == SignalType::Device)
            .map(|s| &s.payload)?;

        let mut score: f64 = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        if device.contains_key("timezoneOffset") && fingerprint.contains_key("timezoneOffset") {
            let device_tz = device.get_i64("timezoneOffset", 0);
            let fingerprint_tz = fingerprint.get_i64("timezoneOffset", 0);
            if (device_tz - fingerprint_tz).abs() > MAX_TIMEZONE_DRIFT_MINUTES {
                score = score.max(0.6);
                reasons.push(format!(
                    "Timezone mismatch: device {device_tz} vs fingerprint {fingerprint_tz} minutes"
                ));
            }
        }

        let width = device.get_i64("screenWidth", -1);
        let height = device.get_i64("screenHeight", -1);
        if width == 0 || height == 0 {
            score = score.max(0.7);
            reasons.push("Zero screen dimensions".to_string());
        } else if (width == 800 && height == 600) || (width == 1 && height == 1) {
            score = score.max(0.5);
            reasons.push(format!("Suspicious screen resolution: {width}x{height}"));
        }

        if let (Some(language), Some(languages)) =
            (device.get_str("language"), fingerprint.get_str("languages"))
        {
            let primary = language.split('-').next().unwrap_or(language);
            if !primary.is_empty() && !languages.contains(primary) {
                score = score.max(0.4);
                reasons.push(format!(
                    "Device language {language} absent from fingerprint languages"
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
