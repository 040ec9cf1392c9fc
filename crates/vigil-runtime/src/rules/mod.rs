//! Behavioral and fingerprint fraud rules
//!
//! Each rule is a pure detector over a session's signal snapshot:
//! no shared state, no I/O, safe to invoke concurrently on different
//! inputs. Rules defend against malformed payloads through the payload
//! extractor and simply decline to fire rather than fail.

mod bot_signature;
mod engine;
mod fingerprint_anomaly;
mod form_interaction;
mod headless_browser;
mod keystroke_dynamics;
mod mouse_pattern;
mod mouse_velocity;
mod session_pattern;
mod stats;
mod typing_speed;

pub use bot_signature::BotSignatureRule;
pub use engine::RuleEngine;
pub use fingerprint_anomaly::FingerprintAnomalyRule;
pub use form_interaction::FormInteractionRule;
pub use headless_browser::HeadlessBrowserRule;
pub use keystroke_dynamics::KeystrokeDynamicsRule;
pub use mouse_pattern::MousePatternRule;
pub use mouse_velocity::MouseVelocityRule;
pub use session_pattern::SessionPatternRule;
pub use typing_speed::TypingSpeedRule;

use vigil_core::{RiskFactor, Signal};

/// A single fraud detection rule
///
/// Returning `None` means the rule did not fire for this snapshot.
pub trait FraudRule: Send + Sync {
    /// Stable identifier reported in emitted risk factors
    fn name(&self) -> &'static str;

    /// Fixed aggregation weight in [0, 1]
    fn weight(&self) -> f64;

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor>;
}

/// The default rule bank, in evaluation order
pub fn default_rules() -> Vec<Box<dyn FraudRule>> {
    vec![
        Box::new(MouseVelocityRule),
        Box::new(MousePatternRule),
        Box::new(KeystrokeDynamicsRule),
        Box::new(TypingSpeedRule),
        Box::new(BotSignatureRule),
        Box::new(HeadlessBrowserRule),
        Box::new(FormInteractionRule),
        Box::new(SessionPatternRule),
        Box::new(FingerprintAnomalyRule),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_order_and_weights() {
        let rules = default_rules();
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();

        assert_eq!(
            names,
            vec![
                "mouse_velocity_anomaly",
                "mouse_pattern_anomaly",
                "keystroke_dynamics_anomaly",
                "typing_speed_anomaly",
                "bot_signature_detected",
                "headless_browser_detected",
                "form_interaction_anomaly",
                "session_pattern_anomaly",
                "fingerprint_anomaly",
            ]
        );

        let weights: Vec<f64> = rules.iter().map(|r| r.weight()).collect();
        assert_eq!(
            weights,
            vec![0.15, 0.1, 0.2, 0.15, 0.25, 0.2, 0.15, 0.1, 0.1]
        );
    }
}
