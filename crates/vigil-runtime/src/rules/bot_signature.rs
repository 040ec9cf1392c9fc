//! User-agent bot signature detection
//!
//! Checks the reported user agent against known automation framework
//! tokens, then against generic crawler vocabulary.

use super::FraudRule;
use vigil_core::{RiskFactor, Signal, SignalType};

const WEIGHT: f64 = 0.25;

/// Automation frameworks that identify themselves in the user agent
const BOT_TOKENS: &[&str] = &[
    "HeadlessChrome",
    "PhantomJS",
    "Selenium",
    "WebDriver",
    "Puppeteer",
    "Playwright",
    "Nightmare",
    "CasperJS",
    "SlimerJS",
    "Zombie",
    "HtmlUnit",
];

/// Generic crawler vocabulary, weaker evidence than an exact token
const SUSPICIOUS_PATTERNS: &[&str] = &["bot", "crawler", "spider", "scraper", "automation"];

pub struct BotSignatureRule;

impl FraudRule for BotSignatureRule {
    fn name(&self) -> &'static str {
        "bot_signature_detected"
    }

    fn weight(&self) -> f64 {
        WEIGHT
    }

    fn evaluate(&self, signals: &[Signal]) -> Option<RiskFactor> {
        let user_agent = signals
            .iter()
            .find(|s| s.signal_type == SignalType::Device)
            .and_then(|s| s.payload.get_str("userAgent"))?;
        let ua_lower = user_agent.to_lowercase();

        for token in BOT_TOKENS {
            if ua_lower.contains(&token.to_lowercase()) {
                return Some(RiskFactor::new(
                    self.name(),
                    0.95,
                    WEIGHT,
                    format!("Known automation framework in user agent: {token}"),
                ));
            }
        }

        let matched: Vec<&str> = SUSPICIOUS_PATTERNS
            .iter()
            .filter(|pattern| ua_lower.contains(*pattern))
            .copied()
            .collect();
        if !matched.is_empty() {
            return Some(RiskFactor::new(
                self.name(),
                0.7,
                WEIGHT,
                format!("Suspicious user agent pattern: {}", matched.join(", ")),
            ));
        }

        None
    }
}
