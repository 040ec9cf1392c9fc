//! Server configuration

use serde::{Deserialize, Serialize};
use vigil_runtime::ratelimit::DEFAULT_MAX_REQUESTS_PER_MINUTE;

/// Deployment environment
///
/// Development enables the debug signal-dump endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Rate limit settings (nested under `rate_limit:`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Per-session admits per rolling minute
    #[serde(default = "default_max_requests_per_minute")]
    pub max_requests_per_minute: u32,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Evaluator settings (nested under `evaluator:`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorSettings {
    /// Model version stamped on analyses
    #[serde(default = "default_model_version")]
    pub model_version: String,

    /// Attach the mock ML scorer. Off by default so verdicts stay
    /// deterministic until a real scorer is deployed.
    #[serde(default)]
    pub enable_mock_scorer: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host (127.0.0.1 for localhost only, 0.0.0.0 for all interfaces)
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub rate_limit: RateLimitSettings,

    #[serde(default)]
    pub evaluator: EvaluatorSettings,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_requests_per_minute() -> u32 {
    DEFAULT_MAX_REQUESTS_PER_MINUTE
}

fn default_model_version() -> String {
    vigil_sdk::DEFAULT_MODEL_VERSION.to_string()
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests_per_minute: default_max_requests_per_minute(),
            enabled: true,
        }
    }
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            model_version: default_model_version(),
            enable_mock_scorer: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            environment: Environment::default(),
            rate_limit: RateLimitSettings::default(),
            evaluator: EvaluatorSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional `config/server` file layered
    /// with `VIGIL_`-prefixed environment variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("VIGIL").separator("__"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(_) => {
                tracing::info!("No config file found, using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
