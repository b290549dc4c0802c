use std::env;
use std::time::Duration;

use crate::errors::{ConfigError, HistorianError};

const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8090";
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime environment used by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Configuration of the historian query service.
#[derive(Debug, Clone)]
pub struct HistorianConfig {
    pub environment: Environment,
    pub http_bind: String,
    pub engine_url: Option<String>,
    pub query_timeout: Duration,
    pub log_level: String,
}

impl Default for HistorianConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            http_bind: DEFAULT_HTTP_BIND.to_string(),
            engine_url: None,
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl HistorianConfig {
    /// Loads configuration from `HISTORIAN_*` variables in the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix("HISTORIAN_")
    }

    /// Loads configuration from env vars prefixed with the provided value.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let environment = env::var(key("ENV"))
            .map(|raw| Environment::from_str(&raw))
            .unwrap_or_default();

        let http_bind =
            env::var(key("HTTP_BIND")).unwrap_or_else(|_| DEFAULT_HTTP_BIND.to_string());
        let engine_url = env::var(key("ENGINE_URL"))
            .ok()
            .filter(|value| !value.trim().is_empty());

        let timeout_key = key("QUERY_TIMEOUT_MS");
        let query_timeout = match env::var(&timeout_key) {
            Ok(raw) => {
                let millis = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidEnvVar {
                        key: timeout_key.clone(),
                        value: raw.clone(),
                    })?;
                Duration::from_millis(millis)
            }
            Err(_) => Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
        };

        let log_level =
            env::var(key("LOG_LEVEL")).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            environment,
            http_bind,
            engine_url,
            query_timeout,
            log_level,
        })
    }

    /// Returns the engine base URL, failing when none was configured.
    pub fn require_engine_url(&self) -> Result<&str, ConfigError> {
        self.engine_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("HISTORIAN_ENGINE_URL".into()))
    }

    /// Whether the service is running in production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

/// Helper that loads config and converts to the canonical historian error type.
pub fn load_historian_config() -> Result<HistorianConfig, HistorianError> {
    Ok(HistorianConfig::from_env()?)
}
