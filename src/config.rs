use std::time::Duration;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::fetch::RetryPolicy;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Listen address (e.g. "127.0.0.1:3000")
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Unix socket path; takes precedence over `listen`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,

    #[serde(default)]
    pub contributions: ContributionsConfig,
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContributionsConfig {
    /// JSON endpoint serving the contributions list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Attempts before the section shows its error state
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff step between attempts, multiplied by the attempt number
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ContributionsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid contributions endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl ContributionsConfig {
    /// Parsed endpoint, or `None` when the section is not configured
    pub fn endpoint_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Ok(None);
        };

        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };

        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Some(url)),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_backoff_ms: self.backoff_ms,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nested keys use a double underscore:
    /// - PORTFOLIO_LISTEN
    /// - PORTFOLIO_SOCKET
    /// - PORTFOLIO_CONTRIBUTIONS__ENDPOINT (or PORTFOLIO_CONTRIBUTIONS_URL)
    /// - PORTFOLIO_CONTRIBUTIONS__MAX_ATTEMPTS
    /// - PORTFOLIO_CONTRIBUTIONS__BACKOFF_MS
    /// - PORTFOLIO_CONTRIBUTIONS__TIMEOUT_SECS
    pub fn load() -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("PORTFOLIO_").split("__"));

        let mut config: Config = figment.extract().map_err(Box::new)?;
        config.apply_env_aliases();

        // Fail at startup rather than on the first page view
        config.contributions.endpoint_url()?;

        Ok(config)
    }

    /// Flat aliases for the nested keys
    fn apply_env_aliases(&mut self) {
        if self.contributions.endpoint.is_none() {
            if let Ok(url) = std::env::var("PORTFOLIO_CONTRIBUTIONS_URL") {
                self.contributions.endpoint = Some(url);
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            socket: None,
            contributions: ContributionsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        Jail::expect_with(|_jail| {
            let config = Config::load().unwrap();
            assert_eq!(config.listen, "127.0.0.1:3000");
            assert!(config.socket.is_none());
            assert!(config.contributions.endpoint.is_none());
            assert_eq!(config.contributions.retry_policy(), RetryPolicy::default());
            assert_eq!(config.contributions.timeout(), Duration::from_secs(10));
            Ok(())
        });
    }

    #[test]
    fn reads_nested_env_vars() {
        Jail::expect_with(|jail| {
            jail.set_env("PORTFOLIO_LISTEN", "0.0.0.0:8080");
            jail.set_env(
                "PORTFOLIO_CONTRIBUTIONS__ENDPOINT",
                "https://api.example.com/contributions",
            );
            jail.set_env("PORTFOLIO_CONTRIBUTIONS__MAX_ATTEMPTS", "5");
            jail.set_env("PORTFOLIO_CONTRIBUTIONS__BACKOFF_MS", "100");

            let config = Config::load().unwrap();
            assert_eq!(config.listen, "0.0.0.0:8080");
            assert_eq!(
                config.contributions.endpoint_url().unwrap().unwrap().as_str(),
                "https://api.example.com/contributions"
            );
            assert_eq!(
                config.contributions.retry_policy(),
                RetryPolicy {
                    max_attempts: 5,
                    base_backoff_ms: 100,
                }
            );
            Ok(())
        });
    }

    #[test]
    fn flat_endpoint_alias() {
        Jail::expect_with(|jail| {
            jail.set_env("PORTFOLIO_CONTRIBUTIONS_URL", "http://localhost:9000/prs");

            let config = Config::load().unwrap();
            assert_eq!(
                config.contributions.endpoint.as_deref(),
                Some("http://localhost:9000/prs")
            );
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_endpoint() {
        Jail::expect_with(|jail| {
            jail.set_env("PORTFOLIO_CONTRIBUTIONS__ENDPOINT", "ftp://example.com/list");

            let err = Config::load().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
            Ok(())
        });
    }
}
