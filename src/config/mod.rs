//! Configuration module for the clubdesk client.
//!
//! All configuration is loaded from environment variables (and an optional
//! `.env` file) with sensible defaults.

use std::env;

use crate::errors::ClientError;

/// Default API location of a locally running server.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL all API paths are appended to
    pub api_url: String,
    /// Session token to start with, e.g. exported after `clubdesk login`
    pub api_token: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format (text, json)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let api_url = lookup("CLUBDESK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        reqwest::Url::parse(&api_url).map_err(|e| {
            ClientError::Config(format!("Invalid CLUBDESK_API_URL {:?}: {}", api_url, e))
        })?;

        let api_token = lookup("CLUBDESK_API_TOKEN").filter(|t| !t.trim().is_empty());

        let log_level = lookup("CLUBDESK_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match lookup("CLUBDESK_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ClientError::Config(format!(
                    "Invalid CLUBDESK_LOG_FORMAT {:?} (expected text or json)",
                    other
                )))
            }
        };

        Ok(Self {
            api_url,
            api_token,
            log_level,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.api_token.is_none());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CLUBDESK_API_URL", "https://club.example.org/api"),
            ("CLUBDESK_API_TOKEN", "secret"),
            ("CLUBDESK_LOG_LEVEL", "debug"),
            ("CLUBDESK_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://club.example.org/api");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = Config::from_lookup(lookup(&[("CLUBDESK_API_TOKEN", "  ")])).unwrap();
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("CLUBDESK_API_URL", "::nope")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = Config::from_lookup(lookup(&[("CLUBDESK_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
