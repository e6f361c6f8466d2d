//! Service configuration, read from environment variables

use std::time::Duration;
use thiserror::Error;

/// Report service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Storefront API base URL (e.g. "http://localhost:8080")
    pub api_base_url: String,
    /// Admin `user_session` cookie value; the order listing requires it
    pub session: Option<String>,
    /// Per-request timeout for storefront calls
    pub fetch_timeout: Duration,
    /// Listen port
    pub port: u16,
    /// Load the first snapshot before serving
    pub refresh_on_start: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            session: None,
            fetch_timeout: Duration::from_secs(30),
            port: 8084,
            refresh_on_start: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Unset or blank
    /// variables fall back to defaults; malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let fetch_timeout = match get("REPORT_FETCH_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse("REPORT_FETCH_TIMEOUT_SECS", &v)?),
            None => defaults.fetch_timeout,
        };
        let port = match get("PORT") {
            Some(v) => parse("PORT", &v)?,
            None => defaults.port,
        };
        let refresh_on_start = match get("REPORT_REFRESH_ON_START") {
            Some(v) => parse_flag("REPORT_REFRESH_ON_START", &v)?,
            None => defaults.refresh_on_start,
        };

        Ok(Self {
            api_base_url: get("STOREFRONT_API_URL").unwrap_or(defaults.api_base_url),
            session: get("STOREFRONT_SESSION"),
            fetch_timeout,
            port,
            refresh_on_start,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { name, value: value.to_string() })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_lookup(|_| None).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("STOREFRONT_API_URL", "https://api.shopprr.test"),
            ("STOREFRONT_SESSION", "admin-123"),
            ("REPORT_FETCH_TIMEOUT_SECS", "5"),
            ("PORT", "9000"),
            ("REPORT_REFRESH_ON_START", "off"),
        ])).unwrap();
        assert_eq!(config.api_base_url, "https://api.shopprr.test");
        assert_eq!(config.session.as_deref(), Some("admin-123"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.port, 9000);
        assert!(!config.refresh_on_start);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = Config::from_lookup(lookup(&[("STOREFRONT_SESSION", "  "), ("PORT", "")])).unwrap();
        assert_eq!(config.session, None);
        assert_eq!(config.port, 8084);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid { name: "PORT", value: "eighty".into() });
        assert!(Config::from_lookup(lookup(&[("REPORT_REFRESH_ON_START", "maybe")])).is_err());
    }
}
