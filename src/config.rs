//! Client configuration
//!
//! Everything that used to be fixed per process (API key, host, API version,
//! response format) lives in an explicit `OmdbConfig` value handed to the
//! client at construction time.

use crate::query::ResponseFormat;
use std::env;
use thiserror::Error;

/// Default OMDb API host
pub(crate) const DEFAULT_HOST: &str = "http://www.omdbapi.com";

/// Default OMDb API version sent as the `v` parameter
pub(crate) const DEFAULT_VERSION: u32 = 1;

/// Environment variable holding the API key
pub(crate) const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Environment variable overriding the API host
pub(crate) const HOST_ENV: &str = "OMDB_HOST";

/// Errors that can occur while loading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The API key environment variable is not set or empty
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),
}

/// Configuration for talking to the OMDb API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmdbConfig {
    api_key: String,
    host: String,
    version: u32,
    format: ResponseFormat,
}

impl OmdbConfig {
    /// Creates a configuration with the given API key and default host,
    /// version and response format.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: DEFAULT_HOST.to_string(),
            version: DEFAULT_VERSION,
            format: ResponseFormat::Json,
        }
    }

    /// Loads the configuration from `OMDB_API_KEY` and, if set, `OMDB_HOST`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration from a variable lookup. Empty values count as
    /// unset.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let api_key = non_empty(API_KEY_ENV).ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let mut config = Self::new(api_key);
        if let Some(host) = non_empty(HOST_ENV) {
            config = config.with_host(host);
        }

        Ok(config)
    }

    /// Overrides the API host (scheme included, e.g. `https://www.omdbapi.com`).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the API version marker.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Overrides the response format selector.
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_missing_key() {
        assert_eq!(
            OmdbConfig::from_lookup(lookup_from(&[("OMDB_HOST", "https://x.test")])),
            Err(ConfigError::MissingApiKey("OMDB_API_KEY"))
        );
    }

    #[test]
    fn test_from_lookup_empty_key() {
        assert_eq!(
            OmdbConfig::from_lookup(lookup_from(&[("OMDB_API_KEY", "")])),
            Err(ConfigError::MissingApiKey("OMDB_API_KEY"))
        );
    }

    #[test]
    fn test_from_lookup_key_only() {
        let config = OmdbConfig::from_lookup(lookup_from(&[("OMDB_API_KEY", "secret")])).unwrap();
        assert_eq!(config, OmdbConfig::new("secret"));
    }

    #[test]
    fn test_from_lookup_host_override() {
        let config = OmdbConfig::from_lookup(lookup_from(&[
            ("OMDB_API_KEY", "secret"),
            ("OMDB_HOST", "https://x.test"),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), "secret");
        assert_eq!(config.host(), "https://x.test");

        let config = OmdbConfig::from_lookup(lookup_from(&[
            ("OMDB_API_KEY", "secret"),
            ("OMDB_HOST", ""),
        ]))
        .unwrap();
        assert_eq!(config.host(), "http://www.omdbapi.com");
    }

    #[test]
    fn test_defaults() {
        let config = OmdbConfig::new("testapikey");
        assert_eq!(config.api_key(), "testapikey");
        assert_eq!(config.host(), "http://www.omdbapi.com");
        assert_eq!(config.version(), 1);
        assert_eq!(config.format(), ResponseFormat::Json);
    }

    #[test]
    fn test_overrides() {
        let config = OmdbConfig::new("key")
            .with_host("https://example.test")
            .with_version(2)
            .with_format(ResponseFormat::Xml);

        assert_eq!(config.host(), "https://example.test");
        assert_eq!(config.version(), 2);
        assert_eq!(config.format(), ResponseFormat::Xml);
    }
}
