//! Remote store credentials read from the process environment.

use super::{defaults, ConfigError};

/// Endpoint and API keys for the hosted vector store.
///
/// `Debug` redacts both keys.
#[derive(Clone)]
pub struct Credentials {
    /// Base URL of the Weaviate Cloud cluster, always with a scheme
    pub endpoint: String,
    /// Cluster API key sent as a bearer token
    pub api_key: String,
    /// Key forwarded to the vectorizer and generative modules
    pub openai_api_key: String,
}

impl Credentials {
    pub fn new(endpoint: &str, api_key: &str, openai_api_key: &str) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint),
            api_key: api_key.to_string(),
            openai_api_key: openai_api_key.to_string(),
        }
    }

    /// Read `WCD_URL`, `WCD_API_KEY` and `OPENAI_APIKEY`.
    ///
    /// An unset or blank variable is a fatal configuration error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Credentials::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(key))
        };

        let endpoint = require(defaults::ENDPOINT_ENV)?;
        let api_key = require(defaults::API_KEY_ENV)?;
        let openai_api_key = require(defaults::OPENAI_KEY_ENV)?;
        Ok(Self::new(endpoint.trim(), api_key.trim(), openai_api_key.trim()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .finish()
    }
}

/// Weaviate Cloud hands out bare hostnames; default those to https.
fn normalize_endpoint(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_bare_host_gets_https() {
        let c = Credentials::new("abc.weaviate.network/", "k", "o");
        assert_eq!(c.endpoint, "https://abc.weaviate.network");
    }

    #[test]
    fn test_explicit_scheme_kept() {
        let c = Credentials::new("http://127.0.0.1:8080", "k", "o");
        assert_eq!(c.endpoint, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_all_present() {
        let vars = env(&[
            ("WCD_URL", "cluster.weaviate.cloud"),
            ("WCD_API_KEY", "secret"),
            ("OPENAI_APIKEY", "sk-test"),
        ]);
        let c = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(c.endpoint, "https://cluster.weaviate.cloud");
        assert_eq!(c.api_key, "secret");
        assert_eq!(c.openai_api_key, "sk-test");
    }

    #[test]
    fn test_missing_key_named_in_error() {
        let vars = env(&[("WCD_URL", "cluster"), ("OPENAI_APIKEY", "sk-test")]);
        let err = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("WCD_API_KEY")));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let vars = env(&[("WCD_URL", "  "), ("WCD_API_KEY", "k"), ("OPENAI_APIKEY", "o")]);
        let err = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("WCD_URL")));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let c = Credentials::new("host", "super-secret", "sk-secret");
        let shown = format!("{c:?}");
        assert!(!shown.contains("super-secret"));
        assert!(!shown.contains("sk-secret"));
    }
}
