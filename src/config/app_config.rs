//! Application configuration loaded from TOML.
//!
//! Each struct implements `Default` with the values in [`super::defaults`],
//! so an absent config file behaves exactly like the built-in settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration shared by the server and the seed binary.
///
/// Load with `AppConfig::load()` which searches:
/// 1. an explicit path (`--config`) or `$VECTORINO_CONFIG`
/// 2. `./vectorino.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote vector store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Seed routine settings
    #[serde(default)]
    pub seed: SeedConfig,

    /// Search page rendering
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order.
    ///
    /// `explicit` takes precedence over `$VECTORINO_CONFIG`. A file that
    /// exists but fails to parse or validate is an error; a missing
    /// explicit file is an error too, since the operator asked for it.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var(defaults::CONFIG_PATH_ENV).ok().map(PathBuf::from);

        if let Some(path) = explicit.map(Path::to_path_buf).or(env_path) {
            let config = Self::load_from_file(&path)?;
            info!(path = %path.display(), collection = %config.store.collection, "Loaded config");
            return Ok(config);
        }

        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!(collection = %config.store.collection, "Loaded config from ./vectorino.toml");
            return Ok(config);
        }

        info!("No vectorino.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Resolve the bind address: CLI flag, then `$VECTORINO_SERVER_ADDR`,
    /// then the config file.
    pub fn server_addr(&self, cli_addr: Option<String>) -> String {
        cli_addr
            .or_else(|| std::env::var(defaults::SERVER_ADDR_ENV).ok())
            .unwrap_or_else(|| self.server.addr.clone())
    }

    /// Validate values for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let collection = &self.store.collection;
        match collection.chars().next() {
            None => errors.push("store.collection must not be empty".to_string()),
            Some(c) if !c.is_ascii_uppercase() => errors.push(format!(
                "store.collection '{collection}' must start with an uppercase letter"
            )),
            Some(_) => {}
        }
        if !collection.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            errors.push(format!(
                "store.collection '{collection}' may only contain letters, digits and '_'"
            ));
        }

        if self.store.result_limit == 0 {
            errors.push("store.result_limit must be > 0".to_string());
        }
        if self.store.vectorizer.trim().is_empty() {
            errors.push("store.vectorizer must not be empty".to_string());
        }
        if self.store.request_timeout_secs == Some(0) {
            errors.push("store.request_timeout_secs must be > 0 when set".to_string());
        }

        let url = &self.seed.dataset_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("seed.dataset_url '{url}' must be an http(s) URL"));
        }

        if self.ui.placeholder_rows == 0 {
            errors.push("ui.placeholder_rows must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),
    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
    #[error("Required environment variable {0} is not set")]
    MissingEnv(&'static str),
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `VECTORINO_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

/// Remote vector store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Collection (Weaviate class) holding the question records
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Maximum records returned per nearText query
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Vectorizer module set on the collection at creation time
    #[serde(default = "default_vectorizer")]
    pub vectorizer: String,

    /// Generative module set on the collection at creation time
    #[serde(default = "default_generative")]
    pub generative: String,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_collection() -> String {
    defaults::COLLECTION_NAME.to_string()
}

const fn default_result_limit() -> usize {
    defaults::RESULT_LIMIT
}

fn default_vectorizer() -> String {
    defaults::VECTORIZER.to_string()
}

fn default_generative() -> String {
    defaults::GENERATIVE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            result_limit: default_result_limit(),
            vectorizer: default_vectorizer(),
            generative: default_generative(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// JSON array of question records fetched by the seed routine
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,
}

fn default_dataset_url() -> String {
    defaults::DATASET_URL.to_string()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            dataset_url: default_dataset_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Skeleton rows shown while results load
    #[serde(default = "default_placeholder_rows")]
    pub placeholder_rows: usize,
}

const fn default_placeholder_rows() -> usize {
    defaults::PLACEHOLDER_ROWS
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder_rows: default_placeholder_rows(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty TOML should parse");
        assert_eq!(config.store.collection, "Question");
        assert_eq!(config.store.result_limit, 4);
        assert_eq!(config.store.vectorizer, "text2vec-openai");
        assert_eq!(config.store.generative, "generative-openai");
        assert_eq!(config.ui.placeholder_rows, 5);
        assert!(config.store.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [store]
            result_limit = 8
            "#,
        )
        .expect("partial TOML should parse");
        assert_eq!(config.store.result_limit, 8);
        assert_eq!(config.store.collection, "Question");
        assert_eq!(config.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = AppConfig::from_toml_str("[store]\nresult_limit = 0\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.contains("result_limit")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_lowercase_collection_rejected() {
        let err = AppConfig::from_toml_str("[store]\ncollection = \"question\"\n").unwrap_err();
        assert!(err.to_string().contains("uppercase"));
    }

    #[test]
    fn test_non_http_dataset_rejected() {
        let err =
            AppConfig::from_toml_str("[seed]\ndataset_url = \"file:///tmp/x.json\"\n").unwrap_err();
        assert!(err.to_string().contains("dataset_url"));
    }

    #[test]
    fn test_unknown_key_is_not_fatal() {
        let config = AppConfig::from_toml_str("[store]\nresult_limt = 3\n").unwrap();
        assert_eq!(config.store.result_limit, 4);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = AppConfig::default();
        config.store.request_timeout_secs = Some(10);
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.store.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\naddr = \"127.0.0.1:9999\"").unwrap();
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:9999");
        assert_eq!(config.server_addr(Some("127.0.0.1:1".to_string())), "127.0.0.1:1");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_, _)));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store\nresult_limit = ").unwrap();
        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        match err {
            ConfigError::Parse(path, _) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
