//! # Packrat Configuration
//!
//! Type-safe configuration loading for the Packrat workspace: which storage
//! backend holds the box collection, whether tag suggestions are enabled and
//! against which endpoint, and the default log level.
//!
//! Configuration is resolved in layers: built-in defaults, then the TOML
//! file (an explicit `--config` path or the platform default location), then
//! environment overrides for credentials.
//!
//! ```toml
//! [store]
//! backend = "sheet"
//!
//! [store.sheet]
//! read_url = "https://example.com/feed"
//! write_url = "https://example.com/submit"
//!
//! [suggest]
//! provider = "http"
//!
//! [suggest.http]
//! base_url = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-2.5-flash"
//! ```

#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the suggestion API key from the file.
pub const API_KEY_ENV: &str = "PACKRAT_API_KEY";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The configuration is structurally valid but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which backend persists the box collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Local JSON flat file.
    #[default]
    File,
    /// Remote spreadsheet-backed store.
    Sheet,
}

/// Flat-file backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Path of the JSON collection file. Defaults to
    /// `<platform data dir>/packrat/boxes.json`.
    pub path: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: default_data_file(),
        }
    }
}

/// Spreadsheet backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SheetStoreConfig {
    /// Published JSON feed the collection is read from.
    #[serde(default)]
    pub read_url: Option<String>,

    /// Web-app endpoint the flattened collection is POSTed to.
    #[serde(default)]
    pub write_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Storage section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Flat-file backend settings.
    #[serde(default)]
    pub file: FileStoreConfig,

    /// Spreadsheet backend settings.
    #[serde(default)]
    pub sheet: SheetStoreConfig,
}

/// Which tag-suggestion provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestProvider {
    /// Suggestions disabled; add-item works without credentials.
    #[default]
    None,
    /// HTTP generative-text provider.
    Http,
}

/// HTTP suggestion provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSuggestConfig {
    /// API base URL.
    #[serde(default = "default_suggest_base_url")]
    pub base_url: String,

    /// Model identifier appended to the generate path.
    #[serde(default = "default_suggest_model")]
    pub model: String,

    /// API key. [`API_KEY_ENV`] overrides this value when set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSuggestConfig {
    fn default() -> Self {
        Self {
            base_url: default_suggest_base_url(),
            model: default_suggest_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Tag-suggestion section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SuggestConfig {
    /// Selected provider.
    #[serde(default)]
    pub provider: SuggestProvider,

    /// HTTP provider settings.
    #[serde(default)]
    pub http: HttpSuggestConfig,
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (`off`, `error`, `warn`, `info`, `debug`,
    /// `trace`). CLI flags override this.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PackratConfig {
    /// Storage section.
    #[serde(default)]
    pub store: StoreConfig,

    /// Tag-suggestion section.
    #[serde(default)]
    pub suggest: SuggestConfig,

    /// Logging section.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PackratConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse; the default location is
    /// optional and silently falls back to built-in defaults when absent.
    /// After file resolution, [`API_KEY_ENV`] overrides the suggestion API
    /// key if set and non-empty.
    pub async fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path).await?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path).await?,
                _ => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse one TOML file.
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.suggest.http.api_key = Some(key);
            }
        }
    }

    /// Validate cross-field requirements for the selected backends.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == StoreBackend::Sheet && self.store.sheet.read_url.is_none() {
            return Err(ConfigError::Invalid(
                "store.backend = \"sheet\" requires store.sheet.read_url".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config file location: `<platform config dir>/packrat/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("packrat").join("config.toml"))
}

/// Default collection file: `<platform data dir>/packrat/boxes.json`.
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("packrat")
        .join("boxes.json")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_suggest_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_suggest_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_log_level() -> String {
    "off".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_defaults_when_file_missing() {
        let config = PackratConfig::load(None).await.unwrap();
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.suggest.provider, SuggestProvider::None);
        assert_eq!(config.logging.level, "off");
    }

    #[tokio::test]
    async fn test_parse_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[store]
backend = "sheet"

[store.sheet]
read_url = "https://example.com/feed"
write_url = "https://example.com/submit"
timeout_secs = 5

[suggest]
provider = "http"

[suggest.http]
api_key = "from-file"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = PackratConfig::from_file(file.path()).await.unwrap();
        assert_eq!(config.store.backend, StoreBackend::Sheet);
        assert_eq!(
            config.store.sheet.read_url.as_deref(),
            Some("https://example.com/feed")
        );
        assert_eq!(config.store.sheet.timeout_secs, 5);
        assert_eq!(config.suggest.provider, SuggestProvider::Http);
        assert_eq!(config.suggest.http.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.suggest.http.timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
        config.validate().unwrap();
    }

    #[tokio::test]
    async fn test_explicit_missing_path_errors() {
        let err = PackratConfig::from_file(Path::new("/nonexistent/packrat.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[tokio::test]
    async fn test_parse_error_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store = 12").unwrap();

        let err = PackratConfig::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_sheet_backend_requires_read_url() {
        let mut config = PackratConfig::default();
        config.store.backend = StoreBackend::Sheet;
        assert!(config.validate().is_err());

        config.store.sheet.read_url = Some("https://example.com/feed".to_string());
        assert!(config.validate().is_ok());
    }
}
