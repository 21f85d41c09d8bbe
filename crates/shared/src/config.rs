//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record source configuration.
    #[serde(default)]
    pub source: SourceConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Where budget items and obligations are fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A JSON dataset on disk.
    #[default]
    File,
    /// The upstream REST record service.
    Http,
}

/// Record source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Source kind.
    #[serde(default)]
    pub kind: SourceKind,
    /// Dataset path for the file source.
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    /// Base URL for the HTTP source (e.g. `http://localhost:3001/api`).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout for the HTTP source in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: default_dataset_path(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/records.json")
}

fn default_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Later sources win: `config/default`, `config/{RUN_MODE}`, then
    /// `RAO__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RAO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
