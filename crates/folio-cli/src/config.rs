//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use folio_extractor::AnalysisConfig;
use folio_llm::anthropic::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable read for the API key by default
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Analysis pipeline settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Chat history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(folio_dir()?.join("config.toml"))
    }

    /// Resolve `path`, falling back to the default location.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(CliError::Config("endpoint must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::Config("timeout_secs must be greater than 0".into()));
        }
        self.analysis.validate().map_err(CliError::Config)
    }

    /// The API key: `explicit` if given, else the configured environment variable.
    pub fn api_key(&self, explicit: Option<String>) -> Option<String> {
        explicit
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            settings: Settings::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

/// The `~/.folio` directory.
pub fn folio_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".folio"))
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "https://api.anthropic.com");
        assert_eq!(config.api_key_env, "ANTHROPIC_API_KEY");
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.analysis.context_chunks = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            api_key_env = "FOLIO_KEY"

            [settings]
            color = false

            [analysis]
            chunk_size = 600
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key_env, "FOLIO_KEY");
        assert!(!config.settings.color);
        assert_eq!(config.settings.history_size, 1000);
        assert_eq!(config.analysis.chunk_size, 600);
        assert_eq!(config.analysis.chunk_overlap, 200);
    }

    #[test]
    fn test_partial_call_section() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis.query]\ntemperature = 0.5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analysis.query.temperature, 0.5);
        assert_eq!(config.analysis.query.max_tokens, 1000);
        assert_eq!(config.analysis.query.retry.max_attempts, 1);
        assert_eq!(config.analysis.extraction.max_tokens, 4000);
    }

    #[test]
    fn test_invalid_analysis_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nchunk_size = 100\nchunk_overlap = 100\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = Config::default();
        config.api_key_env = "FOLIO_TEST_KEY_THAT_IS_NOT_SET".into();

        assert_eq!(config.api_key(Some("sk-1".into())).as_deref(), Some("sk-1"));
        assert_eq!(config.api_key(None), None);
        assert_eq!(config.api_key(Some("  ".into())), None);
    }
}
