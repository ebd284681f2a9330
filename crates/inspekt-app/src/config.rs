//! Configuration management for inspekt
//!
//! Config stored at: ~/.config/inspekt/config.json

use inspekt_infra::{LoginCredentials, RetryPolicy};
use inspekt_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fleet API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Client id for the Basic header of the login call
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Client secret for the Basic header of the login call
    #[serde(default)]
    pub client_secret: String,

    /// Fleet API account
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Local vehicle list (`;` separated)
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    /// Directory for the generated spreadsheet
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Remember label colors for the rest of a run
    #[serde(default = "default_true")]
    pub cache_labels: bool,

    /// Attempts per remote call
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,

    /// Time budget per remote call, including backoff
    #[serde(default = "default_max_elapsed_secs")]
    pub max_elapsed_secs: u64,

    /// First backoff delay, doubled after every failure
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log file, appended to on every run
    #[serde(default = "default_log_file")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive (e.g. "debug", "inspekt_infra=trace")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default summary format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_api_base_url() -> String {
    "https://api.baubuddy.de".to_string()
}

fn default_client_id() -> String {
    "API_Explorer".to_string()
}

fn default_input_file() -> PathBuf {
    PathBuf::from("vehicles.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_max_tries() -> u32 {
    3
}

fn default_max_elapsed_secs() -> u64 {
    60
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("log.txt"))
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            client_id: default_client_id(),
            client_secret: String::new(),
            username: String::new(),
            password: String::new(),
            input_file: default_input_file(),
            output_dir: default_output_dir(),
            cache_labels: true,
            max_tries: default_max_tries(),
            max_elapsed_secs: default_max_elapsed_secs(),
            initial_backoff_ms: default_initial_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            log_file: default_log_file(),
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("inspekt");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_tries: self.max_tries.max(1),
            max_elapsed: Duration::from_secs(self.max_elapsed_secs),
            initial_delay: Duration::from_millis(self.initial_backoff_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Login account; fails when username or password is unset
    pub fn login_credentials(&self) -> Result<LoginCredentials> {
        if self.username.is_empty() {
            return Err(ConfigError::Missing("username").into());
        }
        if self.password.is_empty() {
            return Err(ConfigError::Missing("password").into());
        }
        Ok(LoginCredentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn secret(value: &str) -> &str {
            if value.is_empty() {
                "(not set)"
            } else {
                "********"
            }
        }

        writeln!(f, "Inspekt Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "API base URL:   {}", self.api_base_url)?;
        writeln!(f, "Client id:      {}", self.client_id)?;
        writeln!(f, "Client secret:  {}", secret(&self.client_secret))?;
        writeln!(f, "Username:       {}", self.username)?;
        writeln!(f, "Password:       {}", secret(&self.password))?;
        writeln!(f, "Input file:     {}", self.input_file.display())?;
        writeln!(f, "Output dir:     {}", self.output_dir.display())?;
        writeln!(f, "Cache labels:   {}", self.cache_labels)?;
        writeln!(
            f,
            "Retry:          {} tries, {}s budget, {}ms first backoff",
            self.max_tries, self.max_elapsed_secs, self.initial_backoff_ms
        )?;
        writeln!(f, "Timeout:        {}s", self.request_timeout_secs)?;
        writeln!(
            f,
            "Log file:       {}",
            self.log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "Log level:      {}", self.log_level)?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspekt_types::Error;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"username": "365", "max_tries": 5}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.username, "365");
        assert_eq!(config.max_tries, 5);
        assert_eq!(config.api_base_url, "https://api.baubuddy.de");
        assert!(config.cache_labels);
        assert_eq!(config.input_file, PathBuf::from("vehicles.csv"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            cache_labels: false,
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = Config::default().retry_policy();
        assert_eq!(policy.max_tries, 3);
        assert_eq!(policy.max_elapsed, Duration::from_secs(60));
        assert_eq!(policy.initial_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_login_credentials_require_account() {
        let config = Config::default();
        assert!(config.login_credentials().is_err());

        let config = Config {
            username: "365".to_string(),
            password: "1".to_string(),
            ..Config::default()
        };
        let credentials = config.login_credentials().unwrap();
        assert_eq!(credentials.client_id, "API_Explorer");
    }
}
