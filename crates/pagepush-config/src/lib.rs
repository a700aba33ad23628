//! Configuration management for pagepush.
//!
//! Parses `pagepush.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.username`
//! - `confluence.keyring_service`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override login username.
    pub username: Option<String>,
    /// Override HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pagepush.toml";

/// Secret store namespace used when none is configured.
pub const DEFAULT_KEYRING_SERVICE: &str = "confluence_script";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence configuration.
    pub confluence: ConfluenceConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Confluence wiki base URL (e.g. `https://example.atlassian.net/wiki`).
    pub base_url: Option<String>,
    /// Login username. Falls back to the OS user when unset.
    pub username: Option<String>,
    /// Secret store namespace for stored passwords.
    pub keyring_service: String,
    /// HTTP timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            keyring_service: DEFAULT_KEYRING_SERVICE.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConfluenceConfig {
    /// Get the validated base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no base URL is set or it has an invalid format.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        let url = self.base_url.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "confluence.base_url required (via --base-url or pagepush.toml)".into(),
            )
        })?;
        require_non_empty(url, "confluence.base_url")?;
        require_http_url(url, "confluence.base_url")?;
        Ok(url)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.base_url`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pagepush.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.confluence.base_url = Some(base_url.clone());
        }
        if let Some(username) = &settings.username {
            self.confluence.username = Some(username.clone());
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.confluence.timeout_secs = timeout_secs;
        }
    }

    /// Validate configuration values.
    ///
    /// A missing base URL is not an error here; commands that talk to
    /// Confluence call [`ConfluenceConfig::require_base_url`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let confluence = &self.confluence;
        if let Some(ref url) = confluence.base_url {
            require_non_empty(url, "confluence.base_url")?;
            require_http_url(url, "confluence.base_url")?;
        }
        if let Some(ref username) = confluence.username {
            require_non_empty(username, "confluence.username")?;
        }
        require_non_empty(&confluence.keyring_service, "confluence.keyring_service")?;
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let confluence = &mut self.confluence;
        if let Some(ref url) = confluence.base_url {
            confluence.base_url = Some(expand::expand_env(url, "confluence.base_url")?);
        }
        if let Some(ref username) = confluence.username {
            confluence.username = Some(expand::expand_env(username, "confluence.username")?);
        }
        confluence.keyring_service =
            expand::expand_env(&confluence.keyring_service, "confluence.keyring_service")?;
        Ok(())
    }
}
