//! TOML-based configuration for vizexec.
//!
//! Supports a config file (vizexec.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [server]
//! base_url = "${VIZEXEC_SERVER}"
//! timeout_seconds = 30
//!
//! [poll]
//! interval_ms = 500
//! max_attempts = 60
//!
//! [execution]
//! extended = true
//! remove_date_items = false
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::compile::CompileOptions;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Execution service endpoint.
    pub server: ServerSettings,

    /// Result polling.
    pub poll: PollSettings,

    /// Compilation and execution defaults.
    pub execution: ExecutionSettings,
}

/// Execution service endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base url (supports ${ENV_VAR} expansion).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8443".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ServerSettings {
    /// Base url with environment variables expanded and no trailing slash.
    pub fn resolved_base_url(&self) -> Result<String, SettingsError> {
        let url = expand_env_vars(&self.base_url)?;
        if url.is_empty() {
            return Err(SettingsError::InvalidConfig("server.base_url is empty".to_string()));
        }
        Ok(url.trim_end_matches('/').to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Polling of result urls answered with `202 Accepted`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay between two reads, in milliseconds.
    pub interval_ms: u64,

    /// Reads before giving up.
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            max_attempts: 60,
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Compilation and execution defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecutionSettings {
    /// Read `extendedTabularDataResult` instead of `tabularDataResult`.
    pub extended: bool,

    /// Drop date categories and date filters before executing.
    pub remove_date_items: bool,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `VIZEXEC_CONFIG`
    /// 2. `./vizexec.toml`
    /// 3. `~/.config/vizexec/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("VIZEXEC_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("vizexec.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("vizexec").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Compile options implied by the `[execution]` section.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::default().with_remove_date_items(self.execution.remove_date_items)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A `$` not followed by a name is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, remainder) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], &braced[end + 1..]),
                None => (braced, ""),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], &after[end..])
        };

        if name.is_empty() && !after.starts_with('{') {
            result.push('$');
        } else {
            let value = env::var(name).map_err(|_| SettingsError::MissingEnvVar(name.to_string()))?;
            result.push_str(&value);
        }
        rest = remainder;
    }

    result.push_str(rest);
    Ok(result)
}
