//! Configuration management for scamwatch
//!
//! Settings come from `~/.scamwatch/config.yaml` (or a custom path) and are
//! then overridden by `SCAMWATCH_*` environment variables. The VirusTotal API
//! key is never compiled in.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default VirusTotal v3 API base URL
pub const DEFAULT_SCAN_API_HOST: &str = "https://www.virustotal.com/api/v3";

/// Default scam report endpoint
pub const DEFAULT_REPORT_ENDPOINT: &str = "https://safecheck.up.railway.app/api/report-scam/";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// VirusTotal API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom scan service base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_api_host: Option<String>,

    /// Custom report endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_endpoint: Option<String>,

    /// Request timeout in seconds; unset leaves the transport default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Analysis polling settings
    #[serde(default)]
    pub polling: PollingConfig,
}

/// How long to wait for an analysis and how often to re-check it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between a successful submission and the first result fetch
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,

    /// Delay between fetches while the analysis is still queued
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Total number of fetches before giving up with "still pending"
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_initial_delay_secs() -> u64 {
    15
}

fn default_interval_secs() -> u64 {
    15
}

fn default_max_attempts() -> u32 {
    4
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: default_initial_delay_secs(),
            interval_secs: default_interval_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl PollingConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".scamwatch").join("config.yaml"))
    }

    /// Resolve a custom path or fall back to the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load the file at `path` (or the default path), using defaults when it
    /// does not exist, then apply environment overrides.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply `SCAMWATCH_*` overrides using the given variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("SCAMWATCH_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(host) = get("SCAMWATCH_SCAN_API_HOST") {
            self.scan_api_host = Some(host);
        }
        if let Some(endpoint) = get("SCAMWATCH_REPORT_ENDPOINT") {
            self.report_endpoint = Some(endpoint);
        }
        if let Some(value) = get("SCAMWATCH_POLL_DELAY_SECS") {
            self.polling.initial_delay_secs = parse_number("SCAMWATCH_POLL_DELAY_SECS", &value)?;
        }
        if let Some(value) = get("SCAMWATCH_POLL_INTERVAL_SECS") {
            self.polling.interval_secs = parse_number("SCAMWATCH_POLL_INTERVAL_SECS", &value)?;
        }
        if let Some(value) = get("SCAMWATCH_POLL_MAX_ATTEMPTS") {
            self.polling.max_attempts = parse_number("SCAMWATCH_POLL_MAX_ATTEMPTS", &value)?;
        }

        Ok(())
    }

    /// Validate everything the scan workflow needs before it starts
    pub fn validate_scan_auth(&self) -> Result<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingApiKey.into()),
        }
        if self.polling.max_attempts == 0 {
            return Err(
                ConfigError::Invalid("polling.max_attempts must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }

    pub fn scan_api_host(&self) -> &str {
        self.scan_api_host.as_deref().unwrap_or(DEFAULT_SCAN_API_HOST)
    }

    pub fn report_endpoint(&self) -> &str {
        self.report_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_ENDPOINT)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{} must be a non-negative number, got '{}'", key, value))
            .into()
    })
}
