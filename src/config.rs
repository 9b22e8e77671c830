//! Client configuration
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. YAML file at `REFNET_CONFIG`, or `./refnet.yaml` when present
//! 3. `REFNET_*` environment variables (a `.env` file is loaded first)

use std::path::{Path, PathBuf};
use std::time::Duration;

use refnet_client::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "refnet.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{name} must be a number of seconds, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("invalid api_base_url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefnetConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub session_file: PathBuf,
    /// Landing page for shared referral links; defaults to `<api_base_url>/register`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_link_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for RefnetConfig {
    fn default() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            api_base_url: "http://localhost:4000".to_string(),
            timeout_secs: 30,
            session_file: home.join(".refnet").join("session.json"),
            referral_link_base: None,
            user_agent: None,
        }
    }
}

impl RefnetConfig {
    /// Load from the process environment and working directory
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let explicit = std::env::var("REFNET_CONFIG").ok().map(PathBuf::from);
        let config = match explicit {
            Some(path) => Self::from_sources(Some(path.as_path()), true, |k| std::env::var(k).ok())?,
            None => Self::from_sources(
                Some(Path::new(DEFAULT_CONFIG_FILE)),
                false,
                |k| std::env::var(k).ok(),
            )?,
        };

        tracing::debug!(api = %config.api_base_url, "configuration loaded");
        Ok(config)
    }

    /// Compose defaults, an optional file and an environment lookup.
    ///
    /// A missing file is an error only when `required` is set.
    pub fn from_sources<F>(file: Option<&Path>, required: bool, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(content) => Self::from_yaml(&content)?,
                Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                    Self::default()
                }
                Err(source) => {
                    return Err(ConfigError::Read {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            },
            None => Self::default(),
        };

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("REFNET_API_URL") {
            self.api_base_url = url;
        }
        if let Some(value) = env("REFNET_TIMEOUT_SECS") {
            self.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "REFNET_TIMEOUT_SECS",
                    value,
                })?;
        }
        if let Some(path) = env("REFNET_SESSION_FILE") {
            self.session_file = PathBuf::from(path);
        }
        if let Some(base) = env("REFNET_REFERRAL_LINK_BASE") {
            self.referral_link_base = Some(base);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.api_base_url.clone(),
                reason: "scheme must be http or https".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        let defaults = ClientSettings::default();
        ClientSettings {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    pub fn referral_link_base(&self) -> String {
        match &self.referral_link_base {
            Some(base) => base.clone(),
            None => format!("{}/register", self.api_base_url.trim_end_matches('/')),
        }
    }
}
