//! Client Settings
//!
//! Where the config server lives and how to talk to it. Settings are layered with
//! the `config` crate, lowest to highest:
//!
//! 1. built-in defaults
//! 2. settings file (`--config`, else `$XDG_CONFIG_HOME/scc-bootstrap/config.toml`)
//! 3. `SCC_*` environment variables (`SCC_URL`, `SCC_AUTHORIZATION`,
//!    `SCC_DISABLE_TLS`, `SCC_LOGGING__LEVEL`, ...)

use crate::bootstrap::BootstrapRequest;
use crate::error::BootstrapError;
use crate::fetcher::{FetchPolicy, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_COUNT, DEFAULT_RETRY_WAIT};
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "SCC";

/// Resolved client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Config server environment URL; empty when no server is configured
    #[serde(default)]
    pub url: String,

    /// Authorization header value
    #[serde(default)]
    pub authorization: String,

    #[serde(default)]
    pub disable_tls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    #[serde(default = "default_retry_wait_ms")]
    pub retry_wait_ms: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_retry_count() -> u32 {
    DEFAULT_RETRY_COUNT
}

fn default_retry_wait_ms() -> u64 {
    DEFAULT_RETRY_WAIT.as_millis() as u64
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            authorization: String::new(),
            disable_tls: false,
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_wait_ms: default_retry_wait_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientSettings {
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.timeout_secs == 0 {
            return Err(BootstrapError::Settings(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !self.url.is_empty() && !self.url.starts_with("http://") && !self.url.starts_with("https://")
        {
            return Err(BootstrapError::Settings(format!(
                "url must be an http(s) URL: {}",
                self.url
            )));
        }
        Ok(())
    }

    pub fn policy(&self) -> FetchPolicy {
        FetchPolicy {
            timeout: Duration::from_secs(self.timeout_secs),
            retry_count: self.retry_count,
            retry_wait: Duration::from_millis(self.retry_wait_ms),
            verify_tls: !self.disable_tls,
        }
    }

    pub fn to_request(&self) -> BootstrapRequest {
        BootstrapRequest::new(self.url.clone(), self.authorization.clone()).with_policy(self.policy())
    }

    /// Copy safe to print: the authorization value is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.authorization.is_empty() {
            copy.authorization = "********".to_string();
        }
        copy
    }
}

/// Builds [`ClientSettings`] from defaults, files and environment.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings, using `config_file` in place of the default settings path.
    pub fn load(config_file: Option<&Path>) -> Result<ClientSettings, BootstrapError> {
        let settings: ClientSettings = Self::build(config_file)?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from one file plus environment (no default path lookup).
    pub fn load_from_file(path: &Path) -> Result<ClientSettings, BootstrapError> {
        Self::load(Some(path))
    }

    fn build(config_file: Option<&Path>) -> Result<Config, ConfigError> {
        let mut builder = builder_with_defaults()?;

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                if let Some(path) = default_settings_path().filter(|p| p.exists()) {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder
            .add_source(
                // No try_parsing: SCC_AUTHORIZATION must reach the header verbatim
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("url", "")?
        .set_default("authorization", "")?
        .set_default("disable_tls", false)?
        .set_default("timeout_secs", default_timeout_secs() as i64)?
        .set_default("retry_count", default_retry_count() as i64)?
        .set_default("retry_wait_ms", default_retry_wait_ms() as i64)
}

/// `$XDG_CONFIG_HOME/scc-bootstrap/config.toml` (platform equivalent elsewhere).
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "scc-bootstrap").map(|dirs| dirs.config_dir().join("config.toml"))
}
