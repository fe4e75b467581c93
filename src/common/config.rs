//! Configuration file handling

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Base URL of the REST API, e.g. `http://localhost:5551`
    ///
    /// The `BASE_URL` environment variable takes precedence.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Path prefix placed between the base URL and each endpoint path
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Extra test parameters handed to every scenario
    #[serde(default)]
    pub parameters: HashMap<String, String>,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Run settings
    #[serde(default)]
    pub run: RunConfig,
}

fn default_url_prefix() -> String {
    crate::rest::constants::URL_PREFIX.to_string()
}

/// HTTP client settings
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("rest-loadtest/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Number of virtual users and iterations per user
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    #[serde(default = "default_vus")]
    pub vus: usize,

    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            vus: default_vus(),
            iterations: default_iterations(),
        }
    }
}

fn default_vus() -> usize {
    1
}
fn default_iterations() -> usize {
    1
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_path(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings under which a run would send no requests
    pub fn validate(&self) -> Result<()> {
        if self.run.vus == 0 {
            return Err(super::Error::Config(
                "run.vus must be at least 1".to_string(),
            ));
        }
        if self.run.iterations == 0 {
            return Err(super::Error::Config(
                "run.iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
