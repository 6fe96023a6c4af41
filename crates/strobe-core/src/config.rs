//! Configuration loading for the strobe feed.
//!
//! Configuration is TOML with environment-variable overrides. A blank or
//! missing access key is rejected at load time: it is a provisioning fault,
//! not something a per-load retry can fix.
//!
//! ## Example configuration file
//!
//! ```toml
//! access_key = "your-access-key"
//! api_base_url = "https://api.unsplash.com/"
//! timeout_secs = 20
//! page_size = 10
//! prefetch_distance = 2
//! ```
//!
//! ## File location
//!
//! Default path is the platform config directory, e.g.
//! `~/.config/strobe/config.toml` on Linux. `STROBE_ACCESS_KEY` and
//! `STROBE_API_URL` override the file's values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::feed::FeedConfig;
use crate::{Error, Result};

/// Feed configuration resolved from file and environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote access credential, sent as `client_id` on every request.
    #[serde(default)]
    pub access_key: String,
    /// Base URL of the photo API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Items the remote serves per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Prefetch distance advised to consumers.
    #[serde(default = "default_prefetch_distance")]
    pub prefetch_distance: usize,
}

fn default_api_base_url() -> String {
    "https://api.unsplash.com/".to_string()
}

const fn default_timeout_secs() -> u64 {
    20
}

const fn default_page_size() -> usize {
    10
}

const fn default_prefetch_distance() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            prefetch_distance: default_prefetch_distance(),
        }
    }
}

impl Config {
    /// Loads configuration from the default path, applies environment
    /// overrides, and validates it.
    ///
    /// A missing file is fine as long as the environment supplies the
    /// access key; a present-but-malformed file is an error.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_with(Some(&path))
    }

    /// Loads configuration from an explicit file, applies environment
    /// overrides, and validates it.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::load_with(Some(path))
    }

    fn load_with(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)?;
                toml::from_str(&content)?
            },
            _ => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("STROBE_ACCESS_KEY") {
            self.access_key = key;
        }
        if let Ok(url) = std::env::var("STROBE_API_URL") {
            self.api_base_url = url;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.access_key.trim().is_empty() {
            return Err(Error::Config(
                "access key must be set via the config file or STROBE_ACCESS_KEY".into(),
            ));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url must not be blank".into()));
        }
        Ok(())
    }

    /// Advisory paging parameters for [`FeedConfig`] consumers.
    #[must_use]
    pub const fn feed(&self) -> FeedConfig {
        FeedConfig {
            page_size: self.page_size,
            prefetch_distance: self.prefetch_distance,
        }
    }

    /// Default configuration file path for this platform.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "strobe", "strobe")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
