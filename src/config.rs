//! Extension configuration loaded from `~/.config/kisskh/config.toml`.
//!
//! The configuration is built once and handed to
//! [`KissKhExtension`](crate::KissKhExtension) at construction time; nothing
//! mutates it afterwards.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://kisskh.ovh";
pub const DEFAULT_KEY_VERSION: &str = "2.8.10";
pub const DEFAULT_PAGE_SIZE: u32 = 40;

/// Settings for one extension instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Site root used for catalog, search, track and episode endpoints.
    pub base_url: String,
    /// Root for the key endpoints. Falls back to `base_url` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_base_url: Option<String>,
    /// Value sent as `version=` on key requests.
    pub key_version: String,
    /// Items requested per catalog page.
    pub page_size: u32,
    /// Attach `Referer`/`Origin` headers to every playable source.
    pub playback_headers: bool,
    /// User agent for all outbound requests.
    pub user_agent: String,
    /// Whole-request timeout.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key_base_url: None,
            key_version: DEFAULT_KEY_VERSION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            playback_headers: false,
            user_agent: format!("kisskh/{}", crate::VERSION),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ExtensionConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("invalid extension config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. Unlike [`load_config`], a missing file is an error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Site root without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Key endpoint root without a trailing slash.
    pub fn key_base(&self) -> &str {
        self.key_base_url
            .as_deref()
            .unwrap_or(&self.base_url)
            .trim_end_matches('/')
    }

    pub fn validate(&self) -> std::result::Result<(), Error> {
        check_http_url("base_url", &self.base_url)?;
        if let Some(key_base) = &self.key_base_url {
            check_http_url("key_base_url", key_base)?;
        }
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.key_version.trim().is_empty() {
            return Err(Error::Config("key_version must not be blank".to_string()));
        }
        Ok(())
    }
}

fn check_http_url(field: &str, value: &str) -> std::result::Result<(), Error> {
    let parsed =
        Url::parse(value).map_err(|e| Error::Config(format!("{field} `{value}`: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "{field} must use http or https, got `{other}`"
        ))),
    }
}

/// Load the configuration from `~/.config/kisskh/config.toml`.
///
/// Returns defaults if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or validated.
pub fn load_config() -> Result<ExtensionConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(ExtensionConfig::default());
    }
    ExtensionConfig::from_path(&path)
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kisskh")
        .join("config.toml")
}
