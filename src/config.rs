//! Configuration handling
//!
//! Configuration is read from `~/.config/content-pages/config.toml`
//! (global) and `content-pages.toml` (project, found by walking up from the
//! current directory, or given explicitly). Project values override global
//! ones key by key; command-line flags and environment variables override
//! both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::StyleTable;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "content-pages.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid TOML: {0}")]
    Parse(String),

    #[error("Missing {0}. Set it in content-pages.toml, the environment, or on the command line.")]
    MissingCredentials(&'static str),
}

/// Delivery API access settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Space identifier
    pub space_id: Option<String>,

    /// Read-only delivery token, sent as a bearer token
    pub delivery_token: Option<String>,

    /// Environment name; omitted from the URL when unset
    pub environment: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            space_id: None,
            delivery_token: None,
            environment: None,
            base_url: "https://cdn.contentful.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl DeliveryConfig {
    pub fn require_space_id(&self) -> Result<&str, ConfigError> {
        self.space_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingCredentials("space id"))
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.delivery_token
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingCredentials("delivery token"))
    }
}

/// Page-level defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Page type used by `page` when `--type` is not given
    pub default_page_type: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            default_page_type: "get-started".to_string(),
        }
    }
}

/// Rich-text style tables per page variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesConfig {
    #[serde(default = "StyleTable::guide")]
    pub guide: StyleTable,

    #[serde(default = "StyleTable::content_page")]
    pub content_page: StyleTable,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            guide: StyleTable::guide(),
            content_page: StyleTable::content_page(),
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub delivery: DeliveryConfig,
    pub pages: PagesConfig,
    pub style: StylesConfig,
}

impl Config {
    /// Loads global config, then the project file (explicit or discovered)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut table = toml::Table::new();

        if let Some(global) = Self::global_config_dir().map(|d| d.join("config.toml")) {
            if global.is_file() {
                merge_tables(&mut table, read_table(&global)?);
            }
        }

        let project = match explicit {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::find_project_file(),
        };

        if let Some(path) = project {
            merge_tables(&mut table, read_table(&path)?);
        }

        let config = toml::Value::Table(table)
            .try_into::<Config>()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "content-pages", "content-pages")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Finds `content-pages.toml` in the current directory or a parent
    pub fn find_project_file() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Applies command-line / environment overrides
    pub fn apply_overrides(&mut self, space_id: Option<String>, delivery_token: Option<String>) {
        if let Some(space_id) = space_id {
            self.delivery.space_id = Some(space_id);
        }
        if let Some(token) = delivery_token {
            self.delivery.delivery_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delivery.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "delivery.timeout_secs must be greater than zero".to_string(),
            ));
        }

        url::Url::parse(&self.delivery.base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "delivery.base_url '{}': {}",
                self.delivery.base_url, e
            ))
        })?;

        if self.pages.default_page_type.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "pages.default_page_type must not be empty".to_string(),
            ));
        }

        for (name, table) in [
            ("guide", &self.style.guide),
            ("content_page", &self.style.content_page),
        ] {
            table
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("style.{}.{}", name, e)))?;
        }

        Ok(())
    }

    /// Copy safe to print: the delivery token is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.delivery.delivery_token.is_some() {
            copy.delivery.delivery_token = Some("********".to_string());
        }
        copy
    }
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::Parse(e.to_string()))
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Deep-merges `overlay` into `base`; overlay wins on conflicts
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let value = match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
                continue;
            }
            (_, value) => value,
        };
        base.insert(key, value);
    }
}
