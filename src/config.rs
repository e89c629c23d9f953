use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::models::DEFAULT_CATEGORY;

/// User settings from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Symbol printed before amounts.
    pub(crate) currency: String,
    /// Category given to stored expenses that have none.
    pub(crate) fallback_category: String,
    pub(crate) insight: InsightConfig,
    pub(crate) log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct InsightConfig {
    pub(crate) api_key: Option<String>,
    pub(crate) model: String,
    pub(crate) endpoint: String,
    pub(crate) timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub(crate) level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "₹".into(),
            fallback_category: DEFAULT_CATEGORY.into(),
            insight: InsightConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

pub(crate) const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

impl Config {
    /// Load from a TOML file. A missing file gives the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub(crate) fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        if config.fallback_category.trim().is_empty() {
            config.fallback_category = DEFAULT_CATEGORY.into();
        }
        Ok(config)
    }

    /// Apply the API key from the environment, which wins over the file.
    /// Blank keys count as missing.
    pub(crate) fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|var| lookup(var))
            .find(|k| !k.trim().is_empty())
        {
            self.insight.api_key = Some(key);
        }
        if self
            .insight
            .api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            self.insight.api_key = None;
        }
        self
    }
}
