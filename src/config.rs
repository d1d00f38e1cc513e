//! Configuration for collection, provider adapters and analysis.
//!
//! Loaded from `config.toml`; every section falls back to defaults for
//! missing fields. API keys may be left out of the file and supplied through
//! `NEWSAPI_KEY`, `GUARDIAN_API_KEY` and `NEWSDATA_API_KEY` instead.

use std::path::{Path, PathBuf};

use newsgraph_core::{AnalysisParams, SourceApi};
use serde::{Deserialize, Serialize};

use crate::error::{NewsGraphError, Result};

/// Accepted range for `collection.days_back`.
pub const DAYS_BACK_RANGE: std::ops::RangeInclusive<u32> = 1..=7;
/// Accepted range for `collection.max_articles`.
pub const MAX_ARTICLES_RANGE: std::ops::RangeInclusive<usize> = 5..=50;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsGraphConfig {
    /// What to collect and how far back.
    pub collection: CollectionConfig,
    /// Per-provider credentials and endpoints.
    pub sources: SourcesConfig,
    /// Relationship threshold and enabled methods.
    pub analysis: AnalysisParams,
}

/// Collection parameters, consumed by the adapters only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Search query sent to every provider and used for relevance filtering.
    pub query: String,
    /// How many days back to search.
    pub days_back: u32,
    /// Articles requested from each provider.
    pub max_articles: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Providers to query, in collection order.
    pub sources: Vec<SourceApi>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            days_back: 3,
            max_articles: 20,
            timeout_seconds: 10,
            sources: SourceApi::all().to_vec(),
        }
    }
}

/// Settings for each provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub newsapi: SourceSettings,
    pub guardian: SourceSettings,
    pub newsdata: SourceSettings,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            newsapi: SourceSettings::with_base_url("https://newsapi.org"),
            guardian: SourceSettings::with_base_url("https://content.guardianapis.com"),
            newsdata: SourceSettings::with_base_url("https://newsdata.io"),
        }
    }
}

impl SourcesConfig {
    /// Settings for `api`.
    pub fn get(&self, api: SourceApi) -> &SourceSettings {
        match api {
            SourceApi::NewsApi => &self.newsapi,
            SourceApi::Guardian => &self.guardian,
            SourceApi::NewsData => &self.newsdata,
        }
    }

    /// Mutable settings for `api`.
    pub fn get_mut(&mut self, api: SourceApi) -> &mut SourceSettings {
        match api {
            SourceApi::NewsApi => &mut self.newsapi,
            SourceApi::Guardian => &mut self.guardian,
            SourceApi::NewsData => &mut self.newsdata,
        }
    }
}

/// Credentials and endpoint for one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// API key. `None` falls back to the provider's environment variable.
    pub api_key: Option<String>,
    /// Scheme and host of the provider API, without a trailing path.
    pub base_url: String,
}

impl SourceSettings {
    fn with_base_url(base_url: &str) -> Self {
        Self {
            api_key: None,
            base_url: base_url.to_owned(),
        }
    }

    /// Resolve the API key from this config or the environment.
    pub fn resolve_api_key(&self, api: SourceApi) -> Option<String> {
        pick_api_key(self.api_key.as_deref(), std::env::var(api_key_env(api)).ok())
    }
}

/// Environment variable holding the API key for `api`.
pub fn api_key_env(api: SourceApi) -> &'static str {
    match api {
        SourceApi::NewsApi => "NEWSAPI_KEY",
        SourceApi::Guardian => "GUARDIAN_API_KEY",
        SourceApi::NewsData => "NEWSDATA_API_KEY",
    }
}

/// Prefer a non-blank configured key, then a non-blank environment value.
fn pick_api_key(configured: Option<&str>, from_env: Option<String>) -> Option<String> {
    configured
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .or_else(|| {
            from_env
                .map(|k| k.trim().to_owned())
                .filter(|k| !k.is_empty())
        })
}

impl NewsGraphConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| NewsGraphError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| NewsGraphError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/newsgraph/config.toml`.
    ///
    /// `NEWSGRAPH_CONFIG_DIR` overrides the directory.
    pub fn default_config_path() -> PathBuf {
        if let Some(dir) = std::env::var_os("NEWSGRAPH_CONFIG_DIR") {
            return PathBuf::from(dir).join("config.toml");
        }
        dirs::config_dir()
            .map(|d| d.join("newsgraph"))
            .unwrap_or_else(|| PathBuf::from("/tmp/newsgraph-config"))
            .join("config.toml")
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `collection.days_back` is within 1..=7
    /// - `collection.max_articles` is within 5..=50
    /// - `collection.timeout_seconds` is greater than 0
    /// - at least one source is enabled
    /// - every enabled source has a parseable `base_url`
    /// - the analysis threshold is strictly between 0 and 1
    pub fn validate(&self) -> Result<()> {
        let c = &self.collection;
        if !DAYS_BACK_RANGE.contains(&c.days_back) {
            return Err(NewsGraphError::Config(format!(
                "days_back must be between 1 and 7, got {}",
                c.days_back
            )));
        }
        if !MAX_ARTICLES_RANGE.contains(&c.max_articles) {
            return Err(NewsGraphError::Config(format!(
                "max_articles must be between 5 and 50, got {}",
                c.max_articles
            )));
        }
        if c.timeout_seconds == 0 {
            return Err(NewsGraphError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if c.sources.is_empty() {
            return Err(NewsGraphError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        for api in &c.sources {
            let base = &self.sources.get(*api).base_url;
            url::Url::parse(base).map_err(|e| {
                NewsGraphError::Config(format!("invalid base_url for {api}: {e}"))
            })?;
        }
        self.analysis.validate()?;
        Ok(())
    }
}
