// src/models/config.rs

//! Application configuration structures.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Document retrieval settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Push channel client settings
    #[serde(default)]
    pub push: PushConfig,

    /// Request surface bind addresses
    #[serde(default)]
    pub server: ServerConfig,

    /// Output format and processor stages for end-to-end runs
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Source registry, in registry order
    #[serde(default = "defaults::sources")]
    pub sources: Vec<SourceConfig>,

    /// Target registry, in registry order
    #[serde(default = "defaults::targets")]
    pub targets: Vec<TargetConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply `NEWSFLOW_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(secs) = lookup("NEWSFLOW_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.fetch.timeout_secs = secs;
        }
        if let Some(limit) = lookup("NEWSFLOW_MAX_CONCURRENCY").and_then(|v| v.parse().ok()) {
            self.fetch.max_concurrency = limit;
        }
        for target in &mut self.targets {
            let key = format!(
                "NEWSFLOW_WEBHOOK_{}",
                target.name.to_uppercase().replace('-', "_")
            );
            if let Some(url) = lookup(&key).filter(|v| !v.trim().is_empty()) {
                target.webhook_url = Some(url);
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.max_concurrency == 0 {
            return Err(AppError::validation("fetch.max_concurrency must be > 0"));
        }
        if self.push.timeout_secs == 0 {
            return Err(AppError::validation("push.timeout_secs must be > 0"));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(AppError::validation("source with empty name"));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate source name: {}",
                    source.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.name.trim().is_empty() {
                return Err(AppError::validation("target with empty name"));
            }
            if !seen.insert(target.name.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate target name: {}",
                    target.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            push: PushConfig::default(),
            server: ServerConfig::default(),
            pipeline: PipelineConfig::default(),
            sources: defaults::sources(),
            targets: defaults::targets(),
        }
    }
}

/// HTTP settings for document retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header; several sources block non-browser agents
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept header
    #[serde(default = "defaults::accept")]
    pub accept: String,

    /// Accept-Language header
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::fetch_timeout")]
    pub timeout_secs: u64,

    /// Default bound on concurrent fetches
    #[serde(default = "defaults::max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::fetch_timeout(),
            max_concurrency: defaults::max_concurrency(),
        }
    }
}

/// HTTP settings for push channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default = "defaults::push_user_agent")]
    pub user_agent: String,

    #[serde(default = "defaults::push_timeout")]
    pub timeout_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::push_user_agent(),
            timeout_secs: defaults::push_timeout(),
        }
    }
}

/// Bind addresses for the two request surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub collector_host: String,

    #[serde(default = "defaults::collector_port")]
    pub collector_port: u16,

    #[serde(default = "defaults::host")]
    pub pusher_host: String,

    #[serde(default = "defaults::pusher_port")]
    pub pusher_port: u16,

    /// Role served when none is given on the command line
    #[serde(default = "defaults::role")]
    pub default_role: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            collector_host: defaults::host(),
            collector_port: defaults::collector_port(),
            pusher_host: defaults::host(),
            pusher_port: defaults::pusher_port(),
            default_role: defaults::role(),
        }
    }
}

/// Settings for `run`: the processor stages to apply and the output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Format kind used when rendering items (markdown, text, plain)
    #[serde(default = "defaults::format")]
    pub format: String,

    /// Processor stage names, applied in order
    #[serde(default)]
    pub processors: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            format: defaults::format(),
            processors: Vec::new(),
        }
    }
}

/// A configured news source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Unique source name
    pub name: String,

    /// Page the item list is extracted from
    pub home_url: String,

    /// Extractor kind; defaults to the source name
    #[serde(default)]
    pub extractor: Option<String>,
}

impl SourceConfig {
    pub fn extractor_kind(&self) -> &str {
        self.extractor.as_deref().unwrap_or(&self.name)
    }
}

/// A configured push target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Unique target name
    pub name: String,

    /// Channel type (wechat, dingtalk, email, qq, custom)
    #[serde(rename = "type", default = "defaults::channel_type")]
    pub channel_type: String,

    /// Webhook URL; a target without one is disabled
    #[serde(default)]
    pub webhook_url: Option<String>,
}

mod defaults {
    use super::{SourceConfig, TargetConfig};

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".into()
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".into()
    }
    pub fn accept_language() -> String {
        "zh-CN,zh;q=0.9,en;q=0.8".into()
    }
    pub fn fetch_timeout() -> u64 {
        30
    }
    pub fn max_concurrency() -> usize {
        10
    }

    // Push defaults
    pub fn push_user_agent() -> String {
        "NewsFlow-Pusher/1.0".into()
    }
    pub fn push_timeout() -> u64 {
        10
    }

    // Server defaults
    pub fn host() -> String {
        "0.0.0.0".into()
    }
    pub fn collector_port() -> u16 {
        23119
    }
    pub fn pusher_port() -> u16 {
        23120
    }
    pub fn role() -> String {
        "pusher".into()
    }

    // Pipeline defaults
    pub fn format() -> String {
        "markdown".into()
    }

    pub fn channel_type() -> String {
        "unknown".into()
    }

    // Registry defaults
    pub fn sources() -> Vec<SourceConfig> {
        vec![
            SourceConfig {
                name: "sina".to_string(),
                home_url: "https://news.sina.com.cn/".to_string(),
                extractor: None,
            },
            SourceConfig {
                name: "163".to_string(),
                home_url: "https://www.163.com/news/".to_string(),
                extractor: None,
            },
            SourceConfig {
                name: "tencent".to_string(),
                home_url: "https://news.qq.com/".to_string(),
                extractor: None,
            },
        ]
    }

    pub fn targets() -> Vec<TargetConfig> {
        vec![TargetConfig {
            name: "wechat_main".to_string(),
            channel_type: "wechat".to_string(),
            webhook_url: None,
        }]
    }
}
