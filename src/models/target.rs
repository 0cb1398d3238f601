// src/models/target.rs

//! Push target descriptors and the read-only target registry.

use serde::Serialize;

use crate::models::TargetConfig;

/// A named push destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub name: String,
    pub channel_type: String,
    pub webhook_url: Option<String>,
}

impl TargetDescriptor {
    /// A target is enabled iff it has a webhook configured.
    pub fn is_enabled(&self) -> bool {
        self.webhook_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

impl From<&TargetConfig> for TargetDescriptor {
    fn from(config: &TargetConfig) -> Self {
        Self {
            name: config.name.clone(),
            channel_type: config.channel_type.clone(),
            webhook_url: config.webhook_url.clone(),
        }
    }
}

/// Listing entry for `GET /push/targets`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TargetInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub enabled: bool,
}

/// Targets keyed by name, kept in registry order.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<TargetDescriptor>,
}

impl TargetRegistry {
    pub fn new(targets: Vec<TargetDescriptor>) -> Self {
        Self { targets }
    }

    pub fn from_config(configs: &[TargetConfig]) -> Self {
        Self::new(configs.iter().map(TargetDescriptor::from).collect())
    }

    pub fn get(&self, name: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Names of every enabled target, in registry order.
    pub fn enabled_names(&self) -> Vec<String> {
        self.targets
            .iter()
            .filter(|t| t.is_enabled())
            .map(|t| t.name.clone())
            .collect()
    }

    /// Every registered target, enabled or not.
    pub fn infos(&self) -> Vec<TargetInfo> {
        self.targets
            .iter()
            .map(|t| TargetInfo {
                name: t.name.clone(),
                channel_type: t.channel_type.clone(),
                enabled: t.is_enabled(),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetDescriptor> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
