// src/models/source.rs

//! Source descriptors and the read-only source registry.

use crate::models::SourceConfig;

/// A registered source: where its list page lives and which extractor kind
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub name: String,
    pub home_url: String,
    pub extractor_kind: String,
}

impl SourceDescriptor {
    pub fn new(
        name: impl Into<String>,
        home_url: impl Into<String>,
        extractor_kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            home_url: home_url.into(),
            extractor_kind: extractor_kind.into(),
        }
    }
}

/// Sources keyed by name, kept in registry order.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<SourceDescriptor>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<SourceDescriptor>) -> Self {
        Self { sources }
    }

    /// Build the registry from configuration.
    ///
    /// Extractor kinds are kept as names; they are checked against the
    /// extractor registry when the configuration is loaded.
    pub fn from_config(configs: &[SourceConfig]) -> Self {
        let sources = configs
            .iter()
            .map(|config| {
                SourceDescriptor::new(&config.name, &config.home_url, config.extractor_kind())
            })
            .collect();
        Self { sources }
    }

    pub fn get(&self, name: &str) -> Option<&SourceDescriptor> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// All source names in registry order.
    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
