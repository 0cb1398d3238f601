// src/config.rs

//! Configuration loading utilities.
//!
//! Loads the TOML configuration, applies environment overrides and builds
//! the source and target registries shared by the services.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Config, SourceRegistry, TargetRegistry};
use crate::pipeline::FormatKind;
use crate::services::ExtractorRegistry;

/// Load configuration from a TOML file, then apply `NEWSFLOW_*` overrides.
///
/// Falls back to defaults if the file cannot be loaded.
pub fn load_config(path: &Path) -> Config {
    let mut config = Config::load_or_default(path);
    config.apply_env_overrides();
    config
}

/// Load and validate configuration and build both registries.
///
/// Besides [`Config::validate`], this checks the pipeline format and that
/// every source names a shipped extractor kind.
pub fn load_all(path: &Path) -> Result<(Config, SourceRegistry, TargetRegistry)> {
    let config = load_config(path);
    config.validate()?;
    config.pipeline.format.parse::<FormatKind>()?;
    check_extractors(&config, &ExtractorRegistry::builtin())?;

    let sources = SourceRegistry::from_config(&config.sources);
    let targets = TargetRegistry::from_config(&config.targets);
    log::debug!(
        "Loaded {} sources and {} targets from {:?}",
        sources.len(),
        targets.len(),
        path
    );

    Ok((config, sources, targets))
}

/// Every configured source must resolve to a registered extractor kind.
pub fn check_extractors(config: &Config, extractors: &ExtractorRegistry) -> Result<()> {
    for source in &config.sources {
        let kind = source.extractor_kind();
        if extractors.get(kind).is_none() {
            return Err(AppError::config(format!(
                "Unknown extractor '{}' for source {}",
                kind, source.name
            )));
        }
    }
    Ok(())
}
