// src/models/mod.rs

//! Domain models for the collection and push pipeline.
//!
//! This module contains the data structures shared by the services,
//! organized by their primary purpose.

mod config;
mod item;
mod result;
mod source;
mod target;

// Re-export all public types
pub use config::{
    Config, FetchConfig, PipelineConfig, PushConfig, ServerConfig, SourceConfig, TargetConfig,
};
pub use item::{Document, Item};
pub use result::{
    BatchOutcome, CollectStatus, CollectionResult, ItemsBySource, PushResult, PushStatus,
    TargetScope,
};
pub use source::{SourceDescriptor, SourceRegistry};
pub use target::{TargetDescriptor, TargetInfo, TargetRegistry};
