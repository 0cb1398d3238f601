// src/models/result.rs

//! Aggregate results of a collection run and a push run.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::Item;

/// Overall status of a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectStatus {
    Success,
    NoData,
}

/// Kept items per source, in effective-set order.
///
/// Serializes as a JSON object keyed by source name; deserializing keeps
/// the object's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsBySource(Vec<(String, Vec<Item>)>);

impl ItemsBySource {
    pub fn insert(&mut self, source: impl Into<String>, items: Vec<Item>) {
        let source = source.into();
        match self.0.iter_mut().find(|(name, _)| *name == source) {
            Some((_, existing)) => *existing = items,
            None => self.0.push((source, items)),
        }
    }

    pub fn get(&self, source: &str) -> Option<&[Item]> {
        self.0
            .iter()
            .find(|(name, _)| name == source)
            .map(|(_, items)| items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Item])> {
        self.0.iter().map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Every kept item, sources in order.
    pub fn all_items(&self) -> Vec<Item> {
        self.0.iter().flat_map(|(_, items)| items.iter().cloned()).collect()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ItemsBySource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, items)| (name, items)))
    }
}

impl<'de> Deserialize<'de> for ItemsBySource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SourcesVisitor;

        impl<'de> Visitor<'de> for SourcesVisitor {
            type Value = ItemsBySource;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of source name to items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut by_source = ItemsBySource::default();
                while let Some((name, items)) = map.next_entry::<String, Vec<Item>>()? {
                    by_source.insert(name, items);
                }
                Ok(by_source)
            }
        }

        deserializer.deserialize_map(SourcesVisitor)
    }
}

/// Outcome of one `collect` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionResult {
    pub status: CollectStatus,
    pub total_sources: usize,
    pub items_by_source: ItemsBySource,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl CollectionResult {
    /// Aggregate per-source items and errors.
    pub fn new(total_sources: usize, items_by_source: ItemsBySource, errors: Vec<String>) -> Self {
        let total_items = items_by_source.total();
        let status = if total_items > 0 {
            CollectStatus::Success
        } else {
            CollectStatus::NoData
        };
        Self {
            status,
            total_sources,
            items_by_source,
            total_items,
            errors,
        }
    }
}

/// Overall status of a push run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PushStatus {
    Success,
    Failed,
}

/// How the effective target set was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    /// Expanded from an empty list or the `all` sentinel
    All,
    /// Named targets used verbatim
    Batch,
    /// Explicit override webhook
    Custom,
}

/// Delivery counts for one batch on one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub success: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub fn all_failed(count: usize) -> Self {
        Self {
            success: 0,
            failed: count,
        }
    }
}

/// Outcome of one `push` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushResult {
    pub status: PushStatus,
    pub target_type: TargetScope,
    pub success_count: usize,
    pub failed_count: usize,
}

impl PushResult {
    /// Sum per-target outcomes.
    pub fn from_outcomes(target_type: TargetScope, outcomes: &[BatchOutcome]) -> Self {
        let success_count = outcomes.iter().map(|o| o.success).sum();
        let failed_count = outcomes.iter().map(|o| o.failed).sum();
        let status = if success_count > 0 {
            PushStatus::Success
        } else {
            PushStatus::Failed
        };
        Self {
            status,
            target_type,
            success_count,
            failed_count,
        }
    }
}
