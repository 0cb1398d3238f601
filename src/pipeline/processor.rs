// src/pipeline/processor.rs

//! Ordered transform stages applied between collection and push.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Item;
use crate::pipeline::format::FormatKind;

/// A transform stage over a list of records.
#[async_trait]
pub trait Processor: Send + Sync {
    fn name(&self) -> &str;

    /// Transform the records. May perform I/O.
    async fn process(&self, items: Vec<Item>) -> Result<Vec<Item>>;

    fn validate_config(&self) -> bool {
        true
    }
}

/// Runs stages in insertion order, then renders the result.
pub struct ProcessorChain {
    stages: Vec<Box<dyn Processor>>,
    format: FormatKind,
}

impl Default for ProcessorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            format: FormatKind::default(),
        }
    }

    pub fn add(&mut self, stage: Box<dyn Processor>) -> &mut Self {
        self.stages.push(stage);
        self
    }

    pub fn set_format(&mut self, format: FormatKind) -> &mut Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> FormatKind {
        self.format
    }

    pub fn clear(&mut self) {
        self.stages.clear();
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Whether every stage reports a usable configuration.
    pub fn validate_config(&self) -> bool {
        self.stages.iter().all(|s| s.validate_config())
    }

    /// Feed records through every stage and return them unrendered.
    pub async fn run_with_raw_output(&self, mut items: Vec<Item>) -> Result<Vec<Item>> {
        for stage in &self.stages {
            let before = items.len();
            items = stage.process(items).await?;
            log::debug!("Stage {}: {} -> {} records", stage.name(), before, items.len());
        }
        Ok(items)
    }

    /// Feed records through every stage and render them in the chain's format.
    pub async fn run(&self, items: Vec<Item>) -> Result<Vec<String>> {
        let items = self.run_with_raw_output(items).await?;
        Ok(items.iter().map(|item| self.format.render(item)).collect())
    }
}

/// Builds a processor stage.
pub type ProcessorFactory = fn() -> Box<dyn Processor>;

/// Processor stages keyed by name. Empty unless stages are registered.
#[derive(Debug, Clone, Default)]
pub struct ProcessorRegistry {
    factories: Vec<(String, ProcessorFactory)>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a stage.
    pub fn register(&mut self, name: impl Into<String>, factory: ProcessorFactory) {
        let name = name.into();
        match self.factories.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = factory,
            None => self.factories.push((name, factory)),
        }
    }

    pub fn get(&self, name: &str) -> Option<ProcessorFactory> {
        self.factories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| *factory)
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.factories.clear();
    }

    /// Build a chain from stage names, in order.
    pub fn build_chain(&self, names: &[String], format: FormatKind) -> Result<ProcessorChain> {
        let mut chain = ProcessorChain::new();
        chain.set_format(format);
        for name in names {
            let factory = self
                .get(name)
                .ok_or_else(|| AppError::config(format!("Unknown processor: {name}")))?;
            chain.add(factory());
        }
        Ok(chain)
    }
}
