// src/services/collector.rs

//! Collection orchestration across registered sources.
//!
//! Every source in the effective set is handled on its own: an unknown
//! name, a failed fetch or an empty extraction is recorded as an error
//! string and the remaining sources carry on.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, FetchError, Result};
use crate::models::{CollectionResult, Document, Item, ItemsBySource, SourceDescriptor, SourceRegistry};
use crate::services::extractors::{Extractor, ExtractorRegistry};
use crate::services::fetcher::Fetcher;

/// Requesting this name selects every registered source.
pub const ALL_SOURCES: &str = "all";

/// Per-source fetch outcome, resolved before extraction.
enum Fetched<'a> {
    Unknown,
    Failed(FetchError),
    Ready(&'a SourceDescriptor, Document),
}

/// Fetches source home pages and aggregates their extracted items.
#[derive(Debug, Clone)]
pub struct Collector {
    sources: Arc<SourceRegistry>,
    extractors: ExtractorRegistry,
    fetcher: Fetcher,
}

impl Collector {
    /// Build a collector over the shipped extractor kinds.
    pub fn new(sources: Arc<SourceRegistry>, fetcher: Fetcher) -> Self {
        Self {
            sources,
            extractors: ExtractorRegistry::builtin(),
            fetcher,
        }
    }

    /// Replace the extractor registry used to read source pages.
    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Resolve the requested names to the effective source set.
    ///
    /// Empty input or the `all` sentinel selects every registered source in
    /// registry order. Otherwise the names are used exactly as requested,
    /// repeats included.
    pub fn effective_sources(&self, requested: &[String]) -> Vec<String> {
        if requested.is_empty() || requested.iter().any(|name| name == ALL_SOURCES) {
            self.sources.names()
        } else {
            requested.to_vec()
        }
    }

    /// Collect items from the requested sources.
    ///
    /// Home pages are fetched concurrently, at most `concurrency` at a time
    /// (`None` uses the fetcher's default). A repeated name is fetched and
    /// counted once per occurrence; its last outcome is the one kept in
    /// `items_by_source`.
    pub async fn collect(&self, requested: &[String], concurrency: Option<usize>) -> CollectionResult {
        let effective = self.effective_sources(requested);
        let limit = concurrency.unwrap_or_else(|| self.fetcher.default_concurrency());
        log::info!("Collecting from {} sources (concurrency {})", effective.len(), limit);

        let mut pending = Vec::with_capacity(effective.len());
        for name in &effective {
            pending.push(self.fetch_source(name.clone()));
        }
        let fetched: Vec<Fetched<'_>> = stream::iter(pending)
            .buffered(limit.max(1))
            .collect()
            .await;

        let mut items_by_source = ItemsBySource::default();
        let mut errors = Vec::new();

        for (name, outcome) in effective.iter().zip(fetched) {
            let items = match outcome {
                Fetched::Unknown => {
                    log::warn!("Source config not found: {}", name);
                    errors.push(format!("Source config not found: {name}"));
                    Vec::new()
                }
                Fetched::Failed(e) => {
                    log::warn!("Fetch error {}: {}", name, e);
                    errors.push(format!("Fetch error {name}: {e}"));
                    Vec::new()
                }
                Fetched::Ready(source, document) => match self.extract(source, &document) {
                    Some(items) => {
                        log::info!("Collected {} items from {}", items.len(), name);
                        items
                    }
                    None => {
                        log::warn!("No items found from {}", name);
                        errors.push(format!("No items found from {name}"));
                        Vec::new()
                    }
                },
            };
            items_by_source.insert(name.as_str(), items);
        }

        let result = CollectionResult::new(effective.len(), items_by_source, errors);
        log::info!(
            "Collection finished: {} items, {} errors",
            result.total_items,
            result.errors.len()
        );
        result
    }

    /// Fetch one article page and extract it with the source's extractor.
    pub async fn collect_detail(&self, source: &str, url: &str) -> Result<Item> {
        let descriptor = self
            .sources
            .get(source)
            .ok_or_else(|| AppError::config(format!("Source config not found: {source}")))?;
        let extractor = self.extractor(descriptor).ok_or_else(|| {
            AppError::config(format!(
                "Unknown extractor '{}' for source {}",
                descriptor.extractor_kind, source
            ))
        })?;

        let document = self.fetcher.fetch(url).await?;
        Ok(extractor.parse_detail(&document))
    }

    /// Look up a source and fetch its home page.
    ///
    /// A source whose extractor kind is not registered counts as unknown.
    async fn fetch_source(&self, name: String) -> Fetched<'_> {
        let Some(source) = self.sources.get(&name) else {
            return Fetched::Unknown;
        };
        if self.extractors.get(&source.extractor_kind).is_none() {
            log::warn!("No extractor '{}' for source {}", source.extractor_kind, name);
            return Fetched::Unknown;
        }

        match self.fetcher.fetch(&source.home_url).await {
            Ok(document) => Fetched::Ready(source, document),
            Err(e) => Fetched::Failed(e),
        }
    }

    fn extractor(&self, source: &SourceDescriptor) -> Option<Box<dyn Extractor>> {
        self.extractors
            .get(&source.extractor_kind)
            .map(|factory| factory(&source.name))
    }

    /// Run the source's extractor; `None` when it yields no candidates at all.
    fn extract(&self, source: &SourceDescriptor, document: &Document) -> Option<Vec<Item>> {
        let extractor = self.extractor(source)?;
        let candidates = extractor.parse_list(document);
        if candidates.is_empty() {
            return None;
        }

        let total = candidates.len();
        let kept: Vec<Item> = candidates
            .into_iter()
            .filter(|item| extractor.validate(item))
            .collect();
        log::debug!("{}: kept {} of {} candidates", source.name, kept.len(), total);
        Some(kept)
    }
}
