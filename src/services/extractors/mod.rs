// src/services/extractors/mod.rs

//! Per-source item extraction.
//!
//! Each source kind turns its list page into candidate [`Item`]s using CSS
//! selection rules. Candidates are returned unvalidated; the collector
//! filters them through [`Extractor::validate`].

mod article;
mod netease;
mod sina;
mod tencent;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Document, Item};
use crate::utils::{normalize_whitespace, resolve_url};

pub use article::ArticleExtractor;
pub use netease::NeteaseExtractor;
pub use sina::SinaExtractor;
pub use tencent::TencentExtractor;

/// Source-specific extraction capability.
pub trait Extractor: Send + Sync {
    /// Name the extracted items are tagged with.
    fn source_name(&self) -> &str;

    /// Extract candidate items from a list page.
    fn parse_list(&self, document: &Document) -> Vec<Item>;

    /// Extract a single item from an article page.
    fn parse_detail(&self, document: &Document) -> Item;

    /// Whether a candidate should be kept.
    fn validate(&self, item: &Item) -> bool {
        item.is_valid()
    }
}

/// Builds an extractor for the given source name.
pub type ExtractorFactory = fn(&str) -> Box<dyn Extractor>;

/// Extractor kinds keyed by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ExtractorRegistry {
    factories: Vec<(String, ExtractorFactory)>,
}

impl ExtractorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every shipped extractor kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("sina", |source| Box::new(SinaExtractor::new(source)));
        registry.register("163", |source| Box::new(NeteaseExtractor::new(source)));
        registry.register("tencent", |source| Box::new(TencentExtractor::new(source)));
        registry.register("article", |source| Box::new(ArticleExtractor::new(source)));
        registry
    }

    /// Register or replace an extractor kind.
    pub fn register(&mut self, kind: impl Into<String>, factory: ExtractorFactory) {
        let kind = kind.into();
        match self.factories.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => *existing = factory,
            None => self.factories.push((kind, factory)),
        }
    }

    pub fn get(&self, kind: &str) -> Option<ExtractorFactory> {
        self.factories
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, factory)| *factory)
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.factories.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// A CSS rule selecting anchor elements, optionally capped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinkRule {
    pub selector: &'static str,
    pub limit: Option<usize>,
}

impl LinkRule {
    pub const fn all(selector: &'static str) -> Self {
        Self {
            selector,
            limit: None,
        }
    }

    pub const fn first(selector: &'static str, limit: usize) -> Self {
        Self {
            selector,
            limit: Some(limit),
        }
    }
}

/// Apply link rules in order and build candidates from the matched anchors.
///
/// Relative links are resolved against the document URL; anything that does
/// not end up as an http(s) URL is skipped.
pub(crate) fn extract_links(document: &Document, rules: &[LinkRule], source: &str) -> Vec<Item> {
    let html = document.html();
    let base = Url::parse(&document.url).ok();
    let mut items = Vec::new();

    for rule in rules {
        let selector = match parse_selector(rule.selector) {
            Ok(selector) => selector,
            Err(e) => {
                log::warn!("Skipping rule for {}: {}", source, e);
                continue;
            }
        };

        let anchors = html
            .select(&selector)
            .take(rule.limit.unwrap_or(usize::MAX));
        for anchor in anchors {
            if let Some(item) = anchor_item(&anchor, base.as_ref(), source) {
                items.push(item);
            }
        }
    }

    log::debug!("Extracted {} candidates from {}", items.len(), document.url);
    items
}

fn anchor_item(anchor: &ElementRef<'_>, base: Option<&Url>, source: &str) -> Option<Item> {
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let url = match base {
        Some(base) => resolve_url(base, href),
        None => href.to_string(),
    };
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return None;
    }

    let title = normalize_whitespace(&anchor.text().collect::<String>());
    Some(Item::new(title, url, source))
}

/// Build a detail item from the first selector yielding non-empty text.
pub(crate) fn extract_detail(document: &Document, title_selectors: &[&str], source: &str) -> Item {
    let html = document.html();
    let title = title_selectors
        .iter()
        .filter_map(|s| parse_selector(s).ok())
        .find_map(|selector| first_text(&html, &selector))
        .unwrap_or_default();

    Item::new(title, &document.url, source)
}

fn first_text(html: &Html, selector: &Selector) -> Option<String> {
    html.select(selector)
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Strict;

    impl Extractor for Strict {
        fn source_name(&self) -> &str {
            "strict"
        }
        fn parse_list(&self, _document: &Document) -> Vec<Item> {
            Vec::new()
        }
        fn parse_detail(&self, document: &Document) -> Item {
            Item::new("", &document.url, "strict")
        }
        fn validate(&self, item: &Item) -> bool {
            item.is_valid() && item.url.starts_with("https://")
        }
    }

    #[test]
    fn test_default_validate() {
        let extractor = ArticleExtractor::new("article");
        assert!(extractor.validate(&Item::new("T", "https://a", "article")));
        assert!(!extractor.validate(&Item::new("", "https://a", "article")));
        assert!(!extractor.validate(&Item::new("T", "", "article")));
    }

    #[test]
    fn test_overridden_validate() {
        assert!(!Strict.validate(&Item::new("T", "http://a", "strict")));
        assert!(Strict.validate(&Item::new("T", "https://a", "strict")));
    }

    #[test]
    fn test_builtin_registry() {
        let registry = ExtractorRegistry::builtin();
        assert_eq!(registry.kinds(), vec!["sina", "163", "tencent", "article"]);
        assert!(registry.get("ghost").is_none());

        let extractor = registry.get("tencent").unwrap()("qq-news");
        assert_eq!(extractor.source_name(), "qq-news");
    }

    #[test]
    fn test_register_replaces_kind() {
        let mut registry = ExtractorRegistry::builtin();
        registry.register("sina", |source| Box::new(ArticleExtractor::new(source)));
        assert_eq!(registry.kinds().len(), 4);
    }

    #[test]
    fn test_extract_links_resolves_and_filters() {
        let document = Document::new(
            "https://news.example.com/index.html",
            r##"<div>
                <a href="/a/1.html"> First
                   story </a>
                <a href="https://other.example.com/2">Second</a>
                <a href="javascript:void(0)">Script</a>
                <a href="#top">Top</a>
                <a>No href</a>
            </div>"##,
        );

        let items = extract_links(&document, &[LinkRule::all("a")], "test");
        assert_eq!(
            items,
            vec![
                Item::new("First story", "https://news.example.com/a/1.html", "test"),
                Item::new("Second", "https://other.example.com/2", "test"),
            ]
        );
    }

    #[test]
    fn test_extract_links_respects_limit() {
        let body: String = (0..5)
            .map(|i| format!(r#"<a href="https://x.example.com/{i}">t{i}</a>"#))
            .collect();
        let document = Document::new("https://x.example.com/", body);

        let items = extract_links(&document, &[LinkRule::first("a", 2)], "x");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].url, "https://x.example.com/1");
    }

    #[test]
    fn test_parse_selector() {
        assert!(parse_selector("div.class > a").is_ok());
        assert!(parse_selector("[[invalid").is_err());
    }
}
