// src/services/extractors/netease.rs

//! NetEase (163) news channel.

use super::{Extractor, LinkRule, extract_detail, extract_links};
use crate::models::{Document, Item};

const LIST_RULES: &[LinkRule] = &[LinkRule::all("div.news_list a[href]")];

const TITLE_SELECTORS: &[&str] = &["h1.post_title", "h1", "title"];

pub struct NeteaseExtractor {
    source: String,
}

impl NeteaseExtractor {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

impl Extractor for NeteaseExtractor {
    fn source_name(&self) -> &str {
        &self.source
    }

    fn parse_list(&self, document: &Document) -> Vec<Item> {
        extract_links(document, LIST_RULES, &self.source)
    }

    fn parse_detail(&self, document: &Document) -> Item {
        extract_detail(document, TITLE_SELECTORS, &self.source)
    }

    // The list block mixes articles with channel and topic links.
    fn validate(&self, item: &Item) -> bool {
        item.is_valid() && item.url.contains("/article/")
    }
}
