// src/services/extractors/tencent.rs

//! Tencent news (news.qq.com).

use super::{Extractor, LinkRule, extract_detail, extract_links};
use crate::models::{Document, Item};

const LIST_RULES: &[LinkRule] = &[LinkRule::all("div.list a[href]")];

const TITLE_SELECTORS: &[&str] = &["h1.article-title", "h1", "title"];

pub struct TencentExtractor {
    source: String,
}

impl TencentExtractor {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

impl Extractor for TencentExtractor {
    fn source_name(&self) -> &str {
        &self.source
    }

    fn parse_list(&self, document: &Document) -> Vec<Item> {
        extract_links(document, LIST_RULES, &self.source)
    }

    fn parse_detail(&self, document: &Document) -> Item {
        extract_detail(document, TITLE_SELECTORS, &self.source)
    }
}
