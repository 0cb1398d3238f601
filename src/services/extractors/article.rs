// src/services/extractors/article.rs

//! Generic extractor for arbitrary pages: every link is a candidate.

use super::{Extractor, LinkRule, extract_detail, extract_links};
use crate::models::{Document, Item};

const LIST_RULES: &[LinkRule] = &[LinkRule::all("a[href]")];

const TITLE_SELECTORS: &[&str] = &["article h1", "h1", "title"];

pub struct ArticleExtractor {
    source: String,
}

impl ArticleExtractor {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

impl Extractor for ArticleExtractor {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_takes_every_link() {
        let page = r#"<nav><a href="/about">About</a></nav>
            <main><a href="https://blog.example.com/post">Post</a></main>"#;
        let extractor = ArticleExtractor::new("blog");
        let items = extractor.parse_list(&Document::new("https://blog.example.com/", page));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "https://blog.example.com/about");
        assert!(items.iter().all(|i| i.source_name() == "blog"));
    }

    #[test]
    fn test_parse_detail_without_title() {
        let extractor = ArticleExtractor::new("blog");
        let item = extractor.parse_detail(&Document::new("https://blog.example.com/p", "<p>x</p>"));
        assert!(item.title.is_empty());
        assert!(!extractor.validate(&item));
    }
}
