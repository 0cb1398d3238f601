// src/services/extractors/sina.rs

//! Sina news home page.

use super::{Extractor, LinkRule, extract_detail, extract_links};
use crate::models::{Document, Item};

/// Top cards of the main column, then the first headline block.
const LIST_RULES: &[LinkRule] = &[
    LinkRule::first("div.blk_card ul.uni-blk-list.list-a > li > a", 10),
    LinkRule::first("#blk_yw_01 h1[data-client*=headline] > a", 5),
];

const TITLE_SELECTORS: &[&str] = &["h1.main-title", "h1", "title"];

pub struct SinaExtractor {
    source: String,
}

impl SinaExtractor {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

impl Extractor for SinaExtractor {
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

    fn list_page() -> String {
        let cards: String = (0..12)
            .map(|i| format!(r#"<li><a href="https://news.sina.com.cn/c/{i}.shtml">Card {i}</a></li>"#))
            .collect();
        format!(
            r#"<html><body>
            <div class="blk_card"><ul class="uni-blk-list list-a">{cards}</ul></div>
            <div id="blk_yw_01">
                <h1 data-client="headline_1"><a href="//news.sina.com.cn/h/1.shtml">Headline one</a></h1>
                <h1 data-client="other"><a href="https://news.sina.com.cn/h/2.shtml">Not a headline</a></h1>
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_list_caps_cards_and_adds_headlines() {
        let extractor = SinaExtractor::new("sina");
        let items = extractor.parse_list(&Document::new("https://news.sina.com.cn/", list_page()));

        assert_eq!(items.len(), 11);
        assert_eq!(items[0], Item::new("Card 0", "https://news.sina.com.cn/c/0.shtml", "sina"));
        assert_eq!(items[9].title, "Card 9");
        assert_eq!(
            items[10],
            Item::new("Headline one", "https://news.sina.com.cn/h/1.shtml", "sina")
        );
    }

    #[test]
    fn test_parse_detail_falls_back_to_page_title() {
        let extractor = SinaExtractor::new("sina");
        let document = Document::new(
            "https://news.sina.com.cn/c/1.shtml",
            "<html><head><title>Page title</title></head><body><h1>  </h1></body></html>",
        );

        let item = extractor.parse_detail(&document);
        assert_eq!(item, Item::new("Page title", "https://news.sina.com.cn/c/1.shtml", "sina"));
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let extractor = SinaExtractor::new("sina");
        let items = extractor.parse_list(&Document::new("https://news.sina.com.cn/", "<html></html>"));
        assert!(items.is_empty());
    }
}
