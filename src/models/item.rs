// src/models/item.rs

//! The normalized news record and the fetched document it is extracted from.

use scraper::Html;
use serde::{Deserialize, Serialize};

/// A news item collected from a source.
///
/// Missing fields deserialize as empty strings so that loosely shaped push
/// requests still produce a record (and are rejected later by `is_valid`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Item {
    /// Headline text
    #[serde(default)]
    pub title: String,

    /// Absolute link to the article
    #[serde(default)]
    pub url: String,

    /// Name of the source the item was collected from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Item {
    /// Create an item tagged with its source name.
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: &str) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: Some(source.to_string()),
        }
    }

    /// An item is valid iff both title and url are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }

    /// Source name, or an empty string when untagged.
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }
}

/// A retrieved page: its final URL and raw body.
///
/// The body is kept as text so the document can cross await points; it is
/// parsed into an [`Html`] tree only when an extractor needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub body: String,
}

impl Document {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    /// Parse the body as an HTML document.
    pub fn html(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(Item::new("Title", "https://example.com/1", "sina").is_valid());
        assert!(!Item::new("", "https://example.com/1", "sina").is_valid());
        assert!(!Item::new("Title", "", "sina").is_valid());
    }

    #[test]
    fn test_serialization_omits_missing_source() {
        let item = Item {
            title: "T".to_string(),
            url: "https://example.com".to_string(),
            source: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"title":"T","url":"https://example.com"}"#);
    }

    #[test]
    fn test_deserialize_partial_record() {
        let item: Item = serde_json::from_str(r#"{"title":"only a title"}"#).unwrap();
        assert_eq!(item.title, "only a title");
        assert!(item.url.is_empty());
        assert!(item.source.is_none());
        assert!(!item.is_valid());
    }
}
