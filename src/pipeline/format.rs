// src/pipeline/format.rs

//! Text rendering of items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Item;

/// Recognized output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// Title as heading, source as attribution, url as link
    #[default]
    Markdown,
    /// `title (source)` then the url
    Text,
    /// Title, source and url on their own lines
    Plain,
}

impl FormatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Plain => "plain",
        }
    }

    /// Render one item. Fields are trimmed; nothing else is escaped.
    pub fn render(self, item: &Item) -> String {
        let title = item.title.trim();
        let source = item.source_name().trim();
        let url = item.url.trim();
        match self {
            Self::Markdown => format!("# {title}\n> 来源：{source}\n---\n[查看详情]({url})"),
            Self::Text => format!("{title} ({source})\n{url}"),
            Self::Plain => format!("{title}\n{source}\n{url}"),
        }
    }
}

impl FromStr for FormatKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "text" => Ok(Self::Text),
            "plain" => Ok(Self::Plain),
            other => Err(AppError::format(other)),
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render one item in the named format.
pub fn format_item(item: &Item, kind: &str) -> Result<String> {
    Ok(kind.parse::<FormatKind>()?.render(item))
}

/// Render every item in the named format, preserving order.
///
/// An unknown kind fails the whole call before anything is rendered.
pub fn format_batch(items: &[Item], kind: &str) -> Result<Vec<String>> {
    let kind: FormatKind = kind.parse()?;
    Ok(items.iter().map(|item| kind.render(item)).collect())
}
