//! News feed types and ticker relevance filtering.

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// One news item as delivered by the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub published: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        published: impl Into<String>,
        summary: impl Into<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            published: published.into(),
            summary: summary.into(),
            link,
        }
    }
}

/// Ordered news feed; upstream delivery order is preserved, never
/// re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFeed {
    pub items: Vec<NewsItem>,
}

impl NewsFeed {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Items mentioning the ticker (case-insensitive substring of title or
/// summary), in original order. Falls back to the full feed when nothing
/// matches; only an empty input yields an empty output.
pub fn relevant_news(feed: &NewsFeed, symbol: &Symbol) -> NewsFeed {
    let needle = symbol.as_str().to_ascii_lowercase();
    let matches: Vec<NewsItem> = feed
        .items
        .iter()
        .filter(|item| {
            item.title.to_ascii_lowercase().contains(&needle)
                || item.summary.to_ascii_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        return feed.clone();
    }
    NewsFeed::new(matches)
}
