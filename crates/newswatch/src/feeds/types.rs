//! Feed data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named feed endpoint, polled once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    /// Human-readable source name, carried into every item.
    pub name: String,
    /// Feed URL (RSS or Atom).
    pub url: String,
}

impl FeedSource {
    /// Create a new feed source.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One accepted article from a feed.
///
/// Every item in a digest passed the relevance filter; title and url are
/// always non-empty, and the description is tag-stripped and truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article title.
    pub title: String,
    /// Article link.
    pub url: String,
    /// Cleaned description, at most 200 characters plus an ellipsis marker.
    pub description: String,
    /// Name of the feed source the item came from.
    pub source: String,
    /// Publication date; the processing date when the feed carried none.
    pub date: NaiveDate,
}
