//! Feed source registry, retrieval, and entry normalization.

mod fetcher;
mod sources;
mod types;

pub use fetcher::{
    scan_feed, strip_tags, truncate_description, FeedFetcher, FeedScan, FetchFeed,
    DEFAULT_FETCH_TIMEOUT, MAX_DESCRIPTION_CHARS,
};
pub use sources::default_sources;
pub use types::{FeedSource, NewsItem};
