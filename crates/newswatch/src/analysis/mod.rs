//! Relevance analysis for feed entries.

mod keywords;
mod relevance;

pub use keywords::DEFAULT_KEYWORDS;
pub use relevance::{english_marker_count, RelevanceFilter, ENGLISH_MARKERS};
