//! Keyword-filtered news digest pipeline.
//!
//! This crate provides:
//! - RSS/Atom fetching across a fixed source registry
//! - keyword + English-heuristic relevance filtering
//! - digest aggregation with per-source failure isolation
//! - CSV/HTML rendering and date-stamped output files
//! - optional AI summarization via the Anthropic Messages API
//! - SMTP delivery of the combined digest email

pub mod analysis;
pub mod digest;
pub mod feeds;
pub mod pipeline;
pub mod render;
pub mod storage;

// Re-export main types
pub use analysis::RelevanceFilter;
pub use digest::{EmailConfig, EmailSender, Summarizer};
pub use feeds::{FeedFetcher, FeedSource, FetchFeed, NewsItem};
pub use pipeline::{Digest, DigestPipeline, PipelineConfig};
