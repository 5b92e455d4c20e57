//! Digest aggregation - drives the fetcher across all sources.

use std::sync::Arc;
use std::time::Duration;

use crate::feeds::{FeedSource, FetchFeed, NewsItem};

/// Default maximum number of items kept in a digest.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Configuration for a digest run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of items to keep after sorting.
    pub max_results: usize,
    /// Pause between feed fetches. Politeness toward feed servers, not a
    /// correctness requirement; zero disables it.
    pub fetch_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            fetch_delay: Duration::from_millis(750),
        }
    }
}

/// Outcome of one digest run.
#[derive(Debug, Default)]
pub struct Digest {
    /// Accepted items, newest first, at most `max_results` long.
    pub items: Vec<NewsItem>,
    /// Number of sources attempted.
    pub sources_attempted: usize,
    /// Sources that fetched and parsed cleanly.
    pub sources_succeeded: usize,
    /// Sources that failed and were skipped.
    pub sources_failed: usize,
    /// Raw entries examined across all sources.
    pub entries_checked: usize,
    /// One message per failed source.
    pub errors: Vec<String>,
}

impl Digest {
    /// True when no items were gathered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sequential digest aggregator.
pub struct DigestPipeline {
    fetcher: Arc<dyn FetchFeed>,
    config: PipelineConfig,
}

impl DigestPipeline {
    /// Create a pipeline over the given fetch capability.
    #[must_use]
    pub fn new(fetcher: Arc<dyn FetchFeed>, config: PipelineConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch every source in listed order, tolerating per-source failure,
    /// then sort newest-first and truncate to the configured maximum.
    pub async fn collect(&self, sources: &[FeedSource]) -> Digest {
        let mut digest = Digest {
            sources_attempted: sources.len(),
            ..Digest::default()
        };

        for (index, source) in sources.iter().enumerate() {
            println!(
                "Processing feed {}/{}: {}",
                index + 1,
                sources.len(),
                source.name
            );

            match self.fetcher.fetch(source).await {
                Ok(scan) => {
                    digest.sources_succeeded += 1;
                    digest.entries_checked += scan.entries_checked;
                    if scan.items.is_empty() {
                        println!(
                            "✓ Processed {} - no matching articles among {} entries",
                            source.name, scan.entries_checked
                        );
                    } else {
                        println!(
                            "✓ Processed {} - kept {} of {} entries",
                            source.name,
                            scan.items.len(),
                            scan.entries_checked
                        );
                    }
                    digest.items.extend(scan.items);
                }
                Err(e) => {
                    digest.sources_failed += 1;
                    println!("✗ Failed to process {}: {e:#}", source.name);
                    tracing::warn!(source = %source.name, error = %e, "Feed fetch failed");
                    digest.errors.push(format!("{}: {e:#}", source.name));
                }
            }

            if index + 1 < sources.len() && !self.config.fetch_delay.is_zero() {
                tokio::time::sleep(self.config.fetch_delay).await;
            }
        }

        sort_and_limit(&mut digest.items, self.config.max_results);

        tracing::info!(
            attempted = digest.sources_attempted,
            succeeded = digest.sources_succeeded,
            failed = digest.sources_failed,
            checked = digest.entries_checked,
            kept = digest.items.len(),
            "Digest collection complete"
        );

        digest
    }
}

/// Newest first, stable on equal dates, at most `max` items kept.
pub fn sort_and_limit(items: &mut Vec<NewsItem>, max: usize) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items.truncate(max);
}
