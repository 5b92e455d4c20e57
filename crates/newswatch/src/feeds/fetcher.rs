//! Feed retrieval and entry normalization.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use feed_rs::parser;

use crate::analysis::RelevanceFilter;

use super::types::{FeedSource, NewsItem};

/// Descriptions longer than this are cut and marked with an ellipsis.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Default per-request timeout for feed retrieval.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("newswatch/", env!("CARGO_PKG_VERSION"));

/// Result of scanning one feed source.
#[derive(Debug, Default)]
pub struct FeedScan {
    /// Items that passed the relevance filter, in original feed order.
    pub items: Vec<NewsItem>,
    /// Number of raw entries examined.
    pub entries_checked: usize,
}

/// Capability to retrieve and filter one feed source.
///
/// The aggregator only depends on this trait, so runs can be driven by
/// stub implementations in tests.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    /// Fetch one source. Any retrieval or parse error fails the whole
    /// per-source attempt; no partial results are returned.
    async fn fetch(&self, source: &FeedSource) -> Result<FeedScan>;
}

/// HTTP-backed feed fetcher.
pub struct FeedFetcher {
    client: reqwest::Client,
    filter: RelevanceFilter,
}

impl FeedFetcher {
    /// Create a fetcher with the default request timeout.
    pub fn new(filter: RelevanceFilter) -> Result<Self> {
        Self::with_timeout(filter, DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a fetcher with an explicit request timeout.
    pub fn with_timeout(filter: RelevanceFilter, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .use_rustls_tls()
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, filter })
    }
}

#[async_trait]
impl FetchFeed for FeedFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<FeedScan> {
        tracing::debug!(name = %source.name, url = %source.url, "Fetching feed");

        let response = self
            .client
            .get(&source.url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", source.url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {status}", source.url);
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read feed body from {}", source.url))?;

        scan_feed(&self.filter, source, &bytes, Local::now().date_naive())
    }
}

/// Parse raw feed bytes and keep the entries the filter accepts.
///
/// Entries without a usable title are skipped outright; entries without a
/// link are dropped by the inclusion check. Descriptions are tag-stripped
/// and truncated only after the filter has seen the original text.
pub fn scan_feed(
    filter: &RelevanceFilter,
    source: &FeedSource,
    bytes: &[u8],
    today: NaiveDate,
) -> Result<FeedScan> {
    let feed = parser::parse(Cursor::new(bytes))
        .with_context(|| format!("failed to parse feed from {}", source.url))?;

    let entries_checked = feed.entries.len();
    let mut items = Vec::new();

    for entry in feed.entries {
        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let url = select_entry_link(&entry);
        let description = select_description(&entry);
        if url.is_empty() || !filter.is_relevant(&title, &description) {
            continue;
        }

        let description = truncate_description(&strip_tags(&description));
        items.push(NewsItem {
            title,
            url,
            description,
            source: source.name.clone(),
            date: entry_date(&entry, today),
        });
    }

    tracing::debug!(
        source = %source.name,
        kept = items.len(),
        checked = entries_checked,
        "Scanned feed"
    );

    Ok(FeedScan {
        items,
        entries_checked,
    })
}

/// Pick the entry link: first `alternate` (or rel-less) link, then any
/// non-empty link, then an http(s) entry id. Empty when none apply.
fn select_entry_link(entry: &feed_rs::model::Entry) -> String {
    for link in &entry.links {
        let href = link.href.trim();
        if href.is_empty() {
            continue;
        }
        let rel = link.rel.as_deref().unwrap_or("");
        if rel.is_empty() || rel.eq_ignore_ascii_case("alternate") {
            return href.to_string();
        }
    }
    if let Some(link) = entry.links.iter().find(|l| !l.href.trim().is_empty()) {
        return link.href.trim().to_string();
    }
    let id = entry.id.trim();
    if id.starts_with("http://") || id.starts_with("https://") {
        return id.to_string();
    }
    String::new()
}

/// First non-empty of summary then content body, else empty.
fn select_description(entry: &feed_rs::model::Entry) -> String {
    if let Some(summary) = &entry.summary {
        if !summary.content.trim().is_empty() {
            return summary.content.clone();
        }
    }
    if let Some(body) = entry.content.as_ref().and_then(|c| c.body.as_ref()) {
        if !body.trim().is_empty() {
            return body.clone();
        }
    }
    String::new()
}

/// Publication date, falling back to the update date and finally to the
/// processing date. The fallback is silent; nothing marks a defaulted date.
fn entry_date(entry: &feed_rs::model::Entry, today: NaiveDate) -> NaiveDate {
    entry
        .published
        .or(entry.updated)
        .map(|d| d.date_naive())
        .unwrap_or(today)
}

/// Remove `<...>` tag-like runs. Not an HTML parser; unbalanced or
/// malformed markup may leak or drop adjacent text.
pub fn strip_tags(input: &str) -> String {
    let tag = regex::Regex::new(r"<[^>]*>").unwrap();
    tag.replace_all(input, "").into_owned()
}

/// Cut to [`MAX_DESCRIPTION_CHARS`] characters plus an ellipsis marker,
/// respecting UTF-8 character boundaries.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_source() -> FeedSource {
        FeedSource::new("Test Feed", "https://example.com/feed")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn rss(items: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Test Feed</title>{items}</channel></rss>"#
        )
        .into_bytes()
    }

    #[test]
    fn test_scan_keeps_matching_entries_in_feed_order() {
        let bytes = rss(
            "<item><title>The new automation platform is here</title>\
             <link>https://example.com/a</link>\
             <description>A deep dive into the platform.</description>\
             <pubDate>Mon, 03 Aug 2026 10:00:00 GMT</pubDate></item>\
             <item><title>The stadium was full for the final</title>\
             <link>https://example.com/b</link>\
             <description>Sports coverage of the match.</description></item>\
             <item><title>Why we automated the reporting workflow</title>\
             <link>https://example.com/c</link>\
             <description>It is a story about tooling.</description></item>",
        );
        let filter = RelevanceFilter::default();
        let scan = scan_feed(&filter, &test_source(), &bytes, today()).unwrap();

        assert_eq!(scan.entries_checked, 3);
        assert_eq!(scan.items.len(), 2);
        assert_eq!(scan.items[0].url, "https://example.com/a");
        assert_eq!(scan.items[1].url, "https://example.com/c");
        assert_eq!(scan.items[0].source, "Test Feed");
        assert_eq!(
            scan.items[0].date,
            NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
        );
    }

    #[test]
    fn test_scan_defaults_missing_date_to_today() {
        let bytes = rss(
            "<item><title>The automation rollout is here</title>\
             <link>https://example.com/a</link>\
             <description>No date on this one.</description></item>",
        );
        let filter = RelevanceFilter::default();
        let scan = scan_feed(&filter, &test_source(), &bytes, today()).unwrap();

        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].date, today());
    }

    #[test]
    fn test_scan_drops_entries_without_link() {
        let bytes = rss(
            "<item><title>The automation rollout is here</title>\
             <description>Interesting but unlinked.</description></item>",
        );
        let filter = RelevanceFilter::default();
        let scan = scan_feed(&filter, &test_source(), &bytes, today()).unwrap();

        assert_eq!(scan.entries_checked, 1);
        assert!(scan.items.is_empty());
    }

    #[test]
    fn test_scan_filters_on_original_description_then_cleans() {
        // Keyword sits inside markup-heavy text; the filter sees the raw
        // form, the stored description is stripped.
        let bytes = rss(
            "<item><title>The report is out</title>\
             <link>https://example.com/a</link>\
             <description>&lt;p&gt;They &lt;b&gt;automated&lt;/b&gt; everything.&lt;/p&gt;</description></item>",
        );
        let filter = RelevanceFilter::default();
        let scan = scan_feed(&filter, &test_source(), &bytes, today()).unwrap();

        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].description, "They automated everything.");
    }

    #[test]
    fn test_scan_rejects_invalid_feed() {
        let filter = RelevanceFilter::default();
        let result = scan_feed(&filter, &test_source(), b"not a feed at all", today());
        assert!(result.is_err());
    }

    #[test]
    fn test_strip_tags_removes_simple_markup() {
        assert_eq!(strip_tags("<p>hello <b>world</b></p>"), "hello world");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_strip_tags_is_approximate_on_malformed_markup() {
        // A dangling `<` with no closing `>` is left in place.
        assert_eq!(strip_tags("a < b and c > d"), "a  d");
        assert_eq!(strip_tags("tail<unclosed"), "tail<unclosed");
    }

    #[test]
    fn test_truncate_short_description_unchanged() {
        let text = "short description";
        assert_eq!(truncate_description(text), text);
    }

    #[test]
    fn test_truncate_exact_limit_unchanged() {
        let text = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(truncate_description(&text), text);
    }

    #[test]
    fn test_truncate_long_description_keeps_200_chars_plus_marker() {
        let text = "y".repeat(MAX_DESCRIPTION_CHARS + 50);
        let truncated = truncate_description(&text);
        assert_eq!(truncated.chars().count(), MAX_DESCRIPTION_CHARS + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_multibyte_boundaries() {
        let text = "é".repeat(MAX_DESCRIPTION_CHARS + 1);
        let truncated = truncate_description(&text);
        assert_eq!(truncated.chars().count(), MAX_DESCRIPTION_CHARS + 3);
    }
}
