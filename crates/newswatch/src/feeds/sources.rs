//! Built-in feed source registry.

use super::types::FeedSource;

/// The default registry: general tech press plus automation-industry feeds.
#[must_use]
pub fn default_sources() -> Vec<FeedSource> {
    [
        // General tech press
        ("TechCrunch", "https://techcrunch.com/feed/"),
        ("TechCrunch Enterprise", "https://techcrunch.com/enterprise/feed/"),
        ("VentureBeat", "https://feeds.feedburner.com/venturebeat/SZYF"),
        ("Wired", "https://www.wired.com/feed/rss"),
        (
            "MIT Technology Review",
            "https://www.technologyreview.com/feed/",
        ),
        // Workflow and RPA industry sources
        ("UiPath Blog", "https://www.uipath.com/blog/rss.xml"),
        ("AutomationEdge", "https://automationedge.com/feed"),
        (
            "Digital Workforce",
            "https://digitalworkforce.com/rpa-news/feed/",
        ),
        (
            "Intelligent Automation Network",
            "https://www.intelligentautomation.network/rss/all",
        ),
        (
            "Process Excellence Network",
            "https://www.processexcellencenetwork.com/rss/all",
        ),
        (
            "The Enterprisers Project",
            "https://enterprisersproject.com/taxonomy/term/8271/feed",
        ),
        (
            "SSON Analytics RPA",
            "https://www.sson-analytics.com/taxonomy/term/7066/feed",
        ),
        (
            "Convedo Digital Transformation",
            "https://convedo.com/blog/feed/",
        ),
        ("Sisua Digital", "https://sisuadigital.com/feed"),
        ("Roboyo", "https://roboyo.global/insights/feed/"),
    ]
    .into_iter()
    .map(|(name, url)| FeedSource::new(name, url))
    .collect()
}
