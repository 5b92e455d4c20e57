//! HTML rendering of the digest and the email bodies.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::feeds::NewsItem;

/// Availability of the AI summary when the email is assembled.
#[derive(Debug, Clone, Copy)]
pub enum SummaryState<'a> {
    /// The summary text returned by the model.
    Available(&'a str),
    /// No summary was produced (missing credentials, API failure).
    Unavailable,
    /// Degraded resend after the full email could not be delivered.
    Failed,
}

/// Render the digest section: items grouped under per-source headings in
/// first-seen order. Purely presentational; no filtering or sorting here.
#[must_use]
pub fn digest_section(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return r#"<p class="empty">No matching articles were found today.</p>"#.to_string();
    }

    let mut groups: Vec<(&str, Vec<&NewsItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(source, _)| *source == item.source) {
            Some((_, group)) => group.push(item),
            None => groups.push((item.source.as_str(), vec![item])),
        }
    }

    let mut html = String::new();
    for (source, group) in groups {
        let _ = write!(
            html,
            r#"
    <div class="source">
        <h2>{source}</h2>
        <ul>"#,
            source = html_escape(source),
        );
        for item in group {
            let _ = write!(
                html,
                r#"
            <li>
                <a href="{url}">{title}</a>
                <div class="description">{description}</div>
                <div class="date">{date}</div>
            </li>"#,
                url = html_escape(&item.url),
                title = html_escape(&item.title),
                description = html_escape(&item.description),
                date = item.date.format("%Y-%m-%d"),
            );
        }
        html.push_str("\n        </ul>\n    </div>\n");
    }

    html
}

/// Render the self-contained HTML document written alongside the CSV.
#[must_use]
pub fn document(items: &[NewsItem], generated_at: NaiveDateTime) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }}
        h1 {{ color: #333; }}
        h2 {{ color: #0066cc; border-bottom: 1px solid #ddd; padding-bottom: 10px; }}
        ul {{ list-style-type: none; padding: 0; }}
        li {{ margin-bottom: 15px; }}
        a {{ color: #0066cc; text-decoration: none; font-weight: bold; }}
        .description {{ color: #333; margin: 5px 0; }}
        .date {{ color: #666; font-size: 0.8em; }}
        .empty {{ color: #666; }}
    </style>
</head>
<body>
    <h1>News Digest</h1>
    <p>Generated on {generated}</p>
{digest}
</body>
</html>
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M"),
        digest = digest_section(items),
    )
}

/// Render the HTML email body: date header, summary section (or an
/// explicit placeholder), then the digest section.
#[must_use]
pub fn email_html(date_str: &str, summary: SummaryState<'_>, items: &[NewsItem]) -> String {
    let summary_html = match summary {
        SummaryState::Available(text) => {
            // Preserve the model's bullet lines.
            html_escape(text).replace('\n', "<br>\n")
        }
        SummaryState::Unavailable => "<p>AI summary not available for today.</p>".to_string(),
        SummaryState::Failed => "<p>AI summary failed for this digest.</p>".to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; }}
        h2 {{ color: #0066cc; border-bottom: 1px solid #ddd; padding-bottom: 10px; }}
        ul {{ list-style-type: none; padding: 0; }}
        li {{ margin-bottom: 15px; }}
        a {{ color: #0066cc; text-decoration: none; font-weight: bold; }}
        .summary {{ background-color: #f5f5f5; padding: 15px; border-radius: 8px; margin-bottom: 20px; }}
        .digest {{ margin-top: 30px; }}
        .description {{ color: #333; margin: 5px 0; }}
        .date {{ color: #666; font-size: 0.8em; }}
        .empty {{ color: #666; }}
    </style>
</head>
<body>
    <h1>Daily News Digest</h1>
    <h2>{date}</h2>

    <div class="summary">
        <h3>Today's AI Summary</h3>
        {summary}
    </div>

    <div class="digest">
        <h3>Today's News</h3>
{digest}
    </div>
</body>
</html>
"#,
        date = html_escape(date_str),
        summary = summary_html,
        digest = digest_section(items),
    )
}

/// Plain-text alternative for the email body.
#[must_use]
pub fn email_text(date_str: &str, summary: SummaryState<'_>, items: &[NewsItem]) -> String {
    let mut text = format!("Daily News Digest\n{date_str}\n\n");

    text.push_str("TODAY'S AI SUMMARY\n");
    text.push_str(&"-".repeat(40));
    text.push('\n');
    match summary {
        SummaryState::Available(body) => text.push_str(body),
        SummaryState::Unavailable => text.push_str("AI summary not available for today."),
        SummaryState::Failed => text.push_str("AI summary failed for this digest."),
    }
    text.push_str("\n\n");

    text.push_str("TODAY'S NEWS\n");
    text.push_str(&"-".repeat(40));
    text.push('\n');

    if items.is_empty() {
        text.push_str("No matching articles were found today.\n");
        return text;
    }

    for item in items {
        let _ = write!(
            text,
            "\n{title} ({source}, {date})\n{url}\n{description}\n",
            title = item.title,
            source = item.source,
            date = item.date.format("%Y-%m-%d"),
            url = item.url,
            description = item.description,
        );
    }

    text
}

/// Simple HTML escaping for user content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(title: &str, source: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            description: "A description.".to_string(),
            source: source.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        }
    }

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_groups_items_by_source_in_first_seen_order() {
        let items = vec![item("a", "Feed B"), item("b", "Feed A"), item("c", "Feed B")];
        let html = digest_section(&items);

        let pos_b = html.find("<h2>Feed B</h2>").unwrap();
        let pos_a = html.find("<h2>Feed A</h2>").unwrap();
        assert!(pos_b < pos_a, "first-seen source must come first");
        assert_eq!(html.matches("<h2>Feed B</h2>").count(), 1);
    }

    #[test]
    fn test_empty_digest_renders_explicit_message() {
        let html = digest_section(&[]);
        assert!(html.contains("No matching articles"));

        let doc = document(&[], generated_at());
        assert!(doc.contains("<!DOCTYPE html>"));
        assert!(doc.contains("No matching articles"));
    }

    #[test]
    fn test_document_links_items_and_shows_dates() {
        let doc = document(&[item("a", "Feed A")], generated_at());
        assert!(doc.contains(r#"<a href="https://example.com/a">a</a>"#));
        assert!(doc.contains("2026-08-06"));
        assert!(doc.contains("Generated on 2026-08-06 07:30"));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let mut evil = item("<script>alert(1)</script>", "Feed & Co");
        evil.description = "1 < 2 \"quoted\"".to_string();
        let html = digest_section(&[evil]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Feed &amp; Co"));
        assert!(html.contains("1 &lt; 2 &quot;quoted&quot;"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let items = vec![item("a", "Feed A"), item("b", "Feed B")];
        assert_eq!(
            document(&items, generated_at()),
            document(&items, generated_at())
        );
        assert_eq!(digest_section(&items), digest_section(&items));
    }

    #[test]
    fn test_email_html_carries_summary_or_placeholder() {
        let items = vec![item("a", "Feed A")];

        let with = email_html("Friday, August 6, 2026", SummaryState::Available("- one\n- two"), &items);
        assert!(with.contains("- one<br>"));

        let without = email_html("Friday, August 6, 2026", SummaryState::Unavailable, &items);
        assert!(without.contains("AI summary not available for today."));

        let failed = email_html("Friday, August 6, 2026", SummaryState::Failed, &items);
        assert!(failed.contains("AI summary failed for this digest."));
    }

    #[test]
    fn test_email_text_mirrors_summary_states() {
        let text = email_text("Friday, August 6, 2026", SummaryState::Unavailable, &[]);
        assert!(text.contains("AI summary not available for today."));
        assert!(text.contains("No matching articles"));

        let with = email_text(
            "Friday, August 6, 2026",
            SummaryState::Available("- one"),
            &[item("a", "Feed A")],
        );
        assert!(with.contains("- one"));
        assert!(with.contains("https://example.com/a"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
