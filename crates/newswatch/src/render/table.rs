//! CSV rendering of the digest.

use crate::feeds::NewsItem;

const HEADER: &str = "title,url,description,source,date";

/// Render items as CSV with a header row, one row per item.
///
/// Fields containing a comma, quote, or line break are quoted with
/// embedded quotes doubled. Output is deterministic for a given digest.
#[must_use]
pub fn to_csv(items: &[NewsItem]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for item in items {
        let date = item.date.format("%Y-%m-%d").to_string();
        let fields = [
            item.title.as_str(),
            item.url.as_str(),
            item.description.as_str(),
            item.source.as_str(),
            date.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn escape_field(field: &str) -> String {
    let needs_quoting = field
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(title: &str, description: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: "https://example.com/a".to_string(),
            description: description.to_string(),
            source: "Test Feed".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        }
    }

    #[test]
    fn test_header_only_for_empty_digest() {
        assert_eq!(to_csv(&[]), "title,url,description,source,date\n");
    }

    #[test]
    fn test_plain_fields_are_unquoted() {
        let csv = to_csv(&[item("Plain title", "plain description")]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("title,url,description,source,date"));
        assert_eq!(
            lines.next(),
            Some("Plain title,https://example.com/a,plain description,Test Feed,2026-08-06")
        );
    }

    #[test]
    fn test_commas_and_quotes_are_escaped() {
        let csv = to_csv(&[item("Tools, compared", "she said \"wow\"")]);
        assert!(csv.contains("\"Tools, compared\""));
        assert!(csv.contains("\"she said \"\"wow\"\"\""));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let items = vec![item("One", "first"), item("Two, again", "second")];
        assert_eq!(to_csv(&items), to_csv(&items));
    }
}
