//! Presentation layer: CSV rows and HTML documents for a digest.

mod html;
mod table;

pub use html::{digest_section, document, email_html, email_text, html_escape, SummaryState};
pub use table::to_csv;
