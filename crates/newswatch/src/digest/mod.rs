//! Digest delivery: email configuration, SMTP sending, AI summarization.

mod config;
mod email;
mod summarizer;

pub use config::{EmailConfig, DEFAULT_CONFIG_FILE, DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER};
pub use email::EmailSender;
pub use summarizer::{Summarizer, DEFAULT_MODEL};
