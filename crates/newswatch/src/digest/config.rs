//! Email configuration, persisted as a local JSON file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default SMTP host (Gmail).
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default location of the stored configuration.
pub const DEFAULT_CONFIG_FILE: &str = "email_config.json";

/// SMTP credentials and recipient.
///
/// Contains a secret (the password or app password); the file is created
/// once by interactive prompting and reused on later runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_server: String,
    /// SMTP server port.
    pub smtp_port: u16,
    /// Sender address, also the SMTP username.
    pub username: String,
    /// SMTP password or app password.
    pub password: String,
    /// Recipient address.
    pub recipient: String,
}

impl EmailConfig {
    /// Load a stored configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read email config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid email config in {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .with_context(|| format!("failed to write email config to {}", path.display()))?;
        Ok(())
    }

    /// Load the stored configuration, prompting interactively on first use.
    /// Subsequent runs reuse the file without re-prompting.
    pub fn load_or_setup(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "Using existing email configuration");
            return Self::load(path);
        }

        println!("No email configuration found - setting one up.");
        let config = Self::setup_interactive()?;
        config.save(path)?;
        println!("Email configuration saved to {}", path.display());
        Ok(config)
    }

    /// Prompt for every field on the terminal.
    pub fn setup_interactive() -> Result<Self> {
        use dialoguer::{Input, Password};

        let smtp_server: String = Input::new()
            .with_prompt("SMTP server")
            .default(DEFAULT_SMTP_SERVER.to_string())
            .interact_text()?;
        let smtp_port: u16 = Input::new()
            .with_prompt("SMTP port")
            .default(DEFAULT_SMTP_PORT)
            .interact_text()?;
        let username: String = Input::new()
            .with_prompt("Sender email address")
            .interact_text()?;
        let password: String = Password::new()
            .with_prompt("Email password or app password")
            .interact()?;
        let recipient: String = Input::new()
            .with_prompt("Recipient email address")
            .default(username.clone())
            .interact_text()?;

        Ok(Self {
            smtp_server,
            smtp_port,
            username,
            password,
            recipient,
        })
    }
}
