//! SMTP delivery of the digest email.

use anyhow::{Context, Result};
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::config::EmailConfig;

/// Sends one multipart (plain + HTML) message per call over STARTTLS.
pub struct EmailSender {
    config: EmailConfig,
}

impl EmailSender {
    /// Create a sender with the given configuration.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// The configured recipient address.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.config.recipient
    }

    /// Send an email with HTML and plain-text content.
    pub async fn send(&self, subject: &str, html_body: &str, text_body: &str) -> Result<()> {
        let email = self.build_message(subject, html_body, text_body)?;

        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)
                .context("failed to create SMTP transport")?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build();

        mailer
            .send(email)
            .await
            .context("failed to send email via SMTP")?;

        tracing::info!(
            to = %self.config.recipient,
            subject = subject,
            "Email sent"
        );

        Ok(())
    }

    /// Send a fixed probe message to verify the stored configuration.
    pub async fn send_test(&self) -> Result<()> {
        let subject = "Newswatch - Test Email";
        let html_body = "\
<!DOCTYPE html>
<html>
<body>
    <h1>Newswatch</h1>
    <p><strong>Email configuration is working.</strong></p>
    <p>This is a test message; if you are reading it, SMTP delivery is set up correctly.</p>
</body>
</html>
";
        let text_body = "\
Newswatch - Test Email

Email configuration is working.
This is a test message; if you are reading it, SMTP delivery is set up correctly.
";

        self.send(subject, html_body, text_body).await
    }

    fn build_message(&self, subject: &str, html_body: &str, text_body: &str) -> Result<Message> {
        let from: Mailbox = self
            .config
            .username
            .parse()
            .context("invalid sender email address")?;
        let to: Mailbox = self
            .config
            .recipient
            .parse()
            .context("invalid recipient email address")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .context("failed to build email message")
    }
}
