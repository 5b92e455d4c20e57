//! AI digest summarization via the Anthropic Messages API.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

/// Anthropic API endpoint.
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model for digest summaries.
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

/// Cap on summary length.
const MAX_SUMMARY_TOKENS: u32 = 500;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct SummaryRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

/// Produces a short bullet-point summary of a rendered digest.
///
/// Every failure mode (missing key, non-success status, transport error,
/// empty response) surfaces as an error the caller treats as "no summary
/// available"; none of them should abort a digest run.
pub struct Summarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    prompts: Handlebars<'static>,
}

impl Summarizer {
    /// Create a summarizer with an explicit API key.
    pub fn new(api_key: impl Into<String>, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .use_rustls_tls()
            .build()
            .context("failed to build HTTP client")?;

        let mut prompts = Handlebars::new();
        prompts.register_template_string("summary", SUMMARY_TEMPLATE)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model,
            base_url: ANTHROPIC_API_URL.to_string(),
            prompts,
        })
    }

    /// Create from `ANTHROPIC_API_KEY`; absence means no summary this run.
    pub fn from_env(model: String) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable not set")?;
        Self::new(api_key, model)
    }

    /// Set a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Ask the model for a bullet-point summary of the rendered digest.
    pub async fn summarize(&self, digest_html: &str) -> Result<String> {
        let prompt = self.build_prompt(digest_html)?;
        let request = SummaryRequest {
            model: self.model.clone(),
            max_tokens: MAX_SUMMARY_TOKENS,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::info!(model = %self.model, "Requesting digest summary");

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("summary API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                bail!(
                    "summary API error: {} - {}",
                    err.error.error_type,
                    err.error.message
                );
            }
            bail!("summary API error ({status}): {body}");
        }

        let parsed: SummaryResponse = response
            .json()
            .await
            .context("failed to decode summary API response")?;

        let text = parsed
            .content
            .into_iter()
            .find(|block| block.content_type == "text")
            .map(|block| block.text.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            bail!("summary API returned no text content");
        }

        Ok(text)
    }

    fn build_prompt(&self, digest_html: &str) -> Result<String> {
        let prompt = self
            .prompts
            .render("summary", &serde_json::json!({ "html": digest_html }))?;
        Ok(prompt)
    }
}

/// Digest summary prompt template.
const SUMMARY_TEMPLATE: &str = r"Here is an HTML document containing today's news digest.
Provide a concise, straightforward summary of the key trends and important
developments it covers. Focus on the most significant items, avoiding
unnecessary words or fluff. Limit the response to 3-5 key points someone
following this space should know. Return a bullet list and avoid naming
the individual articles.

HTML content:
{{{html}}}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_digest_verbatim() {
        let summarizer = Summarizer::new("test-key", DEFAULT_MODEL.to_string()).unwrap();
        let prompt = summarizer
            .build_prompt("<h2>Feed A</h2><a href=\"https://example.com\">x</a>")
            .unwrap();

        // Raw HTML must survive templating unescaped.
        assert!(prompt.contains("<h2>Feed A</h2>"));
        assert!(prompt.contains("bullet list"));
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = SummaryRequest {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: MAX_SUMMARY_TOKENS,
            messages: vec![ApiMessage {
                role: "user",
                content: "hello".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_error_response_decoding() {
        let body = r#"{"error": {"type": "authentication_error", "message": "invalid x-api-key"}}"#;
        let decoded: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.error.error_type, "authentication_error");
        assert_eq!(decoded.error.message, "invalid x-api-key");
    }

    #[test]
    fn test_response_decoding_picks_text_block() {
        let body = r#"{"content": [{"type": "text", "text": "- point one"}]}"#;
        let decoded: SummaryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.content[0].text, "- point one");
    }
}
