//! Live adapter for the Gemini text generation API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::MemeError;
use crate::model::{resolve_caption_model, Provider};
use crate::ports::caption_generator::{
    CaptionGenerator, CaptionRequest, CaptionResponse, CompleteFuture,
};

/// Live Gemini caption generator that calls the Google AI API.
pub struct GeminiCaptioner {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl GeminiCaptioner {
    /// Create a captioner for the configured model.
    ///
    /// With `api_key` set to `None` every call fails with
    /// [`MemeError::MissingApiKey`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig, api_key: Option<String>) -> Result<Self, MemeError> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        let model = resolve_caption_model(&config.model);
        let url = format!("{}/{model}:generateContent", config.base_url.trim_end_matches('/'));
        Ok(Self { client, url, api_key })
    }
}

impl CaptionGenerator for GeminiCaptioner {
    fn complete(&self, request: &CaptionRequest) -> CompleteFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let Some(api_key) = self.api_key.as_deref() else {
                return Err(MemeError::MissingApiKey {
                    provider: Provider::Gemini.display_name().into(),
                    env_var: Provider::Gemini.key_env_var().into(),
                });
            };

            let body = serde_json::json!({
                "contents": [{
                    "parts": [{"text": request.prompt}]
                }]
            });

            debug!(url = %self.url, prompt_len = request.prompt.len(), "requesting captions");

            let response = self
                .client
                .post(&self.url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(MemeError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
                MemeError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let text: String = parsed
                .candidates
                .into_iter()
                .next()
                .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
                .unwrap_or_default();

            if text.is_empty() {
                let truncated = if response_text.chars().count() > 500 {
                    format!("{}...", response_text.chars().take(500).collect::<String>())
                } else {
                    response_text.clone()
                };
                return Err(MemeError::Api {
                    status: 200,
                    message: format!("No text in response. Body: {truncated}"),
                });
            }

            debug!(text_len = text.len(), "caption text received");
            Ok(CaptionResponse { text })
        })
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
