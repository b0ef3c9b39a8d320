//! Live adapter for the Hugging Face Inference API (text-to-image).

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::MemeError;
use crate::model::{resolve_image_model, Provider};
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest, ImageResponse};

/// Live text-to-image generator that calls a hosted diffusion model.
pub struct HuggingFaceGenerator {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HuggingFaceGenerator {
    /// Create a generator for the configured model.
    ///
    /// `api_key` is `None` when no token is configured; every call then
    /// fails with [`MemeError::MissingApiKey`] without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig, api_key: Option<String>) -> Result<Self, MemeError> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        let model = resolve_image_model(&config.model);
        let url = format!("{}/{model}", config.base_url.trim_end_matches('/'));
        Ok(Self { client, url, api_key })
    }
}

impl ImageGenerator for HuggingFaceGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let Some(api_key) = self.api_key.as_deref() else {
                return Err(MemeError::MissingApiKey {
                    provider: Provider::HuggingFace.display_name().into(),
                    env_var: Provider::HuggingFace.key_env_var().into(),
                });
            };

            let body = serde_json::json!({
                "inputs": request.prompt,
                "parameters": {
                    "width": request.width,
                    "height": request.height,
                }
            });

            debug!(
                url = %self.url,
                width = request.width,
                height = request.height,
                "requesting image"
            );

            let response =
                self.client.post(&self.url).bearer_auth(api_key).json(&body).send().await?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await?;
                return Err(MemeError::Api { status: status.as_u16(), message });
            }

            let mime_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let data = response.bytes().await?.to_vec();

            debug!(bytes = data.len(), mime_type = ?mime_type, "image payload received");

            if data.is_empty() {
                return Err(MemeError::Api {
                    status: status.as_u16(),
                    message: "Empty image payload".into(),
                });
            }

            Ok(ImageResponse { data, mime_type })
        })
    }
}
