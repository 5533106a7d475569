use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::GeminiConfig,
    error::{AdcraftError, Result},
    gemini::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
    provider::{ContentRequest, ContentResponse, ModelProvider},
};

/// Google Generative Language REST client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client, refusing missing or placeholder credentials.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.validated_api_key()?.to_string();

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn generate_content(&self, request: ContentRequest) -> Result<ContentResponse> {
        let payload = GenerateContentRequest::from(&request);

        log::info!("Invoking model: {}", request.model);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Request carries {} part(s), system instruction: {}",
                request.parts.len(),
                request.system_instruction.is_some()
            );
        }

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request to {} failed: {}", request.model, e);
                AdcraftError::Request(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdcraftError::Request(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.clone());
            log::error!("Service error code: {}", status.as_u16());
            log::error!("Service error message: {}", message);
            return Err(AdcraftError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AdcraftError::Provider {
                status: status.as_u16(),
                message: format!("unreadable response body: {}", e),
            }
        })?;

        if let Some(reason) = parsed.block_reason() {
            log::warn!("⚠️  Prompt blocked by provider: {}", reason);
            return Err(AdcraftError::EmptyResponse(format!(
                "prompt was blocked ({})",
                reason
            )));
        }

        Ok(parsed.into_content_response())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
