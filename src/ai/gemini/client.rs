use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::ai::GenerationProvider;
use crate::error::ProviderError;
use crate::models::GeminiConfig;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini REST client for `generateContent`, built once per process.
///
/// Makes exactly one POST per call. The API key travels as the `key` query
/// parameter and never in headers or the body.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiHttpClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        Self::with_timeouts(config, CONNECT_TIMEOUT, READ_TIMEOUT)
    }

    pub fn with_timeouts(
        config: &GeminiConfig,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint(),
        })
    }

    /// Configured endpoint, without the key.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(
        &self,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, ProviderError> {
        tracing::info!("Sending request to Gemini API endpoint: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to send request to Gemini: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::from(e.without_url()))?;

        if status.is_client_error() {
            tracing::error!("Gemini API client error (status {}): {}", status, body);
            return Err(ProviderError::ClientError {
                status: status.as_u16(),
                body,
            });
        }

        if status.is_server_error() {
            tracing::error!("Gemini API server error (status {}): {}", status, body);
            return Err(ProviderError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            tracing::error!("Empty response body from Gemini API (status {})", status);
            return Err(ProviderError::EmptyResponseBody {
                status: status.as_u16(),
            });
        }

        serde_json::from_str(trimmed).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            ProviderError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl GenerationProvider for GeminiHttpClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, ProviderError> {
        self.post(request).await
    }
}
