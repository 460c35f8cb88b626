//! Image description orchestration.
//!
//! Runs validation, request building, the provider call and response
//! interpretation in order, failing fast at each stage, and renders the
//! interpreted outcome as the text returned to callers.

use crate::ai::gemini::request::build as build_request;
use crate::ai::gemini::{interpret, BuildError, Outcome};
use crate::ai::{GeminiHttpClient, GenerationProvider};
use crate::models::{DescriptionRequest, GeminiConfig, UploadedAsset};
use crate::validation::{self, DEFAULT_MAX_SIZE_MB};
use crate::{prompts, Error, Result};
use tracing::{info, Instrument};
use uuid::Uuid;

/// Entry point for the boundary layers. Holds no per-request state and is
/// safe to share across concurrent requests.
pub struct DescriptionService {
    provider: Box<dyn GenerationProvider>,
    max_size_mb: u64,
}

impl DescriptionService {
    pub fn new(provider: Box<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }

    /// Build a service backed by the Gemini REST client.
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        let client = GeminiHttpClient::new(config)?;
        info!("Gemini endpoint: {}", client.endpoint());
        Ok(Self::new(Box::new(client)))
    }

    pub fn with_max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    /// Describe an image, using the default prompt when `prompt_text` is blank.
    pub async fn describe_image(&self, asset: UploadedAsset, prompt_text: &str) -> Result<String> {
        self.describe(DescriptionRequest::new(asset, prompt_text)).await
    }

    /// Ask whether the image shows food and, if so, for a calorie estimate.
    ///
    /// The answer is loosely structured text from the provider and is returned
    /// verbatim.
    pub async fn count_calories(&self, asset: UploadedAsset) -> Result<String> {
        self.describe(DescriptionRequest::new(asset, prompts::calorie_count()))
            .await
    }

    pub async fn describe(&self, request: DescriptionRequest) -> Result<String> {
        let span = tracing::info_span!(
            "describe",
            request_id = %Uuid::new_v4(),
            file = request.asset.display_name()
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: DescriptionRequest) -> Result<String> {
        let DescriptionRequest { asset, prompt_text } = request;

        info!(
            "Handling image. File: {}, Size: {}, Prompt: '{}'",
            asset.display_name(),
            asset.size,
            prompt_text
        );

        validation::validate(&asset, self.max_size_mb).map_err(|e| {
            tracing::warn!("Rejected upload: {}", e);
            e
        })?;

        let provider_request = match build_request(&asset, &prompt_text).await {
            Ok(provider_request) => provider_request,
            Err(err @ BuildError::UnsupportedForProvider { .. }) => return Ok(err.to_string()),
            Err(BuildError::AssetRead(e)) => return Err(Error::AssetRead(e)),
        };

        tracing::debug!(
            "Gemini API request: generation_config={:?}, safety_settings={:?}",
            provider_request.generation_config,
            provider_request.safety_settings
        );

        let response = self.provider.generate_content(&provider_request).await?;

        tracing::debug!("Gemini API response: {:?}", response);

        let message = render(interpret(&response));
        info!("Finished processing image");
        Ok(message)
    }
}

/// User-facing text for an interpreted response.
pub fn render(outcome: Outcome) -> String {
    match outcome {
        Outcome::Description(text) => text,
        Outcome::Blocked { reason, message } => {
            format!("Description generation failed. {} (Reason: {})", message, reason)
        }
        Outcome::SafetyStopped => {
            "Description generation stopped due to safety concerns.".to_string()
        }
        Outcome::NoCandidates => {
            "Could not get a description from Gemini. No candidates returned.".to_string()
        }
        Outcome::NoText => {
            "Could not get a description from Gemini. No text found in the response.".to_string()
        }
    }
}
