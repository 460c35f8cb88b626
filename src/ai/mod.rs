//! Generation provider integration
//!
//! The pipeline talks to the provider through [`GenerationProvider`]; the
//! Gemini REST client is the production implementation and
//! [`MockGenerationClient`] stands in for it in tests and harnesses.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiHttpClient, GenerateContentRequest, GenerateContentResponse, Outcome};
pub use mock::MockGenerationClient;

use crate::error::ProviderError;
use async_trait::async_trait;

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Send one `generateContent` request. Implementations never retry.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError>;
}
