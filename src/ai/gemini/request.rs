//! Builds `generateContent` requests for image description.

use super::types::{
    Content, GenerateContentRequest, GenerationConfig, HarmBlockThreshold, HarmCategory,
    InlineData, Part, SafetySetting,
};
use crate::models::UploadedAsset;
use base64::Engine as _;
use thiserror::Error;

/// MIME types the provider accepts for inline images. Broader than the
/// upload policy in [`crate::validation`].
pub const PROVIDER_IMAGE_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
];

pub const TEMPERATURE: f32 = 0.4;
pub const TOP_K: u32 = 32;
pub const TOP_P: f32 = 1.0;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

pub const SAFETY_SETTINGS: [SafetySetting; 4] = [
    SafetySetting {
        category: HarmCategory::Harassment,
        threshold: HarmBlockThreshold::BlockOnlyHigh,
    },
    SafetySetting {
        category: HarmCategory::HateSpeech,
        threshold: HarmBlockThreshold::BlockOnlyHigh,
    },
    SafetySetting {
        category: HarmCategory::SexuallyExplicit,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    },
    SafetySetting {
        category: HarmCategory::DangerousContent,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    },
];

#[derive(Error, Debug)]
pub enum BuildError {
    /// Not an error for the caller: the service reports it as a message.
    #[error("Unsupported image type: {mime}. Please upload PNG, JPEG, WEBP, HEIC, or HEIF.")]
    UnsupportedForProvider { mime: String },

    #[error("Failed to read image file: {0}")]
    AssetRead(#[from] std::io::Error),
}

/// Generation parameters sent with every request. Not caller-configurable.
pub fn generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: Some(TEMPERATURE),
        top_k: Some(TOP_K),
        top_p: Some(TOP_P),
        max_output_tokens: Some(MAX_OUTPUT_TOKENS),
    }
}

/// Map an asset and prompt to a request: one user content block holding the
/// text part followed by the inline image part.
pub async fn build(
    asset: &UploadedAsset,
    prompt_text: &str,
) -> Result<GenerateContentRequest, BuildError> {
    let mime_type = provider_mime_type(asset)?;

    let bytes = asset.read_bytes().await.map_err(|e| {
        tracing::error!("Error reading image bytes for {}: {}", asset.display_name(), e);
        e
    })?;
    let data = base64::engine::general_purpose::STANDARD.encode(&bytes);

    Ok(GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: prompt_text.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData { mime_type, data },
                },
            ],
            role: Some("user".to_string()),
        }],
        generation_config: Some(generation_config()),
        safety_settings: Some(SAFETY_SETTINGS.to_vec()),
    })
}

fn provider_mime_type(asset: &UploadedAsset) -> Result<String, BuildError> {
    let declared = asset.content_type.as_deref().unwrap_or_default();
    let mime = declared.to_lowercase();

    if PROVIDER_IMAGE_TYPES.contains(&mime.as_str()) {
        Ok(mime)
    } else {
        tracing::warn!("Unsupported image type for provider: {:?}", asset.content_type);
        Err(BuildError::UnsupportedForProvider {
            mime: asset
                .content_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }
}
