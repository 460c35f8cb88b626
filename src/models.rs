//! Data models and structures
//!
//! Defines the uploaded asset handed to the pipeline by the boundary layers,
//! the per-call description request, and the provider configuration.

use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Where an asset's bytes live until the request builder needs them.
#[derive(Debug, Clone)]
pub enum AssetBody {
    Memory(Vec<u8>),
    File(PathBuf),
}

/// An image received from a caller, valid for a single request.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub body: AssetBody,
    pub content_type: Option<String>,
    pub size: u64,
    pub file_name: Option<String>,
}

impl UploadedAsset {
    pub fn from_bytes(
        bytes: Vec<u8>,
        content_type: Option<String>,
        file_name: Option<String>,
    ) -> Self {
        Self {
            size: bytes.len() as u64,
            body: AssetBody::Memory(bytes),
            content_type,
            file_name,
        }
    }

    /// Describe a local file without loading it.
    ///
    /// Size comes from filesystem metadata. The MIME type is guessed from the
    /// extension, then from the file's leading bytes.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path).await.map_err(Error::AssetRead)?;

        let content_type = match crate::ai::mime::mime_from_extension(path) {
            Some(mime) => Some(mime.to_string()),
            None => sniff_file(path).await,
        };

        Ok(Self {
            body: AssetBody::File(path.to_path_buf()),
            content_type,
            size: metadata.len(),
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        })
    }

    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("unknown_file")
    }

    /// Load the asset's bytes. Only the request builder calls this.
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.body {
            AssetBody::Memory(bytes) => Ok(bytes.clone()),
            AssetBody::File(path) => tokio::fs::read(path).await,
        }
    }
}

async fn sniff_file(path: &Path) -> Option<String> {
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path).await.ok()?;
    let mut header = [0u8; 16];
    let read = file.read(&mut header).await.ok()?;
    crate::ai::mime::detect_image_mime(&header[..read]).map(str::to_string)
}

/// One image plus the instruction sent alongside it.
#[derive(Debug, Clone)]
pub struct DescriptionRequest {
    pub asset: UploadedAsset,
    pub prompt_text: String,
}

impl DescriptionRequest {
    pub fn new(asset: UploadedAsset, prompt_text: impl Into<String>) -> Self {
        let prompt_text = prompt_text.into();
        let prompt_text = if prompt_text.trim().is_empty() {
            crate::prompts::describe_default().to_string()
        } else {
            prompt_text
        };

        Self { asset, prompt_text }
    }
}

// Configuration
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub path: String,
}

impl GeminiConfig {
    pub fn new(api_key: String, base_url: String, path: String) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        require_non_blank(&api_key, "Gemini API key must be configured (GEMINI_API_KEY)")?;
        require_non_blank(
            &base_url,
            "Gemini API base URL must be configured (GEMINI_API_BASE_URL)",
        )?;
        require_non_blank(&path, "Gemini API path must be configured (GEMINI_API_PATH)")?;

        Ok(Self {
            api_key,
            base_url,
            path,
        })
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::new(
            std::env::var("GEMINI_API_KEY")
                .map_err(|_| Error::Config("GEMINI_API_KEY not set".to_string()))?,
            std::env::var("GEMINI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            std::env::var("GEMINI_API_PATH").unwrap_or_else(|_| DEFAULT_PATH.to_string()),
        )
    }

    /// Endpoint without the key query parameter; safe to log.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("path", &self.path)
            .finish()
    }
}

fn require_non_blank(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Config(message.to_string()));
    }
    Ok(())
}
