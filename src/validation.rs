//! Upload policy checks
//!
//! Runs before any network work. Only the asset's declared size and content
//! type are inspected; the body is never read here.

use crate::error::ValidationError;
use crate::models::UploadedAsset;

pub const DEFAULT_MAX_SIZE_MB: u64 = 4;

/// MIME types accepted from uploaders.
pub const ALLOWED_UPLOAD_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Check `asset` against the upload policy. The first failing rule wins.
pub fn validate(asset: &UploadedAsset, max_size_mb: u64) -> Result<(), ValidationError> {
    if asset.size == 0 {
        return Err(ValidationError::EmptyFile);
    }

    if asset.size > max_size_mb.saturating_mul(BYTES_PER_MB) {
        let actual_mb = (asset.size as f64 / BYTES_PER_MB as f64 * 100.0).round() / 100.0;
        return Err(ValidationError::SizeLimitExceeded {
            actual_mb,
            limit_mb: max_size_mb,
        });
    }

    let allowed = asset
        .content_type
        .as_deref()
        .map(str::to_lowercase)
        .is_some_and(|mime| ALLOWED_UPLOAD_TYPES.contains(&mime.as_str()));

    if !allowed {
        return Err(ValidationError::UnsupportedType {
            provided: asset
                .content_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        });
    }

    Ok(())
}
