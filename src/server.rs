//! HTTP boundary exposing the description service as multipart endpoints.
//!
//! `POST /api/v1/image/upload` takes `imageFile` and an optional `prompt`;
//! `POST /api/v1/image/calories-count` takes `imageFile` only. Failures come
//! back as `{"error": "..."}`.

use crate::error::ValidationError;
use crate::models::UploadedAsset;
use crate::service::DescriptionService;
use crate::{prompts, Error, Result};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Large enough that oversize images reach the validator and get its message.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub const UPLOAD_PATH: &str = "/api/v1/image/upload";
pub const CALORIES_PATH: &str = "/api/v1/image/calories-count";

pub fn router(service: Arc<DescriptionService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(UPLOAD_PATH, post(upload))
        .route(CALORIES_PATH, post(calories_count))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(service)
}

pub async fn serve(addr: SocketAddr, service: DescriptionService) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(service))).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn upload(
    State(service): State<Arc<DescriptionService>>,
    multipart: Multipart,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let asset = form.image.ok_or(Error::Validation(ValidationError::EmptyFile))?;
    let file_name = asset.display_name().to_string();
    let prompt = form
        .prompt
        .unwrap_or_else(|| prompts::describe_default().to_string());

    let description = service
        .describe_image(asset, &prompt)
        .await
        .map_err(|e| ApiError::from(e).log("image upload", &file_name))?;

    info!("Successfully processed image upload for file: {}", file_name);
    Ok(Json(json!({ "description": description })))
}

async fn calories_count(
    State(service): State<Arc<DescriptionService>>,
    multipart: Multipart,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let asset = form.image.ok_or(Error::Validation(ValidationError::EmptyFile))?;
    let file_name = asset.display_name().to_string();

    let answer = service
        .count_calories(asset)
        .await
        .map_err(|e| ApiError::calorie_count(e).log("calorie count", &file_name))?;

    info!("Successfully processed calorie count for file: {}", file_name);
    Ok(Json(json!({ "response": answer })))
}

#[derive(Default)]
struct UploadForm {
    image: Option<UploadedAsset>,
    prompt: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> std::result::Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(ApiError::multipart)? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "imageFile" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(ApiError::multipart)?;
                    form.image = Some(UploadedAsset::from_bytes(
                        bytes.to_vec(),
                        content_type,
                        file_name,
                    ));
                }
                "prompt" => {
                    form.prompt = Some(field.text().await.map_err(ApiError::multipart)?);
                }
                _ => {
                    tracing::trace!("Ignoring unknown multipart field: {}", name);
                }
            }
        }

        Ok(form)
    }
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn multipart(err: MultipartError) -> Self {
        warn!("Invalid multipart request: {}", err);
        Self {
            status: err.status(),
            message: err.body_text(),
        }
    }

    /// Provider failures on the calorie route name the operation.
    fn calorie_count(err: Error) -> Self {
        match err {
            Error::Provider(inner) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!(
                    "Error processing image for calorie count with Gemini: {}",
                    inner
                ),
            },
            other => Self::from(other),
        }
    }

    fn log(self, operation: &str, file_name: &str) -> Self {
        if self.status.is_client_error() {
            warn!(
                "Bad request during {} (file: {}): {}",
                operation, file_name, self.message
            );
        } else {
            error!(
                "Error during {} (file: {}): {}",
                operation, file_name, self.message
            );
        }
        self
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Validation(ValidationError::SizeLimitExceeded { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::AssetRead(_)
            | Error::Provider(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
