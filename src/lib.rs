//! Image description service backed by Gemini
//!
//! Accepts an uploaded image and a prompt, validates the upload, sends it to
//! the Gemini `generateContent` API, and turns whatever comes back into a
//! single human-readable answer. A calorie-count variant reuses the same
//! pipeline with a fixed food-recognition prompt.

pub mod ai;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;
pub mod service;
pub mod validation;

pub use error::{Error, Result};
pub use service::DescriptionService;
