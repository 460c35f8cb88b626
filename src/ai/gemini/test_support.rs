use super::types::{Content, GenerateContentRequest, Part};
use crate::models::GeminiConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockBuilder, MockServer};

pub const GENERATE_CONTENT_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

pub fn config(server: &MockServer, api_key: &str) -> GeminiConfig {
    GeminiConfig::new(
        api_key.to_string(),
        server.uri(),
        GENERATE_CONTENT_PATH.to_string(),
    )
    .unwrap()
}

pub fn post_generate_content() -> MockBuilder {
    Mock::given(method("POST")).and(path(GENERATE_CONTENT_PATH))
}

pub fn sample_request() -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::Text {
                text: "Describe this image in detail.".to_string(),
            }],
            role: Some("user".to_string()),
        }],
        generation_config: Some(super::request::generation_config()),
        safety_settings: None,
    }
}
