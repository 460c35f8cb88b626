//! Gemini `generateContent` payload types.
//!
//! Composite keys are snake_case on the wire (`generation_config`,
//! `inline_data`, `max_output_tokens`, ...) while `topK`/`topP` keep their
//! camelCase spelling. Response fields also accept the camelCase aliases the
//! live API emits. Unset optionals are skipped, never serialized as `null`.

use serde::{Deserialize, Serialize};

/// Top-level `generateContent` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
}

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding. Parts the
/// provider adds that are neither land in `Other` so they cannot fail the
/// whole response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(alias = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

impl Part {
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } | Part::Other(_) => None,
        }
    }
}

/// Base64 inline payload used for image requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InlineData {
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "topK", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockOnlyHigh,
    BlockMediumAndAbove,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(
        alias = "promptFeedback",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(alias = "finishReason", skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(alias = "safetyRatings", skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<SafetyRating>>,
    #[serde(alias = "tokenCount", skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PromptFeedback {
    #[serde(alias = "blockReason", skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    #[serde(
        alias = "blockReasonMessage",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_reason_message: Option<String>,
    #[serde(alias = "safetyRatings", skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<SafetyRating>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_minimal_request_omits_optional_fields() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: "hi".to_string(),
                }],
                role: None,
            }],
            generation_config: None,
            safety_settings: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "contents": [{ "parts": [{ "text": "hi" }] }] }));
        assert!(!serde_json::to_string(&request).unwrap().contains("null"));
    }

    #[test]
    fn test_partial_generation_config_omits_unset_fields() {
        let config = GenerationConfig {
            max_output_tokens: Some(10),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({ "max_output_tokens": 10 })
        );
    }

    #[test]
    fn test_wire_key_spelling() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/png".to_string(),
                        data: "AAAA".to_string(),
                    },
                }],
                role: Some("user".to_string()),
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.5),
                top_k: Some(32),
                top_p: Some(1.0),
                max_output_tokens: Some(2048),
            }),
            safety_settings: Some(vec![SafetySetting {
                category: HarmCategory::HateSpeech,
                threshold: HarmBlockThreshold::BlockOnlyHigh,
            }]),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "parts": [{ "inline_data": { "mime_type": "image/png", "data": "AAAA" } }],
                    "role": "user"
                }],
                "generation_config": {
                    "temperature": 0.5,
                    "topK": 32,
                    "topP": 1.0,
                    "max_output_tokens": 2048
                },
                "safety_settings": [{
                    "category": "HARM_CATEGORY_HATE_SPEECH",
                    "threshold": "BLOCK_ONLY_HIGH"
                }]
            })
        );
    }

    #[test]
    fn test_response_accepts_snake_case_keys() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "A cat" }], "role": "model" },
                "finish_reason": "STOP",
                "index": 0,
                "safety_ratings": [{ "category": "HARM_CATEGORY_HARASSMENT", "probability": "NEGLIGIBLE" }],
                "token_count": 3
            }],
            "prompt_feedback": { "safety_ratings": [] }
        }))
        .unwrap();

        let candidate = &response.candidates.as_ref().unwrap()[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(candidate.token_count, Some(3));
        assert_eq!(candidate.safety_ratings.as_ref().unwrap().len(), 1);
        assert!(response.prompt_feedback.unwrap().block_reason.is_none());
    }

    #[test]
    fn test_response_accepts_camel_case_keys() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "A cat" }] },
                "finishReason": "SAFETY",
                "safetyRatings": [{ "category": "HARM_CATEGORY_HARASSMENT", "probability": "HIGH", "blocked": true }]
            }],
            "promptFeedback": { "blockReason": "OTHER", "blockReasonMessage": "nope" }
        }))
        .unwrap();

        let candidate = &response.candidates.as_ref().unwrap()[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("SAFETY"));
        let feedback = response.prompt_feedback.unwrap();
        assert_eq!(feedback.block_reason.as_deref(), Some("OTHER"));
        assert_eq!(feedback.block_reason_message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_unknown_parts_do_not_fail_decoding() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "functionCall": { "name": "lookup" } },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                        { "text": "done" }
                    ]
                }
            }]
        }))
        .unwrap();

        let candidates = response.candidates.unwrap();
        let parts = &candidates[0].content.as_ref().unwrap().parts;
        assert!(matches!(parts[0], Part::Other(_)));
        assert!(matches!(parts[1], Part::InlineData { .. }));
        assert_eq!(parts[2].text(), Some("done"));
    }

    #[test]
    fn test_empty_response_object_decodes() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, GenerateContentResponse::default());
    }

    #[test]
    fn test_content_without_parts_decodes() {
        let candidate: Candidate =
            serde_json::from_value(json!({ "content": { "role": "model" } })).unwrap();
        assert!(candidate.content.unwrap().parts.is_empty());
    }
}
