use super::{GenerateContentRequest, GenerateContentResponse, GenerationProvider};
use crate::error::ProviderError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Response(GenerateContentResponse),
    Status { status: u16, body: String },
}

/// In-memory provider that replays canned replies and records every request.
///
/// Clones share state, so a clone kept by a test observes calls made through
/// the original.
#[derive(Clone, Default)]
pub struct MockGenerationClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Response(response));
        self
    }

    /// Reply with a JSON body, as the provider would.
    pub fn with_json_response(self, body: serde_json::Value) -> Self {
        let response = serde_json::from_value(body).expect("mock response must be valid JSON");
        self.with_response(response)
    }

    /// Shortcut for a single candidate containing one text part.
    pub fn with_text_response(self, text: &str) -> Self {
        self.with_json_response(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
        }))
    }

    /// Fail with an HTTP status classified the way the real client does.
    pub fn with_status_error(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push(MockReply::Status {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<GenerateContentRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests.lock().unwrap().push(request.clone());

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(GenerateContentResponse::default());
        }

        match replies[(count - 1) % replies.len()].clone() {
            MockReply::Response(response) => Ok(response),
            MockReply::Status { status, body } if status >= 500 => {
                Err(ProviderError::ServerError { status, body })
            }
            MockReply::Status { status, body } => Err(ProviderError::ClientError { status, body }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;

    #[tokio::test]
    async fn test_mock_default_response_is_empty() {
        let client = MockGenerationClient::new();
        let response = client
            .generate_content(&test_support::sample_request())
            .await
            .unwrap();
        assert!(response.candidates.is_none());
    }

    #[tokio::test]
    async fn test_mock_cycles_replies() {
        let client = MockGenerationClient::new()
            .with_text_response("first")
            .with_status_error(503, "overloaded");

        let request = test_support::sample_request();
        assert!(client.generate_content(&request).await.is_ok());
        assert!(matches!(
            client.generate_content(&request).await,
            Err(ProviderError::ServerError { status: 503, .. })
        ));
        assert!(client.generate_content(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_call_count_shared_across_clones() {
        let client = MockGenerationClient::new().with_status_error(404, "missing");
        let probe = client.clone();

        assert_eq!(probe.get_call_count(), 0);
        let err = client
            .generate_content(&test_support::sample_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::ClientError { status: 404, .. }));
        assert_eq!(probe.get_call_count(), 1);
        assert!(probe.last_request().is_some());
    }
}
