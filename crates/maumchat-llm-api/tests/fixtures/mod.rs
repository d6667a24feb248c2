use serde_json::json;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "solar-pro2";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Mock completion endpoint for exercising the streaming client
pub struct CompletionMockServer {
    server: MockServer,
}

impl CompletionMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL as a user would configure it (without the completions path)
    pub fn base_url(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    pub fn completions_url(&self) -> String {
        format!("{}{}", self.server.uri(), COMPLETIONS_PATH)
    }

    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    /// Mock a successful stream carrying the given deltas, then `[DONE]`
    pub async fn mock_stream(&self, deltas: &[Option<&str>]) {
        self.mock_raw_stream(sse_body(deltas, true)).await;
    }

    /// Mock a stream with an arbitrary SSE body
    pub async fn mock_raw_stream(&self, body: String) {
        self.mock_raw_bytes(body.into_bytes()).await;
    }

    /// Mock a stream whose body need not be valid UTF-8
    pub async fn mock_raw_bytes(&self, body: Vec<u8>) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&self.server)
            .await;
    }

    /// Mock an authentication failure
    pub async fn mock_auth_error(&self) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "Invalid API key",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock server error
    pub async fn mock_server_error(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal server error"))
            .mount(&self.server)
            .await;
    }
}

/// One SSE `data:` line for a chunk carrying `delta`
pub fn sse_chunk(delta: Option<&str>) -> String {
    let chunk = json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": TEST_MODEL,
        "choices": [{
            "index": 0,
            "delta": { "content": delta },
            "finish_reason": null
        }]
    });
    format!("data: {}\n\n", chunk)
}

/// Full SSE body for a sequence of deltas
pub fn sse_body(deltas: &[Option<&str>], done_marker: bool) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "data: {}\n\n",
        json!({"choices": [{"index": 0, "delta": {"role": "assistant"}}]})
    ));
    for delta in deltas {
        body.push_str(&sse_chunk(*delta));
    }
    body.push_str(&format!(
        "data: {}\n\n",
        json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]})
    ));
    if done_marker {
        body.push_str("data: [DONE]\n\n");
    }
    body
}
