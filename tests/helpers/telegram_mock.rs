//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.
//! teloxide spells method names in PascalCase, so paths match case-insensitively.

use serde_json::{json, Value};
use teloxide::Bot;
use url::Url;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing() -> Self {
        Self { success: false, ..Self::default() }
    }
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    /// Bot whose requests go to this mock server
    pub fn bot(&self) -> Bot {
        let api_url = Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(test_bot_token()).set_api_url(api_url)
    }

    /// Mount a response for one Bot API method
    pub async fn mock_method(&self, api_method: &str, config: MockResponseConfig, result: Value) {
        let response_body = config.custom_response.unwrap_or_else(|| {
            if config.success {
                json!({ "ok": true, "result": result })
            } else {
                json!({
                    "ok": false,
                    "error_code": 400,
                    "description": "Bad Request: chat not found"
                })
            }
        });

        let mut response = ResponseTemplate::new(if config.success { 200 } else { 400 })
            .set_body_json(response_body);

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path_regex(format!(r"(?i)^/bot[^/]+/{}$", api_method)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        self.mock_method("sendMessage", config, sent_message_json()).await;
    }

    /// Setup mock for sendPhoto endpoint
    pub async fn mock_send_photo(&self, config: MockResponseConfig) {
        self.mock_method("sendPhoto", config, sent_message_json()).await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        self.mock_send_message(MockResponseConfig::default()).await;
        self.mock_send_photo(MockResponseConfig::default()).await;
    }

    /// Setup mocks for error scenarios
    pub async fn setup_error_mocks(&self) {
        self.mock_send_message(MockResponseConfig::failing()).await;
        self.mock_send_photo(MockResponseConfig::failing()).await;
    }

    /// JSON bodies of every request made to `api_method`
    pub async fn requests_to(&self, api_method: &str) -> Vec<Value> {
        let suffix = format!("/{}", api_method.to_lowercase());
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&suffix))
            .map(|req| serde_json::from_slice(&req.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, api_method: &str, times: usize) {
        let matching_requests = self.requests_to(api_method).await.len();

        assert_eq!(
            matching_requests, times,
            "Expected {} calls to {}, but got {}",
            times, api_method, matching_requests
        );
    }
}

/// Minimal `Message` returned by the mocked send methods
fn sent_message_json() -> Value {
    json!({
        "message_id": 123,
        "date": 1700000000,
        "chat": {
            "id": test_chat_id(),
            "type": "private",
            "first_name": "Анна"
        },
        "text": "ok"
    })
}

/// `web_app.url` of the first inline button in a request body
pub fn first_button_url(body: &Value) -> Option<&str> {
    body["reply_markup"]["inline_keyboard"][0][0]["web_app"]["url"].as_str()
}

/// Text of the first inline button in a request body
pub fn first_button_text(body: &Value) -> Option<&str> {
    body["reply_markup"]["inline_keyboard"][0][0]["text"].as_str()
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

/// Helper function to create test chat ID
pub fn test_chat_id() -> i64 {
    987654321
}

/// Helper function to create test user ID
pub fn test_user_id() -> i64 {
    987654321
}
