//! HTTP transport for the chat endpoint.
//!
//! [`ChatBackend`] is the seam the session talks through; [`HttpChatClient`]
//! is the reqwest implementation used by the binary.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::chat::{ChatReply, ChatRequest};

/// Error type for chat transport operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint returned status {0}")]
    Status(StatusCode),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Request was cancelled before completing")]
    Aborted,
}

/// Something that can answer a chat request.
pub trait ChatBackend {
    /// Send one request and return the assistant text.
    fn send(&self, request: &ChatRequest) -> impl Future<Output = Result<String, ChatError>> + Send;
}

/// Status reported by the backend health route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Chat client posting JSON to a configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    endpoint: Url,
}

impl HttpChatClient {
    /// Create a client for `endpoint`, with an optional per-request timeout.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL of the health route served next to the chat endpoint.
    pub fn health_url(&self) -> Result<Url, ChatError> {
        self.endpoint
            .join("/health")
            .map_err(|e| ChatError::InvalidUrl(e.to_string()))
    }

    /// Probe the backend health route.
    pub async fn health(&self) -> Result<HealthStatus, ChatError> {
        let url = self.health_url()?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ChatError::Status(response.status()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post(&self, request: &ChatRequest) -> Result<String, ChatError> {
        debug!(
            endpoint = %self.endpoint,
            history = request.history.len(),
            "posting chat request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let body = response.text().await?;
        let reply: ChatReply = serde_json::from_str(&body)?;
        debug!(bytes = reply.response.len(), "chat reply received");
        Ok(reply.response)
    }
}

impl ChatBackend for HttpChatClient {
    fn send(&self, request: &ChatRequest) -> impl Future<Output = Result<String, ChatError>> + Send {
        self.post(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Turn;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpChatClient {
        let url = Url::parse(&format!("{}/api/chat", server.uri())).unwrap();
        HttpChatClient::new(url, Some(Duration::from_secs(5))).unwrap()
    }

    fn hello_request() -> ChatRequest {
        ChatRequest {
            message: "Hello".into(),
            history: vec![],
        }
    }

    #[tokio::test]
    async fn test_send_returns_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({"message": "Hello", "history": []})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "Hi there"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).send(&hello_request()).await.unwrap();
        assert_eq!(reply, "Hi there");
    }

    #[tokio::test]
    async fn test_send_carries_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "message": "again",
                "history": [
                    {"role": "user", "content": "Hello"},
                    {"role": "assistant", "content": "Hi there"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ok"})),
            )
            .mount(&server)
            .await;

        let request = ChatRequest {
            message: "again".into(),
            history: vec![Turn::user("Hello"), Turn::assistant("Hi there")],
        };
        assert_eq!(client_for(&server).send(&request).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).send(&hello_request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).send(&hello_request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_response_field_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"detail": "x"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).send(&hello_request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let url = Url::parse("http://127.0.0.1:9/api/chat").unwrap();
        let client = HttpChatClient::new(url, Some(Duration::from_secs(2))).unwrap();
        let err = client.send(&hello_request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }

    #[tokio::test]
    async fn test_health_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "healthy"})),
            )
            .mount(&server)
            .await;

        let status = client_for(&server).health().await.unwrap();
        assert_eq!(status.status, "healthy");
    }

    #[test]
    fn test_health_url_replaces_path() {
        let url = Url::parse("http://localhost:8005/api/chat").unwrap();
        let client = HttpChatClient::new(url, None).unwrap();
        assert_eq!(
            client.health_url().unwrap().as_str(),
            "http://localhost:8005/health"
        );
    }
}
