use async_trait::async_trait;
use std::time::Duration;
use tourguide_core::models::{ChatReply, ChatRequest, UserPreferences};
use tourguide_core::ports::{ChatEndpoint, SyncEndpoint};
use tourguide_core::{Result, TourGuideError};

use crate::dto::{ChatResponseBody, PreferencesRequest};

/// How long the health probe waits before calling the endpoint unreachable
const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client for the guide endpoint
#[derive(Debug, Clone)]
pub struct HttpGuideClient {
    /// Base URL (e.g., "http://localhost:5000")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpGuideClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create with default localhost URL
    pub fn localhost() -> Self {
        Self::new("http://localhost:5000")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn network_error(&self, e: reqwest::Error) -> TourGuideError {
        TourGuideError::Network {
            reason: format!("Failed to reach {}: {}", self.base_url, e),
        }
    }

    /// Whether `GET /health` answers with a success status within two seconds
    pub async fn is_reachable(&self) -> bool {
        match self
            .client
            .get(self.url("/health"))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Health probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl ChatEndpoint for HttpGuideClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self
            .client
            .post(self.url("/chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        let body: ChatResponseBody =
            response.json().await.map_err(|e| TourGuideError::Endpoint {
                status: status.as_u16(),
                message: format!("Failed to parse chat response: {}", e),
            })?;

        match (status.is_success(), body.response, body.error) {
            (true, Some(text), None) => Ok(ChatReply { text }),
            (_, _, Some(error)) => Err(TourGuideError::Endpoint {
                status: status.as_u16(),
                message: error,
            }),
            (_, _, None) => Err(TourGuideError::Endpoint {
                status: status.as_u16(),
                message: "unexpected chat response".to_string(),
            }),
        }
    }

    async fn set_preferences(&self, user_id: &str, preferences: &UserPreferences) -> Result<()> {
        let body = PreferencesRequest {
            user_id,
            preferences,
        };

        let response = self
            .client
            .post(self.url("/set_preferences"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TourGuideError::Endpoint {
                status: status.as_u16(),
                message: error_text,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SyncEndpoint for HttpGuideClient {
    async fn sync(&self, payload: &serde_json::Value) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/sync"))
            .json(payload)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        if !response.status().is_success() {
            return Err(TourGuideError::Endpoint {
                status: response.status().as_u16(),
                message: "Sync failed".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpGuideClient::localhost();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HttpGuideClient::new("http://guide.local:8080/");
        assert_eq!(client.url("/chat"), "http://guide.local:8080/chat");
    }
}
