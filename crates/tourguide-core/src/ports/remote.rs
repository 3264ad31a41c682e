use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ChatReply, ChatRequest, UserPreferences};

/// Port for the remote chat assistant
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send one chat message and wait for the assistant's reply
    ///
    /// # Errors
    /// `TourGuideError::Network` when the endpoint cannot be reached,
    /// `TourGuideError::Endpoint` when it answers with an error.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// Store traveller preferences for a user
    async fn set_preferences(&self, user_id: &str, preferences: &UserPreferences) -> Result<()>;
}

/// Port for forwarding payloads queued while offline
#[async_trait]
pub trait SyncEndpoint: Send + Sync {
    /// Forward one payload. Any error means the item was not accepted.
    async fn sync(&self, payload: &serde_json::Value) -> Result<()>;
}
