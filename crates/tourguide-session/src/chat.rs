use chrono::Utc;
use serde_json::json;
use tourguide_core::models::{ChatEntry, ChatRequest, Coordinates, Sender, Transcript, UserPreferences};
use tourguide_core::ports::ChatEndpoint;
use tourguide_knowledge::KnowledgeBase;

use crate::connectivity::ConnectivityMonitor;

pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const NETWORK_REPLY: &str = "I'm in offline mode. Some features may be limited.";

/// Generate a session user id of the form `user_xxxxxxxxx`
pub fn generate_user_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("user_{}", &id[..9])
}

/// Everything a message is sent with besides its text
#[derive(Debug, Clone, Copy)]
pub struct ChatContext<'a> {
    pub user_id: &'a str,
    /// Destination id, empty when none is selected
    pub destination: &'a str,
    pub language: &'a str,
    pub coordinates: Option<Coordinates>,
}

/// Where a bot reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Offline,
    Failure,
}

/// One user message and the bot reply it produced
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: ChatEntry,
    pub reply: ChatEntry,
    pub source: ReplySource,
}

/// The user/bot message exchange
pub struct ChatSession {
    endpoint: Box<dyn ChatEndpoint>,
    knowledge: KnowledgeBase,
    transcript: Transcript,
    preferences: UserPreferences,
}

impl ChatSession {
    pub fn new(endpoint: Box<dyn ChatEndpoint>, knowledge: KnowledgeBase) -> Self {
        Self {
            endpoint,
            knowledge,
            transcript: Transcript::new(),
            preferences: UserPreferences::default(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Append a bot line that did not come from a user message
    pub fn post_notice(&mut self, text: impl Into<String>) -> ChatEntry {
        self.transcript.push(Sender::Bot, text).clone()
    }

    /// Send one message. Blank input is ignored.
    ///
    /// Online, the message goes to the remote endpoint; offline, the reply is
    /// resolved from the knowledge base and the message is queued for sync.
    pub async fn send(
        &mut self,
        message: &str,
        context: &ChatContext<'_>,
        connectivity: &mut ConnectivityMonitor,
    ) -> Option<Exchange> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let user = self.transcript.push(Sender::User, message).clone();

        let (text, source) = if connectivity.is_online() {
            self.send_remote(message, context).await
        } else {
            self.resolve_offline(message, context, connectivity)
        };

        let reply = self.transcript.push(Sender::Bot, text).clone();
        Some(Exchange { user, reply, source })
    }

    async fn send_remote(&self, message: &str, context: &ChatContext<'_>) -> (String, ReplySource) {
        let request = ChatRequest {
            message: message.to_string(),
            user_id: context.user_id.to_string(),
            destination: context.destination.to_string(),
            language: context.language.to_string(),
            coordinates: context.coordinates.map(|c| c.as_pair()),
        };

        match self.endpoint.chat(&request).await {
            Ok(reply) => (reply.text, ReplySource::Remote),
            Err(e) if e.is_network() => {
                tracing::warn!(error = %e, "Chat endpoint unreachable");
                (NETWORK_REPLY.to_string(), ReplySource::Failure)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat endpoint returned an error");
                (ERROR_REPLY.to_string(), ReplySource::Failure)
            }
        }
    }

    fn resolve_offline(
        &self,
        message: &str,
        context: &ChatContext<'_>,
        connectivity: &mut ConnectivityMonitor,
    ) -> (String, ReplySource) {
        connectivity.enqueue(json!({
            "type": "chat",
            "message": message,
            "destination": context.destination,
            "language": context.language,
            "queued_at": Utc::now().to_rfc3339(),
        }));

        let text = self.knowledge.resolve(message, context.destination, context.language);
        (text, ReplySource::Offline)
    }

    /// Replace the stored preferences, forwarding them when online
    pub async fn set_preferences(&mut self, preferences: UserPreferences, user_id: &str, online: bool) {
        self.preferences = preferences;
        if online {
            self.push_preferences(user_id).await;
        }
    }

    async fn push_preferences(&self, user_id: &str) {
        match self.endpoint.set_preferences(user_id, &self.preferences).await {
            Ok(()) => tracing::info!(user_id, "Preferences updated"),
            Err(e) => tracing::warn!(error = %e, "Failed to store preferences"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tourguide_core::models::{Budget, ChatReply};
    use tourguide_core::{Result, TourGuideError};

    #[derive(Clone, Copy)]
    enum Behaviour {
        Echo,
        Unreachable,
        Broken,
    }

    #[derive(Default)]
    struct Calls {
        requests: Vec<ChatRequest>,
        preferences: Vec<(String, UserPreferences)>,
    }

    struct MockEndpoint {
        behaviour: Behaviour,
        calls: Arc<Mutex<Calls>>,
    }

    #[async_trait]
    impl ChatEndpoint for MockEndpoint {
        async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
            self.calls.lock().unwrap().requests.push(request.clone());
            match self.behaviour {
                Behaviour::Echo => Ok(ChatReply {
                    text: format!("echo: {}", request.message),
                }),
                Behaviour::Unreachable => Err(TourGuideError::Network {
                    reason: "connection refused".to_string(),
                }),
                Behaviour::Broken => Err(TourGuideError::Endpoint {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }

        async fn set_preferences(&self, user_id: &str, preferences: &UserPreferences) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .preferences
                .push((user_id.to_string(), preferences.clone()));
            Ok(())
        }
    }

    fn session(behaviour: Behaviour) -> (ChatSession, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let endpoint = MockEndpoint {
            behaviour,
            calls: calls.clone(),
        };
        let session = ChatSession::new(Box::new(endpoint), tourguide_knowledge::defaults::builtin());
        (session, calls)
    }

    fn context() -> ChatContext<'static> {
        ChatContext {
            user_id: "user_test12345",
            destination: "paris",
            language: "en",
            coordinates: Some(Coordinates::new(48.8584, 2.2945)),
        }
    }

    #[test]
    fn test_generated_user_id_shape() {
        let id = generate_user_id();
        assert!(id.starts_with("user_"));
        assert_eq!(id.len(), 14);
    }

    #[tokio::test]
    async fn test_online_message_goes_to_endpoint() {
        let (mut session, calls) = session(Behaviour::Echo);
        let mut connectivity = ConnectivityMonitor::new(true);

        let exchange = session
            .send("  Where is the Louvre?  ", &context(), &mut connectivity)
            .await
            .unwrap();

        assert_eq!(exchange.user.text, "Where is the Louvre?");
        assert_eq!(exchange.reply.text, "echo: Where is the Louvre?");
        assert_eq!(exchange.source, ReplySource::Remote);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.requests[0].coordinates, Some([48.8584, 2.2945]));
        assert_eq!(calls.requests[0].destination, "paris");
        assert_eq!(connectivity.pending_len(), 0);
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let (mut session, calls) = session(Behaviour::Echo);
        let mut connectivity = ConnectivityMonitor::new(true);

        assert!(session.send("   ", &context(), &mut connectivity).await.is_none());
        assert!(session.transcript().is_empty());
        assert!(calls.lock().unwrap().requests.is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_reply() {
        let (mut session, _) = session(Behaviour::Unreachable);
        let mut connectivity = ConnectivityMonitor::new(true);

        let exchange = session.send("hello", &context(), &mut connectivity).await.unwrap();
        assert_eq!(exchange.reply.text, NETWORK_REPLY);
        assert_eq!(exchange.source, ReplySource::Failure);
    }

    #[tokio::test]
    async fn test_endpoint_error_reply() {
        let (mut session, _) = session(Behaviour::Broken);
        let mut connectivity = ConnectivityMonitor::new(true);

        let exchange = session.send("hello", &context(), &mut connectivity).await.unwrap();
        assert_eq!(exchange.reply.text, ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_offline_resolves_locally_and_queues() {
        let (mut session, calls) = session(Behaviour::Echo);
        let mut connectivity = ConnectivityMonitor::new(false);

        let exchange = session.send("emergency", &context(), &mut connectivity).await.unwrap();

        assert_eq!(exchange.source, ReplySource::Offline);
        assert!(exchange.reply.text.contains("17"));
        assert!(calls.lock().unwrap().requests.is_empty());

        let queued: Vec<_> = connectivity.pending().collect();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].payload["type"], "chat");
        assert_eq!(queued[0].payload["message"], "emergency");
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_messages_leave_preferences_alone() {
        let (mut session, calls) = session(Behaviour::Echo);
        let mut connectivity = ConnectivityMonitor::new(true);

        session
            .send("Any cheap adventure ideas?", &context(), &mut connectivity)
            .await
            .unwrap();

        assert_eq!(session.preferences(), &UserPreferences::default());
        assert!(calls.lock().unwrap().preferences.is_empty());
    }

    #[tokio::test]
    async fn test_set_preferences_online_is_forwarded() {
        let (mut session, calls) = session(Behaviour::Echo);
        let mut preferences = UserPreferences::default();
        preferences.apply("style", "adventure").unwrap();

        session.set_preferences(preferences.clone(), "user_test12345", true).await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.preferences.len(), 1);
        assert_eq!(calls.preferences[0].0, "user_test12345");
        assert_eq!(calls.preferences[0].1, preferences);
    }

    #[tokio::test]
    async fn test_set_preferences_offline_is_stored_only() {
        let (mut session, calls) = session(Behaviour::Echo);
        let preferences = UserPreferences {
            budget: Budget::High,
            ..UserPreferences::default()
        };

        session.set_preferences(preferences.clone(), "user_test12345", false).await;

        assert_eq!(session.preferences(), &preferences);
        assert!(calls.lock().unwrap().preferences.is_empty());
    }
}
