//! Tour guide session orchestration
//!
//! Connectivity reconciliation, speech in and out, the chat exchange, and the
//! single-threaded event loop that ties them to the location tracker.

pub mod app;
pub mod chat;
pub mod connectivity;
pub mod speech;
pub mod surface;
pub mod voice;

pub use app::{AppState, TourGuide};
pub use chat::ChatSession;
pub use connectivity::{ConnectivityMonitor, PendingSyncItem, SyncReport};
pub use speech::SpeechBridge;
pub use surface::{StatusIndicator, Surface};
pub use voice::{interpret_command, VoiceCommand};
