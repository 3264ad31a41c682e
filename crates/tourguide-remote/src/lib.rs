//! Tour Guide Remote - HTTP adapters
//!
//! reqwest-based implementations of the chat, sync, and knowledge ports.

pub mod client;
pub mod dto;
pub mod knowledge;

pub use client::HttpGuideClient;
pub use knowledge::HttpKnowledgeSource;
