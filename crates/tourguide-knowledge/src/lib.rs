//! Tour Guide Knowledge - Offline knowledge base
//!
//! Destinations, emergency numbers, and a phrasebook, plus the keyword-driven
//! resolution used when the remote assistant is unreachable.

pub mod defaults;
pub mod loader;
pub mod models;
pub mod resolver;

pub use loader::{load_or_default, FileKnowledgeSource, KnowledgeSource};
pub use models::{DestinationInfo, EmergencyContacts, KnowledgeBase, OfflineDataKind, PhraseCategory};
