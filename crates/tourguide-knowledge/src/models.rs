use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tourguide_core::models::{normalize_language, DEFAULT_LANGUAGE};

/// Emergency phone numbers for a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContacts {
    pub police: String,
    pub ambulance: String,
    pub fire: String,
}

/// Offline guide entry for one destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationInfo {
    pub name: String,

    #[serde(default)]
    pub basic_info: String,

    #[serde(default)]
    pub attractions: Vec<String>,

    #[serde(default)]
    pub emergency: Option<EmergencyContacts>,

    #[serde(default)]
    pub tips: Vec<String>,
}

/// Phrasebook categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseCategory {
    Greetings,
    Directions,
    Emergency,
    Food,
}

impl PhraseCategory {
    pub const ALL: [PhraseCategory; 4] = [
        PhraseCategory::Greetings,
        PhraseCategory::Directions,
        PhraseCategory::Emergency,
        PhraseCategory::Food,
    ];

    /// Key used in the knowledge document
    pub fn key(&self) -> &'static str {
        match self {
            PhraseCategory::Greetings => "greetings",
            PhraseCategory::Directions => "directions",
            PhraseCategory::Emergency => "emergency",
            PhraseCategory::Food => "food",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == s.trim().to_lowercase())
    }
}

impl fmt::Display for PhraseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Kinds of data that can be checked for offline availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflineDataKind {
    Destination,
    Phrase,
}

/// language code → category → phrases
pub type Phrasebook = HashMap<String, HashMap<String, Vec<String>>>;

/// Read-only offline knowledge, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub destinations: HashMap<String, DestinationInfo>,

    #[serde(default)]
    pub phrases: Phrasebook,
}

impl KnowledgeBase {
    pub fn destination(&self, id: &str) -> Option<&DestinationInfo> {
        self.destinations.get(id)
    }

    /// Phrases for a language and category.
    ///
    /// A language without its own phrasebook reads the English one. A category
    /// missing from the chosen phrasebook yields `None`.
    pub fn phrases(&self, language: &str, category: PhraseCategory) -> Option<&[String]> {
        let book = self
            .phrases
            .get(&normalize_language(language))
            .or_else(|| self.phrases.get(DEFAULT_LANGUAGE))?;
        book.get(category.key()).map(Vec::as_slice)
    }

    /// Whether a destination or a language's phrasebook is available offline
    pub fn is_available_offline(&self, kind: OfflineDataKind, id: &str) -> bool {
        match kind {
            OfflineDataKind::Destination => self.destinations.contains_key(id),
            OfflineDataKind::Phrase => self.phrases.contains_key(&normalize_language(id)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty() && self.phrases.is_empty()
    }

    /// Language codes with a phrasebook, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.phrases.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}
