//! Trigger-phrase interpretation for dictated speech

const NAVIGATION_TRIGGERS: [&str; 2] = ["navigate to", "directions to"];
const INFORMATION_TRIGGERS: [&str; 2] = ["tell me about", "information about"];
const RECOMMEND_TRIGGERS: [&str; 2] = ["recommend", "suggest"];
const EMERGENCY_TRIGGERS: [&str; 2] = ["emergency", "help"];

const KNOWN_DESTINATIONS: [&str; 5] = ["paris", "tokyo", "new york", "london", "rome"];
const KNOWN_TOPICS: [&str; 5] = ["restaurant", "hotel", "attraction", "museum", "park"];

/// Spoken when an emergency command is recognised
pub const EMERGENCY_ANNOUNCEMENT: &str =
    "Emergency assistance requested. I'm here to help. Please provide your location and nature of emergency.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    Navigate { destination: String },
    Information { topic: String },
    Recommend(String),
    Emergency,
    /// Anything else, forwarded verbatim
    Dictation(String),
}

impl VoiceCommand {
    /// The chat message this command submits
    pub fn chat_text(&self) -> String {
        match self {
            VoiceCommand::Navigate { destination } => format!("Navigate to {}", destination),
            VoiceCommand::Information { topic } => format!("Tell me about {} in this area", topic),
            VoiceCommand::Recommend(text) | VoiceCommand::Dictation(text) => text.clone(),
            VoiceCommand::Emergency => "Emergency! I need help!".to_string(),
        }
    }
}

/// Match a transcript against the trigger vocabularies, first trigger wins.
///
/// A navigation or information trigger without a known destination or topic
/// falls through to plain dictation.
pub fn interpret_command(transcript: &str) -> VoiceCommand {
    let lower = transcript.to_lowercase();
    let has_any = |triggers: &[&str]| triggers.iter().any(|t| lower.contains(t));
    let first_known = |vocabulary: &[&'static str]| {
        vocabulary
            .iter()
            .find(|word| lower.contains(*word))
            .map(|word| word.to_string())
    };

    if has_any(&NAVIGATION_TRIGGERS) {
        return match first_known(&KNOWN_DESTINATIONS) {
            Some(destination) => VoiceCommand::Navigate { destination },
            None => VoiceCommand::Dictation(transcript.to_string()),
        };
    }

    if has_any(&INFORMATION_TRIGGERS) {
        return match first_known(&KNOWN_TOPICS) {
            Some(topic) => VoiceCommand::Information { topic },
            None => VoiceCommand::Dictation(transcript.to_string()),
        };
    }

    if has_any(&RECOMMEND_TRIGGERS) {
        return VoiceCommand::Recommend(transcript.to_string());
    }

    if has_any(&EMERGENCY_TRIGGERS) {
        return VoiceCommand::Emergency;
    }

    VoiceCommand::Dictation(transcript.to_string())
}
