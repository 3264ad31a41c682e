pub mod chat;
pub mod destination;
pub mod language;
pub mod position;
pub mod preferences;

pub use chat::{ChatEntry, ChatReply, ChatRequest, Sender, Transcript};
pub use destination::{Destination, DestinationCatalog};
pub use language::{normalize_language, speech_locale, Language, Localized, DEFAULT_LANGUAGE};
pub use position::{Coordinates, Position, WatchOptions};
pub use preferences::{Budget, UserPreferences};
