use crate::error::Result;
use crate::events::EventSender;
use crate::models::WatchOptions;

/// Handle for an active position watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

/// Port for continuous device location updates
///
/// Providers report every fix as `AppEvent::PositionUpdate` and every failed
/// fix as `AppEvent::PositionError` on the sender handed to `watch`.
pub trait LocationProvider {
    /// Whether the device has any location capability at all
    fn is_available(&self) -> bool;

    /// Begin observing position changes
    fn watch(&mut self, options: &WatchOptions, events: EventSender) -> Result<WatchId>;

    /// Stop a watch. Unknown ids are ignored.
    fn clear_watch(&mut self, id: WatchId);
}

/// Options for one speech capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    pub locale: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionOptions {
    /// Single utterance, final results only
    pub fn single_shot(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// Port for speech-to-text
///
/// A capture ends with `AppEvent::SpeechResult` or `AppEvent::SpeechError`,
/// followed by `AppEvent::SpeechEnded`.
pub trait SpeechRecognizer {
    fn is_available(&self) -> bool;

    fn start(&mut self, options: &RecognitionOptions, events: EventSender) -> Result<()>;

    fn stop(&mut self);
}

/// A single text-to-speech request
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Port for text-to-speech
pub trait SpeechSynthesizer {
    fn is_available(&self) -> bool;

    /// Drop any utterance currently being spoken
    fn cancel(&mut self);

    fn speak(&mut self, utterance: Utterance);
}
