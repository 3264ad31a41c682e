//! Port trait definitions
//!
//! These traits define the interfaces that platform and remote adapters must implement.

pub mod platform;
pub mod remote;

pub use platform::{
    LocationProvider, RecognitionOptions, SpeechRecognizer, SpeechSynthesizer, Utterance, WatchId,
};
pub use remote::{ChatEndpoint, SyncEndpoint};
