use std::time::Duration;
use tokio::task::JoinHandle;
use tourguide_core::models::{speech_locale, DEFAULT_LANGUAGE};
use tourguide_core::ports::{RecognitionOptions, SpeechRecognizer, SpeechSynthesizer, Utterance};
use tourguide_core::{AppEvent, EventSender, Result, TourGuideError};

use crate::voice::{interpret_command, VoiceCommand, EMERGENCY_ANNOUNCEMENT};

pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_PITCH: f32 = 1.0;
pub const SPEECH_VOLUME: f32 = 0.8;

/// Pause between a final transcript and its chat submission
pub const SUBMIT_DELAY: Duration = Duration::from_millis(500);

const VOICE_ON: &str = "Voice mode activated. How can I help you?";
const VOICE_OFF: &str = "Voice mode deactivated.";

/// Speech-to-text input and text-to-speech output around the chat
pub struct SpeechBridge {
    recognizer: Box<dyn SpeechRecognizer>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    events: EventSender,
    language: String,
    voice_enabled: bool,
    interpret_commands: bool,
    listening: bool,
    submit_delay: Duration,
    pending_submits: Vec<JoinHandle<()>>,
}

impl SpeechBridge {
    pub fn new(
        recognizer: Box<dyn SpeechRecognizer>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        events: EventSender,
    ) -> Self {
        Self {
            recognizer,
            synthesizer,
            events,
            language: DEFAULT_LANGUAGE.to_string(),
            voice_enabled: false,
            interpret_commands: false,
            listening: false,
            submit_delay: SUBMIT_DELAY,
            pending_submits: Vec::new(),
        }
    }

    /// Match trigger phrases in transcripts instead of forwarding them verbatim
    pub fn with_voice_commands(mut self, enabled: bool) -> Self {
        self.interpret_commands = enabled;
        self
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Change the recognition and synthesis language
    pub fn set_language(&mut self, code: &str) {
        self.language = code.to_string();
        tracing::debug!(language = code, locale = speech_locale(code), "Speech language changed");
    }

    /// Flip voice mode and announce the change. Returns the new state.
    pub fn toggle_voice_mode(&mut self) -> bool {
        if self.voice_enabled {
            self.speak(VOICE_OFF);
            self.voice_enabled = false;
        } else {
            self.voice_enabled = true;
            self.speak(VOICE_ON);
        }
        tracing::info!(enabled = self.voice_enabled, "Voice mode toggled");
        self.voice_enabled
    }

    /// Capture one utterance. Calling this while listening stops the capture.
    ///
    /// Returns whether a capture is now in progress.
    ///
    /// # Errors
    /// `TourGuideError::SpeechUnavailable` without a recognizer.
    pub fn start_listening(&mut self) -> Result<bool> {
        if self.listening {
            self.stop_listening();
            return Ok(false);
        }

        if !self.recognizer.is_available() {
            return Err(TourGuideError::SpeechUnavailable);
        }

        let options = RecognitionOptions::single_shot(speech_locale(&self.language));
        self.recognizer.start(&options, self.events.clone())?;
        self.listening = true;
        Ok(true)
    }

    pub fn stop_listening(&mut self) {
        if self.listening {
            self.recognizer.stop();
            self.listening = false;
        }
    }

    /// Handle a final transcript: schedule its chat submission after the
    /// submit delay and return the interpreted command.
    pub fn handle_result(&mut self, transcript: &str) -> VoiceCommand {
        let command = if self.interpret_commands {
            interpret_command(transcript)
        } else {
            VoiceCommand::Dictation(transcript.to_string())
        };

        if command == VoiceCommand::Emergency {
            self.speak(EMERGENCY_ANNOUNCEMENT);
        }

        self.schedule_submit(command.chat_text());
        command
    }

    pub fn handle_error(&mut self, error: &str) {
        tracing::warn!(error, "Speech recognition error");
        self.listening = false;
    }

    pub fn handle_end(&mut self) {
        self.listening = false;
    }

    /// Speak `text`, replacing anything still being spoken.
    /// Does nothing while voice mode is off.
    pub fn speak(&mut self, text: &str) {
        if !self.voice_enabled || !self.synthesizer.is_available() {
            return;
        }

        self.synthesizer.cancel();
        self.synthesizer.speak(Utterance {
            text: text.to_string(),
            locale: speech_locale(&self.language).to_string(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
            volume: SPEECH_VOLUME,
        });
    }

    /// Whether any scheduled submission has not been flushed yet
    pub fn has_pending_submits(&self) -> bool {
        !self.pending_submits.is_empty()
    }

    /// Wait until every scheduled submission has been posted
    pub async fn flush(&mut self) {
        for handle in std::mem::take(&mut self.pending_submits) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Speech submission task failed");
            }
        }
    }

    fn schedule_submit(&mut self, text: String) {
        self.pending_submits.retain(|handle| !handle.is_finished());

        let events = self.events.clone();
        let delay = self.submit_delay;
        self.pending_submits.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(AppEvent::Submit(text)).is_err() {
                tracing::debug!("Event queue closed before speech submission");
            }
        }));
    }
}
