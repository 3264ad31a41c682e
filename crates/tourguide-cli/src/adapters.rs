//! Terminal implementations of the platform ports

use console::style;
use std::cell::RefCell;
use std::rc::Rc;
use tourguide_core::models::{ChatEntry, Position, Sender};
use tourguide_core::ports::{RecognitionOptions, SpeechRecognizer, SpeechSynthesizer, Utterance};
use tourguide_core::{AppEvent, EventSender, Result};
use tourguide_geo::NavigationFix;
use tourguide_session::{StatusIndicator, Surface};

/// Renders the session on stdout
pub struct ConsoleSurface {
    language: Rc<RefCell<String>>,
}

impl ConsoleSurface {
    /// `language` selects the language of navigation instructions
    pub fn new(language: Rc<RefCell<String>>) -> Self {
        Self { language }
    }
}

impl Surface for ConsoleSurface {
    fn show_entry(&mut self, entry: &ChatEntry) {
        let label = match entry.sender {
            Sender::User => style(entry.sender.label()).cyan().bold(),
            Sender::Bot => style(entry.sender.label()).green().bold(),
        };
        println!("{}: {}", label, entry.text);
    }

    fn show_status(&mut self, status: StatusIndicator) {
        let indicator = match status {
            StatusIndicator::Online | StatusIndicator::GpsActive => style("●").green(),
            StatusIndicator::Offline | StatusIndicator::GpsInactive => style("●").red(),
            StatusIndicator::Listening => style("●").yellow(),
            StatusIndicator::Idle => return,
        };
        println!("{} {}", indicator, style(status.label()).dim());
    }

    fn show_location(&mut self, position: &Position) {
        println!("{} {}", style("📍").dim(), style(position.coordinates).dim());
    }

    fn show_navigation(&mut self, fix: Option<&NavigationFix>) {
        match fix {
            Some(fix) => {
                println!("{} {}", style("🧭").bold(), fix);
                println!("   {}", fix.instruction(&self.language.borrow()));
            }
            None => println!("{} - km to destination", style("🧭").dim()),
        }
    }
}

/// Prints utterances instead of playing audio
pub struct ConsoleSynthesizer;

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn is_available(&self) -> bool {
        true
    }

    fn cancel(&mut self) {}

    fn speak(&mut self, utterance: Utterance) {
        println!(
            "{} {}",
            style(format!("🔊 [{}]", utterance.locale)).magenta(),
            style(utterance.text).italic()
        );
    }
}

/// Treats the next typed line as the recognized utterance
pub struct LineRecognizer {
    pending: Rc<RefCell<Option<EventSender>>>,
}

/// REPL side of a [`LineRecognizer`]
#[derive(Clone)]
pub struct SpeechInput {
    pending: Rc<RefCell<Option<EventSender>>>,
}

impl LineRecognizer {
    pub fn new() -> (Self, SpeechInput) {
        let pending = Rc::new(RefCell::new(None));
        (
            Self {
                pending: pending.clone(),
            },
            SpeechInput { pending },
        )
    }
}

impl SpeechRecognizer for LineRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self, options: &RecognitionOptions, events: EventSender) -> Result<()> {
        tracing::debug!(locale = %options.locale, "Waiting for a dictated line");
        *self.pending.borrow_mut() = Some(events);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(events) = self.pending.borrow_mut().take() {
            let _ = events.send(AppEvent::SpeechEnded);
        }
    }
}

impl SpeechInput {
    pub fn is_capturing(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Deliver `line` as the transcript of the active capture.
    /// Returns false when no capture is active.
    pub fn deliver(&self, line: &str) -> bool {
        let Some(events) = self.pending.borrow_mut().take() else {
            return false;
        };

        let event = if line.trim().is_empty() {
            AppEvent::SpeechError("no-speech".to_string())
        } else {
            AppEvent::SpeechResult(line.trim().to_string())
        };

        if events.send(event).is_err() || events.send(AppEvent::SpeechEnded).is_err() {
            tracing::debug!("Event queue closed during speech delivery");
        }
        true
    }
}
