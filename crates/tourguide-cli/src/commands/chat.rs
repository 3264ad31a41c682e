//! Interactive chat session

use crate::adapters::{ConsoleSurface, ConsoleSynthesizer, LineRecognizer, SpeechInput};
use crate::cli::ChatArgs;
use crate::output::OutputWriter;
use crate::probe::spawn_probe;
use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;
use std::cell::RefCell;
use std::io::{BufRead, IsTerminal};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tourguide_core::config::{parse_language, LayeredConfig};
use tourguide_core::models::UserPreferences;
use tourguide_core::ports::LocationProvider;
use tourguide_core::{AppEvent, EventQueue, EventSender, TourGuideError};
use tourguide_geo::{FixedLocationProvider, GpxReplayProvider, LocationTracker};
use tourguide_remote::HttpGuideClient;
use tourguide_session::{ChatSession, ConnectivityMonitor, SpeechBridge, TourGuide};

use super::load_knowledge;

const HELP: &str = "\
/voice            toggle voice mode
/listen           treat the next line as spoken input
/navigate <id>    navigate to a destination (paris, tokyo, newyork)
/stop             stop navigating
/online, /offline simulate a connectivity change
/lang <code>      switch language (en, es, fr, ja)
/dest [id]        set or clear the destination used as chat context
/prefs [k=v ...]  show or set preferences (interests=food,art budget=low style=relaxation language=fr)
/help             show this help
/quit             leave the session";

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Message(String),
    Voice,
    Listen,
    Navigate(String),
    Stop,
    Online,
    Offline,
    Language(String),
    Destination(Option<String>),
    Preferences(Option<String>),
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return ReplCommand::Message(line.to_string());
        };

        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim().to_string())),
            None => (command, None),
        };
        let argument = argument.filter(|a| !a.is_empty());

        match (name.to_lowercase().as_str(), argument) {
            ("voice", _) => ReplCommand::Voice,
            ("listen", _) => ReplCommand::Listen,
            ("navigate", Some(id)) => ReplCommand::Navigate(id.to_lowercase()),
            ("stop", _) => ReplCommand::Stop,
            ("online", _) => ReplCommand::Online,
            ("offline", _) => ReplCommand::Offline,
            ("lang", Some(code)) => ReplCommand::Language(code),
            ("dest", id) => ReplCommand::Destination(id.map(|i| i.to_lowercase())),
            ("prefs", settings) => ReplCommand::Preferences(settings),
            ("help", _) => ReplCommand::Help,
            ("quit" | "exit", _) => ReplCommand::Quit,
            _ => ReplCommand::Unknown(line.to_string()),
        }
    }
}

pub async fn execute(
    args: ChatArgs,
    config: &LayeredConfig,
    offline: bool,
    output: &OutputWriter,
) -> Result<()> {
    if output.is_json() {
        output.warning("JSON output is not available in chat mode");
    }

    let mut queue = EventQueue::new();
    let events = queue.sender();
    let knowledge = load_knowledge(config).await;
    let client = HttpGuideClient::new(config.endpoint.value.clone());

    let provider: Box<dyn LocationProvider> = match &args.gpx {
        Some(path) => Box::new(
            GpxReplayProvider::from_path(path, Duration::from_secs(args.gpx_interval.max(1)))
                .with_context(|| format!("Failed to load GPX track {}", path.display()))?,
        ),
        None => Box::new(FixedLocationProvider::new(config.home_coordinates())),
    };

    let language = Rc::new(RefCell::new(config.language.value.clone()));
    let (recognizer, speech_input) = LineRecognizer::new();
    let speech = SpeechBridge::new(Box::new(recognizer), Box::new(ConsoleSynthesizer), queue.sender())
        .with_voice_commands(config.voice_commands.value);

    let mut guide = TourGuide::new(
        LocationTracker::new(provider, queue.sender()),
        speech,
        ConnectivityMonitor::new(!offline),
        ChatSession::new(Box::new(client.clone()), knowledge),
        Box::new(client.clone()),
        Box::new(ConsoleSurface::new(language.clone())),
    );
    guide.set_language(&config.language.value);
    guide.set_destination(config.destination.value.clone());
    guide.set_voice_enabled(config.voice_enabled.value);

    println!(
        "{} {}",
        style("Tour Guide").bold().green(),
        style("type a message, or /help for commands").dim()
    );
    guide.start();

    let probe = (!offline).then(|| {
        spawn_probe(
            client,
            Duration::from_secs(config.probe_interval_secs.value.max(1)),
            true,
            queue.sender(),
        )
    });
    let mut lines = spawn_line_reader();

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                if speech_input.deliver(&line) {
                    continue;
                }

                match ReplCommand::parse(&line) {
                    ReplCommand::Quit => break,
                    command => {
                        run_command(command, &mut guide, &events, &speech_input, &language, output).await
                    }
                }
            }
            Some(event) = queue.recv() => {
                if !guide.handle(event).await {
                    break;
                }
            }
        }
    }

    if let Some(probe) = probe {
        probe.abort();
    }

    // Finish whatever was already submitted before leaving
    guide.drain(&mut queue).await;
    guide.shutdown();
    Ok(())
}

async fn run_command(
    command: ReplCommand,
    guide: &mut TourGuide,
    events: &EventSender,
    speech_input: &SpeechInput,
    language: &Rc<RefCell<String>>,
    output: &OutputWriter,
) {
    match command {
        ReplCommand::Message(text) => {
            if !text.is_empty() {
                post(events, AppEvent::Submit(text));
            }
        }
        ReplCommand::Voice => {
            let enabled = guide.toggle_voice();
            output.info(if enabled { "Voice mode ON" } else { "Voice mode off" });
        }
        ReplCommand::Listen => {
            if guide.listen().is_ok() && speech_input.is_capturing() {
                output.info("Listening... type what you would say");
            }
        }
        ReplCommand::Navigate(id) => match guide.navigate_to(&id) {
            Ok(None) => output.info("Navigation started, waiting for a position fix"),
            Ok(Some(_)) => {}
            Err(TourGuideError::UnknownDestination { id }) => output.error(format!(
                "Unknown destination '{}'. Available: {}",
                id,
                guide.catalog().ids().join(", ")
            )),
            Err(e) => tracing::debug!(error = %e, "Navigation did not start"),
        },
        ReplCommand::Stop => {
            guide.stop_navigation();
            output.info("Navigation stopped");
        }
        ReplCommand::Online => post(events, AppEvent::Connectivity { online: true }),
        ReplCommand::Offline => post(events, AppEvent::Connectivity { online: false }),
        ReplCommand::Language(code) => match parse_language(&code) {
            Ok(code) => {
                guide.set_language(&code);
                output.info(format!("Language set to {}", code));
                *language.borrow_mut() = code;
            }
            Err(e) => output.error(e),
        },
        ReplCommand::Destination(id) => {
            match &id {
                Some(id) => output.info(format!("Destination set to {}", id)),
                None => output.info("Destination cleared"),
            }
            guide.set_destination(id);
        }
        ReplCommand::Preferences(None) => {
            output.info(format!("Preferences: {}", guide.chat().preferences()));
        }
        ReplCommand::Preferences(Some(settings)) => {
            match updated_preferences(guide.chat().preferences(), &settings) {
                Ok(preferences) => {
                    output.success(format!("Preferences saved: {}", preferences));
                    guide.set_preferences(preferences).await;
                }
                Err(e) => output.error(e),
            }
        }
        ReplCommand::Help => println!("{}", style(HELP).dim()),
        ReplCommand::Quit => {}
        ReplCommand::Unknown(line) => {
            output.warning(format!("Unknown command: {} (try /help)", line));
        }
    }
}

/// Apply whitespace separated `key=value` settings on top of `current`
fn updated_preferences(current: &UserPreferences, settings: &str) -> tourguide_core::Result<UserPreferences> {
    let mut preferences = current.clone();
    for setting in settings.split_whitespace() {
        let (key, value) = setting
            .split_once('=')
            .ok_or_else(|| TourGuideError::ConfigInvalid {
                key: setting.to_string(),
                reason: "expected key=value".to_string(),
            })?;
        preferences.apply(key, value)?;
    }
    Ok(preferences)
}

fn post(events: &EventSender, event: AppEvent) {
    if events.send(event).is_err() {
        tracing::debug!("Event queue closed");
    }
}

/// Read input lines on a blocking thread. Interactive terminals get a
/// dialoguer prompt; piped input is read line by line.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    let interactive = console::user_attended() && std::io::stdin().is_terminal();

    std::thread::spawn(move || {
        if interactive {
            loop {
                let line = Input::<String>::new()
                    .with_prompt("You")
                    .allow_empty(true)
                    .report(false)
                    .interact_text();

                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Prompt closed");
                        break;
                    }
                }
            }
        } else {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
