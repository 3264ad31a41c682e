//! End-to-end session tests over in-memory ports

use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tourguide_core::models::{ChatEntry, ChatReply, ChatRequest, Coordinates, Position, Sender, UserPreferences};
use tourguide_core::ports::{
    ChatEndpoint, RecognitionOptions, SpeechRecognizer, SpeechSynthesizer, SyncEndpoint, Utterance,
};
use tourguide_core::{AppEvent, EventQueue, EventSender, LocationError, Result, TourGuideError};
use tourguide_geo::{FixedLocationProvider, LocationTracker, NavigationFix, NoLocationProvider};
use tourguide_session::chat::NETWORK_REPLY;
use tourguide_session::connectivity::{OFFLINE_MESSAGE, ONLINE_MESSAGE};
use tourguide_session::{
    ChatSession, ConnectivityMonitor, SpeechBridge, StatusIndicator, Surface, TourGuide,
};

#[derive(Default)]
struct Screen {
    entries: Vec<ChatEntry>,
    statuses: Vec<StatusIndicator>,
    locations: Vec<Position>,
    navigation: Vec<Option<NavigationFix>>,
}

impl Screen {
    fn bot_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.sender == Sender::Bot)
            .map(|e| e.text.clone())
            .collect()
    }
}

struct RecordingSurface(Rc<RefCell<Screen>>);

impl Surface for RecordingSurface {
    fn show_entry(&mut self, entry: &ChatEntry) {
        self.0.borrow_mut().entries.push(entry.clone());
    }

    fn show_status(&mut self, status: StatusIndicator) {
        self.0.borrow_mut().statuses.push(status);
    }

    fn show_location(&mut self, position: &Position) {
        self.0.borrow_mut().locations.push(position.clone());
    }

    fn show_navigation(&mut self, fix: Option<&NavigationFix>) {
        self.0.borrow_mut().navigation.push(fix.cloned());
    }
}

struct SilentRecognizer;

impl SpeechRecognizer for SilentRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self, _options: &RecognitionOptions, _events: EventSender) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) {}
}

struct RecordingSynthesizer(Rc<RefCell<Vec<String>>>);

impl SpeechSynthesizer for RecordingSynthesizer {
    fn is_available(&self) -> bool {
        true
    }

    fn cancel(&mut self) {}

    fn speak(&mut self, utterance: Utterance) {
        self.0.borrow_mut().push(utterance.text);
    }
}

/// Chat endpoint that is either reachable (echoing) or down
struct Endpoint {
    up: bool,
}

#[async_trait]
impl ChatEndpoint for Endpoint {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        if !self.up {
            return Err(TourGuideError::Network {
                reason: "connection refused".to_string(),
            });
        }
        Ok(ChatReply {
            text: format!("Guide: {}", request.message),
        })
    }

    async fn set_preferences(&self, _user_id: &str, _preferences: &UserPreferences) -> Result<()> {
        Ok(())
    }
}

/// Sync endpoint that rejects every other payload
#[derive(Clone, Default)]
struct AlternatingSync {
    received: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl SyncEndpoint for AlternatingSync {
    async fn sync(&self, payload: &Value) -> Result<()> {
        let mut received = self.received.lock().unwrap();
        received.push(payload.clone());
        if received.len() % 2 == 0 {
            return Err(TourGuideError::Endpoint {
                status: 503,
                message: "Sync failed".to_string(),
            });
        }
        Ok(())
    }
}

struct Harness {
    guide: TourGuide,
    queue: EventQueue,
    screen: Rc<RefCell<Screen>>,
    spoken: Rc<RefCell<Vec<String>>>,
    sync: AlternatingSync,
}

fn harness(with_gps: bool, online: bool, endpoint_up: bool) -> Harness {
    let queue = EventQueue::new();
    let screen = Rc::new(RefCell::new(Screen::default()));
    let spoken = Rc::new(RefCell::new(Vec::new()));
    let sync = AlternatingSync::default();

    let tracker = if with_gps {
        LocationTracker::new(
            Box::new(FixedLocationProvider::new(Coordinates::new(48.8606, 2.3376))),
            queue.sender(),
        )
    } else {
        LocationTracker::new(Box::new(NoLocationProvider), queue.sender())
    };

    let speech = SpeechBridge::new(
        Box::new(SilentRecognizer),
        Box::new(RecordingSynthesizer(spoken.clone())),
        queue.sender(),
    )
    .with_voice_commands(true)
    .with_submit_delay(Duration::ZERO);

    let chat = ChatSession::new(
        Box::new(Endpoint { up: endpoint_up }),
        tourguide_knowledge::defaults::builtin(),
    );

    let guide = TourGuide::new(
        tracker,
        speech,
        ConnectivityMonitor::new(online),
        chat,
        Box::new(sync.clone()),
        Box::new(RecordingSurface(screen.clone())),
    );

    Harness {
        guide,
        queue,
        screen,
        spoken,
        sync,
    }
}

impl Harness {
    /// Dispatch everything already queued
    async fn pump(&mut self) {
        while let Some(event) = self.queue.try_recv() {
            self.guide.handle(event).await;
        }
    }
}

#[tokio::test]
async fn test_position_fix_feeds_chat_coordinates_and_navigation() {
    let mut h = harness(true, true, true);
    h.guide.start();
    h.pump().await;

    assert!(h.guide.state().position.is_some());
    assert_eq!(h.screen.borrow().locations.len(), 1);

    let fix = h.guide.navigate_to("paris").unwrap().unwrap();
    assert!(fix.distance_km < 5.0);
    assert_eq!(h.guide.state().destination.as_deref(), Some("paris"));

    h.guide.stop_navigation();
    assert!(!h.guide.tracker().navigation().is_active());
    assert!(h.guide.tracker().is_tracking());
    assert_eq!(h.screen.borrow().navigation.last(), Some(&None));
}

#[tokio::test]
async fn test_missing_gps_is_reported_not_fatal() {
    let mut h = harness(false, true, true);
    h.guide.start();

    let lines = h.screen.borrow().bot_lines();
    assert_eq!(lines, vec!["GPS Error: Geolocation is not supported on this device".to_string()]);
    assert_eq!(h.screen.borrow().statuses.last(), Some(&StatusIndicator::GpsInactive));

    assert!(matches!(
        h.guide.navigate_to("tokyo"),
        Err(TourGuideError::LocationUnavailable)
    ));
    assert!(!h.guide.tracker().navigation().is_active());

    h.guide.submit("hello").await;
    assert_eq!(h.guide.chat().transcript().last().unwrap().text, "Guide: hello");
}

#[tokio::test]
async fn test_fix_error_keeps_tracking() {
    let mut h = harness(true, true, true);
    h.guide.start();
    h.pump().await;

    h.guide
        .handle(AppEvent::PositionError(LocationError::Timeout))
        .await;

    assert!(h.guide.tracker().is_tracking());
    assert!(!h.guide.tracker().gps_active());
    assert_eq!(
        h.screen.borrow().bot_lines().last().unwrap(),
        "GPS Error: Unable to retrieve your location. Location request timed out."
    );
}

#[tokio::test]
async fn test_unknown_destination() {
    let mut h = harness(true, true, true);
    assert!(matches!(
        h.guide.navigate_to("atlantis"),
        Err(TourGuideError::UnknownDestination { .. })
    ));
}

#[tokio::test]
async fn test_offline_round_trip_drains_queue() {
    let mut h = harness(true, true, true);
    h.guide.set_destination(Some("paris".to_string()));

    h.guide.handle(AppEvent::Connectivity { online: false }).await;
    h.guide.submit("emergency").await;
    h.guide.submit("where is the museum").await;
    h.guide.submit("food please").await;
    assert_eq!(h.guide.connectivity().pending_len(), 3);

    h.guide.handle(AppEvent::Connectivity { online: true }).await;

    assert_eq!(h.guide.connectivity().pending_len(), 0);
    assert_eq!(h.sync.received.lock().unwrap().len(), 3);

    let lines = h.screen.borrow().bot_lines();
    assert_eq!(lines.first().unwrap(), OFFLINE_MESSAGE);
    assert_eq!(lines.last().unwrap(), ONLINE_MESSAGE);
    assert!(lines[1].contains("17"));
}

#[tokio::test]
async fn test_duplicate_connectivity_signal_is_silent() {
    let mut h = harness(true, true, true);
    h.guide.handle(AppEvent::Connectivity { online: true }).await;
    assert!(h.screen.borrow().bot_lines().is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint_reply() {
    let mut h = harness(true, true, false);
    h.guide.submit("Tell me a story").await;
    assert_eq!(h.screen.borrow().bot_lines(), vec![NETWORK_REPLY.to_string()]);
}

#[tokio::test]
async fn test_voice_mode_speaks_remote_replies_and_navigation() {
    let mut h = harness(true, true, true);
    h.guide.start();
    h.pump().await;

    assert!(h.guide.toggle_voice());
    h.guide.submit("hi").await;
    h.guide.navigate_to("tokyo").unwrap();

    let spoken = h.spoken.borrow();
    assert_eq!(spoken[0], "Voice mode activated. How can I help you?");
    assert_eq!(spoken[1], "Guide: hi");
    assert_eq!(spoken[2], "Starting navigation to Tokyo, Japan. Follow the directions.");
}

#[tokio::test]
async fn test_speech_result_becomes_chat_message() {
    let mut h = harness(true, true, true);
    h.guide.listen().unwrap();
    assert_eq!(h.screen.borrow().statuses.last(), Some(&StatusIndicator::Listening));

    h.guide
        .handle(AppEvent::SpeechResult("navigate to Paris please".to_string()))
        .await;
    h.guide.handle(AppEvent::SpeechEnded).await;

    let event = h.queue.recv().await.unwrap();
    assert_eq!(event, AppEvent::Submit("Navigate to paris".to_string()));
    h.guide.handle(event).await;

    assert_eq!(
        h.guide.chat().transcript().last().unwrap().text,
        "Guide: Navigate to paris"
    );
}

#[tokio::test]
async fn test_drain_submits_dictation_still_waiting() {
    let mut h = harness(true, true, true);
    h.guide.listen().unwrap();

    let sender = h.queue.sender();
    sender.send(AppEvent::SpeechResult("Tell me a story".to_string())).unwrap();
    sender.send(AppEvent::SpeechEnded).unwrap();

    assert!(h.guide.drain(&mut h.queue).await);
    assert_eq!(
        h.guide.chat().transcript().last().unwrap().text,
        "Guide: Tell me a story"
    );
    assert_eq!(h.queue.try_recv(), None);
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let mut h = harness(true, true, true);
    let sender = h.queue.sender();
    sender.send(AppEvent::Submit("hello".to_string())).unwrap();
    sender.send(AppEvent::Shutdown).unwrap();
    sender.send(AppEvent::Submit("never sent".to_string())).unwrap();

    h.guide.run(&mut h.queue).await;

    assert_eq!(h.guide.chat().transcript().len(), 2);
    assert!(!h.guide.tracker().is_tracking());
}
