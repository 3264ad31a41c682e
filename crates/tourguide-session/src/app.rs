//! The tour guide event loop
//!
//! `TourGuide` owns one of each component and is the only consumer of the
//! [`EventQueue`]. Every platform callback arrives as an [`AppEvent`] and is
//! dispatched to the component that owns the affected state; results are
//! rendered on the [`Surface`].

use tourguide_core::models::{DestinationCatalog, Position, UserPreferences, DEFAULT_LANGUAGE};
use tourguide_core::ports::SyncEndpoint;
use tourguide_core::{AppEvent, EventQueue, LocationError, Result, TourGuideError};
use tourguide_geo::{LocationTracker, NavigationFix};

use crate::chat::{generate_user_id, ChatContext, ChatSession, ReplySource};
use crate::connectivity::ConnectivityMonitor;
use crate::speech::SpeechBridge;
use crate::surface::{StatusIndicator, Surface};

/// Snapshot of the session-wide state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub user_id: String,
    pub position: Option<Position>,
    pub online: bool,
    pub language: String,
    pub destination: Option<String>,
    pub voice_enabled: bool,
}

pub struct TourGuide {
    tracker: LocationTracker,
    speech: SpeechBridge,
    connectivity: ConnectivityMonitor,
    chat: ChatSession,
    sync: Box<dyn SyncEndpoint>,
    surface: Box<dyn Surface>,
    catalog: DestinationCatalog,
    user_id: String,
    language: String,
    destination: Option<String>,
}

impl TourGuide {
    pub fn new(
        tracker: LocationTracker,
        speech: SpeechBridge,
        connectivity: ConnectivityMonitor,
        chat: ChatSession,
        sync: Box<dyn SyncEndpoint>,
        surface: Box<dyn Surface>,
    ) -> Self {
        let user_id = generate_user_id();
        tracing::info!(user_id = %user_id, "Tour guide session created");

        Self {
            tracker,
            speech,
            connectivity,
            chat,
            sync,
            surface,
            catalog: DestinationCatalog::builtin(),
            user_id,
            language: DEFAULT_LANGUAGE.to_string(),
            destination: None,
        }
    }

    pub fn with_catalog(mut self, catalog: DestinationCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn state(&self) -> AppState {
        AppState {
            user_id: self.user_id.clone(),
            position: self.tracker.position().cloned(),
            online: self.connectivity.is_online(),
            language: self.language.clone(),
            destination: self.destination.clone(),
            voice_enabled: self.speech.voice_enabled(),
        }
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &LocationTracker {
        &self.tracker
    }

    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    /// Show the initial indicators and begin location tracking.
    ///
    /// A device without location support is reported on the transcript; the
    /// session keeps running without coordinates.
    pub fn start(&mut self) {
        self.show_connectivity();
        self.surface.show_status(StatusIndicator::Idle);

        match self.tracker.start_tracking() {
            Ok(()) => self.surface.show_status(StatusIndicator::GpsActive),
            Err(e) => {
                self.notice(format!("GPS Error: {}", e));
                self.surface.show_status(StatusIndicator::GpsInactive);
            }
        }
    }

    /// Dispatch events until `Shutdown` arrives. The queue keeps a sender of
    /// its own, so the loop does not end when the providers go away.
    pub async fn run(&mut self, queue: &mut EventQueue) {
        while let Some(event) = queue.recv().await {
            if !self.handle(event).await {
                break;
            }
        }
        self.shutdown();
    }

    /// Handle everything already queued, waiting for dictated messages whose
    /// submission is still delayed. Returns false if `Shutdown` was among them.
    pub async fn drain(&mut self, queue: &mut EventQueue) -> bool {
        loop {
            while let Some(event) = queue.try_recv() {
                if !self.handle(event).await {
                    return false;
                }
            }

            if !self.speech.has_pending_submits() {
                return true;
            }
            self.speech.flush().await;
        }
    }

    /// Dispatch one event. Returns false once the loop should stop.
    pub async fn handle(&mut self, event: AppEvent) -> bool {
        tracing::debug!(?event, "Dispatching event");

        match event {
            AppEvent::PositionUpdate(position) => self.on_position(position),
            AppEvent::PositionError(error) => self.on_position_error(error),
            AppEvent::Connectivity { online } => self.on_connectivity(online).await,
            AppEvent::SpeechResult(transcript) => {
                self.speech.handle_result(&transcript);
            }
            AppEvent::SpeechError(error) => {
                self.speech.handle_error(&error);
                self.surface.show_status(StatusIndicator::Idle);
            }
            AppEvent::SpeechEnded => {
                self.speech.handle_end();
                self.surface.show_status(StatusIndicator::Idle);
            }
            AppEvent::Submit(message) => self.submit(&message).await,
            AppEvent::Shutdown => return false,
        }

        true
    }

    /// Send a chat message and render the exchange
    pub async fn submit(&mut self, message: &str) {
        let context = ChatContext {
            user_id: &self.user_id,
            destination: self.destination.as_deref().unwrap_or(""),
            language: &self.language,
            coordinates: self.tracker.position().map(|p| p.coordinates),
        };

        let Some(exchange) = self.chat.send(message, &context, &mut self.connectivity).await else {
            return;
        };

        self.surface.show_entry(&exchange.user);
        self.surface.show_entry(&exchange.reply);

        if exchange.source == ReplySource::Remote {
            self.speech.speak(&exchange.reply.text);
        }
    }

    /// Flip voice mode. Returns the new state.
    pub fn toggle_voice(&mut self) -> bool {
        self.speech.toggle_voice_mode()
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.speech.set_voice_enabled(enabled);
    }

    /// Start (or stop) capturing one spoken message
    pub fn listen(&mut self) -> Result<()> {
        match self.speech.start_listening() {
            Ok(true) => {
                self.surface.show_status(StatusIndicator::Listening);
                Ok(())
            }
            Ok(false) => {
                self.surface.show_status(StatusIndicator::Idle);
                Ok(())
            }
            Err(e) => {
                self.notice(e.to_string());
                Err(e)
            }
        }
    }

    /// Navigate to a catalog destination
    ///
    /// # Errors
    /// `UnknownDestination` for ids not in the catalog, `LocationUnavailable`
    /// when tracking cannot start.
    pub fn navigate_to(&mut self, id: &str) -> Result<Option<NavigationFix>> {
        let destination = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| TourGuideError::UnknownDestination { id: id.to_string() })?;
        let name = destination.name.clone();

        let fix = match self.tracker.start_navigation(destination) {
            Ok(fix) => fix,
            Err(e) => {
                self.notice(format!("GPS Error: {}", e));
                self.surface.show_status(StatusIndicator::GpsInactive);
                return Err(e);
            }
        };

        self.destination = Some(id.to_string());
        self.surface.show_navigation(fix.as_ref());
        self.speech
            .speak(&format!("Starting navigation to {}. Follow the directions.", name));
        Ok(fix)
    }

    pub fn stop_navigation(&mut self) {
        self.tracker.stop_navigation();
        self.surface.show_navigation(None);
    }

    pub fn stop_tracking(&mut self) {
        self.tracker.stop_tracking();
        self.surface.show_navigation(None);
        self.surface.show_status(StatusIndicator::GpsInactive);
    }

    pub fn set_language(&mut self, code: &str) {
        self.language = code.to_string();
        self.speech.set_language(code);
    }

    /// Select the destination chat messages are about. Does not navigate.
    pub fn set_destination(&mut self, id: Option<String>) {
        self.destination = id;
    }

    /// Replace the traveller preferences, sending them to the endpoint when online
    pub async fn set_preferences(&mut self, preferences: UserPreferences) {
        let online = self.connectivity.is_online();
        self.chat.set_preferences(preferences, &self.user_id, online).await;
    }

    fn on_position(&mut self, position: Position) {
        if !self.tracker.is_tracking() {
            return;
        }

        let fix = self.tracker.handle_position(position.clone());
        self.surface.show_location(&position);
        self.surface.show_status(StatusIndicator::GpsActive);

        if self.tracker.navigation().is_active() {
            self.surface.show_navigation(fix.as_ref());
        }
    }

    fn on_position_error(&mut self, error: LocationError) {
        let message = self.tracker.handle_error(error);
        self.notice(format!("GPS Error: {}", message));
        self.surface.show_status(StatusIndicator::GpsInactive);
    }

    async fn on_connectivity(&mut self, online: bool) {
        let message = if online {
            self.connectivity
                .go_online(self.sync.as_ref())
                .await
                .map(|(message, _)| message)
        } else {
            self.connectivity.go_offline()
        };

        if let Some(message) = message {
            self.notice(message);
            self.show_connectivity();
        }
    }

    fn show_connectivity(&mut self) {
        let status = if self.connectivity.is_online() {
            StatusIndicator::Online
        } else {
            StatusIndicator::Offline
        };
        self.surface.show_status(status);
    }

    fn notice(&mut self, text: impl Into<String>) {
        let entry = self.chat.post_notice(text);
        self.surface.show_entry(&entry);
    }

    /// Stop listening and tracking
    pub fn shutdown(&mut self) {
        self.speech.stop_listening();
        self.tracker.stop_tracking();
        tracing::info!(user_id = %self.user_id, "Tour guide session ended");
    }
}
