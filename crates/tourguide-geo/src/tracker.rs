use tourguide_core::models::{Destination, Position, WatchOptions};
use tourguide_core::ports::{LocationProvider, WatchId};
use tourguide_core::{EventSender, LocationError, Result, TourGuideError};

use crate::navigation::NavigationFix;

/// Navigation target, if any. Active exactly when a destination is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    destination: Option<Destination>,
}

impl NavigationState {
    pub fn is_active(&self) -> bool {
        self.destination.is_some()
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    fn clear(&mut self) {
        self.destination = None;
    }
}

/// Continuous position observation plus navigation toward one destination
pub struct LocationTracker {
    provider: Box<dyn LocationProvider>,
    events: EventSender,
    options: WatchOptions,
    watch: Option<WatchId>,
    position: Option<Position>,
    navigation: NavigationState,
    gps_active: bool,
}

impl LocationTracker {
    pub fn new(provider: Box<dyn LocationProvider>, events: EventSender) -> Self {
        Self {
            provider,
            events,
            options: WatchOptions::default(),
            watch: None,
            position: None,
            navigation: NavigationState::default(),
            gps_active: false,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.watch.is_some()
    }

    /// Latest fix, if one has arrived
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Whether the last thing the provider reported was a good fix
    pub fn gps_active(&self) -> bool {
        self.gps_active
    }

    /// Begin continuous observation. A no-op when already tracking.
    ///
    /// # Errors
    /// `TourGuideError::LocationUnavailable` when the device has no location
    /// capability. Nothing is retried.
    pub fn start_tracking(&mut self) -> Result<()> {
        if self.is_tracking() {
            return Ok(());
        }

        if !self.provider.is_available() {
            tracing::warn!("Geolocation is not supported on this device");
            return Err(TourGuideError::LocationUnavailable);
        }

        let id = self.provider.watch(&self.options, self.events.clone())?;
        tracing::info!(watch_id = id.0, "Started position tracking");
        self.watch = Some(id);
        Ok(())
    }

    /// Cancel observation and drop any navigation target
    pub fn stop_tracking(&mut self) {
        if let Some(id) = self.watch.take() {
            self.provider.clear_watch(id);
            tracing::info!(watch_id = id.0, "Stopped position tracking");
        }
        self.navigation.clear();
        self.gps_active = false;
    }

    /// Navigate to `destination`, starting tracking if needed.
    ///
    /// Returns the immediate recompute, which is `None` until a first fix exists.
    pub fn start_navigation(&mut self, destination: Destination) -> Result<Option<NavigationFix>> {
        self.start_tracking()?;

        tracing::info!(destination = %destination.id, "Starting navigation");
        self.navigation.destination = Some(destination);
        Ok(self.recompute())
    }

    /// Drop the navigation target but keep tracking
    pub fn stop_navigation(&mut self) {
        if let Some(destination) = self.navigation.destination() {
            tracing::info!(destination = %destination.id, "Stopping navigation");
        }
        self.navigation.clear();
    }

    /// Record a new fix. Fixes that arrive after tracking stopped are ignored.
    pub fn handle_position(&mut self, position: Position) -> Option<NavigationFix> {
        if !self.is_tracking() {
            tracing::debug!("Ignoring position fix received while not tracking");
            return None;
        }

        self.position = Some(position);
        self.gps_active = true;
        self.recompute()
    }

    /// Record a failed fix and return the user-facing message.
    /// Tracking stays up; the next good fix reactivates the GPS indicator.
    pub fn handle_error(&mut self, error: LocationError) -> String {
        tracing::warn!(?error, "Position fix failed");
        self.gps_active = false;
        error.to_string()
    }

    /// Distance and direction to the navigation target from the latest fix
    pub fn recompute(&self) -> Option<NavigationFix> {
        let destination = self.navigation.destination()?;
        let position = self.position.as_ref()?;
        Some(NavigationFix::compute(position.coordinates, destination))
    }
}
