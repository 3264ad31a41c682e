//! Simple location providers
//!
//! `FixedLocationProvider` reports a single configured position, which is
//! enough for desktop use. `NoLocationProvider` stands in for a device
//! without any location capability.

use tourguide_core::models::{Coordinates, Position, WatchOptions};
use tourguide_core::ports::{LocationProvider, WatchId};
use tourguide_core::{AppEvent, EventSender, Result};

/// Reports one fix at fixed coordinates whenever a watch starts
pub struct FixedLocationProvider {
    coordinates: Coordinates,
    accuracy: f64,
    next_id: u64,
}

impl FixedLocationProvider {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            accuracy: 0.0,
            next_id: 1,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }
}

impl LocationProvider for FixedLocationProvider {
    fn is_available(&self) -> bool {
        true
    }

    fn watch(&mut self, _options: &WatchOptions, events: EventSender) -> Result<WatchId> {
        let id = WatchId(self.next_id);
        self.next_id += 1;

        let position = Position::new(self.coordinates, self.accuracy);
        if events.send(AppEvent::PositionUpdate(position)).is_err() {
            tracing::debug!("Event queue closed before the first fix");
        }

        Ok(id)
    }

    fn clear_watch(&mut self, _id: WatchId) {}
}

/// A device without location support
#[derive(Debug, Default)]
pub struct NoLocationProvider;

impl LocationProvider for NoLocationProvider {
    fn is_available(&self) -> bool {
        false
    }

    fn watch(&mut self, _options: &WatchOptions, _events: EventSender) -> Result<WatchId> {
        Err(tourguide_core::TourGuideError::LocationUnavailable)
    }

    fn clear_watch(&mut self, _id: WatchId) {}
}
