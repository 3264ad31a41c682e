//! GPX track replay
//!
//! Replays the points of a GPX file as position fixes, one per interval.
//! Waypoints come first, then track points, then route points.

use gpx::{read, Gpx};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tourguide_core::models::{Coordinates, Position, WatchOptions};
use tourguide_core::ports::{LocationProvider, WatchId};
use tourguide_core::{AppEvent, EventSender, LocationError, Result, TourGuideError};

/// Accuracy reported for replayed fixes, in meters
const REPLAY_ACCURACY_M: f64 = 5.0;

pub struct GpxReplayProvider {
    points: Vec<Coordinates>,
    interval: Duration,
    watches: HashMap<WatchId, JoinHandle<()>>,
    next_id: u64,
}

impl GpxReplayProvider {
    /// Load the points of a GPX file
    pub fn from_path(path: &Path, interval: Duration) -> Result<Self> {
        let file = File::open(path).map_err(|e| TourGuideError::ConfigInvalid {
            key: "gpx".to_string(),
            reason: format!("Failed to open GPX file {}: {}", path.display(), e),
        })?;

        Self::from_reader(BufReader::new(file), interval)
    }

    pub fn from_reader<R: Read>(reader: R, interval: Duration) -> Result<Self> {
        let gpx: Gpx = read(reader).map_err(|e| TourGuideError::ConfigInvalid {
            key: "gpx".to_string(),
            reason: format!("Failed to parse GPX: {}", e),
        })?;

        let points = extract_points(&gpx);
        tracing::info!(points = points.len(), "Loaded GPX replay");

        Ok(Self::from_points(points, interval))
    }

    pub fn from_points(points: Vec<Coordinates>, interval: Duration) -> Self {
        Self {
            points,
            interval,
            watches: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn points(&self) -> &[Coordinates] {
        &self.points
    }
}

fn extract_points(gpx: &Gpx) -> Vec<Coordinates> {
    let waypoints = gpx.waypoints.iter();
    let track_points = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter());
    let route_points = gpx.routes.iter().flat_map(|route| route.points.iter());

    waypoints
        .chain(track_points)
        .chain(route_points)
        .map(|waypoint| Coordinates::from(waypoint.point()))
        .collect()
}

impl LocationProvider for GpxReplayProvider {
    fn is_available(&self) -> bool {
        true
    }

    fn watch(&mut self, _options: &WatchOptions, events: EventSender) -> Result<WatchId> {
        let id = WatchId(self.next_id);
        self.next_id += 1;

        let points = self.points.clone();
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            if points.is_empty() {
                let _ = events.send(AppEvent::PositionError(LocationError::PositionUnavailable));
                return;
            }

            let mut ticker = tokio::time::interval(interval);
            for coordinates in points {
                ticker.tick().await;
                let position = Position::new(coordinates, REPLAY_ACCURACY_M);
                if events.send(AppEvent::PositionUpdate(position)).is_err() {
                    // Queue closed, nobody is listening anymore
                    return;
                }
            }
            tracing::debug!("GPX replay finished");
        });

        self.watches.insert(id, handle);
        Ok(id)
    }

    fn clear_watch(&mut self, id: WatchId) {
        if let Some(handle) = self.watches.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for GpxReplayProvider {
    fn drop(&mut self) {
        for (_, handle) in self.watches.drain() {
            handle.abort();
        }
    }
}
