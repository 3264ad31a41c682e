//! Integration tests for GPX replay

use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use tourguide_core::models::{Coordinates, WatchOptions};
use tourguide_core::ports::LocationProvider;
use tourguide_core::{AppEvent, EventQueue, LocationError};
use tourguide_geo::GpxReplayProvider;

const WALK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <wpt lat="48.8584" lon="2.2945">
    <name>Eiffel Tower</name>
  </wpt>
  <trk>
    <name>Seine walk</name>
    <trkseg>
      <trkpt lat="48.8600" lon="2.3000"></trkpt>
      <trkpt lat="48.8606" lon="2.3376"></trkpt>
    </trkseg>
  </trk>
  <rte>
    <name>To Notre-Dame</name>
    <rtept lat="48.8530" lon="2.3499"></rtept>
  </rte>
</gpx>"#;

#[test]
fn test_load_points_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("walk.gpx");
    fs::write(&path, WALK).unwrap();

    let provider = GpxReplayProvider::from_path(&path, Duration::from_millis(1)).unwrap();

    assert_eq!(
        provider.points(),
        &[
            Coordinates::new(48.8584, 2.2945),
            Coordinates::new(48.8600, 2.3000),
            Coordinates::new(48.8606, 2.3376),
            Coordinates::new(48.8530, 2.3499),
        ]
    );
}

#[test]
fn test_invalid_gpx() {
    let result = GpxReplayProvider::from_reader("not xml at all".as_bytes(), Duration::ZERO);
    assert!(result.is_err());
}

#[test]
fn test_missing_file() {
    let result =
        GpxReplayProvider::from_path("/no/such/track.gpx".as_ref(), Duration::from_secs(1));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_replay_emits_every_point() {
    let mut provider =
        GpxReplayProvider::from_reader(WALK.as_bytes(), Duration::from_millis(1)).unwrap();
    let mut queue = EventQueue::new();

    provider.watch(&WatchOptions::default(), queue.sender()).unwrap();

    let mut seen = Vec::new();
    while seen.len() < 4 {
        match queue.recv().await {
            Some(AppEvent::PositionUpdate(position)) => seen.push(position.coordinates),
            other => panic!("unexpected event {:?}", other),
        }
    }

    assert_eq!(seen[0], Coordinates::new(48.8584, 2.2945));
    assert_eq!(seen[3], Coordinates::new(48.8530, 2.3499));
}

#[tokio::test]
async fn test_empty_replay_reports_unavailable() {
    let mut provider = GpxReplayProvider::from_points(Vec::new(), Duration::from_millis(1));
    let mut queue = EventQueue::new();

    provider.watch(&WatchOptions::default(), queue.sender()).unwrap();

    assert_eq!(
        queue.recv().await,
        Some(AppEvent::PositionError(LocationError::PositionUnavailable))
    );
}

#[tokio::test]
async fn test_clear_watch_stops_replay() {
    let mut provider =
        GpxReplayProvider::from_reader(WALK.as_bytes(), Duration::from_secs(3600)).unwrap();
    let mut queue = EventQueue::new();

    let id = provider.watch(&WatchOptions::default(), queue.sender()).unwrap();

    // The first tick of a tokio interval fires immediately
    assert!(matches!(queue.recv().await, Some(AppEvent::PositionUpdate(_))));

    provider.clear_watch(id);
    tokio::task::yield_now().await;
    assert!(queue.try_recv().is_none());
}
