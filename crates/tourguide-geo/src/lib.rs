//! Tour Guide Geo - Navigation math and location tracking
//!
//! This crate computes distance and compass direction to a destination and
//! owns the location tracker together with its location providers.

pub mod navigation;
pub mod providers;
pub mod replay;
pub mod tracker;

pub use navigation::{
    haversine_distance_km, initial_bearing_degrees, navigation_instructions, CompassPoint,
    NavigationFix, EARTH_RADIUS_KM,
};
pub use providers::{FixedLocationProvider, NoLocationProvider};
pub use replay::GpxReplayProvider;
pub use tracker::{LocationTracker, NavigationState};
