use serde::Serialize;
use std::fmt;
use tourguide_core::models::{Coordinates, Destination, Localized};

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers using the haversine formula
pub fn haversine_distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Forward azimuth from `from` to `to`, normalized to [0, 360) degrees
pub fn initial_bearing_degrees(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let y = d_lon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lon.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// One of the eight compass points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    const ALL: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];

    /// Quantize a bearing in degrees to a compass point.
    ///
    /// Each point owns the 45° sector that starts at it, so 0°..45° reads
    /// North and 45°..90° reads North-East.
    pub fn from_bearing(bearing: f64) -> Self {
        let sector = (bearing.rem_euclid(360.0) / 45.0).floor() as usize;
        Self::ALL[sector % 8]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompassPoint::North => "North",
            CompassPoint::NorthEast => "North-East",
            CompassPoint::East => "East",
            CompassPoint::SouthEast => "South-East",
            CompassPoint::South => "South",
            CompassPoint::SouthWest => "South-West",
            CompassPoint::West => "West",
            CompassPoint::NorthWest => "North-West",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distance and direction from the current fix to the navigation target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationFix {
    pub destination_id: String,
    pub destination_name: String,
    pub distance_km: f64,
    pub bearing_degrees: f64,
    pub direction: CompassPoint,
}

impl NavigationFix {
    /// Compute the fix from `from` toward `destination`
    pub fn compute(from: Coordinates, destination: &Destination) -> Self {
        let bearing = initial_bearing_degrees(from, destination.coordinates);
        Self {
            destination_id: destination.id.clone(),
            destination_name: destination.name.clone(),
            distance_km: haversine_distance_km(from, destination.coordinates),
            bearing_degrees: bearing,
            direction: CompassPoint::from_bearing(bearing),
        }
    }

    /// Spoken/printed instruction in the given language
    pub fn instruction(&self, language: &str) -> String {
        navigation_instructions(self.direction, self.distance_km, &self.destination_name)
            .get(language)
            .clone()
    }
}

impl fmt::Display for NavigationFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}km {} to {}",
            self.distance_km, self.direction, self.destination_name
        )
    }
}

/// Turn-by-heading instructions in every supported language
pub fn navigation_instructions(
    direction: CompassPoint,
    distance_km: f64,
    destination: &str,
) -> Localized<String> {
    let distance = format!("{:.2}", distance_km);
    Localized {
        en: format!("Head {} for {}km towards {}", direction, distance, destination),
        es: format!("Diríjase {} por {}km hacia {}", direction, distance, destination),
        fr: format!("Allez {} pendant {}km vers {}", direction, distance, destination),
        ja: format!("{}まで{}方向に{}km進んでください", destination, direction, distance),
    }
}
