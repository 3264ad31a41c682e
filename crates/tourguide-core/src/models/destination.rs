use serde::{Deserialize, Serialize};

use super::position::Coordinates;

/// A catalog entry the user can navigate to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,

    /// Local language of the destination
    pub language: String,

    /// Short attraction names
    pub attractions: Vec<String>,
}

impl Destination {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Coordinates,
        language: impl Into<String>,
        attractions: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            language: language.into(),
            attractions: attractions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Static, read-only set of destinations
#[derive(Debug, Clone, Default)]
pub struct DestinationCatalog {
    entries: Vec<Destination>,
}

impl DestinationCatalog {
    pub fn new(entries: Vec<Destination>) -> Self {
        Self { entries }
    }

    /// The destinations shipped with the guide
    pub fn builtin() -> Self {
        Self::new(vec![
            Destination::new(
                "paris",
                "Paris, France",
                Coordinates::new(48.8566, 2.3522),
                "fr",
                &["Eiffel Tower", "Louvre Museum", "Notre-Dame"],
            ),
            Destination::new(
                "tokyo",
                "Tokyo, Japan",
                Coordinates::new(35.6762, 139.6503),
                "ja",
                &["Tokyo Tower", "Sensoji Temple", "Shibuya Crossing"],
            ),
            Destination::new(
                "newyork",
                "New York City, USA",
                Coordinates::new(40.7128, -74.0060),
                "en",
                &["Statue of Liberty", "Central Park", "Times Square"],
            ),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.entries.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
