//! Error types for the tour guide

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TourGuideError {
    // Capability errors
    #[error("Geolocation is not supported on this device")]
    LocationUnavailable,

    #[error("Speech recognition is not supported on this device")]
    SpeechUnavailable,

    // Per-fix location errors
    #[error("{0}")]
    Location(#[from] LocationError),

    // Remote endpoint errors
    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("Endpoint returned an error ({status}): {message}")]
    Endpoint { status: u16, message: String },

    // Knowledge errors
    #[error("Failed to load knowledge from {source_name}: {reason}")]
    KnowledgeLoad { source_name: String, reason: String },

    #[error("Unknown destination: {id}")]
    UnknownDestination { id: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TourGuideError {
    /// True for failures that mean the remote endpoint could not be reached
    pub fn is_network(&self) -> bool {
        matches!(self, TourGuideError::Network { .. })
    }
}

impl From<serde_json::Error> for TourGuideError {
    fn from(err: serde_json::Error) -> Self {
        TourGuideError::Serialization(err.to_string())
    }
}

/// Failure of a single position fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Unable to retrieve your location. Please enable location permissions in your device settings.")]
    PermissionDenied,

    #[error("Unable to retrieve your location. Location information is unavailable.")]
    PositionUnavailable,

    #[error("Unable to retrieve your location. Location request timed out.")]
    Timeout,

    #[error("Unable to retrieve your location. An unknown error occurred.")]
    Unknown,
}

pub type Result<T> = std::result::Result<T, TourGuideError>;
