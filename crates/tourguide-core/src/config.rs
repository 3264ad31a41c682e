use crate::error::{Result, TourGuideError};
use crate::models::{normalize_language, Coordinates};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the tour guide
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Base URL of the remote chat endpoint
    pub endpoint: ConfigValue<String>,
    pub language: ConfigValue<String>,
    pub destination: ConfigValue<Option<String>>,
    pub voice_enabled: ConfigValue<bool>,
    /// Interpret trigger phrases in dictated speech instead of forwarding it verbatim
    pub voice_commands: ConfigValue<bool>,
    /// Path or URL of the offline knowledge resource
    pub knowledge: ConfigValue<String>,
    pub latitude: ConfigValue<f64>,
    pub longitude: ConfigValue<f64>,
    pub probe_interval_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            endpoint: ConfigValue::new("http://localhost:5000".to_string(), ConfigSource::Default),
            language: ConfigValue::new("en".to_string(), ConfigSource::Default),
            destination: ConfigValue::new(None, ConfigSource::Default),
            voice_enabled: ConfigValue::new(false, ConfigSource::Default),
            voice_commands: ConfigValue::new(false, ConfigSource::Default),
            knowledge: ConfigValue::new(
                "data/offline_data.json".to_string(),
                ConfigSource::Default,
            ),
            latitude: ConfigValue::new(40.7128, ConfigSource::Default),
            longitude: ConfigValue::new(-74.0060, ConfigSource::Default),
            probe_interval_secs: ConfigValue::new(10, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| TourGuideError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| TourGuideError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(endpoint) = file_config.endpoint {
            self.endpoint.update(endpoint, ConfigSource::File);
        }

        if let Some(language) = file_config.language {
            let language = parse_language(&language)?;
            self.language.update(language, ConfigSource::File);
        }

        if let Some(destination) = file_config.destination {
            self.destination.update(Some(destination), ConfigSource::File);
        }

        if let Some(voice_enabled) = file_config.voice_enabled {
            self.voice_enabled.update(voice_enabled, ConfigSource::File);
        }

        if let Some(voice_commands) = file_config.voice_commands {
            self.voice_commands.update(voice_commands, ConfigSource::File);
        }

        if let Some(knowledge) = file_config.knowledge {
            self.knowledge.update(knowledge, ConfigSource::File);
        }

        if let Some(latitude) = file_config.latitude {
            self.latitude.update(latitude, ConfigSource::File);
        }

        if let Some(longitude) = file_config.longitude {
            self.longitude.update(longitude, ConfigSource::File);
        }

        if let Some(interval) = file_config.probe_interval_secs {
            self.probe_interval_secs.update(interval, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load from a TOML file if it exists, otherwise keep the current values
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "No config file, using defaults");
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // TOURGUIDE_ENDPOINT
        if let Ok(endpoint) = env::var("TOURGUIDE_ENDPOINT") {
            self.endpoint.update(endpoint, ConfigSource::Environment);
        }

        // TOURGUIDE_LANGUAGE
        if let Ok(language_str) = env::var("TOURGUIDE_LANGUAGE") {
            match parse_language(&language_str) {
                Ok(language) => self.language.update(language, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TOURGUIDE_LANGUAGE value '{}': expected a two-letter code",
                    language_str
                ),
            }
        }

        // TOURGUIDE_DESTINATION
        if let Ok(destination) = env::var("TOURGUIDE_DESTINATION") {
            let destination = Some(destination).filter(|d| !d.trim().is_empty());
            self.destination.update(destination, ConfigSource::Environment);
        }

        // TOURGUIDE_VOICE
        if let Ok(voice_str) = env::var("TOURGUIDE_VOICE") {
            match parse_bool(&voice_str) {
                Ok(voice) => self.voice_enabled.update(voice, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TOURGUIDE_VOICE value '{}': expected true or false",
                    voice_str
                ),
            }
        }

        // TOURGUIDE_VOICE_COMMANDS
        if let Ok(commands_str) = env::var("TOURGUIDE_VOICE_COMMANDS") {
            match parse_bool(&commands_str) {
                Ok(commands) => self.voice_commands.update(commands, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TOURGUIDE_VOICE_COMMANDS value '{}': expected true or false",
                    commands_str
                ),
            }
        }

        // TOURGUIDE_KNOWLEDGE
        if let Ok(knowledge) = env::var("TOURGUIDE_KNOWLEDGE") {
            self.knowledge.update(knowledge, ConfigSource::Environment);
        }

        // TOURGUIDE_LATITUDE / TOURGUIDE_LONGITUDE
        if let Ok(lat_str) = env::var("TOURGUIDE_LATITUDE") {
            match lat_str.parse::<f64>() {
                Ok(lat) if (-90.0..=90.0).contains(&lat) => {
                    self.latitude.update(lat, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid TOURGUIDE_LATITUDE value '{}': expected degrees in [-90, 90]",
                    lat_str
                ),
            }
        }

        if let Ok(lon_str) = env::var("TOURGUIDE_LONGITUDE") {
            match lon_str.parse::<f64>() {
                Ok(lon) if (-180.0..=180.0).contains(&lon) => {
                    self.longitude.update(lon, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid TOURGUIDE_LONGITUDE value '{}': expected degrees in [-180, 180]",
                    lon_str
                ),
            }
        }

        // TOURGUIDE_PROBE_INTERVAL
        if let Ok(interval_str) = env::var("TOURGUIDE_PROBE_INTERVAL") {
            match interval_str.parse::<u64>() {
                Ok(interval) if interval > 0 => {
                    self.probe_interval_secs.update(interval, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid TOURGUIDE_PROBE_INTERVAL value '{}': expected seconds > 0",
                    interval_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint.update(endpoint, ConfigSource::Cli);
        }

        if let Some(language) = overrides.language {
            self.language.update(language, ConfigSource::Cli);
        }

        if let Some(destination) = overrides.destination {
            self.destination.update(Some(destination), ConfigSource::Cli);
        }

        if let Some(voice_enabled) = overrides.voice_enabled {
            self.voice_enabled.update(voice_enabled, ConfigSource::Cli);
        }

        if let Some(voice_commands) = overrides.voice_commands {
            self.voice_commands.update(voice_commands, ConfigSource::Cli);
        }

        if let Some(knowledge) = overrides.knowledge {
            self.knowledge.update(knowledge, ConfigSource::Cli);
        }
    }

    /// Starting coordinates for the fixed location provider
    pub fn home_coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude.value, self.longitude.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("endpoint".to_string(), (self.endpoint.value.clone(), self.endpoint.source));
        map.insert("language".to_string(), (self.language.value.clone(), self.language.source));
        map.insert(
            "destination".to_string(),
            (
                self.destination.value.clone().unwrap_or_else(|| "-".to_string()),
                self.destination.source,
            ),
        );
        map.insert(
            "voice_enabled".to_string(),
            (self.voice_enabled.value.to_string(), self.voice_enabled.source),
        );
        map.insert(
            "voice_commands".to_string(),
            (self.voice_commands.value.to_string(), self.voice_commands.source),
        );
        map.insert("knowledge".to_string(), (self.knowledge.value.clone(), self.knowledge.source));
        map.insert(
            "latitude".to_string(),
            (format!("{:.4}", self.latitude.value), self.latitude.source),
        );
        map.insert(
            "longitude".to_string(),
            (format!("{:.4}", self.longitude.value), self.longitude.source),
        );
        map.insert(
            "probe_interval_secs".to_string(),
            (self.probe_interval_secs.value.to_string(), self.probe_interval_secs.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    endpoint: Option<String>,
    language: Option<String>,
    destination: Option<String>,
    voice_enabled: Option<bool>,
    voice_commands: Option<bool>,
    knowledge: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    probe_interval_secs: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub endpoint: Option<String>,
    pub language: Option<String>,
    pub destination: Option<String>,
    pub voice_enabled: Option<bool>,
    pub voice_commands: Option<bool>,
    pub knowledge: Option<String>,
}

/// Parse a boolean flag from string
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(TourGuideError::ConfigInvalid {
            key: "bool".to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}

/// Parse and normalize a two-letter language code
pub fn parse_language(s: &str) -> Result<String> {
    let code = normalize_language(s);
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(TourGuideError::ConfigInvalid {
            key: "language".to_string(),
            reason: format!("Invalid language code: {}. Use a two-letter code such as en", s),
        })
    }
}
