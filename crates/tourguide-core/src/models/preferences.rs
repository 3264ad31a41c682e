use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::parse_language;
use crate::error::{Result, TourGuideError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Budget {
    type Err = TourGuideError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Budget::Low),
            "medium" => Ok(Budget::Medium),
            "high" => Ok(Budget::High),
            _ => Err(TourGuideError::ConfigInvalid {
                key: "budget".to_string(),
                reason: format!("Invalid budget: {}. Use low, medium or high", s),
            }),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        };
        f.write_str(label)
    }
}

/// Traveller preferences forwarded to the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub interests: Vec<String>,
    pub budget: Budget,
    pub travel_style: String,
    pub language: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            interests: vec!["sightseeing".to_string()],
            budget: Budget::Medium,
            travel_style: "sightseeing".to_string(),
            language: "en".to_string(),
        }
    }
}

impl UserPreferences {
    /// Set one field from a `key=value` style setting.
    ///
    /// Keys: `interests` (comma separated), `budget`, `style`, `language`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key.trim().to_lowercase().as_str() {
            "interests" => {
                let interests: Vec<String> = value
                    .split(',')
                    .map(|i| i.trim().to_lowercase())
                    .filter(|i| !i.is_empty())
                    .collect();
                if interests.is_empty() {
                    return Err(invalid(key, "at least one interest is required"));
                }
                self.interests = interests;
            }
            "budget" => self.budget = value.parse()?,
            "style" | "travel_style" => {
                let style = value.trim().to_lowercase();
                if style.is_empty() {
                    return Err(invalid(key, "travel style cannot be empty"));
                }
                self.travel_style = style;
            }
            "language" => self.language = parse_language(value)?,
            _ => {
                return Err(invalid(
                    key,
                    "unknown preference. Use interests, budget, style or language",
                ))
            }
        }
        Ok(())
    }
}

impl fmt::Display for UserPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interests={} budget={} style={} language={}",
            self.interests.join(","),
            self.budget,
            self.travel_style,
            self.language
        )
    }
}

fn invalid(key: &str, reason: &str) -> TourGuideError {
    TourGuideError::ConfigInvalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
