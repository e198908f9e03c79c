//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported response languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    #[serde(rename = "ur", alias = "urdu")]
    Urdu,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
        }
    }

    /// Name used when instructing the language model
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Urdu => "Urdu",
        }
    }
}

/// Where a set of sensor readings came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadingOrigin {
    /// Reported by the field device
    Live,
    /// Generated locally because the device could not be read
    Simulated,
}

impl ReadingOrigin {
    pub fn is_simulated(&self) -> bool {
        matches!(self, ReadingOrigin::Simulated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::Urdu).unwrap(), "\"ur\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
        let lang: Language = serde_json::from_str("\"urdu\"").unwrap();
        assert_eq!(lang, Language::Urdu);
    }

    #[test]
    fn test_origin_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReadingOrigin::Simulated).unwrap(),
            "\"simulated\""
        );
        assert!(ReadingOrigin::Simulated.is_simulated());
        assert!(!ReadingOrigin::Live.is_simulated());
    }
}
