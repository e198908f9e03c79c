//! Sensor reading models and the fixed sensor catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ReadingOrigin;

/// Broad grouping used by the dashboard cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SensorCategory {
    Environment,
    Soil,
    /// Any other label a device reports, kept as sent
    #[serde(untagged)]
    Other(String),
}

/// A single named measurement as shown to farmers and fed into prompts.
///
/// Device records pass through unchanged: only `name` and `value` are
/// required, and fields this type does not know are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<SensorCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Short variable key reported by the device (e.g. `nit`)
    #[serde(
        default,
        rename = "variableId",
        alias = "variable_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub variable_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SensorReading {
    /// The reading's own range, or the catalog range of the quantity it
    /// names when the device sent none
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let profile = SensorKind::of(self).map(|kind| kind.profile());
        let min = self.min.or(profile.as_ref().map(|p| p.min))?;
        let max = self.max.or(profile.as_ref().map(|p| p.max))?;
        Some((min, max))
    }

    /// Whether the value sits inside [`bounds`](Self::bounds); a reading
    /// with no known range is never out of bounds
    pub fn is_within_bounds(&self) -> bool {
        match self.bounds() {
            Some((min, max)) => self.value >= min && self.value <= max,
            None => true,
        }
    }
}

/// The quantities the field kit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Temperature,
    Humidity,
    SoilMoisture,
    LightLevel,
    SoilPh,
    Nitrogen,
    Phosphorus,
    Potassium,
}

/// Static description of one catalog quantity
#[derive(Debug, Clone, PartialEq)]
pub struct SensorProfile {
    pub name: &'static str,
    pub unit: &'static str,
    pub category: SensorCategory,
    pub icon: &'static str,
    pub variable_id: &'static str,
    /// Physical lower bound
    pub min: f64,
    /// Physical upper bound
    pub max: f64,
    /// Lower end of the range used for simulated values
    pub simulated_min: f64,
    /// Upper end of the range used for simulated values
    pub simulated_max: f64,
}

impl SensorKind {
    /// Every catalog quantity, in display order
    pub const ALL: [SensorKind; 8] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::SoilMoisture,
        SensorKind::LightLevel,
        SensorKind::SoilPh,
        SensorKind::Nitrogen,
        SensorKind::Phosphorus,
        SensorKind::Potassium,
    ];

    pub fn profile(&self) -> SensorProfile {
        use SensorCategory::{Environment, Soil};

        match self {
            SensorKind::Temperature => SensorProfile {
                name: "Temperature",
                unit: "°C",
                category: Environment,
                icon: "thermometer",
                variable_id: "temp",
                min: 0.0,
                max: 50.0,
                simulated_min: 20.0,
                simulated_max: 35.0,
            },
            SensorKind::Humidity => SensorProfile {
                name: "Humidity",
                unit: "%",
                category: Environment,
                icon: "droplet",
                variable_id: "humd",
                min: 0.0,
                max: 100.0,
                simulated_min: 40.0,
                simulated_max: 90.0,
            },
            SensorKind::SoilMoisture => SensorProfile {
                name: "Soil Moisture",
                unit: "%",
                category: Soil,
                icon: "droplet",
                variable_id: "moist",
                min: 0.0,
                max: 100.0,
                simulated_min: 30.0,
                simulated_max: 70.0,
            },
            SensorKind::LightLevel => SensorProfile {
                name: "Light Level",
                unit: "lux",
                category: Environment,
                icon: "sun",
                variable_id: "light",
                min: 0.0,
                max: 2000.0,
                simulated_min: 500.0,
                simulated_max: 1500.0,
            },
            SensorKind::SoilPh => SensorProfile {
                name: "Soil pH",
                unit: "pH",
                category: Soil,
                icon: "flask",
                variable_id: "ph",
                min: 0.0,
                max: 14.0,
                simulated_min: 5.5,
                simulated_max: 7.5,
            },
            SensorKind::Nitrogen => SensorProfile {
                name: "Nitrogen",
                unit: "mg/kg",
                category: Soil,
                icon: "leaf",
                variable_id: "nit",
                min: 0.0,
                max: 100.0,
                simulated_min: 20.0,
                simulated_max: 80.0,
            },
            SensorKind::Phosphorus => SensorProfile {
                name: "Phosphorus",
                unit: "mg/kg",
                category: Soil,
                icon: "leaf",
                variable_id: "phos",
                min: 0.0,
                max: 50.0,
                simulated_min: 10.0,
                simulated_max: 40.0,
            },
            SensorKind::Potassium => SensorProfile {
                name: "Potassium",
                unit: "mg/kg",
                category: Soil,
                icon: "leaf",
                variable_id: "pot",
                min: 0.0,
                max: 400.0,
                simulated_min: 100.0,
                simulated_max: 300.0,
            },
        }
    }

    /// Build a reading for this kind carrying the catalog metadata
    pub fn reading(&self, value: f64) -> SensorReading {
        let profile = self.profile();
        SensorReading {
            name: profile.name.to_string(),
            value,
            unit: profile.unit.to_string(),
            category: Some(profile.category),
            min: Some(profile.min),
            max: Some(profile.max),
            variable_id: Some(profile.variable_id.to_string()),
            icon: Some(profile.icon.to_string()),
            extra: serde_json::Map::new(),
        }
    }

    /// Whether a reading refers to this kind, by variable id or by name
    pub fn matches(&self, reading: &SensorReading) -> bool {
        let profile = self.profile();
        match reading.variable_id.as_deref() {
            Some(id) if id.eq_ignore_ascii_case(profile.variable_id) => true,
            _ => reading.name.eq_ignore_ascii_case(profile.name),
        }
    }

    /// Catalog quantity a reading refers to, if any
    pub fn of(reading: &SensorReading) -> Option<SensorKind> {
        SensorKind::ALL.into_iter().find(|kind| kind.matches(reading))
    }

    /// Value of the first reading of this kind in a list
    pub fn find_value(&self, readings: &[SensorReading]) -> Option<f64> {
        readings.iter().find(|r| self.matches(r)).map(|r| r.value)
    }
}

/// Response body for a sensor poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorFeed {
    /// Always true; consumers never special-case an unreachable device
    pub success: bool,
    pub origin: ReadingOrigin,
    pub timestamp: DateTime<Utc>,
    pub data: Vec<SensorReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SensorFeed {
    pub fn live(data: Vec<SensorReading>) -> Self {
        Self {
            success: true,
            origin: ReadingOrigin::Live,
            timestamp: Utc::now(),
            data,
            notice: None,
        }
    }

    pub fn simulated(data: Vec<SensorReading>) -> Self {
        Self {
            success: true,
            origin: ReadingOrigin::Simulated,
            timestamp: Utc::now(),
            data,
            notice: Some("Using simulated data - field device not connected".to_string()),
        }
    }
}
