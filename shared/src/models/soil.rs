//! Soil health classification from NPK readings

use serde::{Deserialize, Serialize};

use crate::models::sensor::{SensorKind, SensorReading};

/// Mean NPK below this is poor soil
pub const POOR_THRESHOLD: f64 = 30.0;
/// Mean NPK at or above this is good soil
pub const GOOD_THRESHOLD: f64 = 60.0;

/// Qualitative soil class derived from mean nutrient level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoilQualityClass {
    Poor,
    Moderate,
    Good,
}

impl std::fmt::Display for SoilQualityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilQualityClass::Poor => write!(f, "Poor"),
            SoilQualityClass::Moderate => write!(f, "Moderate"),
            SoilQualityClass::Good => write!(f, "Good"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown soil quality class: {0}")]
pub struct ParseSoilQualityError(pub String);

impl std::str::FromStr for SoilQualityClass {
    type Err = ParseSoilQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poor" => Ok(SoilQualityClass::Poor),
            "moderate" => Ok(SoilQualityClass::Moderate),
            "good" => Ok(SoilQualityClass::Good),
            other => Err(ParseSoilQualityError(other.to_string())),
        }
    }
}

/// Nitrogen, phosphorus and potassium levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NpkLevels {
    pub nitrogen: f64,
    #[serde(alias = "phosphorous")]
    pub phosphorus: f64,
    pub potassium: f64,
}

impl NpkLevels {
    pub fn new(nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
        }
    }

    pub fn mean(&self) -> f64 {
        (self.nitrogen + self.phosphorus + self.potassium) / 3.0
    }

    pub fn classify(&self) -> SoilQualityClass {
        classify_soil_quality(self.nitrogen, self.phosphorus, self.potassium)
    }

    /// Pull N, P and K out of a reading list; missing nutrients read as zero
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        Self {
            nitrogen: SensorKind::Nitrogen.find_value(readings).unwrap_or(0.0),
            phosphorus: SensorKind::Phosphorus.find_value(readings).unwrap_or(0.0),
            potassium: SensorKind::Potassium.find_value(readings).unwrap_or(0.0),
        }
    }
}

/// Classify soil by the arithmetic mean of its three nutrient readings.
///
/// Total over all inputs: negative values are not rejected here, the
/// thresholds simply apply to whatever mean results.
pub fn classify_soil_quality(nitrogen: f64, phosphorus: f64, potassium: f64) -> SoilQualityClass {
    let mean = (nitrogen + phosphorus + potassium) / 3.0;
    if mean < POOR_THRESHOLD {
        SoilQualityClass::Poor
    } else if mean < GOOD_THRESHOLD {
        SoilQualityClass::Moderate
    } else {
        SoilQualityClass::Good
    }
}

/// Quick nutrient guidance shown next to the live readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NutrientAdvice {
    NoData,
    High,
    Low,
    Optimal,
}

impl NutrientAdvice {
    pub fn message(&self) -> &'static str {
        match self {
            NutrientAdvice::NoData => "No soil data available.",
            NutrientAdvice::High => "Nutrient levels are high. Monitor closely.",
            NutrientAdvice::Low => "Nutrient levels are low. Consider fertilization.",
            NutrientAdvice::Optimal => "Nutrient levels are optimal.",
        }
    }
}

/// Compare N, P and K against the field kit's comfortable ranges.
/// Any high nutrient wins over any low one.
pub fn assess_nutrients(readings: &[SensorReading]) -> NutrientAdvice {
    if readings.is_empty() {
        return NutrientAdvice::NoData;
    }

    let npk = NpkLevels::from_readings(readings);
    if npk.nitrogen > 80.0 || npk.phosphorus > 40.0 || npk.potassium > 300.0 {
        NutrientAdvice::High
    } else if npk.nitrogen < 20.0 || npk.phosphorus < 10.0 || npk.potassium < 100.0 {
        NutrientAdvice::Low
    } else {
        NutrientAdvice::Optimal
    }
}

/// Composite soil snapshot served to the soil monitoring page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilSnapshot {
    pub air_temperature: f64,
    pub soil_temperature: f64,
    pub humidity: f64,
    pub moisture: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub soil_quality: SoilQualityClass,
}

impl SoilSnapshot {
    pub fn npk(&self) -> NpkLevels {
        NpkLevels::new(self.nitrogen, self.phosphorus, self.potassium)
    }
}
