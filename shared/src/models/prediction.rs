//! Contract for soil quality model inference

use serde::{Deserialize, Serialize};

use crate::models::soil::SoilQualityClass;

/// Features in the order the trained model expects them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictionInput {
    pub gas_level: f64,
    pub humidity: f64,
    pub nitrogen: f64,
    #[serde(alias = "phosphorous")]
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
}

impl PredictionInput {
    pub fn features(&self) -> [f64; 6] {
        [
            self.gas_level,
            self.humidity,
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
        ]
    }
}

/// Model output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelPrediction {
    pub prediction: SoilQualityClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

/// Raw line printed by an inference process. A process may report an error
/// alongside a placeholder prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct RawModelOutput {
    pub prediction: Option<String>,
    pub probability: Option<f64>,
    pub error: Option<String>,
}
