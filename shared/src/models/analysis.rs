//! Multi-parameter soil analysis rules
//!
//! Each of six field parameters is placed in one of four classes using
//! regional reference ranges, and the per-parameter classes are folded into
//! an overall verdict. The rule-based assessment and recommendations here
//! also serve as the fallback whenever the language model cannot answer.

use serde::{Deserialize, Serialize};

/// Crops suggested when no model advice is available
pub const DEFAULT_SUITABLE_CROPS: [&str; 4] = ["Rice", "Wheat", "Cotton", "Sugarcane"];

/// Classification of a single parameter (or of the soil overall)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ParameterClass {
    Excessive,
    Good,
    Moderate,
    Poor,
}

impl std::fmt::Display for ParameterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterClass::Excessive => write!(f, "Excessive"),
            ParameterClass::Good => write!(f, "Good"),
            ParameterClass::Moderate => write!(f, "Moderate"),
            ParameterClass::Poor => write!(f, "Poor"),
        }
    }
}

/// Parameters covered by the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilParameter {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    GasLevel,
}

/// Reference ranges for one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRanges {
    /// Values at or above this are excessive
    pub excessive_min: f64,
    pub good: (f64, f64),
    pub moderate: (f64, f64),
}

impl SoilParameter {
    pub const ALL: [SoilParameter; 6] = [
        SoilParameter::Nitrogen,
        SoilParameter::Phosphorus,
        SoilParameter::Potassium,
        SoilParameter::Temperature,
        SoilParameter::Humidity,
        SoilParameter::GasLevel,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "nitrogen",
            SoilParameter::Phosphorus => "phosphorus",
            SoilParameter::Potassium => "potassium",
            SoilParameter::Temperature => "temperature",
            SoilParameter::Humidity => "humidity",
            SoilParameter::GasLevel => "gas_level",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "Nitrogen",
            SoilParameter::Phosphorus => "Phosphorus",
            SoilParameter::Potassium => "Potassium",
            SoilParameter::Temperature => "Temperature",
            SoilParameter::Humidity => "Humidity",
            SoilParameter::GasLevel => "Gas Level",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen | SoilParameter::Phosphorus | SoilParameter::Potassium => {
                "mg/kg"
            }
            SoilParameter::Temperature => "°C",
            SoilParameter::Humidity => "%",
            SoilParameter::GasLevel => "ppm",
        }
    }

    pub fn ranges(&self) -> ParameterRanges {
        match self {
            SoilParameter::Nitrogen => ParameterRanges {
                excessive_min: 450.0,
                good: (300.0, 450.0),
                moderate: (150.0, 300.0),
            },
            SoilParameter::Phosphorus | SoilParameter::Potassium => ParameterRanges {
                excessive_min: 600.0,
                good: (400.0, 600.0),
                moderate: (200.0, 400.0),
            },
            SoilParameter::Temperature => ParameterRanges {
                excessive_min: 45.0,
                good: (20.0, 30.0),
                moderate: (30.0, 35.0),
            },
            SoilParameter::Humidity => ParameterRanges {
                excessive_min: 90.0,
                good: (60.0, 90.0),
                moderate: (30.0, 60.0),
            },
            SoilParameter::GasLevel => ParameterRanges {
                excessive_min: 900.0,
                good: (300.0, 500.0),
                moderate: (500.0, 700.0),
            },
        }
    }

    pub fn classify(&self, value: f64) -> ParameterClass {
        classify_parameter(value, &self.ranges())
    }
}

/// Place a value in its class. Ranges are checked excessive, good, moderate;
/// anything left over is poor.
pub fn classify_parameter(value: f64, ranges: &ParameterRanges) -> ParameterClass {
    let within = |(lo, hi): (f64, f64)| value >= lo && value <= hi;

    if value >= ranges.excessive_min {
        ParameterClass::Excessive
    } else if within(ranges.good) {
        ParameterClass::Good
    } else if within(ranges.moderate) {
        ParameterClass::Moderate
    } else {
        ParameterClass::Poor
    }
}

/// Field measurements submitted for analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilAnalysisInput {
    pub nitrogen: f64,
    #[serde(alias = "phosphorous")]
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub gas_level: f64,
}

impl SoilAnalysisInput {
    pub fn value(&self, parameter: SoilParameter) -> f64 {
        match parameter {
            SoilParameter::Nitrogen => self.nitrogen,
            SoilParameter::Phosphorus => self.phosphorus,
            SoilParameter::Potassium => self.potassium,
            SoilParameter::Temperature => self.temperature,
            SoilParameter::Humidity => self.humidity,
            SoilParameter::GasLevel => self.gas_level,
        }
    }

    pub fn classify(&self) -> ParameterClassifications {
        ParameterClassifications {
            nitrogen: SoilParameter::Nitrogen.classify(self.nitrogen),
            phosphorus: SoilParameter::Phosphorus.classify(self.phosphorus),
            potassium: SoilParameter::Potassium.classify(self.potassium),
            temperature: SoilParameter::Temperature.classify(self.temperature),
            humidity: SoilParameter::Humidity.classify(self.humidity),
            gas_level: SoilParameter::GasLevel.classify(self.gas_level),
        }
    }
}

/// Class of every analysed parameter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterClassifications {
    pub nitrogen: ParameterClass,
    pub phosphorus: ParameterClass,
    pub potassium: ParameterClass,
    pub temperature: ParameterClass,
    pub humidity: ParameterClass,
    pub gas_level: ParameterClass,
}

impl ParameterClassifications {
    pub fn get(&self, parameter: SoilParameter) -> ParameterClass {
        match parameter {
            SoilParameter::Nitrogen => self.nitrogen,
            SoilParameter::Phosphorus => self.phosphorus,
            SoilParameter::Potassium => self.potassium,
            SoilParameter::Temperature => self.temperature,
            SoilParameter::Humidity => self.humidity,
            SoilParameter::GasLevel => self.gas_level,
        }
    }

    fn count(&self, class: ParameterClass) -> usize {
        SoilParameter::ALL
            .iter()
            .filter(|p| self.get(**p) == class)
            .count()
    }

    /// Fold the per-parameter classes into one verdict
    pub fn overall(&self) -> ParameterClass {
        if self.count(ParameterClass::Excessive) >= 2 {
            ParameterClass::Excessive
        } else if self.count(ParameterClass::Poor) >= 2 {
            ParameterClass::Poor
        } else if self.count(ParameterClass::Good) >= 4 {
            ParameterClass::Good
        } else {
            ParameterClass::Moderate
        }
    }
}

/// Advice section of an analysis, from the model or from the rules below
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilAdvice {
    pub assessment: String,
    pub recommendations: Vec<String>,
    #[serde(alias = "suitableCrops")]
    pub suitable_crops: Vec<String>,
}

/// Which path produced the advice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdviceSource {
    Model,
    Fallback,
}

/// Complete analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilAnalysis {
    pub prediction: ParameterClass,
    pub classifications: ParameterClassifications,
    pub assessment: String,
    pub recommendations: Vec<String>,
    pub suitable_crops: Vec<String>,
    pub source: AdviceSource,
}

impl SoilAnalysis {
    pub fn new(
        classifications: ParameterClassifications,
        advice: SoilAdvice,
        source: AdviceSource,
    ) -> Self {
        Self {
            prediction: classifications.overall(),
            classifications,
            assessment: advice.assessment,
            recommendations: advice.recommendations,
            suitable_crops: advice.suitable_crops,
            source,
        }
    }
}

pub fn fallback_assessment(overall: ParameterClass) -> &'static str {
    match overall {
        ParameterClass::Excessive => "Your soil has excessive levels of nutrients which can be harmful to plants and the environment. This can lead to nutrient runoff, plant toxicity, and imbalanced soil ecology.",
        ParameterClass::Good => "Your soil has good nutrient levels that are well-balanced for most crops. The current conditions are favorable for plant growth and development.",
        ParameterClass::Moderate => "Your soil has moderate nutrient levels that are acceptable but could be improved. Some adjustments would help optimize plant growth and yield.",
        ParameterClass::Poor => "Your soil has poor nutrient levels that need to be addressed. Current conditions may limit plant growth and reduce crop yields.",
    }
}

/// Nutrient-specific corrections, topped up with general practice when
/// fewer than three apply
pub fn fallback_recommendations(classifications: &ParameterClassifications) -> Vec<String> {
    let mut recommendations = Vec::new();

    match classifications.nitrogen {
        ParameterClass::Excessive => recommendations.push(
            "Reduce nitrogen application and consider planting nitrogen-consuming cover crops like corn or sorghum to help balance levels.",
        ),
        ParameterClass::Poor => recommendations.push(
            "Increase nitrogen levels by applying organic nitrogen fertilizers or incorporating leguminous cover crops.",
        ),
        _ => {}
    }

    match classifications.phosphorus {
        ParameterClass::Excessive => recommendations.push(
            "Avoid adding phosphorus fertilizers and consider using crops that remove phosphorus efficiently like sunflower or mustard.",
        ),
        ParameterClass::Poor => recommendations
            .push("Apply phosphorus-rich fertilizers or bone meal to increase phosphorus levels."),
        _ => {}
    }

    match classifications.potassium {
        ParameterClass::Excessive => recommendations.push(
            "Avoid potassium fertilizers and consider leaching the soil with irrigation to reduce potassium levels.",
        ),
        ParameterClass::Poor => recommendations
            .push("Apply potassium-rich fertilizers or wood ash to increase potassium levels."),
        _ => {}
    }

    if recommendations.len() < 3 {
        recommendations.extend([
            "Conduct regular soil testing to monitor nutrient levels and adjust management practices.",
            "Implement crop rotation to help balance soil nutrients naturally.",
            "Consider adding organic matter to improve soil structure and nutrient retention.",
        ]);
    }

    recommendations.into_iter().map(String::from).collect()
}

/// Rule-based advice used when the model is unavailable
pub fn fallback_advice(classifications: &ParameterClassifications) -> SoilAdvice {
    SoilAdvice {
        assessment: fallback_assessment(classifications.overall()).to_string(),
        recommendations: fallback_recommendations(classifications),
        suitable_crops: DEFAULT_SUITABLE_CROPS.iter().map(|c| c.to_string()).collect(),
    }
}

/// Pull the JSON object out of a model reply. Replies may wrap it in a
/// fenced code block or surround it with prose.
pub fn extract_json_object(content: &str) -> Option<&str> {
    if let Some(start) = content.find("```") {
        let after_fence = &content[start + 3..];
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        if let Some(end) = body.find("```") {
            let inner = body[..end].trim();
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }

    let open = content.find('{')?;
    let close = content.rfind('}')?;
    (close > open).then(|| &content[open..=close])
}

/// Parse model advice; `None` when the reply has no usable JSON or lacks an
/// assessment
pub fn parse_model_advice(content: &str) -> Option<SoilAdvice> {
    let json = extract_json_object(content)?;
    let advice: SoilAdvice = serde_json::from_str(json).ok()?;
    if advice.assessment.trim().is_empty() {
        return None;
    }
    Some(advice)
}
