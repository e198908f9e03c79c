//! Soil health service
//!
//! Rule-based classification plus the model-assisted analysis. The analysis
//! never fails because of the language model: any model problem degrades to
//! the rule-based advice.

use serde::{Deserialize, Serialize};
use shared::{
    assess_nutrients, fallback_advice, parse_model_advice, validate_analysis_input, validate_npk,
    validate_ph, AdviceSource, ChatMessage, NpkLevels, NutrientAdvice, ParameterClassifications,
    SensorReading, SoilAnalysis, SoilAnalysisInput, SoilParameter, SoilQualityClass,
};

use crate::error::{AppError, AppResult};
use crate::external::LlmClient;

const ANALYST_PERSONA: &str =
    "You are an agricultural expert specializing in soil analysis for Sindh, Pakistan.";

/// Rule-based prediction request
#[derive(Debug, Clone, Deserialize)]
pub struct SoilPredictionInput {
    #[serde(flatten)]
    pub npk: NpkLevels,
    pub ph: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SoilPrediction {
    pub prediction: SoilQualityClass,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutrientAdviceResponse {
    pub advice: NutrientAdvice,
    pub message: String,
}

/// Soil health service
#[derive(Clone)]
pub struct SoilService {
    llm: Option<LlmClient>,
}

impl SoilService {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    /// Classify an NPK triple after checking the values are usable
    pub fn predict(&self, input: &SoilPredictionInput) -> AppResult<SoilPrediction> {
        validate_npk(&input.npk)
            .map_err(|(field, message)| AppError::invalid_field(field, message))?;
        if let Some(ph) = input.ph {
            validate_ph(ph).map_err(|message| AppError::invalid_field("ph", message))?;
        }

        Ok(SoilPrediction {
            prediction: input.npk.classify(),
            mean: input.npk.mean(),
        })
    }

    pub fn advise(&self, readings: &[SensorReading]) -> NutrientAdviceResponse {
        let advice = assess_nutrients(readings);
        NutrientAdviceResponse {
            advice,
            message: advice.message().to_string(),
        }
    }

    /// Classify all parameters and attach advice, from the model when it
    /// answers usefully and from the rules otherwise
    pub async fn analyze(&self, input: &SoilAnalysisInput) -> AppResult<SoilAnalysis> {
        validate_analysis_input(input)
            .map_err(|(field, message)| AppError::invalid_field(field, message))?;

        let classifications = input.classify();
        tracing::debug!(overall = %classifications.overall(), "Soil parameters classified");

        let Some(llm) = &self.llm else {
            return Ok(SoilAnalysis::new(
                classifications,
                fallback_advice(&classifications),
                AdviceSource::Fallback,
            ));
        };

        let messages = [
            ChatMessage::system(ANALYST_PERSONA),
            ChatMessage::user(analysis_prompt(input, &classifications)),
        ];

        let analysis = match llm.complete(&messages).await {
            Ok(reply) => match parse_model_advice(&reply) {
                Some(advice) => SoilAnalysis::new(classifications, advice, AdviceSource::Model),
                None => {
                    tracing::warn!("Model reply was not usable soil advice");
                    SoilAnalysis::new(
                        classifications,
                        fallback_advice(&classifications),
                        AdviceSource::Fallback,
                    )
                }
            },
            Err(e) => {
                tracing::warn!("Soil analysis falling back to rules: {}", e);
                SoilAnalysis::new(
                    classifications,
                    fallback_advice(&classifications),
                    AdviceSource::Fallback,
                )
            }
        };

        Ok(analysis)
    }
}

/// Prompt asking the model for JSON advice on the classified parameters
pub fn analysis_prompt(
    input: &SoilAnalysisInput,
    classifications: &ParameterClassifications,
) -> String {
    let parameters = SoilParameter::ALL
        .iter()
        .map(|p| {
            format!(
                "- {}: {}{} (Classification: {})",
                p.label(),
                input.value(*p),
                unit_suffix(p.unit()),
                classifications.get(*p)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{persona}
Analyze the following soil parameters and provide recommendations:

{parameters}

Overall Soil Quality: {overall}

Important context:
- "Excessive" classification means the level is too high and needs to be reduced
- "Good" classification means the level is optimal
- "Moderate" classification means the level is acceptable but could be improved
- "Poor" classification means the level is too low and needs to be increased

Based on these parameters and the overall soil quality classification, provide:
1. A brief assessment of the soil condition (2-3 sentences)
2. 3-5 specific recommendations for improving soil health
3. A list of 3-5 crops that would be suitable for growing in these soil conditions in Sindh, Pakistan

Format your response as JSON with the following structure:
{{"assessment": "...", "recommendations": ["..."], "suitable_crops": ["..."]}}

Provide only the JSON response without any additional text."#,
        persona = ANALYST_PERSONA,
        parameters = parameters,
        overall = classifications.overall(),
    )
}

fn unit_suffix(unit: &str) -> String {
    match unit {
        "°C" | "%" => unit.to_string(),
        _ => format!(" {}", unit),
    }
}
