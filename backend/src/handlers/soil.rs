//! HTTP handlers for soil classification and analysis

use axum::{extract::State, Json};
use shared::{SensorReading, SoilAnalysis, SoilAnalysisInput};

use crate::error::AppResult;
use crate::services::soil::{NutrientAdviceResponse, SoilPrediction, SoilPredictionInput};
use crate::AppState;

/// Classify soil quality from an NPK triple
pub async fn predict_soil_quality(
    State(state): State<AppState>,
    Json(input): Json<SoilPredictionInput>,
) -> AppResult<Json<SoilPrediction>> {
    let prediction = state.soil.predict(&input)?;
    Ok(Json(prediction))
}

/// Nutrient advice for a list of readings
pub async fn get_nutrient_advice(
    State(state): State<AppState>,
    Json(readings): Json<Vec<SensorReading>>,
) -> Json<NutrientAdviceResponse> {
    Json(state.soil.advise(&readings))
}

/// Classify six soil parameters and attach recommendations
pub async fn analyze_soil(
    State(state): State<AppState>,
    Json(input): Json<SoilAnalysisInput>,
) -> AppResult<Json<SoilAnalysis>> {
    let analysis = state.soil.analyze(&input).await?;
    Ok(Json(analysis))
}
