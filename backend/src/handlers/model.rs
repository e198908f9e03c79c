//! HTTP handlers for the soil quality model

use axum::{
    extract::{Multipart, State},
    Json,
};
use shared::{ModelPrediction, PredictionInput};

use crate::error::{AppError, AppResult};
use crate::services::model::{ModelStatus, ModelUploadResult};
use crate::AppState;

/// Multipart field carrying the model file
const MODEL_FIELD: &str = "model";

/// Run the soil quality model on posted features
pub async fn predict_with_model(
    State(state): State<AppState>,
    Json(input): Json<PredictionInput>,
) -> AppResult<Json<ModelPrediction>> {
    let prediction = state.models.predict(input).await?;
    Ok(Json(prediction))
}

/// Report whether a model file is installed
pub async fn get_model_status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.models.status().await)
}

/// Replace the model file from a multipart upload
pub async fn upload_model(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ModelUploadResult>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(MODEL_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::ValidationError(format!("Failed to read upload: {}", e)))?;

        let result = state.models.store(file_name.as_deref(), &bytes).await?;
        return Ok(Json(result));
    }

    Err(AppError::invalid_field(MODEL_FIELD, "No model file provided"))
}
