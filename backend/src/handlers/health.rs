//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub device_url: String,
    pub llm_configured: bool,
    pub weather_configured: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        device_url: state.config.device.url.clone(),
        llm_configured: state.agent.is_configured(),
        weather_configured: state.weather.is_configured(),
    })
}
