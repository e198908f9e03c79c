//! Route definitions for the Mali Farm API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Multipart framing allowance on top of the model size limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create API routes
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/sensors", sensor_routes())
        .route("/soil-data", get(handlers::get_soil_data))
        .nest("/soil", soil_routes())
        .route("/agent/chat", post(handlers::chat))
        .nest("/weather", weather_routes())
        .nest("/models", model_routes(max_upload_bytes))
}

/// Sensor feed routes
fn sensor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_sensor_feed))
        .route("/simulated", get(handlers::get_simulated_feed))
}

/// Soil classification routes
fn soil_routes() -> Router<AppState> {
    Router::new()
        .route("/prediction", post(handlers::predict_soil_quality))
        .route("/advice", post(handlers::get_nutrient_advice))
        .route("/analysis", post(handlers::analyze_soil))
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::fetch_current_weather))
        .route("/cities", get(handlers::list_cities))
}

/// Soil quality model routes
fn model_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/predict", post(handlers::predict_with_model))
        .route(
            "/soil-quality",
            get(handlers::get_model_status)
                .put(handlers::upload_model)
                .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD)),
        )
}
