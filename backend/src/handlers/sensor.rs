//! HTTP handlers for sensor readings

use axum::{extract::State, Json};
use shared::{SensorFeed, SoilSnapshot};

use crate::services::sensor::{simulate_soil_snapshot, simulated_feed};
use crate::AppState;

/// Latest readings, live when the device answers and simulated otherwise
pub async fn get_sensor_feed(State(state): State<AppState>) -> Json<SensorFeed> {
    Json(state.sensors.fetch_feed().await)
}

/// Simulated readings without contacting the device
pub async fn get_simulated_feed() -> Json<SensorFeed> {
    Json(simulated_feed())
}

/// Simulated soil monitoring snapshot
pub async fn get_soil_data() -> Json<SoilSnapshot> {
    Json(simulate_soil_snapshot(&mut rand::thread_rng()))
}
