//! Mali Farm Platform - Backend
//!
//! Sensor monitoring, soil health classification and an agricultural
//! assistant for farms in Pakistan.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{DeviceClient, LlmClient, ScriptModel, WeatherClient};
use services::{AgentService, ModelService, SensorService, SoilService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sensors: SensorService,
    pub soil: SoilService,
    pub agent: AgentService,
    pub weather: WeatherService,
    pub models: ModelService,
}

impl AppState {
    /// Wire every service from configuration
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let device = DeviceClient::new(config.device.url.clone(), config.device.timeout())?;

        let llm = LlmClient::from_config(&config.llm)?;
        if llm.is_none() {
            tracing::warn!("No language model API key; assistant disabled, analysis uses rules");
        }

        let weather_client = WeatherClient::from_config(&config.weather)?;

        let model = Arc::new(ScriptModel::from_config(&config.model));

        Ok(Self {
            sensors: SensorService::new(device),
            soil: SoilService::new(llm.clone()),
            agent: AgentService::new(llm),
            weather: WeatherService::new(weather_client),
            models: ModelService::new(model, config.model.max_upload_bytes),
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes(state.models.max_upload_bytes()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Mali Farm Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
