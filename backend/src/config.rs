//! Configuration management for the Mali Farm platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with MALI__ prefix

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Field device configuration
    pub device: DeviceConfig,

    /// Language model configuration
    pub llm: LlmConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Soil quality model configuration
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DeviceConfig {
    /// Full URL of the device's readings endpoint
    pub url: String,

    /// How long to wait for the device before simulating
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub api_endpoint: String,

    /// Bearer token; the assistant is disabled without it
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Upper bound on one completion request
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: Option<String>,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ModelConfig {
    /// Interpreter used to run the inference script
    pub interpreter: String,

    /// Inference script
    pub script_path: PathBuf,

    /// The one location the model file is read from and uploaded to
    pub path: PathBuf,

    /// Largest accepted model upload
    pub max_upload_bytes: usize,

    /// How long a single inference may run
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MALI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let defaults = Config {
            environment: environment.clone(),
            ..Config::default()
        };

        let config = config::Config::builder()
            // Start with default values
            .add_source(config::Config::try_from(&defaults)?)
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MALI__ prefix)
            .add_source(
                Environment::with_prefix("MALI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            device: DeviceConfig::default(),
            llm: LlmConfig::default(),
            weather: WeatherConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            url: "http://192.168.43.105/data".to_string(),
            timeout_secs: 5,
        }
    }
}

impl DeviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            model: "llama3-70b-8192".to_string(),
            temperature: 0.5,
            max_tokens: 1000,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.weatherbit.io/v2.0".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            script_path: PathBuf::from("scripts/soil_model.py"),
            path: PathBuf::from("models/soil_quality_model.pkl"),
            max_upload_bytes: 10 * 1024 * 1024,
            timeout_secs: 30,
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.device.timeout(), Duration::from_secs(5));
        assert_eq!(config.model.max_upload_bytes, 10_485_760);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.timeout(), Duration::from_secs(60));
        assert_eq!(config.weather.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_defaults_round_trip_through_builder() {
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default()).unwrap())
            .set_override("device.timeout_secs", 2)
            .unwrap()
            .build()
            .unwrap();
        let config: Config = built.try_deserialize().unwrap();
        assert_eq!(config.device.timeout_secs, 2);
        assert_eq!(config.device.url, "http://192.168.43.105/data");
        assert_eq!(config.llm.model, "llama3-70b-8192");
    }
}
