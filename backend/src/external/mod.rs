//! External API integrations

pub mod device;
pub mod llm;
pub mod script_model;
pub mod weather;

pub use device::{DeviceClient, DeviceError};
pub use llm::LlmClient;
pub use script_model::ScriptModel;
pub use weather::WeatherClient;
