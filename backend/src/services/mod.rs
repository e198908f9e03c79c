//! Business logic services for the Mali Farm platform

pub mod agent;
pub mod model;
pub mod sensor;
pub mod soil;
pub mod weather;

pub use agent::AgentService;
pub use model::{ModelService, SoilModel};
pub use sensor::SensorService;
pub use soil::SoilService;
pub use weather::WeatherService;
