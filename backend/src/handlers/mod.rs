//! HTTP handlers for the Mali Farm API

pub mod agent;
pub mod health;
pub mod model;
pub mod sensor;
pub mod soil;
pub mod weather;

pub use agent::*;
pub use health::*;
pub use model::*;
pub use sensor::*;
pub use soil::*;
pub use weather::*;
