//! Domain models for the Mali Farm platform

mod analysis;
mod chat;
mod prediction;
mod sensor;
mod soil;
mod weather;

pub use analysis::*;
pub use chat::*;
pub use prediction::*;
pub use sensor::*;
pub use soil::*;
pub use weather::*;
