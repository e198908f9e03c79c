//! Shared types and rules for the Mali Farm platform
//!
//! Everything here is pure: sensor models, soil classification, prompt
//! context formatting. The backend and the WASM client both build on it.

pub mod context;
pub mod models;
pub mod types;
pub mod validation;

pub use context::*;
pub use models::*;
pub use types::*;
pub use validation::*;
