//! Plain-text context handed to the language model
//!
//! Reading names and units are embedded verbatim. Nothing is escaped, so a
//! device that reports crafted names can steer the prompt; callers that
//! forward untrusted readings should keep that in mind.

use crate::models::SensorReading;

/// One `"<name>: <value> <unit>"` line per reading, in input order.
/// An empty slice yields an empty string.
pub fn format_sensor_context(readings: &[SensorReading]) -> String {
    readings
        .iter()
        .map(|r| format!("{}: {} {}", r.name, r.value, r.unit))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sensor block for the assistant's system prompt, or `None` when there is
/// nothing to report
pub fn farm_context_block(readings: &[SensorReading], soil_health: &str) -> Option<String> {
    if readings.is_empty() {
        return None;
    }

    Some(format!(
        "Current Farm Sensor Data:\n{}\n\nOverall Soil Health Assessment:\n{}",
        format_sensor_context(readings),
        soil_health
    ))
}
