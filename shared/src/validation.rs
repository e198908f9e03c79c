//! Input validation for values arriving over HTTP
//!
//! The classifiers themselves accept any number; these checks sit at the
//! request boundary.

use crate::models::{ChatMessage, ChatRole, NpkLevels, PredictionInput, SoilAnalysisInput};

/// Validate a measurement is a real, non-negative number
pub fn validate_measurement(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Value must be a finite number");
    }
    if value < 0.0 {
        return Err("Value cannot be negative");
    }
    Ok(())
}

/// Validate an NPK triple, naming the first offending nutrient
pub fn validate_npk(npk: &NpkLevels) -> Result<(), (&'static str, &'static str)> {
    for (field, value) in [
        ("nitrogen", npk.nitrogen),
        ("phosphorus", npk.phosphorus),
        ("potassium", npk.potassium),
    ] {
        validate_measurement(value).map_err(|e| (field, e))?;
    }
    Ok(())
}

/// Validate all six analysis parameters
pub fn validate_analysis_input(
    input: &SoilAnalysisInput,
) -> Result<(), (&'static str, &'static str)> {
    for parameter in crate::models::SoilParameter::ALL {
        validate_measurement(input.value(parameter)).map_err(|e| (parameter.field_name(), e))?;
    }
    Ok(())
}

/// Validate model features
pub fn validate_prediction_input(
    input: &PredictionInput,
) -> Result<(), (&'static str, &'static str)> {
    let names = [
        "gas_level",
        "humidity",
        "nitrogen",
        "phosphorus",
        "potassium",
        "temperature",
    ];
    for (field, value) in names.into_iter().zip(input.features()) {
        validate_measurement(value).map_err(|e| (field, e))?;
    }
    Ok(())
}

/// Validate pH is on the 0-14 scale
pub fn validate_ph(ph: f64) -> Result<(), &'static str> {
    if !(0.0..=14.0).contains(&ph) {
        return Err("pH must be between 0 and 14");
    }
    Ok(())
}

/// A conversation must end with a non-blank user message
pub fn validate_conversation(messages: &[ChatMessage]) -> Result<(), &'static str> {
    let last = messages.last().ok_or("At least one message is required")?;
    if last.role != ChatRole::User {
        return Err("The last message must come from the user");
    }
    if last.content.trim().is_empty() {
        return Err("The last message cannot be empty");
    }
    Ok(())
}
