//! WebAssembly module for the Mali Farm Platform
//!
//! Provides client-side computation for:
//! - Soil quality classification from NPK levels
//! - Sensor context text for the assistant
//! - Nutrient advice and multi-parameter analysis while offline

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::context::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn parse_readings(readings_json: &str) -> Result<Vec<SensorReading>, JsValue> {
    serde_json::from_str(readings_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid readings JSON: {}", e)))
}

/// Classify soil quality from nitrogen, phosphorus and potassium levels
#[wasm_bindgen(js_name = classifySoilQuality)]
pub fn classify_soil_quality_js(nitrogen: f64, phosphorus: f64, potassium: f64) -> String {
    classify_soil_quality(nitrogen, phosphorus, potassium).to_string()
}

/// Format a JSON array of readings as prompt context lines
#[wasm_bindgen(js_name = formatSensorContext)]
pub fn format_sensor_context_js(readings_json: &str) -> Result<String, JsValue> {
    let readings = parse_readings(readings_json)?;
    Ok(format_sensor_context(&readings))
}

/// Nutrient advice message for a JSON array of readings
#[wasm_bindgen(js_name = nutrientAdvice)]
pub fn nutrient_advice_js(readings_json: &str) -> Result<String, JsValue> {
    let readings = parse_readings(readings_json)?;
    Ok(assess_nutrients(&readings).message().to_string())
}

/// Per-parameter classes plus the overall verdict, as JSON
#[wasm_bindgen(js_name = classifySoilParameters)]
pub fn classify_soil_parameters_js(input_json: &str) -> Result<String, JsValue> {
    let classifications = analysis_classifications(input_json)?;
    let body = serde_json::json!({
        "prediction": classifications.overall(),
        "classifications": classifications,
    });
    Ok(body.to_string())
}

/// Rule-based recommendations for an analysis input
#[wasm_bindgen(js_name = fallbackRecommendations)]
pub fn fallback_recommendations_js(input_json: &str) -> Result<js_sys::Array, JsValue> {
    let classifications = analysis_classifications(input_json)?;
    Ok(fallback_recommendations(&classifications)
        .into_iter()
        .map(|r| JsValue::from_str(&r))
        .collect())
}

fn analysis_classifications(input_json: &str) -> Result<ParameterClassifications, JsValue> {
    let input: SoilAnalysisInput = serde_json::from_str(input_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid analysis JSON: {}", e)))?;
    validate_analysis_input(&input)
        .map_err(|(field, msg)| JsValue::from_str(&format!("{}: {}", field, msg)))?;
    Ok(input.classify())
}

/// Check an NPK triple before sending it to the server
#[wasm_bindgen(js_name = isValidNpk)]
pub fn is_valid_npk(nitrogen: f64, phosphorus: f64, potassium: f64) -> bool {
    validate_npk(&NpkLevels::new(nitrogen, phosphorus, potassium)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_soil_quality() {
        assert_eq!(classify_soil_quality_js(90.0, 95.0, 91.0), "Good");
        assert_eq!(classify_soil_quality_js(10.0, 5.0, 8.0), "Poor");
        assert_eq!(classify_soil_quality_js(30.0, 30.0, 30.0), "Moderate");
        assert_eq!(classify_soil_quality_js(60.0, 60.0, 60.0), "Good");
    }

    #[test]
    fn test_format_sensor_context() {
        let json = r#"[
            {"name":"Temperature","value":31.0,"unit":"°C","type":"environment","min":-10,"max":60},
            {"name":"Nitrogen","value":45.0,"unit":"mg/kg","type":"soil","min":0,"max":140}
        ]"#;
        assert_eq!(
            format_sensor_context_js(json).unwrap(),
            "Temperature: 31 °C\nNitrogen: 45 mg/kg"
        );
        assert_eq!(format_sensor_context_js("[]").unwrap(), "");
    }

    #[test]
    fn test_classify_soil_parameters() {
        let json = r#"{"nitrogen":350,"phosphorous":450,"potassium":450,
            "temperature":25,"humidity":70,"gas_level":400}"#;
        let body: serde_json::Value =
            serde_json::from_str(&classify_soil_parameters_js(json).unwrap()).unwrap();
        assert_eq!(body["prediction"], "Good");
        assert_eq!(body["classifications"]["nitrogen"], "Good");
    }

    #[test]
    fn test_is_valid_npk() {
        assert!(is_valid_npk(10.0, 5.0, 8.0));
        assert!(!is_valid_npk(-1.0, 5.0, 8.0));
        assert!(!is_valid_npk(f64::NAN, 5.0, 8.0));
    }
}
