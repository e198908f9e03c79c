//! Soil quality model backed by an external inference script
//!
//! The script receives the feature JSON as its first argument plus
//! `--model-path <file>`, and prints one JSON object on stdout.

use shared::{ModelPrediction, PredictionInput, RawModelOutput, SoilQualityClass};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::config::ModelConfig;
use crate::error::{AppError, AppResult};
use crate::services::model::{PredictionFuture, SoilModel};

/// Runs one interpreter process per prediction
#[derive(Debug, Clone)]
pub struct ScriptModel {
    interpreter: String,
    script_path: PathBuf,
    model_path: PathBuf,
    timeout: Duration,
}

impl ScriptModel {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            script_path: config.script_path.clone(),
            model_path: config.path.clone(),
            timeout: config.timeout(),
        }
    }

    async fn run(&self, input: &PredictionInput) -> AppResult<ModelPrediction> {
        if !tokio::fs::try_exists(&self.model_path).await.unwrap_or(false) {
            return Err(AppError::NotFound(format!(
                "Model file {}",
                self.model_path.display()
            )));
        }

        let payload = serde_json::to_string(input)
            .map_err(|e| AppError::Internal(format!("Failed to encode model input: {}", e)))?;

        let mut command = Command::new(&self.interpreter);
        command
            .arg(&self.script_path)
            .arg(&payload)
            .arg("--model-path")
            .arg(&self.model_path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(
            script = %self.script_path.display(),
            model = %self.model_path.display(),
            "Running inference script"
        );

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| AppError::ModelTimeout)?
            .map_err(|e| {
                AppError::ModelInference(format!("Failed to start {}: {}", self.interpreter, e))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!("Inference script stderr: {}", stderr.trim());
        }

        if !output.status.success() {
            return Err(AppError::ModelInference(format!(
                "Script exited with {}",
                output.status
            )));
        }

        parse_model_output(&String::from_utf8_lossy(&output.stdout))
    }
}

impl SoilModel for ScriptModel {
    fn predict<'a>(&'a self, input: &'a PredictionInput) -> PredictionFuture<'a> {
        Box::pin(self.run(input))
    }

    fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }
}

/// Read the last non-empty stdout line as the script's answer
pub fn parse_model_output(stdout: &str) -> AppResult<ModelPrediction> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| AppError::ModelInference("Script printed nothing".to_string()))?;

    let raw: RawModelOutput = serde_json::from_str(line)
        .map_err(|e| AppError::ModelInference(format!("Invalid script output: {}", e)))?;

    if let Some(error) = raw.error {
        return Err(AppError::ModelInference(error));
    }

    let label = raw
        .prediction
        .ok_or_else(|| AppError::ModelInference("Script returned no prediction".to_string()))?;
    let prediction: SoilQualityClass = label
        .parse()
        .map_err(|e| AppError::ModelInference(format!("{}", e)))?;

    Ok(ModelPrediction {
        prediction,
        probability: raw.probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_last_line() {
        let stdout = "loading...\n{\"prediction\": \"Good\", \"probability\": 0.87}\n\n";
        let prediction = parse_model_output(stdout).unwrap();
        assert_eq!(prediction.prediction, SoilQualityClass::Good);
        assert_eq!(prediction.probability, Some(0.87));
    }

    #[test]
    fn test_parse_reported_error() {
        let stdout = r#"{"prediction": "Moderate", "error": "Model file not found"}"#;
        match parse_model_output(stdout) {
            Err(AppError::ModelInference(msg)) => assert_eq!(msg, "Model file not found"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_model_output("").is_err());
        assert!(parse_model_output("Traceback (most recent call last)").is_err());
        assert!(parse_model_output(r#"{"prediction": "Excellent"}"#).is_err());
    }

    #[tokio::test]
    async fn test_missing_model_file_is_not_found() {
        let config = ModelConfig {
            path: std::env::temp_dir().join("mali-farm-no-such-model.pkl"),
            ..ModelConfig::default()
        };
        let model = ScriptModel::from_config(&config);
        let input = PredictionInput {
            gas_level: 500.0,
            humidity: 65.0,
            nitrogen: 45.0,
            phosphorus: 15.0,
            potassium: 150.0,
            temperature: 28.0,
        };
        assert!(matches!(
            model.predict(&input).await,
            Err(AppError::NotFound(_))
        ));
    }
}
