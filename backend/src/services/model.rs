//! Soil quality model service
//!
//! Inference sits behind [`SoilModel`] so the process-backed implementation
//! can be swapped without touching handlers. The model file lives at exactly
//! one configured path; uploads overwrite it and any write failure is
//! reported against that path.

use serde::Serialize;
use shared::{validate_prediction_input, ModelPrediction, PredictionInput};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{AppError, AppResult};

pub type PredictionFuture<'a> =
    Pin<Box<dyn Future<Output = AppResult<ModelPrediction>> + Send + 'a>>;

/// Structured features in, structured prediction out
pub trait SoilModel: Send + Sync {
    fn predict<'a>(&'a self, input: &'a PredictionInput) -> PredictionFuture<'a>;

    /// File the model loads its weights from
    fn model_path(&self) -> &Path;
}

/// Model file status
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub path: PathBuf,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Result of a model upload
#[derive(Debug, Clone, Serialize)]
pub struct ModelUploadResult {
    pub success: bool,
    pub message: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Model inference and storage service
#[derive(Clone)]
pub struct ModelService {
    model: Arc<dyn SoilModel>,
    max_upload_bytes: usize,
}

impl ModelService {
    pub fn new(model: Arc<dyn SoilModel>, max_upload_bytes: usize) -> Self {
        Self {
            model,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validate features and run the model
    pub async fn predict(&self, input: PredictionInput) -> AppResult<ModelPrediction> {
        validate_prediction_input(&input)
            .map_err(|(field, message)| AppError::invalid_field(field, message))?;

        let prediction = self.model.predict(&input).await?;
        tracing::info!(prediction = %prediction.prediction, "Soil model prediction");
        Ok(prediction)
    }

    /// Report whether the configured model file is present
    pub async fn status(&self) -> ModelStatus {
        let path = self.model.model_path().to_path_buf();
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => ModelStatus {
                path,
                exists: true,
                size_bytes: Some(meta.len()),
            },
            _ => ModelStatus {
                path,
                exists: false,
                size_bytes: None,
            },
        }
    }

    /// Replace the model file with uploaded bytes
    pub async fn store(
        &self,
        file_name: Option<&str>,
        bytes: &[u8],
    ) -> AppResult<ModelUploadResult> {
        if bytes.is_empty() {
            return Err(AppError::invalid_field("model", "No model file provided"));
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(AppError::invalid_field(
                "model",
                &format!("File exceeds the {} byte limit", self.max_upload_bytes),
            ));
        }

        let path = self.model.model_path().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot write {}: {}", path.display(), e)))?;

        tracing::info!(
            file = file_name.unwrap_or("<unnamed>"),
            path = %path.display(),
            size = bytes.len(),
            "Model file stored"
        );

        Ok(ModelUploadResult {
            success: true,
            message: "Model uploaded successfully".to_string(),
            path,
            size_bytes: bytes.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SoilQualityClass;

    struct FixedModel {
        path: PathBuf,
    }

    impl SoilModel for FixedModel {
        fn predict<'a>(&'a self, input: &'a PredictionInput) -> PredictionFuture<'a> {
            Box::pin(async move {
                Ok(ModelPrediction {
                    prediction: shared::classify_soil_quality(
                        input.nitrogen,
                        input.phosphorus,
                        input.potassium,
                    ),
                    probability: Some(1.0),
                })
            })
        }

        fn model_path(&self) -> &Path {
            &self.path
        }
    }

    fn service(dir: &str, limit: usize) -> (ModelService, PathBuf) {
        let root = std::env::temp_dir()
            .join("mali-farm-model-tests")
            .join(dir)
            .join(uuid::Uuid::new_v4().to_string());
        let path = root.join("models").join("soil_quality_model.pkl");
        let model = Arc::new(FixedModel { path: path.clone() });
        (ModelService::new(model, limit), path)
    }

    fn input() -> PredictionInput {
        PredictionInput {
            gas_level: 500.0,
            humidity: 65.0,
            nitrogen: 90.0,
            phosphorus: 95.0,
            potassium: 91.0,
            temperature: 28.0,
        }
    }

    #[tokio::test]
    async fn test_store_then_status() {
        let (service, path) = service("store", 1024);
        assert!(!service.status().await.exists);

        let result = service.store(Some("model.pkl"), b"weights").await.unwrap();
        assert_eq!(result.path, path);
        assert_eq!(result.size_bytes, 7);

        let status = service.status().await;
        assert!(status.exists);
        assert_eq!(status.size_bytes, Some(7));
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_and_empty() {
        let (service, path) = service("limits", 4);
        assert!(matches!(
            service.store(None, b"too large").await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            service.store(None, b"").await,
            Err(AppError::Validation { .. })
        ));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_store_reports_configured_path_on_failure() {
        let (service, path) = service("blocked", 1024);
        // A regular file where the models directory should be
        let models_dir = path.parent().unwrap();
        std::fs::create_dir_all(models_dir.parent().unwrap()).unwrap();
        std::fs::write(models_dir, b"not a directory").unwrap();

        match service.store(None, b"weights").await {
            Err(AppError::Storage(msg)) => assert!(msg.contains("models")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_predict_validates_input() {
        let (service, _) = service("predict", 1024);
        assert_eq!(
            service.predict(input()).await.unwrap().prediction,
            SoilQualityClass::Good
        );

        let bad = PredictionInput {
            temperature: f64::NAN,
            ..input()
        };
        assert!(matches!(
            service.predict(bad).await,
            Err(AppError::Validation { .. })
        ));
    }
}
