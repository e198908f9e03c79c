//! Field device client
//!
//! The ESP board on the farm network serves its latest readings as a JSON
//! array. Every failure mode is reported as a [`DeviceError`] so the caller
//! can fall back to simulated data.

use reqwest::{header, Client, StatusCode};
use shared::SensorReading;
use std::time::Duration;
use thiserror::Error;

/// Why the device could not be read
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device did not answer within {0:?}")]
    Timeout(Duration),

    #[error("device returned status {0}")]
    Status(StatusCode),

    #[error("device request failed: {0}")]
    Request(reqwest::Error),

    #[error("device sent malformed readings: {0}")]
    Malformed(String),

    #[error("device sent no readings")]
    Empty,
}

/// Client for the field device's readings endpoint
#[derive(Clone)]
pub struct DeviceClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl DeviceClient {
    /// Create a client whose every request is bounded by `timeout`
    pub fn new(url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the device's current readings, passed through unchanged
    pub async fn fetch_readings(&self) -> Result<Vec<SensorReading>, DeviceError> {
        let response = self
            .client
            .get(&self.url)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            return Err(DeviceError::Status(response.status()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let readings: Vec<SensorReading> =
            serde_json::from_slice(&body).map_err(|e| DeviceError::Malformed(e.to_string()))?;

        if readings.is_empty() {
            return Err(DeviceError::Empty);
        }

        Ok(readings)
    }

    fn classify(&self, err: reqwest::Error) -> DeviceError {
        if err.is_timeout() {
            DeviceError::Timeout(self.timeout)
        } else {
            DeviceError::Request(err)
        }
    }
}
