//! Weather API client for fetching current conditions
//!
//! Integrates with the Weatherbit current-conditions API

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{City, CurrentWeather};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Weatherbit API response for current weather
#[derive(Debug, Deserialize)]
struct WbCurrentResponse {
    data: Vec<WbObservation>,
}

#[derive(Debug, Deserialize)]
struct WbObservation {
    temp: f64,
    rh: f64,
    wind_spd: f64,
    weather: WbWeather,
}

#[derive(Debug, Deserialize)]
struct WbWeather {
    description: String,
    icon: String,
}

impl WeatherClient {
    /// Create a WeatherClient from configuration; `None` when no API key is set
    pub fn from_config(config: &WeatherConfig) -> reqwest::Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Some(Self {
            client,
            api_key,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        }))
    }

    /// Fetch current weather conditions for a city
    pub async fn get_current_weather(&self, city: City) -> AppResult<CurrentWeather> {
        let coords = city.coordinates();
        let url = format!("{}/current", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e);
                AppError::WeatherServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: WbCurrentResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse weather response: {}", e);
            AppError::WeatherServiceUnavailable
        })?;

        convert_current_response(city, data)
    }
}

/// Convert a Weatherbit response to our format
fn convert_current_response(city: City, data: WbCurrentResponse) -> AppResult<CurrentWeather> {
    let observation = data.data.into_iter().next().ok_or_else(|| {
        tracing::warn!("Weather API returned no observations for {}", city);
        AppError::WeatherServiceUnavailable
    })?;

    Ok(CurrentWeather {
        city,
        temperature: Decimal::from_f64_retain(observation.temp).unwrap_or_default(),
        humidity: Decimal::from_f64_retain(observation.rh).unwrap_or_default(),
        condition: observation.weather.description,
        wind_speed: Decimal::from_f64_retain(observation.wind_spd).unwrap_or_default(),
        icon: observation.weather.icon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_current_response() {
        let data: WbCurrentResponse = serde_json::from_str(
            r#"{"data":[{"temp":31.5,"rh":48,"wind_spd":3.25,
                "weather":{"description":"Haze","icon":"a05d","code":721}}],"count":1}"#,
        )
        .unwrap();

        let weather = convert_current_response(City::Lahore, data).unwrap();
        assert_eq!(weather.city, City::Lahore);
        assert_eq!(weather.temperature, Decimal::new(315, 1));
        assert_eq!(weather.humidity, Decimal::from(48));
        assert_eq!(weather.condition, "Haze");
        assert_eq!(weather.icon, "a05d");
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = WeatherConfig::default();
        assert!(WeatherClient::from_config(&config).unwrap().is_none());

        config.api_key = Some("wb_test".to_string());
        config.api_endpoint = "https://api.weatherbit.io/v2.0/".to_string();
        let client = WeatherClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.base_url, "https://api.weatherbit.io/v2.0");
    }

    #[test]
    fn test_empty_observations_unavailable() {
        let data = WbCurrentResponse { data: vec![] };
        assert!(matches!(
            convert_current_response(City::Multan, data),
            Err(AppError::WeatherServiceUnavailable)
        ));
    }
}
