//! Weather service for current conditions in supported cities

use shared::{City, CurrentWeather};

use crate::error::{AppError, AppResult};
use crate::external::weather::WeatherClient;

/// Weather service
#[derive(Clone)]
pub struct WeatherService {
    weather_client: Option<WeatherClient>,
}

impl WeatherService {
    /// Create a WeatherService; without a client every lookup reports a
    /// configuration error
    pub fn new(weather_client: Option<WeatherClient>) -> Self {
        Self { weather_client }
    }

    pub fn is_configured(&self) -> bool {
        self.weather_client.is_some()
    }

    /// Current conditions for a city name
    pub async fn current(&self, city: &str) -> AppResult<CurrentWeather> {
        let city: City = city
            .parse()
            .map_err(|_| AppError::UnsupportedCity(city.to_string()))?;

        let client = self
            .weather_client
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Weather API key not configured".to_string()))?;

        client.get_current_weather(city).await
    }

    pub fn cities(&self) -> Vec<&'static str> {
        City::ALL.iter().map(|c| c.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_city_rejected_first() {
        let service = WeatherService::new(None);
        assert!(matches!(
            service.current("Atlantis").await,
            Err(AppError::UnsupportedCity(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let service = WeatherService::new(None);
        assert!(!service.is_configured());
        assert!(matches!(
            service.current("Karachi").await,
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_city_list() {
        let service = WeatherService::new(None);
        assert_eq!(service.cities().len(), 7);
        assert_eq!(service.cities()[0], "Karachi");
    }
}
