//! HTTP handlers for weather lookups

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::CurrentWeather;

use crate::error::AppResult;
use crate::AppState;

/// Query parameters for current weather
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

/// Fetch current weather for a supported city
pub async fn fetch_current_weather(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> AppResult<Json<CurrentWeather>> {
    let weather = state.weather.current(&query.city).await?;
    Ok(Json(weather))
}

#[derive(Serialize)]
pub struct CityList {
    pub cities: Vec<&'static str>,
}

/// Cities with built-in coordinates
pub async fn list_cities(State(state): State<AppState>) -> Json<CityList> {
    Json(CityList {
        cities: state.weather.cities(),
    })
}
