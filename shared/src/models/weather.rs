//! Weather data models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::GpsCoordinates;

/// Cities with built-in coordinates for weather lookups
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum City {
    Karachi,
    Lahore,
    Islamabad,
    Faisalabad,
    Multan,
    Peshawar,
    Quetta,
}

impl City {
    pub const ALL: [City; 7] = [
        City::Karachi,
        City::Lahore,
        City::Islamabad,
        City::Faisalabad,
        City::Multan,
        City::Peshawar,
        City::Quetta,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            City::Karachi => "Karachi",
            City::Lahore => "Lahore",
            City::Islamabad => "Islamabad",
            City::Faisalabad => "Faisalabad",
            City::Multan => "Multan",
            City::Peshawar => "Peshawar",
            City::Quetta => "Quetta",
        }
    }

    pub fn coordinates(&self) -> GpsCoordinates {
        // (lat, lon) scaled by 10^4
        let (lat, lon) = match self {
            City::Karachi => (248607, 670011),
            City::Lahore => (315497, 743436),
            City::Islamabad => (336844, 730479),
            City::Faisalabad => (314504, 731350),
            City::Multan => (301575, 715249),
            City::Peshawar => (340151, 715249),
            City::Quetta => (301798, 669750),
        };
        GpsCoordinates::new(Decimal::new(lat, 4), Decimal::new(lon, 4))
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported city: {0}")]
pub struct UnknownCity(pub String);

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCity(s.to_string()))
    }
}

/// Current conditions for a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: City,
    pub temperature: Decimal,
    pub humidity: Decimal,
    pub condition: String,
    pub wind_speed: Decimal,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_parse_case_insensitive() {
        assert_eq!("lahore".parse::<City>(), Ok(City::Lahore));
        assert_eq!(" Quetta".parse::<City>(), Ok(City::Quetta));
        assert!("Dubai".parse::<City>().is_err());
    }

    #[test]
    fn test_city_coordinates() {
        let coords = City::Karachi.coordinates();
        assert_eq!(coords.latitude.to_string(), "24.8607");
        assert_eq!(coords.longitude.to_string(), "67.0011");
    }
}
