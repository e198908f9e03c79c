//! Sensor reading source
//!
//! Serves live readings from the field device when it answers in time and
//! falls back to simulated readings otherwise. Callers always get a feed.

use rand::Rng;
use shared::{
    classify_soil_quality, SensorFeed, SensorKind, SensorReading, SensorProfile, SoilSnapshot,
};

use crate::external::DeviceClient;

/// Sensor feed service
#[derive(Clone)]
pub struct SensorService {
    device: DeviceClient,
}

impl SensorService {
    pub fn new(device: DeviceClient) -> Self {
        Self { device }
    }

    /// Poll the device, substituting simulated readings on any failure
    pub async fn fetch_feed(&self) -> SensorFeed {
        match self.device.fetch_readings().await {
            Ok(readings) => {
                tracing::debug!(
                    count = readings.len(),
                    url = %self.device.url(),
                    "Device readings received"
                );
                SensorFeed::live(readings)
            }
            Err(e) => {
                tracing::warn!(url = %self.device.url(), "Using simulated readings: {}", e);
                simulated_feed()
            }
        }
    }
}

/// Feed of freshly simulated readings
pub fn simulated_feed() -> SensorFeed {
    SensorFeed::simulated(simulate_readings(&mut rand::thread_rng()))
}

/// One simulated reading per catalog quantity, in catalog order
pub fn simulate_readings<R: Rng + ?Sized>(rng: &mut R) -> Vec<SensorReading> {
    SensorKind::ALL
        .iter()
        .map(|kind| kind.reading(simulate_value(&kind.profile(), rng)))
        .collect()
}

/// Uniform draw from the quantity's simulated window, to one decimal place,
/// never outside the documented bounds
pub fn simulate_value<R: Rng + ?Sized>(profile: &SensorProfile, rng: &mut R) -> f64 {
    let raw = rng.gen_range(profile.simulated_min..=profile.simulated_max);
    round_to(raw, 1).clamp(profile.min, profile.max)
}

/// Simulated soil monitoring snapshot with its quality class
pub fn simulate_soil_snapshot<R: Rng + ?Sized>(rng: &mut R) -> SoilSnapshot {
    let mut draw = |lo: f64, hi: f64| round_to(rng.gen_range(lo..=hi), 2).clamp(lo, hi);

    let air_temperature = draw(15.0, 35.0);
    let soil_temperature = draw(10.0, 30.0);
    let humidity = draw(30.0, 80.0);
    let moisture = draw(20.0, 60.0);
    let nitrogen = draw(0.0, 100.0);
    let phosphorus = draw(0.0, 100.0);
    let potassium = draw(0.0, 100.0);

    SoilSnapshot {
        air_temperature,
        soil_temperature,
        humidity,
        moisture,
        nitrogen,
        phosphorus,
        potassium,
        soil_quality: classify_soil_quality(nitrogen, phosphorus, potassium),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_simulated_readings_cover_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let readings = simulate_readings(&mut rng);
        assert_eq!(readings.len(), SensorKind::ALL.len());
        for (reading, kind) in readings.iter().zip(SensorKind::ALL) {
            assert!(kind.matches(reading));
            assert!(reading.is_within_bounds(), "{:?}", reading);
        }
    }

    #[test]
    fn test_simulated_value_one_decimal() {
        let mut rng = StdRng::seed_from_u64(11);
        let profile = SensorKind::SoilPh.profile();
        for _ in 0..100 {
            let value = simulate_value(&profile, &mut rng);
            assert!((value * 10.0 - (value * 10.0).round()).abs() < 1e-9);
            assert!(value >= profile.simulated_min && value <= profile.simulated_max);
        }
    }

    #[test]
    fn test_soil_snapshot_quality_matches_npk() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let snapshot = simulate_soil_snapshot(&mut rng);
            assert_eq!(snapshot.soil_quality, snapshot.npk().classify());
            assert!((15.0..=35.0).contains(&snapshot.air_temperature));
            assert!((0.0..=100.0).contains(&snapshot.potassium));
        }
    }

    #[test]
    fn test_simulated_feed_marked() {
        let feed = simulated_feed();
        assert!(feed.success);
        assert!(feed.origin.is_simulated());
        assert_eq!(feed.data.len(), 8);
    }
}
