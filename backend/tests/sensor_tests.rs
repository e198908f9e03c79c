//! Tests for the sensor feed: simulation bounds and device fallback

use axum::{routing::get, Json, Router};
use mali_farm_backend::external::{DeviceClient, DeviceError};
use mali_farm_backend::services::sensor::{simulate_readings, simulate_soil_snapshot};
use mali_farm_backend::services::SensorService;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{ReadingOrigin, SensorKind, SensorReading};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

/// Serve a router on an ephemeral local port
async fn spawn_device(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn service(url: String, timeout: Duration) -> SensorService {
    SensorService::new(DeviceClient::new(url, timeout).unwrap())
}

// =============================================================================
// Simulation bounds
// =============================================================================

mod simulation {
    use super::*;

    #[test]
    fn thousand_generations_stay_in_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            for reading in simulate_readings(&mut rng) {
                let (min, max) = (reading.min.unwrap(), reading.max.unwrap());
                assert!(
                    reading.value >= min && reading.value <= max,
                    "{} out of bounds: {}",
                    reading.name,
                    reading.value
                );
            }
        }
    }

    #[test]
    fn readings_follow_catalog_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let names: Vec<String> = simulate_readings(&mut rng)
            .into_iter()
            .map(|r| r.name)
            .collect();
        let expected: Vec<&str> = SensorKind::ALL.iter().map(|k| k.profile().name).collect();
        assert_eq!(names, expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_seeded_simulation_within_windows(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            for (reading, kind) in simulate_readings(&mut rng).iter().zip(SensorKind::ALL) {
                let profile = kind.profile();
                prop_assert!(reading.value >= profile.simulated_min);
                prop_assert!(reading.value <= profile.simulated_max);
                prop_assert!(reading.is_within_bounds());
            }
        }

        #[test]
        fn prop_snapshot_quality_consistent(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let snapshot = simulate_soil_snapshot(&mut rng);
            prop_assert_eq!(snapshot.soil_quality, snapshot.npk().classify());
            prop_assert!((10.0..=30.0).contains(&snapshot.soil_temperature));
            prop_assert!((20.0..=60.0).contains(&snapshot.moisture));
        }
    }
}

// =============================================================================
// Device client and fallback
// =============================================================================

mod device_fallback {
    use super::*;

    #[tokio::test]
    async fn live_readings_pass_through() {
        let app = Router::new().route(
            "/data",
            get(|| async {
                Json(vec![
                    SensorKind::Temperature.reading(27.4),
                    SensorKind::Nitrogen.reading(52.0),
                ])
            }),
        );
        let addr = spawn_device(app).await;

        let feed = service(format!("http://{}/data", addr), Duration::from_secs(5))
            .fetch_feed()
            .await;

        assert!(feed.success);
        assert_eq!(feed.origin, ReadingOrigin::Live);
        assert!(feed.notice.is_none());
        assert_eq!(feed.data.len(), 2);
        assert!((feed.data[0].value - 27.4).abs() < 1e-9);
        assert_eq!(feed.data[1].variable_id.as_deref(), Some("nit"));
    }

    #[tokio::test]
    async fn records_without_bounds_pass_through() {
        let body = r#"[{"name":"Temperature","value":27.4,"unit":"°C",
            "type":"environment","icon":"thermometer","id":"t1"}]"#;
        let app = Router::new().route(
            "/data",
            get(move || async move {
                ([(axum::http::header::CONTENT_TYPE, "application/json")], body)
            }),
        );
        let addr = spawn_device(app).await;

        let feed = service(format!("http://{}/data", addr), Duration::from_secs(5))
            .fetch_feed()
            .await;

        assert_eq!(feed.origin, ReadingOrigin::Live);
        assert_eq!(feed.data.len(), 1);
        let reading = &feed.data[0];
        assert!((reading.value - 27.4).abs() < 1e-9);
        assert!(reading.min.is_none());
        assert_eq!(reading.extra["id"], "t1");

        let served = serde_json::to_value(&feed).unwrap();
        assert_eq!(served["data"][0]["id"], "t1");
        assert_eq!(served["data"][0]["icon"], "thermometer");
    }

    #[tokio::test]
    async fn unresponsive_device_times_out_to_simulation() {
        // Accepts connections at the OS level but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let timeout = Duration::from_secs(1);

        let client = DeviceClient::new(format!("http://{}/data", addr), timeout).unwrap();
        assert!(matches!(
            client.fetch_readings().await,
            Err(DeviceError::Timeout(_))
        ));

        let started = Instant::now();
        let feed = SensorService::new(client).fetch_feed().await;
        let elapsed = started.elapsed();

        assert_eq!(feed.origin, ReadingOrigin::Simulated);
        assert_eq!(feed.data.len(), SensorKind::ALL.len());
        assert!(elapsed >= timeout);
        assert!(elapsed < timeout + Duration::from_secs(2), "took {:?}", elapsed);
        drop(listener);
    }

    #[tokio::test]
    async fn refused_connection_falls_back() {
        // Bind then release a port so nothing is listening on it
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let feed = service(format!("http://{}/data", addr), Duration::from_secs(2))
            .fetch_feed()
            .await;
        assert_eq!(feed.origin, ReadingOrigin::Simulated);
        assert!(feed.notice.is_some());
    }

    #[tokio::test]
    async fn malformed_body_falls_back() {
        let app = Router::new().route("/data", get(|| async { "temperature=31" }));
        let addr = spawn_device(app).await;
        let client = DeviceClient::new(format!("http://{}/data", addr), Duration::from_secs(5))
            .unwrap();

        assert!(matches!(
            client.fetch_readings().await,
            Err(DeviceError::Malformed(_))
        ));
        assert_eq!(
            SensorService::new(client).fetch_feed().await.origin,
            ReadingOrigin::Simulated
        );
    }

    #[tokio::test]
    async fn empty_array_falls_back() {
        let app = Router::new().route("/data", get(|| async { Json(Vec::<SensorReading>::new()) }));
        let addr = spawn_device(app).await;
        let client = DeviceClient::new(format!("http://{}/data", addr), Duration::from_secs(5))
            .unwrap();

        assert!(matches!(client.fetch_readings().await, Err(DeviceError::Empty)));
    }

    #[tokio::test]
    async fn error_status_falls_back() {
        let app = Router::new().route(
            "/data",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let addr = spawn_device(app).await;
        let client = DeviceClient::new(format!("http://{}/data", addr), Duration::from_secs(5))
            .unwrap();

        assert!(matches!(
            client.fetch_readings().await,
            Err(DeviceError::Status(_))
        ));
    }
}
