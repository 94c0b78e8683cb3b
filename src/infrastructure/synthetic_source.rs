// Synthetic telemetry source backed by the generators
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::alert::Alert;
use crate::domain::forecast::ForecastPoint;
use crate::domain::sensor::SensorReading;
use crate::infrastructure::generators::{
    generate_alerts, generate_forecast_point, generate_forecast_series, generate_sensor_readings,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

pub struct SyntheticSource {
    rng: Mutex<StdRng>,
    alert_count: usize,
}

impl SyntheticSource {
    pub fn new(seed: Option<u64>, alert_count: usize) -> Self {
        let rng = match seed {
            Some(seed) => {
                tracing::info!("Synthetic telemetry seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Self {
            rng: Mutex::new(rng),
            alert_count,
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("synthetic rng lock poisoned"))?;
        Ok(f(&mut *rng))
    }
}

#[async_trait]
impl TelemetrySource for SyntheticSource {
    async fn fetch_readings(&self) -> Result<Vec<SensorReading>> {
        self.with_rng(|rng| generate_sensor_readings(rng, Utc::now()))
    }

    async fn fetch_forecast(&self) -> Result<Vec<ForecastPoint>> {
        self.with_rng(|rng| generate_forecast_series(rng, Utc::now()))
    }

    async fn fetch_forecast_point(&self) -> Result<ForecastPoint> {
        self.with_rng(|rng| generate_forecast_point(rng, Utc::now()))
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        let count = self.alert_count;
        self.with_rng(|rng| generate_alerts(rng, Utc::now(), count))
    }
}
