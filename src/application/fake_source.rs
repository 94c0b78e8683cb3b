// Deterministic in-memory source for tests
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::alert::{Alert, ALERT_TEMPLATES};
use crate::domain::forecast::{ForecastPoint, FORECAST_WINDOW};
use crate::domain::sensor::{Location, SensorReading};
use crate::infrastructure::generators::generate_sensor_readings;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Readings are reseeded per call, forecast points march forward one minute per
/// call, and alerts are fixed: even indices acknowledged, odd ones open.
pub struct FakeSource {
    base: DateTime<Utc>,
    reading_calls: AtomicUsize,
    point_calls: AtomicUsize,
    alert_calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            reading_calls: AtomicUsize::new(0),
            point_calls: AtomicUsize::new(0),
            alert_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn reading_calls(&self) -> usize {
        self.reading_calls.load(Ordering::SeqCst)
    }

    pub fn point_calls(&self) -> usize {
        self.point_calls.load(Ordering::SeqCst)
    }

    pub fn alert_calls(&self) -> usize {
        self.alert_calls.load(Ordering::SeqCst)
    }

    pub fn alerts(&self) -> Vec<Alert> {
        (0..12)
            .map(|i| {
                Alert::from_template(
                    i,
                    &ALERT_TEMPLATES[i % ALERT_TEMPLATES.len()],
                    Location::ALL[i % Location::ALL.len()],
                    self.base - Duration::hours(i as i64),
                    i % 2 == 0,
                )
            })
            .collect()
    }

    fn point(&self, timestamp: DateTime<Utc>, risk: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp,
            rainfall: 5.0,
            risk_probability: risk,
            vibration: 2.0,
            temperature: 21.0,
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("fake source unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetrySource for FakeSource {
    async fn fetch_readings(&self) -> anyhow::Result<Vec<SensorReading>> {
        self.check()?;
        let call = self.reading_calls.fetch_add(1, Ordering::SeqCst);
        let mut rng = StdRng::seed_from_u64(call as u64);
        Ok(generate_sensor_readings(&mut rng, self.base))
    }

    async fn fetch_forecast(&self) -> anyhow::Result<Vec<ForecastPoint>> {
        self.check()?;
        Ok((0..FORECAST_WINDOW)
            .map(|i| {
                let hours_back = (FORECAST_WINDOW - 1 - i) as i64;
                self.point(self.base - Duration::hours(hours_back), i as f64)
            })
            .collect())
    }

    async fn fetch_forecast_point(&self) -> anyhow::Result<ForecastPoint> {
        self.check()?;
        let call = self.point_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(self.point(
            self.base + Duration::minutes(call as i64),
            50.0 + call as f64,
        ))
    }

    async fn fetch_alerts(&self) -> anyhow::Result<Vec<Alert>> {
        self.check()?;
        self.alert_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.alerts())
    }
}
