// Source trait for telemetry data access
use crate::domain::alert::Alert;
use crate::domain::forecast::ForecastPoint;
use crate::domain::sensor::SensorReading;
use async_trait::async_trait;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Current reading for every (location, parameter) pair
    async fn fetch_readings(&self) -> anyhow::Result<Vec<SensorReading>>;

    /// Full hourly forecast window ending now
    async fn fetch_forecast(&self) -> anyhow::Result<Vec<ForecastPoint>>;

    /// A single forecast point stamped now, used to slide the window
    async fn fetch_forecast_point(&self) -> anyhow::Result<ForecastPoint>;

    /// Alerts raised so far
    async fn fetch_alerts(&self) -> anyhow::Result<Vec<Alert>>;
}
