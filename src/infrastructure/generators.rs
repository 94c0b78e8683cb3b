// Synthetic telemetry generators
//
// Every generator takes its random source and the current time explicitly, so a
// seeded rng reproduces the same telemetry.
use crate::domain::alert::{Alert, ALERT_TEMPLATES};
use crate::domain::forecast::{ForecastPoint, FORECAST_WINDOW};
use crate::domain::sensor::{Location, Parameter, SensorReading, SensorStatus};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

const HOUR_MS: f64 = 3_600_000.0;
const WEEK_MS: f64 = 7.0 * 24.0 * HOUR_MS;

/// Number of alerts raised at load.
pub const DEFAULT_ALERT_COUNT: usize = 12;

/// One reading per (location, parameter) pair, locations outermost.
pub fn generate_sensor_readings<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<SensorReading> {
    let mut readings = Vec::with_capacity(Location::ALL.len() * Parameter::ALL.len());

    for location_index in 0..Location::ALL.len() {
        for (parameter_index, parameter) in Parameter::ALL.iter().enumerate() {
            let (min, max) = parameter.range();
            let value = rng.r#gen::<f64>() * (max - min) + min;
            let status = sample_status(rng);
            let last_updated = now - millis(rng.r#gen::<f64>() * HOUR_MS);

            readings.push(SensorReading::new(
                location_index,
                parameter_index,
                value,
                status,
                last_updated,
            ));
        }
    }

    readings
}

/// ~90% online; the rest split evenly between warning and offline.
fn sample_status<R: Rng + ?Sized>(rng: &mut R) -> SensorStatus {
    if rng.r#gen::<f64>() > 0.1 {
        SensorStatus::Online
    } else if rng.r#gen::<f64>() > 0.5 {
        SensorStatus::Warning
    } else {
        SensorStatus::Offline
    }
}

pub fn generate_forecast_point<R: Rng + ?Sized>(
    rng: &mut R,
    timestamp: DateTime<Utc>,
) -> ForecastPoint {
    ForecastPoint {
        timestamp,
        rainfall: rng.r#gen::<f64>() * 20.0,
        risk_probability: rng.r#gen::<f64>() * 100.0,
        vibration: rng.r#gen::<f64>() * 10.0,
        temperature: 15.0 + rng.r#gen::<f64>() * 20.0,
    }
}

/// Hourly points covering the last day, the final one stamped `now`.
pub fn generate_forecast_series<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<ForecastPoint> {
    (0..FORECAST_WINDOW)
        .map(|i| {
            let hours_back = (FORECAST_WINDOW - 1 - i) as i64;
            generate_forecast_point(rng, now - Duration::hours(hours_back))
        })
        .collect()
}

pub fn generate_alerts<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    count: usize,
) -> Vec<Alert> {
    (0..count)
        .map(|index| {
            let template = &ALERT_TEMPLATES[rng.gen_range(0..ALERT_TEMPLATES.len())];
            let location = Location::ALL[rng.gen_range(0..Location::ALL.len())];
            let timestamp = now - millis(rng.r#gen::<f64>() * WEEK_MS);
            let acknowledged = rng.r#gen::<f64>() > 0.6;
            Alert::from_template(index, template, location, timestamp, acknowledged)
        })
        .collect()
}

fn millis(ms: f64) -> Duration {
    Duration::milliseconds(ms as i64)
}
