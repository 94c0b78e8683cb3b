// Forecast domain model
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of hourly points in the rolling forecast window.
pub const FORECAST_WINDOW: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub rainfall: f64,
    pub risk_probability: f64,
    pub vibration: f64,
    pub temperature: f64,
}

/// Ordered forecast window. Empty until first load, then always
/// `FORECAST_WINDOW` points ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// Wraps a freshly loaded series. Callers hand over exactly one window of
    /// ascending points; anything else is rejected.
    pub fn from_points(points: Vec<ForecastPoint>) -> Option<Self> {
        let ordered = points.windows(2).all(|w| w[0].timestamp < w[1].timestamp);
        if points.len() == FORECAST_WINDOW && ordered {
            Some(Self { points })
        } else {
            None
        }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn latest(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Slides the window forward by one point: drops the oldest and appends `point`.
    ///
    /// A point that does not move time forward is discarded and the series
    /// is returned unchanged, so timestamps stay strictly increasing.
    pub fn advanced(&self, point: ForecastPoint) -> Self {
        if self.points.is_empty() {
            return self.clone();
        }
        if let Some(last) = self.points.last() {
            if point.timestamp <= last.timestamp {
                tracing::warn!(
                    "Discarding forecast point at {} (not after {})",
                    point.timestamp,
                    last.timestamp
                );
                return self.clone();
            }
        }

        let mut points = Vec::with_capacity(FORECAST_WINDOW);
        points.extend(self.points.iter().skip(1).cloned());
        points.push(point);
        Self { points }
    }

    /// The trailing `n` points (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn point_at(timestamp: DateTime<Utc>, risk: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp,
            rainfall: 1.0,
            risk_probability: risk,
            vibration: 1.0,
            temperature: 20.0,
        }
    }

    fn full_series(now: DateTime<Utc>) -> ForecastSeries {
        let points = (0..FORECAST_WINDOW)
            .map(|i| point_at(now - Duration::hours((23 - i) as i64), i as f64))
            .collect();
        ForecastSeries::from_points(points).unwrap()
    }

    #[test]
    fn test_rejects_wrong_length_or_order() {
        let now = Utc::now();
        assert!(ForecastSeries::from_points(vec![point_at(now, 1.0)]).is_none());

        let mut points: Vec<_> = full_series(now).points().to_vec();
        points.swap(0, 1);
        assert!(ForecastSeries::from_points(points).is_none());
    }

    #[test]
    fn test_advance_slides_window() {
        let now = Utc::now();
        let series = full_series(now);
        let next = series.advanced(point_at(now + Duration::seconds(10), 99.0));

        assert_eq!(next.len(), FORECAST_WINDOW);
        assert_eq!(next.points()[0], series.points()[1]);
        assert_eq!(next.latest().unwrap().risk_probability, 99.0);
        // the receiver is left untouched
        assert_eq!(series.latest().unwrap().risk_probability, 23.0);
    }

    #[test]
    fn test_advance_ignores_stale_point() {
        let now = Utc::now();
        let series = full_series(now);
        let next = series.advanced(point_at(now - Duration::hours(2), 50.0));
        assert_eq!(next, series);
    }

    #[test]
    fn test_advance_on_empty_series_stays_empty() {
        let series = ForecastSeries::default().advanced(point_at(Utc::now(), 1.0));
        assert!(series.is_empty());
    }

    #[test]
    fn test_tail() {
        let series = full_series(Utc::now());
        assert_eq!(series.tail(12).len(), 12);
        assert_eq!(series.tail(12)[11], *series.latest().unwrap());
        assert!(ForecastSeries::default().tail(12).is_empty());
    }
}
