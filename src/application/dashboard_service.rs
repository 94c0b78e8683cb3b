// Dashboard service - Builds the overview page from a telemetry snapshot
use crate::application::telemetry_store::TelemetrySnapshot;
use crate::application::views::{latest_risk, recent_alerts, RECENT_ALERT_LIMIT};
use crate::domain::dashboard::{Dashboard, RiskSummary};
use crate::domain::forecast::ForecastPoint;
use crate::domain::telemetry::{ChartData, ChartKind, SeriesData, TileData, TimeSeriesPoint};

/// Trailing points shown in the rainfall chart.
const RAINFALL_CHART_POINTS: usize = 12;

pub struct DashboardService;

impl DashboardService {
    pub fn build(snapshot: &TelemetrySnapshot) -> Dashboard {
        let title = "Rockfall Monitoring Overview".to_string();
        let recent = recent_alerts(&snapshot.alerts, RECENT_ALERT_LIMIT);

        let risk = latest_risk(&snapshot.forecast)
            .map(|(probability, level)| RiskSummary { probability, level });

        let tiles = match snapshot.forecast.latest() {
            Some(latest) => Self::tiles(latest),
            None => Vec::new(),
        };

        let charts = if snapshot.forecast.is_empty() {
            Vec::new()
        } else {
            Self::charts(snapshot)
        };

        Dashboard::new(title, snapshot.loading, risk, tiles, charts, recent)
    }

    fn tiles(latest: &ForecastPoint) -> Vec<TileData> {
        vec![
            TileData::new(
                "risk",
                "Risk Probability",
                "%",
                latest.risk_probability,
                1,
                "Latest forecast",
            ),
            TileData::new(
                "rainfall",
                "Recent Rainfall",
                "mm",
                latest.rainfall,
                1,
                "Last 24 hours",
            ),
            TileData::new(
                "vibration",
                "Ground Vibration",
                "mg",
                latest.vibration,
                2,
                "Current levels",
            ),
            TileData::new(
                "temperature",
                "Temperature",
                "°C",
                latest.temperature,
                1,
                "Ambient temperature",
            ),
        ]
    }

    fn charts(snapshot: &TelemetrySnapshot) -> Vec<ChartData> {
        let risk_points = Self::series_points(snapshot.forecast.points(), |p| p.risk_probability);
        let rainfall_points = Self::series_points(
            snapshot.forecast.tail(RAINFALL_CHART_POINTS),
            |p| p.rainfall,
        );

        vec![
            ChartData::new(
                "risk-trend",
                "Risk Probability Trend",
                "24-hour risk assessment",
                Some("%"),
                ChartKind::Line,
                vec![SeriesData::new("risk", "Risk Probability", risk_points)],
            ),
            ChartData::new(
                "rainfall-risk",
                "Rainfall vs Risk Correlation",
                "Environmental factors impact",
                Some("mm"),
                ChartKind::Bar,
                vec![SeriesData::new("rainfall", "Rainfall", rainfall_points)],
            ),
        ]
    }

    fn series_points(
        points: &[ForecastPoint],
        value: impl Fn(&ForecastPoint) -> f64,
    ) -> Vec<TimeSeriesPoint> {
        points
            .iter()
            .map(|p| TimeSeriesPoint::new(p.timestamp.timestamp_millis(), value(p)))
            .collect()
    }
}
