// Dashboard domain model
use super::alert::Alert;
use super::risk::RiskLevel;
use super::telemetry::{ChartData, TileData};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub probability: f64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub title: String,
    pub loading: bool,
    pub risk: Option<RiskSummary>,
    pub tiles: Vec<TileData>,
    pub charts: Vec<ChartData>,
    pub recent_alerts: Vec<Alert>,
}

impl Dashboard {
    pub fn new(
        title: String,
        loading: bool,
        risk: Option<RiskSummary>,
        tiles: Vec<TileData>,
        charts: Vec<ChartData>,
        recent_alerts: Vec<Alert>,
    ) -> Self {
        Self {
            title,
            loading,
            risk,
            tiles,
            charts,
            recent_alerts,
        }
    }
}
