// Chart and tile view models built from telemetry
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
    pub caption: String,
}

impl TileData {
    pub fn new(
        id: &str,
        title: &str,
        unit: &str,
        value: f64,
        precision: i32,
        caption: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            value,
            precision,
            caption: caption.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(id: &str, name: &str, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Bar,
}

impl ChartData {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        unit: Option<&str>,
        kind: ChartKind,
        series: Vec<SeriesData>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            unit: unit.map(str::to_string),
            kind,
            series,
        }
    }
}
