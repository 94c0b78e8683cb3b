// View derivers - Pure filters and summaries over a telemetry snapshot
use crate::domain::alert::{Alert, Severity};
use crate::domain::forecast::ForecastSeries;
use crate::domain::risk::RiskLevel;
use crate::domain::sensor::{Location, Parameter, SensorReading, SensorStatus};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Number of open alerts shown in the dashboard feed.
pub const RECENT_ALERT_LIMIT: usize = 5;

const ALL: &str = "all";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("unknown alert filter '{0}', expected all, unacknowledged or acknowledged")]
    AlertFilter(String),
    #[error("unknown parameter '{0}'")]
    Parameter(String),
    #[error("unknown location '{0}'")]
    Location(String),
}

// --- alerts ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertFilter {
    #[default]
    All,
    Unacknowledged,
    Acknowledged,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            AlertFilter::All => true,
            AlertFilter::Unacknowledged => !alert.acknowledged,
            AlertFilter::Acknowledged => alert.acknowledged,
        }
    }
}

impl FromStr for AlertFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AlertFilter::All),
            "unacknowledged" => Ok(AlertFilter::Unacknowledged),
            "acknowledged" => Ok(AlertFilter::Acknowledged),
            other => Err(FilterParseError::AlertFilter(other.to_string())),
        }
    }
}

pub fn filter_alerts(alerts: &[Alert], filter: AlertFilter) -> Vec<Alert> {
    alerts.iter().filter(|a| filter.matches(a)).cloned().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub total: usize,
    pub unacknowledged: usize,
    /// Critical alerts still waiting for acknowledgement
    pub critical: usize,
    pub acknowledged: usize,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(
            Self {
                total: alerts.len(),
                ..Default::default()
            },
            |mut summary, alert| {
                if alert.acknowledged {
                    summary.acknowledged += 1;
                } else {
                    summary.unacknowledged += 1;
                    if alert.severity == Severity::Critical {
                        summary.critical += 1;
                    }
                }
                summary
            },
        )
    }
}

/// First `limit` unacknowledged alerts in store order.
///
/// Store order is generation order, not recency; the feed is not re-sorted.
pub fn recent_alerts(alerts: &[Alert], limit: usize) -> Vec<Alert> {
    alerts
        .iter()
        .filter(|a| !a.acknowledged)
        .take(limit)
        .cloned()
        .collect()
}

// --- sensors ---

/// Search term plus exact-match pickers; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorFilter {
    pub search_term: String,
    pub parameter: Option<Parameter>,
    pub location: Option<Location>,
}

impl SensorFilter {
    /// Builds a filter from raw picker values, where `"all"` (or nothing)
    /// disables that picker.
    pub fn parse(
        search_term: Option<&str>,
        parameter: Option<&str>,
        location: Option<&str>,
    ) -> Result<Self, FilterParseError> {
        let parameter = match parameter {
            None | Some(ALL) => None,
            Some(name) => Some(
                Parameter::from_name(name)
                    .ok_or_else(|| FilterParseError::Parameter(name.to_string()))?,
            ),
        };
        let location = match location {
            None | Some(ALL) => None,
            Some(name) => Some(
                Location::from_name(name)
                    .ok_or_else(|| FilterParseError::Location(name.to_string()))?,
            ),
        };

        Ok(Self {
            search_term: search_term.unwrap_or_default().to_string(),
            parameter,
            location,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, reading: &SensorReading) -> bool {
        let term = self.search_term.to_lowercase();
        let matches_search = reading.location.name().to_lowercase().contains(&term)
            || reading.parameter.name().to_lowercase().contains(&term);
        let matches_parameter = self.parameter.is_none_or(|p| p == reading.parameter);
        let matches_location = self.location.is_none_or(|l| l == reading.location);

        matches_search && matches_parameter && matches_location
    }
}

pub fn filter_readings(readings: &[SensorReading], filter: &SensorFilter) -> Vec<SensorReading> {
    readings.iter().filter(|r| filter.matches(r)).cloned().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
}

impl StatusSummary {
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        let mut summary = Self::default();
        for reading in readings {
            match reading.status {
                SensorStatus::Online => summary.online += 1,
                SensorStatus::Warning => summary.warning += 1,
                SensorStatus::Offline => summary.offline += 1,
            }
        }
        summary
    }
}

/// Distinct parameters in first-seen order.
pub fn unique_parameters(readings: &[SensorReading]) -> Vec<Parameter> {
    let mut seen = Vec::new();
    for reading in readings {
        if !seen.contains(&reading.parameter) {
            seen.push(reading.parameter);
        }
    }
    seen
}

/// Distinct locations in first-seen order.
pub fn unique_locations(readings: &[SensorReading]) -> Vec<Location> {
    let mut seen = Vec::new();
    for reading in readings {
        if !seen.contains(&reading.location) {
            seen.push(reading.location);
        }
    }
    seen
}

// --- forecast ---

/// Risk probability and level of the newest forecast point.
pub fn latest_risk(series: &ForecastSeries) -> Option<(f64, RiskLevel)> {
    series
        .latest()
        .map(|p| (p.risk_probability, RiskLevel::classify(p.risk_probability)))
}
