// Alert domain model
use super::sensor::Location;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighRisk,
    SensorFailure,
    WeatherWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    // no template raises low-severity alerts
    #[cfg_attr(not(test), allow(dead_code))]
    Low,
    Medium,
    High,
    Critical,
}

/// Fixed (type, severity, message) combination an alert is raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTemplate {
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: &'static str,
}

pub const ALERT_TEMPLATES: [AlertTemplate; 3] = [
    AlertTemplate {
        alert_type: AlertType::HighRisk,
        severity: Severity::Critical,
        message: "Critical rockfall risk detected at monitoring zone",
    },
    AlertTemplate {
        alert_type: AlertType::SensorFailure,
        severity: Severity::High,
        message: "Displacement sensor offline - immediate attention required",
    },
    AlertTemplate {
        alert_type: AlertType::WeatherWarning,
        severity: Severity::Medium,
        message: "Heavy rainfall forecast - increased monitoring recommended",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

impl Alert {
    pub fn from_template(
        index: usize,
        template: &AlertTemplate,
        location: Location,
        timestamp: DateTime<Utc>,
        acknowledged: bool,
    ) -> Self {
        Self {
            id: alert_id(index),
            alert_type: template.alert_type,
            severity: template.severity,
            message: template.message.to_string(),
            location,
            timestamp,
            acknowledged,
        }
    }

    /// Copy of this alert with the acknowledged flag set.
    pub fn acknowledged(&self) -> Self {
        Self {
            acknowledged: true,
            ..self.clone()
        }
    }
}

pub fn alert_id(index: usize) -> String {
    format!("alert-{}", index)
}
