// Risk classification and the static risk-zone catalog
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `> 70` is high, `> 40` is medium, anything else is low.
    pub fn classify(risk_probability: f64) -> Self {
        if risk_probability > 70.0 {
            RiskLevel::High
        } else if risk_probability > 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown risk filter '{0}', expected all, high, medium or low")]
pub struct RiskFilterParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskZoneFilter {
    #[default]
    All,
    Only(RiskLevel),
}

impl RiskZoneFilter {
    pub fn matches(&self, level: RiskLevel) -> bool {
        match self {
            RiskZoneFilter::All => true,
            RiskZoneFilter::Only(wanted) => *wanted == level,
        }
    }
}

impl FromStr for RiskZoneFilter {
    type Err = RiskFilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(RiskZoneFilter::All),
            "high" => Ok(RiskZoneFilter::Only(RiskLevel::High)),
            "medium" => Ok(RiskZoneFilter::Only(RiskLevel::Medium)),
            "low" => Ok(RiskZoneFilter::Only(RiskLevel::Low)),
            other => Err(RiskFilterParseError(other.to_string())),
        }
    }
}

/// A surveyed hazard zone and its marker position on the site map (percent offsets).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskZone {
    pub id: &'static str,
    pub name: &'static str,
    pub risk: RiskLevel,
    pub left_pct: f64,
    pub top_pct: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayer {
    pub id: &'static str,
    pub name: &'static str,
    pub active: bool,
}

pub const RISK_ZONES: [RiskZone; 4] = [
    RiskZone {
        id: "zone-1",
        name: "Zone A",
        risk: RiskLevel::Low,
        left_pct: 55.0,
        top_pct: 28.0,
        color: "#10B981",
    },
    RiskZone {
        id: "zone-2",
        name: "Zone B",
        risk: RiskLevel::Medium,
        left_pct: 78.0,
        top_pct: 56.0,
        color: "#F59E0B",
    },
    RiskZone {
        id: "zone-3",
        name: "Zone C",
        risk: RiskLevel::High,
        left_pct: 12.0,
        top_pct: 52.0,
        color: "#EF4444",
    },
    RiskZone {
        id: "zone-4",
        name: "Zone D",
        risk: RiskLevel::Low,
        left_pct: 82.0,
        top_pct: 82.0,
        color: "#10B981",
    },
];

pub const MAP_LAYERS: [MapLayer; 4] = [
    MapLayer {
        id: "satellite",
        name: "Satellite View",
        active: true,
    },
    MapLayer {
        id: "dem",
        name: "Digital Elevation Model",
        active: false,
    },
    MapLayer {
        id: "drone",
        name: "Drone Imagery",
        active: false,
    },
    MapLayer {
        id: "geological",
        name: "Geological Survey",
        active: false,
    },
];

pub fn risk_zones(filter: RiskZoneFilter) -> Vec<RiskZone> {
    RISK_ZONES
        .iter()
        .filter(|z| filter.matches(z.risk))
        .cloned()
        .collect()
}
