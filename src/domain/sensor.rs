// Sensor domain model
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Monitoring sites, in the order their sensors are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    SiteA,
    SiteB,
    SiteC,
    SiteD,
}

impl Location {
    pub const ALL: [Location; 4] = [
        Location::SiteA,
        Location::SiteB,
        Location::SiteC,
        Location::SiteD,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Location::SiteA => "Site A",
            Location::SiteB => "Site B",
            Location::SiteC => "Site C",
            Location::SiteD => "Site D",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Measured parameter catalog. Each parameter carries its unit and valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Displacement,
    Strain,
    PorePressure,
    Rainfall,
    Temperature,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Displacement,
        Parameter::Strain,
        Parameter::PorePressure,
        Parameter::Rainfall,
        Parameter::Temperature,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Displacement => "Displacement",
            Parameter::Strain => "Strain",
            Parameter::PorePressure => "Pore Pressure",
            Parameter::Rainfall => "Rainfall",
            Parameter::Temperature => "Temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Displacement => "mm",
            Parameter::Strain => "μm/m",
            Parameter::PorePressure => "kPa",
            Parameter::Rainfall => "mm",
            Parameter::Temperature => "°C",
        }
    }

    /// Inclusive lower bound, exclusive upper bound.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Parameter::Displacement => (0.0, 5.0),
            Parameter::Strain => (0.0, 100.0),
            Parameter::PorePressure => (0.0, 200.0),
            Parameter::Rainfall => (0.0, 50.0),
            Parameter::Temperature => (-5.0, 35.0),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    Online,
    Warning,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: String,
    pub location: Location,
    pub parameter: Parameter,
    pub value: f64,
    pub unit: &'static str,
    pub status: SensorStatus,
    pub last_updated: DateTime<Utc>,
}

impl SensorReading {
    pub fn new(
        location_index: usize,
        parameter_index: usize,
        value: f64,
        status: SensorStatus,
        last_updated: DateTime<Utc>,
    ) -> Self {
        let location = Location::ALL[location_index];
        let parameter = Parameter::ALL[parameter_index];
        Self {
            id: sensor_id(location_index, parameter_index),
            location,
            parameter,
            value,
            unit: parameter.unit(),
            status,
            last_updated,
        }
    }
}

/// Stable id for the reading at a (location, parameter) position.
pub fn sensor_id(location_index: usize, parameter_index: usize) -> String {
    format!("sensor-{}-{}", location_index, parameter_index)
}
