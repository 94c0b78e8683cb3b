// Operator threshold and notification settings
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} threshold {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdSettings {
    /// mm/hour
    pub rainfall: f64,
    /// mg
    pub vibration: f64,
    /// mm
    pub displacement: f64,
    /// °C
    pub temperature: f64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            rainfall: 25.0,
            vibration: 5.0,
            displacement: 3.0,
            temperature: 30.0,
        }
    }
}

impl ThresholdSettings {
    const LIMITS: [(&'static str, f64, f64); 4] = [
        ("rainfall", 0.0, 100.0),
        ("vibration", 0.0, 20.0),
        ("displacement", 0.0, 10.0),
        ("temperature", -10.0, 50.0),
    ];

    pub fn validate(&self) -> Result<(), SettingsError> {
        let values = [self.rainfall, self.vibration, self.displacement, self.temperature];
        for ((name, min, max), value) in Self::LIMITS.iter().zip(values) {
            if !(*min..=*max).contains(&value) {
                return Err(SettingsError::OutOfRange {
                    name: *name,
                    value,
                    min: *min,
                    max: *max,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub critical_only: bool,
    pub email_address: String,
    pub phone_number: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: true,
            critical_only: false,
            email_address: "admin@rockfall-system.com".to_string(),
            phone_number: "+1 234 567 8900".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub thresholds: ThresholdSettings,
    pub notifications: NotificationSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ThresholdSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_out_of_range_names_the_field() {
        let thresholds = ThresholdSettings {
            temperature: -11.0,
            ..Default::default()
        };
        assert_eq!(
            thresholds.validate(),
            Err(SettingsError::OutOfRange {
                name: "temperature",
                value: -11.0,
                min: -10.0,
                max: 50.0,
            })
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let thresholds = ThresholdSettings {
            vibration: f64::NAN,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());
    }
}
