// Settings service - In-memory operator settings
use crate::domain::settings::{Settings, SettingsError};
use tokio::sync::RwLock;

/// Holds threshold and notification settings for the running session only.
/// Nothing is written anywhere; a restart brings back the defaults.
#[derive(Default)]
pub struct SettingsService {
    current: RwLock<Settings>,
}

impl SettingsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Settings {
        self.current.read().await.clone()
    }

    /// Replaces the settings if every threshold is within range; otherwise
    /// nothing changes.
    pub async fn update(&self, settings: Settings) -> Result<Settings, SettingsError> {
        settings.thresholds.validate()?;

        let mut current = self.current.write().await;
        *current = settings.clone();
        tracing::info!(
            "Settings saved: thresholds {:?}, email={} sms={} push={} critical_only={}",
            settings.thresholds,
            settings.notifications.email,
            settings.notifications.sms,
            settings.notifications.push,
            settings.notifications.critical_only
        );
        Ok(settings)
    }
}
