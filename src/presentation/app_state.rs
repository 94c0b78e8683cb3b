// Application state for HTTP handlers
use crate::application::settings_service::SettingsService;
use crate::application::telemetry_store::TelemetryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TelemetryStore>,
    pub settings: Arc<SettingsService>,
}
