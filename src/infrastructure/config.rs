use crate::application::telemetry_store::StoreSettings;
use crate::infrastructure::generators::DEFAULT_ALERT_COUNT;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

impl StoreConfig {
    pub fn to_settings(&self) -> StoreSettings {
        StoreSettings {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            refresh_interval: Duration::from_millis(self.refresh_interval_ms),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible telemetry; entropy when absent
    pub seed: Option<u64>,
    #[serde(default = "default_alert_count")]
    pub alert_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            alert_count: default_alert_count(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_refresh_interval_ms() -> u64 {
    10_000
}

fn default_alert_count() -> usize {
    DEFAULT_ALERT_COUNT
}

/// Loads `config/rockfall.*` (optional) overlaid with `ROCKFALL__SECTION__KEY`
/// environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/rockfall").required(false))
        .add_source(config::Environment::with_prefix("ROCKFALL").separator("__"))
        .build()?;

    validated(settings.try_deserialize()?)
}

fn validated(config: AppConfig) -> anyhow::Result<AppConfig> {
    anyhow::ensure!(
        config.store.refresh_interval_ms > 0,
        "store.refresh_interval_ms must be greater than zero"
    );
    Ok(config)
}
