// Telemetry store - Owns session telemetry state and its refresh cadence
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::alert::Alert;
use crate::domain::forecast::ForecastSeries;
use crate::domain::sensor::SensorReading;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Immutable view of the store at one point in time. Every mutation publishes
/// a fresh snapshot; published snapshots are never modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub readings: Vec<SensorReading>,
    pub forecast: ForecastSeries,
    pub alerts: Vec<Alert>,
    pub loading: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl TelemetrySnapshot {
    fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub initial_delay: Duration,
    pub refresh_interval: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            refresh_interval: Duration::from_millis(10_000),
        }
    }
}

pub struct TelemetryStore {
    source: Arc<dyn TelemetrySource>,
    settings: StoreSettings,
    state: Arc<watch::Sender<Arc<TelemetrySnapshot>>>,
    refresher: Mutex<Option<JoinHandle<()>>>,
}

impl TelemetryStore {
    pub fn new(source: Arc<dyn TelemetrySource>, settings: StoreSettings) -> Self {
        let (state, _) = watch::channel(Arc::new(TelemetrySnapshot::loading()));
        Self {
            source,
            settings,
            state: Arc::new(state),
            refresher: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> Arc<TelemetrySnapshot> {
        self.state.borrow().clone()
    }

    /// Observers are woken whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TelemetrySnapshot>> {
        self.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.refresher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Resets to an empty loading snapshot and starts the load-then-refresh task.
    /// Does nothing if the store is already running.
    pub fn start(&self) {
        let mut refresher = self.refresher.lock().unwrap_or_else(PoisonError::into_inner);
        if refresher.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!("Telemetry store already running");
            return;
        }

        self.state.send_replace(Arc::new(TelemetrySnapshot::loading()));

        let worker = Refresher {
            source: self.source.clone(),
            state: self.state.clone(),
            settings: self.settings.clone(),
        };
        *refresher = Some(tokio::spawn(worker.run()));

        tracing::info!(
            "Telemetry store started (initial delay {:?}, refresh every {:?})",
            self.settings.initial_delay,
            self.settings.refresh_interval
        );
    }

    /// Cancels the refresh task and waits for it to wind down. Once this returns
    /// no pending load or tick can publish another snapshot.
    pub async fn stop(&self) {
        let handle = self
            .refresher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(handle) = handle else {
            return;
        };

        handle.abort();
        match handle.await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {}
            Err(e) => tracing::error!("Telemetry refresh task panicked: {}", e),
        }
        tracing::info!("Telemetry store stopped");
    }

    /// Marks the alert acknowledged. Unknown ids, alerts that are already
    /// acknowledged and calls on a stopped store leave the state untouched and
    /// wake no observers.
    pub fn acknowledge_alert(&self, alert_id: &str) {
        // held across the publish so a concurrent stop() cannot interleave
        let refresher = self.refresher.lock().unwrap_or_else(PoisonError::into_inner);
        if refresher.is_none() {
            tracing::debug!("Acknowledge for {} ignored, telemetry store is stopped", alert_id);
            return;
        }

        let changed = self.state.send_if_modified(|current| {
            let Some(index) = current
                .alerts
                .iter()
                .position(|a| a.id == alert_id && !a.acknowledged)
            else {
                return false;
            };

            let mut alerts = current.alerts.clone();
            alerts[index] = alerts[index].acknowledged();
            *current = Arc::new(TelemetrySnapshot {
                alerts,
                ..(**current).clone()
            });
            true
        });

        if changed {
            tracing::info!("Alert {} acknowledged", alert_id);
        } else {
            tracing::debug!(
                "Acknowledge for {} ignored (unknown or already acknowledged)",
                alert_id
            );
        }
    }
}

impl Drop for TelemetryStore {
    fn drop(&mut self) {
        let handle = self
            .refresher
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

struct Refresher {
    source: Arc<dyn TelemetrySource>,
    state: Arc<watch::Sender<Arc<TelemetrySnapshot>>>,
    settings: StoreSettings,
}

impl Refresher {
    async fn run(self) {
        tokio::time::sleep(self.settings.initial_delay).await;
        let mut loaded = self.load().await;

        let period = self.settings.refresh_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if loaded {
                self.refresh().await;
            } else {
                loaded = self.load().await;
            }
        }
    }

    async fn load(&self) -> bool {
        let fetched = tokio::try_join!(
            self.source.fetch_readings(),
            self.source.fetch_forecast(),
            self.source.fetch_alerts(),
        );

        let (readings, points, alerts) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("Initial telemetry load failed, retrying next tick: {:#}", e);
                return false;
            }
        };

        let point_count = points.len();
        let Some(forecast) = ForecastSeries::from_points(points) else {
            tracing::warn!(
                "Source returned a malformed forecast window ({} points), retrying next tick",
                point_count
            );
            return false;
        };

        tracing::info!(
            "Telemetry loaded: {} readings, {} forecast points, {} alerts",
            readings.len(),
            forecast.len(),
            alerts.len()
        );

        self.state.send_replace(Arc::new(TelemetrySnapshot {
            readings,
            forecast,
            alerts,
            loading: false,
            refreshed_at: Some(Utc::now()),
        }));
        true
    }

    async fn refresh(&self) {
        let fetched = tokio::try_join!(
            self.source.fetch_readings(),
            self.source.fetch_forecast_point(),
        );

        let (readings, point) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("Telemetry refresh failed, keeping previous snapshot: {:#}", e);
                return;
            }
        };

        tracing::debug!(
            "Refreshing {} readings, forecast now ends {}",
            readings.len(),
            point.timestamp
        );

        self.state.send_modify(|current| {
            *current = Arc::new(TelemetrySnapshot {
                readings,
                forecast: current.forecast.advanced(point),
                alerts: current.alerts.clone(),
                loading: false,
                refreshed_at: Some(Utc::now()),
            });
        });
    }
}
