// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    acknowledge_alert, get_dashboard, get_forecast, get_risk_map, get_settings, health_check,
    list_alerts, list_sensors, stream_telemetry, update_settings,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/sensors", get(list_sensors))
        .route("/forecast", get(get_forecast))
        .route("/alerts", get(list_alerts))
        .route("/alerts/:id/acknowledge", post(acknowledge_alert))
        .route("/dashboard", get(get_dashboard))
        .route("/risk-zones", get(get_risk_map))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/stream", get(stream_telemetry))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
