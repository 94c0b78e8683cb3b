// HTTP request handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::views::{
    filter_alerts, filter_readings, unique_locations, unique_parameters, AlertFilter,
    AlertSummary, SensorFilter, StatusSummary,
};
use crate::domain::alert::Alert;
use crate::domain::forecast::ForecastSeries;
use crate::domain::risk::{risk_zones, MapLayer, RiskZone, RiskZoneFilter, MAP_LAYERS};
use crate::domain::sensor::{Location, Parameter, SensorReading};
use crate::domain::settings::Settings;
use crate::infrastructure::chunked_json::stream_snapshots;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SensorQuery {
    pub search: Option<String>,
    pub parameter: Option<String>,
    pub location: Option<String>,
    /// Drop all search and picker filters
    #[serde(default)]
    pub reset: bool,
}

#[derive(Deserialize)]
pub struct AlertQuery {
    pub filter: Option<String>,
}

#[derive(Deserialize)]
pub struct RiskQuery {
    pub risk: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SensorView {
    loading: bool,
    total: usize,
    readings: Vec<SensorReading>,
    summary: StatusSummary,
    parameters: Vec<Parameter>,
    locations: Vec<Location>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertView {
    loading: bool,
    alerts: Vec<Alert>,
    summary: AlertSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastView<'a> {
    loading: bool,
    points: &'a ForecastSeries,
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    refreshing: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RiskMapView {
    zones: Vec<RiskZone>,
    layers: Vec<MapLayer>,
}

/// Health check endpoint, also reporting whether telemetry is still refreshing
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        refreshing: state.store.is_running(),
    })
}

/// Sensor table with search and picker filters
pub async fn list_sensors(
    Query(query): Query<SensorQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let mut filter = SensorFilter::parse(
        query.search.as_deref(),
        query.parameter.as_deref(),
        query.location.as_deref(),
    )?;
    if query.reset {
        filter.clear();
    }

    let snapshot = state.store.snapshot();
    let view = SensorView {
        loading: snapshot.loading,
        total: snapshot.readings.len(),
        readings: filter_readings(&snapshot.readings, &filter),
        summary: StatusSummary::from_readings(&snapshot.readings),
        parameters: unique_parameters(&snapshot.readings),
        locations: unique_locations(&snapshot.readings),
    };

    json_response(&view, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

/// Rolling 24-hour forecast window
pub async fn get_forecast(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let snapshot = state.store.snapshot();
    let view = ForecastView {
        loading: snapshot.loading,
        points: &snapshot.forecast,
    };

    json_response(&view, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

/// Alert history, optionally narrowed by acknowledgement state
pub async fn list_alerts(
    Query(query): Query<AlertQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let filter = match query.filter.as_deref() {
        Some(raw) => raw.parse::<AlertFilter>()?,
        None => AlertFilter::All,
    };

    let snapshot = state.store.snapshot();
    let view = AlertView {
        loading: snapshot.loading,
        alerts: filter_alerts(&snapshot.alerts, filter),
        summary: AlertSummary::from_alerts(&snapshot.alerts),
    };

    json_response(&view, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

/// Acknowledge an alert. Unknown ids are accepted and ignored.
pub async fn acknowledge_alert(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.store.acknowledge_alert(&id);
    StatusCode::NO_CONTENT
}

pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let dashboard = DashboardService::build(&state.store.snapshot());

    json_response(&dashboard, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

pub async fn get_risk_map(
    Query(query): Query<RiskQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let filter = match query.risk.as_deref() {
        Some(raw) => raw.parse::<RiskZoneFilter>()?,
        None => RiskZoneFilter::All,
    };

    let view = RiskMapView {
        zones: risk_zones(filter),
        layers: MAP_LAYERS.to_vec(),
    };

    json_response(&view, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings.get().await)
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    let saved = state.settings.update(settings).await?;
    Ok(Json(saved))
}

/// Stream every published telemetry snapshot (progressive updates)
pub async fn stream_telemetry(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    stream_snapshots(state.store.subscribe(), accepts_brotli(&headers))
}

#[cfg(test)]
mod tests {
    use crate::application::fake_source::FakeSource;
    use crate::application::settings_service::SettingsService;
    use crate::application::telemetry_store::{StoreSettings, TelemetryStore};
    use crate::presentation::app_state::AppState;
    use crate::presentation::router::router;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn loaded_app() -> (Router, Arc<TelemetryStore>) {
        let store = Arc::new(TelemetryStore::new(
            Arc::new(FakeSource::new()),
            StoreSettings::default(),
        ));
        store.start();
        tokio::time::sleep(Duration::from_millis(1_100)).await;

        let state = Arc::new(AppState {
            store: store.clone(),
            settings: Arc::new(SettingsService::new()),
        });
        (router(state), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, Body::empty()).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_check_reports_refresher() {
        let (app, store) = loaded_app().await;
        let (status, json) = get(&app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["refreshing"], true);

        store.stop().await;
        let (_, json) = get(&app, "/healthz").await;
        assert_eq!(json["refreshing"], false);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sensor_search_site_a() {
        let (app, _store) = loaded_app().await;
        let (status, json) = get(&app, "/sensors?search=Site%20A&parameter=all&location=all").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 20);
        let readings = json["readings"].as_array().unwrap();
        assert_eq!(readings.len(), 5);
        assert!(readings.iter().all(|r| r["location"] == "Site A"));
        assert_eq!(json["parameters"].as_array().unwrap().len(), 5);
        assert_eq!(json["locations"][3], "Site D");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sensor_reset_clears_filters() {
        let (app, _store) = loaded_app().await;
        let uri = "/sensors?search=Site%20A&location=Site%20B&reset=true";
        let (status, json) = get(&app, uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["readings"].as_array().unwrap().len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sensor_unknown_location_is_bad_request() {
        let (app, _store) = loaded_app().await;
        let (status, json) = get(&app, "/sensors?location=Site%20Q").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "unknown location 'Site Q'");
    }

    #[tokio::test(start_paused = true)]
    async fn test_forecast_window() {
        let (app, _store) = loaded_app().await;
        let (status, json) = get(&app, "/forecast").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["loading"], false);
        assert_eq!(json["points"].as_array().unwrap().len(), 24);
        assert!(json["points"][0].get("riskProbability").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledge_then_filter() {
        let (app, store) = loaded_app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/alerts/alert-3/acknowledge",
            Body::empty(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(store.snapshot().alerts[3].acknowledged);

        let (status, json) = get(&app, "/alerts?filter=unacknowledged").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = json["alerts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap().to_string())
            .collect();
        assert!(!ids.contains(&"alert-3".to_string()));
        assert_eq!(json["summary"]["unacknowledged"], 5);
        assert_eq!(json["summary"]["acknowledged"], 7);
        assert_eq!(json["summary"]["critical"], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledge_unknown_id_is_accepted() {
        let (app, store) = loaded_app().await;
        let before = store.snapshot();

        let (status, _) = send(&app, Method::POST, "/alerts/nope/acknowledge", Body::empty()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(store.snapshot().alerts, before.alerts);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_alert_filter() {
        let (app, _store) = loaded_app().await;
        let (status, _) = get(&app, "/alerts?filter=recent").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboard() {
        let (app, _store) = loaded_app().await;
        let (status, json) = get(&app, "/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["risk"]["level"], "low");
        assert_eq!(json["tiles"].as_array().unwrap().len(), 4);
        assert_eq!(json["recentAlerts"].as_array().unwrap().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_risk_map_filter() {
        let (app, _store) = loaded_app().await;

        let (status, json) = get(&app, "/risk-zones?risk=medium").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["zones"].as_array().unwrap().len(), 1);
        assert_eq!(json["zones"][0]["name"], "Zone B");
        assert_eq!(json["layers"][0]["active"], true);

        let (status, _) = get(&app, "/risk-zones?risk=extreme").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_round_trip_and_validation() {
        let (app, _store) = loaded_app().await;

        let (status, mut settings) = get(&app, "/settings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settings["thresholds"]["rainfall"], 25.0);

        settings["thresholds"]["vibration"] = 7.5.into();
        let body = Body::from(settings.to_string());
        let (status, saved) = send(&app, Method::PUT, "/settings", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["thresholds"]["vibration"], 7.5);

        settings["thresholds"]["rainfall"] = 250.0.into();
        let body = Body::from(settings.to_string());
        let (status, json) = send(&app, Method::PUT, "/settings", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("rainfall"));

        let (_, current) = get(&app, "/settings").await;
        assert_eq!(current["thresholds"]["rainfall"], 25.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_compressed_response_when_accepted() {
        let (app, _store) = loaded_app().await;
        let request = Request::get("/alerts")
            .header(header::ACCEPT_ENCODING, "br")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }
}
