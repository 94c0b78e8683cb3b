// API error mapping
use crate::application::views::FilterParseError;
use crate::domain::risk::RiskFilterParseError;
use crate::domain::settings::SettingsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Filter(#[from] FilterParseError),
    #[error(transparent)]
    RiskFilter(#[from] RiskFilterParseError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to encode response")]
    Encoding(StatusCode),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Filter(_) | ApiError::RiskFilter(_) => StatusCode::BAD_REQUEST,
            ApiError::Settings(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Encoding(status) => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
