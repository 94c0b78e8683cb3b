// Presentation layer - HTTP surface over the telemetry store
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod router;
