// Application layer - Use cases over telemetry state
pub mod dashboard_service;
pub mod settings_service;
pub mod telemetry_source;
pub mod telemetry_store;
pub mod views;

#[cfg(test)]
pub mod fake_source;
