// Domain layer - Telemetry entities and pure rules
pub mod alert;
pub mod dashboard;
pub mod forecast;
pub mod risk;
pub mod sensor;
pub mod settings;
pub mod telemetry;
