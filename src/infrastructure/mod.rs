// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod generators;
pub mod http_response;
pub mod synthetic_source;
