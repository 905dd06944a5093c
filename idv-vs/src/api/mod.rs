//! HTTP API handlers for idv-vs

pub mod health;
pub mod verify;

pub use health::health_routes;
pub use verify::verify;
