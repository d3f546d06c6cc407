//! Logging infrastructure
//!
//! Sets up `tracing` output with an env-filter and optional JSON lines.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
