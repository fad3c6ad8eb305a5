#![allow(clippy::must_use_candidate)]

mod env;
pub mod errors;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use env::ExpandError;
pub use errors::*;
pub use loader::DEFAULT_CONFIG_PATH;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level Verdict configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and built-in endpoints
    #[serde(default)]
    pub server: ServerConfig,
    /// JSON:API error reporting
    #[serde(default)]
    pub errors: ErrorsConfig,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
