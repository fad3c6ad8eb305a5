//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use indexmap::IndexMap;
use verdict_config::{Config, ErrorsConfig, HealthConfig, ServerConfig};
use verdict_core::BodyEncoding;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                errors: ErrorsConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Add a reason phrase override
    pub fn with_reason(mut self, locale: &str, status: u16, reason: &str) -> Self {
        self.config
            .errors
            .reasons
            .entry(locale.to_owned())
            .or_insert_with(IndexMap::new)
            .insert(status.to_string(), reason.to_owned());
        self
    }

    /// Set the locale used when no preference matches
    pub fn with_default_locale(mut self, locale: &str) -> Self {
        self.config.errors.default_locale = locale.to_owned();
        self
    }

    /// Set how titles and details are encoded
    pub fn with_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.config.errors.encoding = encoding;
        self
    }

    /// Turn JSON:API error reporting off
    pub fn without_reporting(mut self) -> Self {
        self.config.errors.enabled = false;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
