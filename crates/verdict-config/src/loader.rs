use std::path::Path;

use crate::Config;

/// Configuration file read when no path is given explicitly
pub const DEFAULT_CONFIG_PATH: &str = "verdict.toml";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents fail to
    /// parse or validate
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Load `path` when given, otherwise the default file if it exists
    ///
    /// Falls back to built-in defaults when neither is present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if the file that
    /// was found fails to parse or validate
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.is_file() {
            return Self::load(default_path);
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Parse configuration text
    ///
    /// Expands `{{ env.VAR }}` placeholders, then deserializes and validates
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns an error if placeholder expansion, TOML parsing, or validation
    /// fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server_config()?;
        self.validate_errors_config()?;
        self.validate_telemetry_config()?;
        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': {}", health.path);
        }

        Ok(())
    }

    /// Locale tags and status codes must parse
    fn validate_errors_config(&self) -> anyhow::Result<()> {
        self.errors.catalog().map(|_| ())
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        let Some(ref telemetry) = self.telemetry else {
            return Ok(());
        };

        let rate = telemetry.tracing.sampling_rate;
        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {rate}");
        }

        if telemetry.service_name.is_empty() {
            anyhow::bail!("telemetry.service_name must not be empty");
        }

        Ok(())
    }
}
