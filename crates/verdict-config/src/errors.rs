use http::StatusCode;
use indexmap::IndexMap;
use serde::Deserialize;
use verdict_core::{BodyEncoding, Locale, StaticCatalog};

/// Error reporting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorsConfig {
    /// Rewrite error responses into JSON:API documents
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Whether titles and details are JSON-escaped
    #[serde(default)]
    pub encoding: BodyEncoding,
    /// Locale used when the requester's preferences match nothing
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Reason phrase overrides, by locale tag then status code
    #[serde(default)]
    pub reasons: IndexMap<String, IndexMap<String, String>>,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            encoding: BodyEncoding::default(),
            default_locale: default_locale(),
            reasons: IndexMap::new(),
        }
    }
}

impl ErrorsConfig {
    /// Build the reason catalog described by this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a locale tag does not parse or a reason key is not
    /// a status code between 100 and 599
    pub fn catalog(&self) -> anyhow::Result<StaticCatalog> {
        let default_locale: Locale = self
            .default_locale
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid errors.default_locale: {e}"))?;

        let mut catalog = StaticCatalog::new(default_locale);

        for (tag, reasons) in &self.reasons {
            let locale: Locale = tag
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid locale '{tag}' in errors.reasons: {e}"))?;

            for (code, reason) in reasons {
                let status = parse_status(code)
                    .ok_or_else(|| anyhow::anyhow!("invalid status code '{code}' in errors.reasons.{tag}"))?;
                catalog.insert(locale.clone(), status, reason.clone());
            }
        }

        Ok(catalog)
    }
}

fn parse_status(code: &str) -> Option<StatusCode> {
    code.trim()
        .parse::<u16>()
        .ok()
        .filter(|code| (100..=599).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_locale() -> String {
    "en".to_string()
}
