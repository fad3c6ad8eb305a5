use std::collections::HashMap;

use http::StatusCode;

use crate::locale::{Locale, LocalePreferences};

/// Title used when no catalog entry or canonical phrase exists for a status
pub const FALLBACK_TITLE: &str = "Unknown Error";

/// Source of human-readable reason phrases
///
/// Keyed by status code and locale. Implementations return `None` when
/// they have nothing for that exact pair; fallback across locales is
/// handled by [`resolve_title`].
pub trait ReasonCatalog: Send + Sync {
    /// Reason phrase for `status` in exactly `locale`
    fn reason(&self, status: StatusCode, locale: &Locale) -> Option<&str>;

    /// Locale used when none of the requester's preferences match
    fn default_locale(&self) -> &Locale;
}

/// Resolve the title for `status` against the requester's preferences
///
/// Each preferred locale is tried as-is and then by language alone, then the
/// catalog's default locale, then the canonical English phrase. The result
/// is never empty.
pub fn resolve_title(catalog: &dyn ReasonCatalog, status: StatusCode, preferences: &LocalePreferences) -> String {
    let exact = |locale: &Locale| catalog.reason(status, locale).filter(|r| !r.is_empty()).map(str::to_owned);
    let lookup = |locale: &Locale| exact(locale).or_else(|| locale.without_region().and_then(|l| exact(&l)));

    preferences
        .iter()
        .find_map(&lookup)
        .or_else(|| lookup(catalog.default_locale()))
        .or_else(|| status.canonical_reason().map(str::to_owned))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// In-memory catalog: canonical English phrases plus per-locale overrides
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    default_locale: Locale,
    overrides: HashMap<Locale, HashMap<u16, String>>,
}

impl StaticCatalog {
    /// Catalog with only the built-in English phrases
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            overrides: HashMap::new(),
        }
    }

    /// Add or replace the phrase for `status` in `locale`
    #[must_use]
    pub fn with_reason(mut self, locale: Locale, status: StatusCode, reason: impl Into<String>) -> Self {
        self.insert(locale, status, reason);
        self
    }

    /// Add or replace the phrase for `status` in `locale`
    pub fn insert(&mut self, locale: Locale, status: StatusCode, reason: impl Into<String>) {
        self.overrides
            .entry(locale)
            .or_default()
            .insert(status.as_u16(), reason.into());
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(english())
    }
}

impl ReasonCatalog for StaticCatalog {
    fn reason(&self, status: StatusCode, locale: &Locale) -> Option<&str> {
        let overridden = self
            .overrides
            .get(locale)
            .and_then(|reasons| reasons.get(&status.as_u16()))
            .map(String::as_str);

        overridden.or_else(|| {
            (locale.language() == "en" && locale.region().is_none())
                .then(|| status.canonical_reason())
                .flatten()
        })
    }

    fn default_locale(&self) -> &Locale {
        &self.default_locale
    }
}

fn english() -> Locale {
    Locale::new("en")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        tag.parse().unwrap()
    }

    fn prefs(list: &[&str]) -> LocalePreferences {
        LocalePreferences::new(list.iter().map(|t| locale(t)).collect())
    }

    fn german() -> StaticCatalog {
        StaticCatalog::default()
            .with_reason(locale("de"), StatusCode::NOT_FOUND, "Nicht gefunden")
            .with_reason(locale("de-AT"), StatusCode::NOT_FOUND, "Ned gfundn")
    }

    #[test]
    fn canonical_english_without_preferences() {
        let title = resolve_title(&StaticCatalog::default(), StatusCode::NOT_FOUND, &prefs(&[]));
        assert_eq!(title, "Not Found");
    }

    #[test]
    fn exact_locale_wins() {
        let title = resolve_title(&german(), StatusCode::NOT_FOUND, &prefs(&["de-AT"]));
        assert_eq!(title, "Ned gfundn");
    }

    #[test]
    fn region_falls_back_to_language() {
        let title = resolve_title(&german(), StatusCode::NOT_FOUND, &prefs(&["de-CH"]));
        assert_eq!(title, "Nicht gefunden");
    }

    #[test]
    fn first_matching_preference_wins() {
        let title = resolve_title(&german(), StatusCode::NOT_FOUND, &prefs(&["fr", "de", "en"]));
        assert_eq!(title, "Nicht gefunden");
    }

    #[test]
    fn unmatched_preferences_use_default_locale() {
        let catalog = StaticCatalog::new(locale("de")).with_reason(locale("de"), StatusCode::GONE, "Verschwunden");
        let title = resolve_title(&catalog, StatusCode::GONE, &prefs(&["fr"]));
        assert_eq!(title, "Verschwunden");
    }

    #[test]
    fn missing_translation_uses_canonical_phrase() {
        let title = resolve_title(&german(), StatusCode::BAD_GATEWAY, &prefs(&["de"]));
        assert_eq!(title, "Bad Gateway");
    }

    #[test]
    fn empty_override_is_ignored() {
        let catalog = StaticCatalog::default().with_reason(locale("en"), StatusCode::CONFLICT, "");
        let title = resolve_title(&catalog, StatusCode::CONFLICT, &prefs(&["en"]));
        assert_eq!(title, "Conflict");
    }

    #[test]
    fn unknown_status_uses_fallback_title() {
        let status = StatusCode::from_u16(499).unwrap();
        let title = resolve_title(&StaticCatalog::default(), status, &prefs(&["en"]));
        assert_eq!(title, FALLBACK_TITLE);
    }

    #[test]
    fn override_for_unknown_status() {
        let status = StatusCode::from_u16(499).unwrap();
        let catalog = StaticCatalog::default().with_reason(locale("en"), status, "Client Closed Request");
        assert_eq!(resolve_title(&catalog, status, &prefs(&[])), "Client Closed Request");
    }
}
