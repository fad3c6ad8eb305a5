use std::fmt;
use std::str::FromStr;

use http::header::ACCEPT_LANGUAGE;
use http::{HeaderMap, HeaderValue};
use indexmap::IndexSet;
use thiserror::Error;

/// Most `Accept-Language` entries considered per request; the rest are ignored
pub const MAX_LANGUAGE_ENTRIES: usize = 32;

/// Error returned when a language tag cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The tag was empty or whitespace
    #[error("empty language tag")]
    Empty,
    /// The primary language subtag is not 2-8 ASCII letters
    #[error("invalid language subtag in `{0}`")]
    InvalidLanguage(String),
    /// The region subtag is not 2 letters or 3 digits
    #[error("invalid region subtag in `{0}`")]
    InvalidRegion(String),
}

/// A language with an optional region, e.g. `de` or `de-AT`
///
/// Language is stored lowercase and region uppercase so that tags compare
/// equal regardless of how the client spelled them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Locale for a bare language subtag such as `en`
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: None,
        }
    }

    /// Primary language subtag (lowercase)
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Region subtag (uppercase), if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale with the region dropped, if it had one
    pub fn without_region(&self) -> Option<Self> {
        self.region.as_ref().map(|_| Self {
            language: self.language.clone(),
            region: None,
        })
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut subtags = tag.split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LocaleError::InvalidLanguage(tag.to_string()));
        }

        // Script and variant subtags are ignored; only the first region-shaped one is kept
        let mut region = None;
        for subtag in subtags {
            let is_alpha_region = subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic());
            let is_numeric_region = subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit());
            if is_alpha_region || is_numeric_region {
                region = Some(subtag.to_ascii_uppercase());
                break;
            }
            if subtag.is_empty() {
                return Err(LocaleError::InvalidRegion(tag.to_string()));
            }
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}

/// Locales the requester prefers, most preferred first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalePreferences(Vec<Locale>);

impl LocalePreferences {
    /// Build preferences from an explicit ordered list
    pub const fn new(locales: Vec<Locale>) -> Self {
        Self(locales)
    }

    /// Parse every `Accept-Language` header on a request
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_header_values(headers.get_all(ACCEPT_LANGUAGE))
    }

    /// Parse `Accept-Language` header values in the order they were received
    ///
    /// Only the first [`MAX_LANGUAGE_ENTRIES`] comma-separated entries are
    /// looked at.
    pub fn from_header_values<'a>(values: impl IntoIterator<Item = &'a HeaderValue>) -> Self {
        let mut weighted: Vec<(Locale, u16)> = values
            .into_iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .take(MAX_LANGUAGE_ENTRIES)
            .filter_map(parse_weighted_tag)
            .collect();

        // Stable sort keeps header order for equal weights
        weighted.sort_by(|(_, a), (_, b)| b.cmp(a));

        let locales: IndexSet<Locale> = weighted.into_iter().map(|(locale, _)| locale).collect();

        Self(locales.into_iter().collect())
    }

    /// Preferred locales in order
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse one `tag;q=0.8` entry into a locale and its weight in thousandths
///
/// Wildcards, zero weights and malformed entries yield `None`.
fn parse_weighted_tag(entry: &str) -> Option<(Locale, u16)> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag == "*" {
        return None;
    }

    let mut weight = 1000;
    for param in parts {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("q") {
            weight = parse_qvalue(value.trim())?;
        }
    }

    if weight == 0 {
        return None;
    }

    tag.parse().ok().map(|locale| (locale, weight))
}

/// Parse an HTTP quality value (`0`, `0.5`, `1.000`) into thousandths
fn parse_qvalue(value: &str) -> Option<u16> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if fraction.len() > 3 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut thousandths: u16 = match whole {
        "0" => 0,
        "1" => 1000,
        _ => return None,
    };

    let mut scale = 100;
    for digit in fraction.chars() {
        thousandths += u16::try_from(digit.to_digit(10)?).ok()? * scale;
        scale /= 10;
    }

    (thousandths <= 1000).then_some(thousandths)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers(values: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(ACCEPT_LANGUAGE, HeaderValue::from_static(value));
        }
        headers
    }

    fn tags(preferences: &LocalePreferences) -> Vec<String> {
        preferences.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parse_language_only() {
        let locale: Locale = "EN".parse().unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), None);
    }

    #[test]
    fn parse_language_and_region() {
        let locale: Locale = "pt_br".parse().unwrap();
        assert_eq!(locale.to_string(), "pt-BR");
    }

    #[test]
    fn parse_skips_script_subtag() {
        let locale: Locale = "zh-Hant-TW".parse().unwrap();
        assert_eq!(locale.to_string(), "zh-TW");
    }

    #[test]
    fn parse_numeric_region() {
        let locale: Locale = "es-419".parse().unwrap();
        assert_eq!(locale.region(), Some("419"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Locale>(), Err(LocaleError::Empty));
        assert!(matches!("1x".parse::<Locale>(), Err(LocaleError::InvalidLanguage(_))));
        assert!(matches!("de--AT".parse::<Locale>(), Err(LocaleError::InvalidRegion(_))));
    }

    #[test]
    fn without_region_drops_region() {
        let locale: Locale = "de-AT".parse().unwrap();
        assert_eq!(locale.without_region().unwrap().to_string(), "de");
        assert!(locale.without_region().unwrap().without_region().is_none());
    }

    #[test]
    fn preferences_ordered_by_quality() {
        let prefs = LocalePreferences::from_headers(&headers(&["fr;q=0.5, de-AT, en;q=0.8"]));
        assert_eq!(tags(&prefs), ["de-AT", "en", "fr"]);
    }

    #[test]
    fn preferences_keep_header_order_for_equal_weights() {
        let prefs = LocalePreferences::from_headers(&headers(&["ja, ko", "it"]));
        assert_eq!(tags(&prefs), ["ja", "ko", "it"]);
    }

    #[test]
    fn preferences_drop_wildcard_zero_weight_and_invalid() {
        let prefs = LocalePreferences::from_headers(&headers(&["*, nl;q=0, 42, sv;q=2, da;q=0.1"]));
        assert_eq!(tags(&prefs), ["da"]);
    }

    #[test]
    fn preferences_deduplicate() {
        let prefs = LocalePreferences::from_headers(&headers(&["de, DE;q=0.3"]));
        assert_eq!(tags(&prefs), ["de"]);
    }

    #[test]
    fn preferences_stop_after_entry_limit() {
        let letters = b'a'..=b'z';
        let header = letters
            .clone()
            .flat_map(|a| letters.clone().flat_map(move |b| (b'a'..=b'z').map(move |c| [a, b, c])))
            .take(5000)
            .map(|tag| format!("{};q=0.5", String::from_utf8_lossy(&tag)))
            .collect::<Vec<_>>()
            .join(", ");
        let mut headers = HeaderMap::new();
        for _ in 0..4 {
            headers.append(ACCEPT_LANGUAGE, HeaderValue::from_str(&header).unwrap());
        }

        let prefs = LocalePreferences::from_headers(&headers);
        assert!(prefs.iter().count() <= MAX_LANGUAGE_ENTRIES);
        assert!(!prefs.is_empty());
    }

    #[test]
    fn preferences_limit_counts_entries_across_headers() {
        let filler = vec!["zz"; MAX_LANGUAGE_ENTRIES].join(", ");
        let mut headers = HeaderMap::new();
        headers.append(ACCEPT_LANGUAGE, HeaderValue::from_str(&filler).unwrap());
        headers.append(ACCEPT_LANGUAGE, HeaderValue::from_static("de"));

        let prefs = LocalePreferences::from_headers(&headers);
        assert_eq!(tags(&prefs), ["zz"]);
    }

    #[test]
    fn missing_header_means_no_preference() {
        assert!(LocalePreferences::from_headers(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn qvalue_parsing() {
        assert_eq!(parse_qvalue("1"), Some(1000));
        assert_eq!(parse_qvalue("1.000"), Some(1000));
        assert_eq!(parse_qvalue("0.25"), Some(250));
        assert_eq!(parse_qvalue("0"), Some(0));
        assert_eq!(parse_qvalue("1.5"), None);
        assert_eq!(parse_qvalue("0.1234"), None);
        assert_eq!(parse_qvalue("abc"), None);
    }
}
