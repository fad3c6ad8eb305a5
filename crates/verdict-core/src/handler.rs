use std::sync::Arc;

use bytes::Bytes;
use http::HeaderValue;

use crate::catalog::{ReasonCatalog, StaticCatalog, resolve_title};
use crate::locale::LocalePreferences;
use crate::report::{BodyEncoding, ErrorReport, JSON_API_CONTENT_TYPE};
use crate::response::ErrorResponse;
use crate::Failure;

/// Hook the host calls once a response is ready to be sent
///
/// Registered with the host as `Arc<dyn ErrorHandler>`. Implementations
/// must never fail: whatever goes wrong while reporting is their own
/// business.
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, locales: &LocalePreferences, response: &mut dyn ErrorResponse, failure: Option<&Failure>);
}

/// Writes JSON:API error documents for error responses with an empty body
#[derive(Clone)]
pub struct JsonApiErrorHandler {
    catalog: Arc<dyn ReasonCatalog>,
    encoding: BodyEncoding,
}

impl JsonApiErrorHandler {
    pub fn new(catalog: Arc<dyn ReasonCatalog>, encoding: BodyEncoding) -> Self {
        Self { catalog, encoding }
    }

    pub const fn encoding(&self) -> BodyEncoding {
        self.encoding
    }

    /// Whether `response` should receive a report, marking it if so
    ///
    /// Statuses of 600 and above are not HTTP error classes and are left
    /// untouched like successful ones.
    fn should_report(response: &mut dyn ErrorResponse) -> bool {
        let status = response.status();

        if !(400..600).contains(&status.as_u16()) {
            tracing::trace!(status = status.as_u16(), "not an error status, skipping report");
            return false;
        }

        if response.bytes_written() > 0 {
            tracing::trace!(status = status.as_u16(), "response body already started, skipping report");
            return false;
        }

        if !response.mark_error_reported() {
            tracing::trace!(status = status.as_u16(), "error already reported, skipping report");
            return false;
        }

        true
    }

    /// Build the report for the current response
    pub fn build_report(&self, locales: &LocalePreferences, response: &dyn ErrorResponse, failure: Option<&Failure>) -> ErrorReport {
        let status = response.status();
        let title = resolve_title(self.catalog.as_ref(), status, locales);
        let detail = failure.and_then(Failure::detail).map(str::to_owned);

        ErrorReport::new(status, title, detail)
    }
}

impl Default for JsonApiErrorHandler {
    fn default() -> Self {
        Self::new(Arc::new(StaticCatalog::default()), BodyEncoding::default())
    }
}

impl std::fmt::Debug for JsonApiErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonApiErrorHandler")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl ErrorHandler for JsonApiErrorHandler {
    fn handle(&self, locales: &LocalePreferences, response: &mut dyn ErrorResponse, failure: Option<&Failure>) {
        if !Self::should_report(response) {
            return;
        }

        response.set_content_type(HeaderValue::from_static(JSON_API_CONTENT_TYPE));

        let report = self.build_report(locales, response, failure);
        let body = report.to_body(self.encoding);

        tracing::debug!(
            status = report.status().as_u16(),
            has_detail = report.detail().is_some(),
            "writing JSON:API error report"
        );

        // Best effort: a client that went away does not get a second error
        if response.write_body(Bytes::from(body)).is_ok() {
            let _ = response.finish();
        }
    }
}
