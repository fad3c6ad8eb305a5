use http::StatusCode;

use crate::Failure;

/// Trait for domain errors that end up as JSON:API error responses
///
/// Implemented by application error types. The server layer turns these
/// into empty-bodied responses carrying a [`Failure`], and the reporter
/// renders the body, keeping domain errors decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Message safe to expose to API consumers
    ///
    /// Defaults to the display text. Return an empty string to omit
    /// `detail` from the report.
    fn client_message(&self) -> String {
        self.to_string()
    }

    /// The failure the reporter formats
    fn failure(&self) -> Failure {
        Failure::new(self.client_message())
    }
}
