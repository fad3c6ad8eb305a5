use std::any::Any;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use verdict_core::{Failure, HttpError};

/// Empty-bodied response carrying `failure` for the reporter to format
pub fn failure_response(status: StatusCode, failure: Failure) -> Response {
    let mut response = status.into_response();
    response.extensions_mut().insert(failure);
    response
}

/// Wrapper turning any [`HttpError`] into a reportable response
///
/// ```ignore
/// async fn handler() -> Result<Json<User>, Reported<UserError>> { ... }
/// ```
#[derive(Debug)]
pub struct Reported<E>(pub E);

impl<E: HttpError> IntoResponse for Reported<E> {
    fn into_response(self) -> Response {
        failure_response(self.0.status_code(), self.0.failure())
    }
}

impl<E: HttpError> From<E> for Reported<E> {
    fn from(error: E) -> Self {
        Self(error)
    }
}

/// Convert a handler panic into a reportable 500 response
///
/// Used with `CatchPanicLayer::custom`. String payloads become the failure
/// message; anything else is reported without a detail.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()));

    tracing::error!(panic = message.as_deref().unwrap_or("<non-string payload>"), "request handler panicked");

    match message {
        Some(message) => failure_response(StatusCode::INTERNAL_SERVER_ERROR, Failure::new(message)),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
