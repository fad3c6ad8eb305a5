use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use bytes::Bytes;
use http::header::{ACCEPT_LANGUAGE, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use http_body::Body as _;
use verdict_core::{ErrorHandler, ErrorReported, ErrorResponse, Failure, LocalePreferences};

/// [`ErrorResponse`] view of an axum response
pub struct AxumResponse<'a> {
    response: &'a mut Response,
}

impl<'a> AxumResponse<'a> {
    pub const fn new(response: &'a mut Response) -> Self {
        Self { response }
    }
}

impl ErrorResponse for AxumResponse<'_> {
    fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Exact body length when known, else the declared `Content-Length`
    ///
    /// A streaming body of unknown length counts as started.
    fn bytes_written(&self) -> u64 {
        let hint = self.response.body().size_hint();
        if let Some(exact) = hint.exact() {
            return exact;
        }

        self.response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| hint.lower().max(1))
    }

    fn mark_error_reported(&mut self) -> bool {
        self.response
            .extensions_mut()
            .get_or_insert_default::<ErrorReported>()
            .try_mark()
    }

    fn set_content_type(&mut self, value: HeaderValue) {
        self.response.headers_mut().insert(CONTENT_TYPE, value);
    }

    fn write_body(&mut self, body: Bytes) -> io::Result<()> {
        self.response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        *self.response.body_mut() = Body::from(body);
        Ok(())
    }
}

/// Middleware running `handler` over every response
///
/// `Accept-Language` values are kept from the request but only parsed once
/// the response turns out to be an error. The [`Failure`] extension, if a
/// handler attached one, is taken off the response so it never leaks
/// further out.
pub async fn report_errors(handler: Arc<dyn ErrorHandler>, request: Request, next: Next) -> Response {
    let accept_language: Vec<HeaderValue> = request.headers().get_all(ACCEPT_LANGUAGE).iter().cloned().collect();

    let mut response = next.run(request).await;
    let failure = response.extensions_mut().remove::<Failure>();

    let locales = if response.status().as_u16() >= 400 {
        LocalePreferences::from_header_values(&accept_language)
    } else {
        LocalePreferences::default()
    };

    handler.handle(&locales, &mut AxumResponse::new(&mut response), failure.as_ref());

    response
}
