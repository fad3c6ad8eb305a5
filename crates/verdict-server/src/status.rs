use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use verdict_core::{Failure, HttpError};

use crate::failure::{Reported, failure_response};

/// Errors from the status echo endpoint
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("'{0}' is not a status code")]
    NotANumber(String),
    #[error("status code {0} cannot be echoed, use 200 through 599")]
    OutOfRange(u16),
}

impl HttpError for StatusError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    /// Message attached to the response as its failure
    pub detail: Option<String>,
}

/// `GET /status/{code}`: respond with an empty body and the given status
pub async fn status_handler(Path(code): Path<String>, Query(query): Query<StatusQuery>) -> Response {
    match parse_echo_status(&code) {
        Ok(status) => match query.detail {
            Some(detail) => failure_response(status, Failure::new(detail)),
            None => status.into_response(),
        },
        Err(e) => Reported(e).into_response(),
    }
}

/// 1xx statuses cannot be final responses
fn parse_echo_status(code: &str) -> Result<StatusCode, StatusError> {
    let number: u16 = code.parse().map_err(|_| StatusError::NotANumber(code.to_string()))?;

    if !(200..=599).contains(&number) {
        return Err(StatusError::OutOfRange(number));
    }

    StatusCode::from_u16(number).map_err(|_| StatusError::OutOfRange(number))
}
