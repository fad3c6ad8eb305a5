//! JSON:API error reporting primitives
//!
//! Host-agnostic pieces: the error document, locale negotiation, the reason
//! catalog, and the [`ErrorHandler`] hook that rewrites error responses.

#![allow(clippy::must_use_candidate)]

mod catalog;
mod error;
mod failure;
mod handler;
mod locale;
mod report;
mod response;

pub use catalog::{FALLBACK_TITLE, ReasonCatalog, StaticCatalog, resolve_title};
pub use error::HttpError;
pub use failure::Failure;
pub use handler::{ErrorHandler, JsonApiErrorHandler};
pub use locale::{Locale, LocaleError, LocalePreferences, MAX_LANGUAGE_ENTRIES};
pub use report::{BodyEncoding, ErrorReport, JSON_API_CONTENT_TYPE, JSON_API_MEDIA_TYPE};
pub use response::{ErrorReported, ErrorResponse};
