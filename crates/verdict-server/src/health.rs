use axum::Json;
use axum::routing::{MethodRouter, get};
use serde::Serialize;

/// Body served on the health path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Health {
    pub status: &'static str,
    /// Whether error responses are rewritten into JSON:API documents
    pub error_reporting: bool,
}

/// `GET` route answering with a fixed [`Health`] body
pub fn health_route(error_reporting: bool) -> MethodRouter {
    let health = Health {
        status: "ok",
        error_reporting,
    };
    get(move || async move { Json(health) })
}
