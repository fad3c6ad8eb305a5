use std::fmt::Write as _;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Media type of every emitted body
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// `Content-Type` header value for emitted bodies
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json;charset=UTF-8";

/// How title and detail strings are placed into the body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// Strings are JSON-escaped
    #[default]
    Escaped,
    /// Strings are inserted verbatim
    ///
    /// Output is byte-compatible with legacy reporters that concatenate
    /// strings. A quote or control character in a title or detail yields
    /// malformed JSON.
    Raw,
}

/// One error object, built per report and never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    status: StatusCode,
    title: String,
    detail: Option<String>,
}

impl ErrorReport {
    /// Build a report; an empty `detail` is treated as absent
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: detail.filter(|d| !d.is_empty()),
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Serialize to `{"errors":[{"status":..,"title":..[,"detail":..]}]}`
    pub fn to_body(&self, encoding: BodyEncoding) -> String {
        match encoding {
            BodyEncoding::Escaped => self.to_escaped_body(),
            BodyEncoding::Raw => self.to_raw_body(),
        }
    }

    fn to_escaped_body(&self) -> String {
        let document = Document {
            errors: [ErrorObject {
                status: self.status.as_str(),
                title: &self.title,
                detail: self.detail.as_deref(),
            }],
        };

        // Serializing borrowed strings into a String cannot fail
        serde_json::to_string(&document).unwrap_or_else(|_| self.to_raw_body())
    }

    fn to_raw_body(&self) -> String {
        let mut body = String::with_capacity(48 + self.title.len() + self.detail.as_ref().map_or(0, String::len));
        let _ = write!(
            body,
            r#"{{"errors":[{{"status":"{}","title":"{}""#,
            self.status.as_u16(),
            self.title
        );
        if let Some(detail) = &self.detail {
            let _ = write!(body, r#","detail":"{detail}""#);
        }
        body.push_str("}]}");
        body
    }
}

#[derive(Serialize)]
struct Document<'a> {
    errors: [ErrorObject<'a>; 1],
}

#[derive(Serialize)]
struct ErrorObject<'a> {
    status: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}
