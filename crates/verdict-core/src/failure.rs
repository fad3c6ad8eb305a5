use std::fmt;

/// The failure that produced an error response
///
/// Only the message is kept. Handlers attach it to a response as an
/// extension and the reporter turns a non-empty message into the `detail`
/// member of the error object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture the display text of an error
    pub fn from_error(error: &(dyn std::error::Error + '_)) -> Self {
        Self::new(error.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message suitable for `detail`, or `None` when it is empty
    pub fn detail(&self) -> Option<&str> {
        Some(self.message.as_str()).filter(|m| !m.is_empty())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
