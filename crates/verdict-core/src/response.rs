use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use http::{HeaderValue, StatusCode};

/// The parts of an in-flight response an [`ErrorHandler`](crate::ErrorHandler) may touch
pub trait ErrorResponse {
    /// Current status code
    fn status(&self) -> StatusCode;

    /// Number of body bytes the application already produced
    fn bytes_written(&self) -> u64;

    /// Mark the response as reported
    ///
    /// Returns `true` only for the call that performed the transition.
    fn mark_error_reported(&mut self) -> bool;

    fn set_content_type(&mut self, value: HeaderValue);

    /// Write the error body
    ///
    /// # Errors
    ///
    /// Returns an error if the output channel rejects the write
    fn write_body(&mut self, body: Bytes) -> io::Result<()>;

    /// Finalize the response after the body has been written
    ///
    /// # Errors
    ///
    /// Returns an error if the output channel cannot be flushed
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// "Error already reported" flag shared by every clone
///
/// The check and the set happen in a single atomic swap, so at most one
/// caller ever wins [`try_mark`](Self::try_mark) for a given flag.
#[derive(Debug, Clone, Default)]
pub struct ErrorReported(Arc<AtomicBool>);

impl ErrorReported {
    /// A flag that is already set
    ///
    /// Attach it to a response to keep the reporter away from it.
    pub fn suppressed() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Set the flag, returning `true` if it was previously clear
    pub fn try_mark(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    pub fn is_marked(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mark_wins() {
        let flag = ErrorReported::default();
        assert!(!flag.is_marked());
        assert!(flag.try_mark());
        assert!(!flag.try_mark());
        assert!(flag.is_marked());
    }

    #[test]
    fn clones_share_state() {
        let flag = ErrorReported::default();
        let other = flag.clone();
        assert!(other.try_mark());
        assert!(!flag.try_mark());
    }

    #[test]
    fn suppressed_is_already_marked() {
        assert!(!ErrorReported::suppressed().try_mark());
    }

    #[test]
    fn concurrent_marks_have_one_winner() {
        let flag = ErrorReported::default();
        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let flag = flag.clone();
                    scope.spawn(move || usize::from(flag.try_mark()))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        assert_eq!(winners, 1);
    }
}
