//! Stream lifecycle: open until closed, and closed for good.

use crate::error::StreamError;

/// Lifecycle shared by every stream.
///
/// Streams start open. `close()` is terminal and idempotent: a second call
/// does nothing and returns `Ok(())`.
pub trait Closable {
    /// Returns `true` once the stream has been closed.
    fn is_closed(&self) -> bool;

    /// Close the stream, releasing the underlying medium.
    ///
    /// Only the first call can fail, and only when releasing the medium
    /// itself fails (e.g. the final flush of a file sink).
    fn close(&mut self) -> Result<(), StreamError>;
}

/// Closed flag composed into streams that own no external handle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BaseStream {
    closed: bool,
}

impl BaseStream {
    /// Create an open stream state.
    pub fn new() -> Self {
        Self { closed: false }
    }

    /// Fail with a usage error if closed.
    pub fn ensure_open(&self, op: &'static str) -> Result<(), StreamError> {
        if self.closed {
            return Err(StreamError::Closed { op });
        }
        Ok(())
    }
}

impl Closable for BaseStream {
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.closed = true;
        Ok(())
    }
}
