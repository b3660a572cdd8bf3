//! Error types for stream operations.
//!
//! `StreamError` covers every failure a stream or pipe can report. Each variant
//! falls into one of four [`ErrorKind`] classes so callers can branch on the
//! class without matching every variant.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::seek::SeekOrigin;

/// Broad classification of a [`StreamError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation invoked in an invalid state (closed stream, detached pipe)
    Usage,

    /// Seek target outside `[0, length]`
    Bounds,

    /// End of data reached where data was required
    EndOfData,

    /// The underlying file or buffer failed
    Medium,
}

/// Pipe endpoint, used to report which side of a pipe is missing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// The input (source) side
    Input,

    /// The output (sink) side
    Output,
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Endpoint::Input => write!(f, "input"),
            Endpoint::Output => write!(f, "output"),
        }
    }
}

/// Stream error type.
///
/// Errors always propagate to the immediate caller. The only condition that
/// is not an error is closing an already-closed stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Operation attempted on a closed stream
    #[error("cannot {op}: stream is closed")]
    Closed {
        /// Operation that was attempted
        op: &'static str,
    },

    /// Pipe operation attempted without both ends attached
    #[error("pipe has no {0} stream attached")]
    Detached(Endpoint),

    /// Seek target falls outside the stream
    #[error("cannot seek {offset} from {origin} (position {position}, length {length})")]
    OutOfBounds {
        /// Requested offset
        offset: i64,
        /// Anchor the offset was relative to
        origin: SeekOrigin,
        /// Position before the seek (unchanged)
        position: u64,
        /// Stream length
        length: u64,
    },

    /// End of data where the caller required data
    #[error("unexpected end of data")]
    EndOfData,

    /// Underlying file operation failed
    #[error("failed to {op} {}: {source}", .path.display())]
    Medium {
        /// Operation that failed
        op: &'static str,
        /// File the operation targeted
        path: PathBuf,
        /// Error reported by the medium
        #[source]
        source: io::Error,
    },
}

impl StreamError {
    /// Wrap a medium failure with the operation and resource it concerns.
    pub fn medium(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StreamError::Medium {
            op,
            path: path.into(),
            source,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::Closed { .. } | StreamError::Detached(_) => ErrorKind::Usage,
            StreamError::OutOfBounds { .. } => ErrorKind::Bounds,
            StreamError::EndOfData => ErrorKind::EndOfData,
            StreamError::Medium { .. } => ErrorKind::Medium,
        }
    }

    /// Returns `true` for [`ErrorKind::Usage`] errors.
    pub fn is_usage(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }

    /// Returns `true` for [`ErrorKind::Bounds`] errors.
    pub fn is_out_of_bounds(&self) -> bool {
        self.kind() == ErrorKind::Bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StreamError::Closed { op: "read" }.to_string(),
            "cannot read: stream is closed"
        );
        assert_eq!(
            StreamError::Detached(Endpoint::Output).to_string(),
            "pipe has no output stream attached"
        );

        let err = StreamError::OutOfBounds {
            offset: -5,
            origin: SeekOrigin::Current,
            position: 2,
            length: 4,
        };
        assert_eq!(
            err.to_string(),
            "cannot seek -5 from current (position 2, length 4)"
        );

        let err = StreamError::medium(
            "open",
            "/no/such/file.txt",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "failed to open /no/such/file.txt: not found");
    }

    #[test]
    fn test_error_kind() {
        let cases = [
            (StreamError::Closed { op: "tell" }, ErrorKind::Usage),
            (StreamError::Detached(Endpoint::Input), ErrorKind::Usage),
            (
                StreamError::OutOfBounds {
                    offset: 9,
                    origin: SeekOrigin::Start,
                    position: 0,
                    length: 4,
                },
                ErrorKind::Bounds,
            ),
            (StreamError::EndOfData, ErrorKind::EndOfData),
            (
                StreamError::medium("flush", "a.txt", io::Error::other("disk full")),
                ErrorKind::Medium,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "wrong kind for {err}");
        }
    }

    #[test]
    fn test_medium_error_keeps_source() {
        use std::error::Error as _;

        let err = StreamError::medium("read", "a.txt", io::Error::other("bad sector"));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("bad sector"));
    }
}
