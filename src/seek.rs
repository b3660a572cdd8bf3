//! Seek origins and the position arithmetic shared by all seekable streams.
//!
//! Positions use the exclusive convention: valid positions are `0..=length`,
//! and `position == length` means no more data. A seek whose target falls
//! outside that range fails with [`StreamError::OutOfBounds`] and leaves the
//! position untouched; targets are never clamped.

use core::fmt;

use crate::closable::Closable;
use crate::error::StreamError;

/// Anchor a seek offset is interpreted against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SeekOrigin {
    /// Offset from the first unit (`offset >= 0`)
    Start,

    /// Offset from the current position (either sign)
    Current,

    /// Offset from the end (`offset <= 0`)
    End,
}

impl fmt::Display for SeekOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeekOrigin::Start => write!(f, "start"),
            SeekOrigin::Current => write!(f, "current"),
            SeekOrigin::End => write!(f, "end"),
        }
    }
}

/// Compute the absolute target of a seek.
///
/// # Arguments
///
/// * `offset` - Signed offset relative to `origin`
/// * `origin` - Anchor for `offset`
/// * `position` - Current position
/// * `length` - Stream length (exclusive upper bound of readable data)
///
/// # Returns
///
/// The new absolute position, or [`StreamError::OutOfBounds`] if it would
/// leave `[0, length]`.
///
/// # Examples
///
/// ```
/// use iostream::seek::{resolve_seek, SeekOrigin};
///
/// assert_eq!(resolve_seek(-10, SeekOrigin::End, 0, 208).unwrap(), 198);
/// assert_eq!(resolve_seek(0, SeekOrigin::End, 0, 208).unwrap(), 208);
/// assert!(resolve_seek(1, SeekOrigin::End, 0, 208).is_err());
/// ```
pub fn resolve_seek(
    offset: i64,
    origin: SeekOrigin,
    position: u64,
    length: u64,
) -> Result<u64, StreamError> {
    let anchor = match origin {
        SeekOrigin::Start => 0,
        SeekOrigin::Current => i128::from(position),
        SeekOrigin::End => i128::from(length),
    };
    let candidate = anchor + i128::from(offset);

    if candidate < 0 || candidate > i128::from(length) {
        tracing::debug!(offset, %origin, position, length, "seek rejected");
        return Err(StreamError::OutOfBounds {
            offset,
            origin,
            position,
            length,
        });
    }

    // In range of [0, length], so it fits in u64.
    Ok(candidate as u64)
}

/// Random-access capability.
///
/// Implemented by streams whose position can be queried and moved. Every
/// method fails with a usage error once the stream is closed.
pub trait Seekable: Closable {
    /// Current position, in medium units.
    fn tell(&self) -> Result<u64, StreamError>;

    /// Total length, in medium units.
    fn length(&self) -> Result<u64, StreamError>;

    /// Move the position; see [`resolve_seek`] for the accepted range.
    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<(), StreamError>;
}
