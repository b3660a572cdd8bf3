//! Configuration traits and implementations for stream behavior.
//!
//! The `StreamConfig` trait allows compile-time selection of line endings and
//! buffer sizing without runtime overhead.

/// Stream configuration trait defining line endings and buffer sizes.
///
/// All values are const (zero runtime cost). Streams that write lines or own a
/// buffered medium take a `StreamConfig` type parameter defaulting to
/// [`DefaultConfig`].
pub trait StreamConfig {
    /// Terminator appended by `write_line` (default: platform line ending)
    const LINE_ENDING: &'static str;

    /// Capacity of the buffered reader/writer wrapping a file (default: 8192)
    const BUFFER_SIZE: usize;

    /// Initial capacity of a pushback buffer (default: 16)
    const PUSHBACK_CAPACITY: usize;
}

#[cfg(windows)]
const PLATFORM_LINE_ENDING: &str = "\r\n";

#[cfg(not(windows))]
const PLATFORM_LINE_ENDING: &str = "\n";

/// Default configuration using the platform line ending.
///
/// - LINE_ENDING: `"\r\n"` on Windows, `"\n"` elsewhere
/// - BUFFER_SIZE: 8192 bytes
/// - PUSHBACK_CAPACITY: 16 characters
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl StreamConfig for DefaultConfig {
    const LINE_ENDING: &'static str = PLATFORM_LINE_ENDING;
    const BUFFER_SIZE: usize = 8192;
    const PUSHBACK_CAPACITY: usize = 16;
}

/// Configuration that always writes `"\n"`, regardless of platform.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnixConfig;

impl StreamConfig for UnixConfig {
    const LINE_ENDING: &'static str = "\n";
    const BUFFER_SIZE: usize = 8192;
    const PUSHBACK_CAPACITY: usize = 16;
}

/// Configuration that always writes `"\r\n"`, regardless of platform.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindowsConfig;

impl StreamConfig for WindowsConfig {
    const LINE_ENDING: &'static str = "\r\n";
    const BUFFER_SIZE: usize = 8192;
    const PUSHBACK_CAPACITY: usize = 16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(DefaultConfig::LINE_ENDING, PLATFORM_LINE_ENDING);
        assert_eq!(DefaultConfig::BUFFER_SIZE, 8192);
        assert_eq!(DefaultConfig::PUSHBACK_CAPACITY, 16);
    }

    #[test]
    fn test_fixed_line_endings() {
        assert_eq!(UnixConfig::LINE_ENDING, "\n");
        assert_eq!(WindowsConfig::LINE_ENDING, "\r\n");
    }
}
