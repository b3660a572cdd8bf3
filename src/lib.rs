//! # iostream
//!
//! One read/write/seek/line contract over files and in-memory text.
//!
//! **Key features:**
//! - **Uniform streams** - The same `InputStream`/`OutputStream` API for files and strings
//! - **Strict seeking** - Start/Current/End origins, out-of-range targets rejected, never clamped
//! - **Consistent lines** - `\n`, `\r` and `\r\n` split lines identically on every backing
//! - **Pushback** - Any input stream can be wrapped to take characters back
//! - **Pipes** - Move characters or lines from an input to an output stream
//!
//! End of data is never an error: reads return [`ReadOutcome::EndOfData`].
//! Call [`ReadOutcome::require`] to turn it into [`StreamError::EndOfData`]
//! when a caller needs data to be present.
//!
//! ## Optional Features
//!
//! - `cli` - Builds the `iostream-pipe` binary, which runs a pipe job described in a TOML file

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// ============================================================================
// Module Declarations
// ============================================================================

// Lifecycle, configuration, errors
pub mod closable;
pub mod config;
pub mod error;

// Stream contracts
pub mod io;
pub mod line;
pub mod seek;

// Backings
pub mod file;
pub mod string;
pub mod text;

// Decorators and couplers
pub mod pipe;
pub mod pushback;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Lifecycle
pub use closable::{BaseStream, Closable};

// Configuration
pub use config::{DefaultConfig, StreamConfig, UnixConfig, WindowsConfig};

// Error types
pub use error::{Endpoint, ErrorKind, StreamError};

// Stream contracts
pub use io::{CharIter, InputStream, OutputStream, PushBackInputStream, ReadOutcome};
pub use seek::{SeekOrigin, Seekable};

// Stream implementations
pub use file::{FileInputStream, FileOutputStream, WriteMode};
pub use pushback::PushBackStream;
pub use string::{StringInputStream, StringOutputStream};
pub use text::TextBuffer;

// Pipe
pub use pipe::Pipe;

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
