//! Test fixtures and utilities for iostream testing.
//!
//! Provides:
//! - `ARTICLE`: 208-byte sample text (first line is 98 bytes including `\n`)
//! - `SampleDir`: temporary directory seeded with `a.txt`
//! - `MockOutput`: in-memory output stream that can be told to fail

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use iostream::{Closable, OutputStream, StreamError};
use tempfile::TempDir;

// ============================================================================
// Sample Data
// ============================================================================

/// First line of `ARTICLE`, without its terminator.
pub const ARTICLE_LINE_1: &str =
    "PHP is a popular general-purpose scripting language that is especially suited to web development.";

/// Last line of `ARTICLE` (no trailing terminator).
pub const ARTICLE_LINE_3: &str = "Fast, flexible and pragmatic, PHP powers everything from your blog to the most popular websites in the world.";

/// Sample text: two lines separated by an empty line, 208 bytes total.
pub const ARTICLE: &str = "PHP is a popular general-purpose scripting language that is especially suited to web development.\n\nFast, flexible and pragmatic, PHP powers everything from your blog to the most popular websites in the world.";

// ============================================================================
// SampleDir - Temporary Files
// ============================================================================

/// Temporary directory holding `a.txt` with `ARTICLE` as content.
///
/// The directory is removed on drop.
#[derive(Debug)]
pub struct SampleDir {
    dir: TempDir,
}

impl SampleDir {
    /// Create the directory and write `a.txt`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), ARTICLE).unwrap();
        Self { dir }
    }

    /// Path of the seeded sample file.
    pub fn article(&self) -> PathBuf {
        self.dir.path().join("a.txt")
    }

    /// Path of a file in the directory, created with `content`.
    pub fn file_with(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Path of a file in the directory that does not exist yet.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Current content of a file in the directory.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }
}

impl Default for SampleDir {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MockOutput - Test Output Stream
// ============================================================================

/// In-memory output stream with an optional write budget.
///
/// Once `fail_after` writes have succeeded, every further write fails with a
/// medium error, simulating a full disk.
#[derive(Debug, Default)]
pub struct MockOutput {
    written: String,
    writes: usize,
    fail_after: Option<usize>,
    closed: bool,
}

impl MockOutput {
    /// Output stream that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output stream that fails after `writes` successful writes.
    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::default()
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.written
    }
}

impl Closable for MockOutput {
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.closed = true;
        Ok(())
    }
}

impl OutputStream for MockOutput {
    fn is_writable(&self) -> bool {
        !self.closed
    }

    fn line_ending(&self) -> &'static str {
        "\n"
    }

    fn write(&mut self, text: &str) -> Result<(), StreamError> {
        if self.closed {
            return Err(StreamError::Closed { op: "write" });
        }
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(StreamError::medium(
                "write",
                "mock",
                std::io::Error::other("no space left"),
            ));
        }
        self.writes += 1;
        self.written.push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}
