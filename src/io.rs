//! Stream capability traits for platform-agnostic text input/output.
//!
//! Capabilities are split so each stream implements only what its medium
//! supports:
//! - [`InputStream`]: forward reading of characters, lines and line batches
//! - [`OutputStream`]: writing text and lines
//! - [`PushBackInputStream`]: reinjecting characters ahead of the read cursor
//! - [`Seekable`](crate::seek::Seekable): position query and random access
//!
//! Every read-like operation reports end of data as
//! [`ReadOutcome::EndOfData`] rather than as an error. Callers that prefer
//! the raised-error discipline convert with [`ReadOutcome::require`].

use crate::closable::Closable;
use crate::error::StreamError;

/// Result of a read: either data or the end-of-data marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    /// Data was read
    Data(T),

    /// No more data remains
    EndOfData,
}

impl<T> ReadOutcome<T> {
    /// Returns `true` for [`ReadOutcome::EndOfData`].
    pub fn is_end(&self) -> bool {
        matches!(self, ReadOutcome::EndOfData)
    }

    /// Data, or `None` at end of data.
    pub fn data(self) -> Option<T> {
        match self {
            ReadOutcome::Data(value) => Some(value),
            ReadOutcome::EndOfData => None,
        }
    }

    /// Data, or [`StreamError::EndOfData`] at end of data.
    pub fn require(self) -> Result<T, StreamError> {
        self.data().ok_or(StreamError::EndOfData)
    }

    /// Transform the data, keeping the end-of-data marker.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadOutcome<U> {
        match self {
            ReadOutcome::Data(value) => ReadOutcome::Data(f(value)),
            ReadOutcome::EndOfData => ReadOutcome::EndOfData,
        }
    }
}

impl<T> From<Option<T>> for ReadOutcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => ReadOutcome::Data(value),
            None => ReadOutcome::EndOfData,
        }
    }
}

/// Lazy, finite character sequence produced by [`InputStream::chars`].
pub type CharIter<'a> = Box<dyn Iterator<Item = Result<char, StreamError>> + 'a>;

/// Readable stream of characters.
///
/// Counts passed to `read` and `read_line` are in characters. A count of
/// `None` or `Some(0)` means "no limit".
pub trait InputStream: Closable {
    /// Returns `true` if the stream also implements random access.
    fn seekable(&self) -> bool {
        false
    }

    /// Number of position units `c` occupies in this stream's medium.
    ///
    /// Positions reported by [`Seekable::tell`](crate::seek::Seekable::tell)
    /// advance by this much per character read. Defaults to 1; byte-addressed
    /// streams return the UTF-8 width.
    fn char_width(&self, _c: char) -> u64 {
        1
    }

    /// Returns `true` if the stream is open and data remains.
    fn is_readable(&self) -> bool;

    /// Read one character.
    ///
    /// Returns:
    /// - `Ok(Data(char))` and advances past it
    /// - `Ok(EndOfData)` if no data remains
    /// - `Err(StreamError)` if closed or the medium fails
    fn read_char(&mut self) -> Result<ReadOutcome<char>, StreamError>;

    /// Read up to `max_len` characters, or everything that remains.
    ///
    /// Default implementation uses `read_char()` repeatedly.
    /// Override for more efficient bulk reads if needed.
    fn read(&mut self, max_len: Option<usize>) -> Result<ReadOutcome<String>, StreamError> {
        let limit = max_len.filter(|&n| n > 0);
        let mut text = String::new();
        let mut count = 0;

        while limit.is_none_or(|n| count < n) {
            match self.read_char()? {
                ReadOutcome::Data(c) => {
                    text.push(c);
                    count += 1;
                }
                ReadOutcome::EndOfData => break,
            }
        }

        if count == 0 {
            return Ok(ReadOutcome::EndOfData);
        }
        Ok(ReadOutcome::Data(text))
    }

    /// Read one line with its terminator stripped.
    ///
    /// A line ends at `\n`, `\r` or `\r\n`, after `max_len` content
    /// characters, or where the data runs out. See
    /// [`LineReader`](crate::line::LineReader) for the exact rules.
    fn read_line(&mut self, max_len: Option<usize>) -> Result<ReadOutcome<String>, StreamError>;

    /// Read `count` lines, or every remaining line when `count` is `None` or `Some(0)`.
    ///
    /// Stops early at end of data and returns what was collected. Returns
    /// `EndOfData` only when not even one line could be read.
    fn read_lines(&mut self, count: Option<usize>) -> Result<ReadOutcome<Vec<String>>, StreamError> {
        let limit = count.filter(|&n| n > 0);
        let mut lines = Vec::new();

        while limit.is_none_or(|n| lines.len() < n) {
            match self.read_line(None)? {
                ReadOutcome::Data(line) => lines.push(line),
                ReadOutcome::EndOfData => break,
            }
        }

        if lines.is_empty() {
            return Ok(ReadOutcome::EndOfData);
        }
        Ok(ReadOutcome::Data(lines))
    }

    /// Iterate the remaining characters from the current position.
    ///
    /// The iterator keeps its own cursor: iterating does not move the
    /// stream, and reading the stream does not move the iterator. Calling
    /// `chars()` again starts a fresh iteration.
    fn chars(&self) -> Result<CharIter<'_>, StreamError>;
}

/// Writable stream of characters.
pub trait OutputStream: Closable {
    /// Returns `true` if the stream is open and accepts writes.
    fn is_writable(&self) -> bool;

    /// Terminator appended by [`write_line`](Self::write_line).
    fn line_ending(&self) -> &'static str;

    /// Write text verbatim.
    fn write(&mut self, text: &str) -> Result<(), StreamError>;

    /// Write a single character.
    fn write_char(&mut self, c: char) -> Result<(), StreamError> {
        let mut buf = [0u8; 4];
        self.write(c.encode_utf8(&mut buf))
    }

    /// Write `line` followed by the line ending.
    fn write_line(&mut self, line: &str) -> Result<(), StreamError> {
        self.write(line)?;
        self.write(self.line_ending())
    }

    /// Write each element as a line, in order.
    ///
    /// Lines written before a failure stay written.
    fn write_lines<I, S>(&mut self, lines: I) -> Result<(), StreamError>
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Force buffered data out to the sink. No-op if nothing is buffered.
    fn flush(&mut self) -> Result<(), StreamError>;
}

/// Input stream that can take characters back.
pub trait PushBackInputStream: InputStream {
    /// Insert `buffer` ahead of the unread content.
    ///
    /// The next reads return `buffer` in its own left-to-right order, then
    /// whatever was pending before. Later calls are read before earlier ones.
    /// Fails only if the stream is closed.
    ///
    /// `unread("olleH")` reads back as `"olleH"`. To push characters back one
    /// at a time, each landing in front of the last, use
    /// [`push_back`](Self::push_back): pushing `'o'`, `'l'`, `'l'`, `'e'`, `'H'`
    /// reads back as `"Hello"`.
    fn unread(&mut self, buffer: &str) -> Result<(), StreamError>;

    /// Insert a single character ahead of the unread content.
    fn push_back(&mut self, c: char) -> Result<(), StreamError> {
        let mut buf = [0u8; 4];
        self.unread(c.encode_utf8(&mut buf))
    }
}
