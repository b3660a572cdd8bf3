//! In-memory streams over a [`TextBuffer`].
//!
//! Positions and lengths are counted in characters.

use core::marker::PhantomData;

use crate::closable::{BaseStream, Closable};
use crate::config::{DefaultConfig, StreamConfig};
use crate::error::StreamError;
use crate::io::{CharIter, InputStream, OutputStream, ReadOutcome};
use crate::line::LineReader;
use crate::seek::{Seekable, SeekOrigin, resolve_seek};
use crate::text::TextBuffer;

/// Seekable input stream reading from an in-memory text buffer.
///
/// # Examples
///
/// ```
/// use iostream::{InputStream, StringInputStream};
///
/// let mut sis = StringInputStream::new("Foo\nBar\nBaz");
/// let lines = sis.read_lines(None).unwrap().data().unwrap();
/// assert_eq!(lines, ["Foo", "Bar", "Baz"]);
/// ```
#[derive(Debug, Clone)]
pub struct StringInputStream {
    source: TextBuffer,
    pos: usize,
    state: BaseStream,
    lines: LineReader,
}

impl StringInputStream {
    /// Create a stream positioned at the start of `source`.
    pub fn new(source: impl Into<TextBuffer>) -> Self {
        Self {
            source: source.into(),
            pos: 0,
            state: BaseStream::new(),
            lines: LineReader::new(),
        }
    }

    /// Characters left between the position and the end.
    pub fn remaining(&self) -> usize {
        self.source.len() - self.pos
    }

    /// Borrow the backing buffer.
    pub fn source(&self) -> &TextBuffer {
        &self.source
    }
}

impl Closable for StringInputStream {
    fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.state.close()
    }
}

impl InputStream for StringInputStream {
    fn seekable(&self) -> bool {
        true
    }

    fn is_readable(&self) -> bool {
        !self.state.is_closed() && self.pos < self.source.len()
    }

    fn read_char(&mut self) -> Result<ReadOutcome<char>, StreamError> {
        self.state.ensure_open("read")?;
        self.lines.reset();

        match self.source.char_at(self.pos) {
            Some(c) => {
                self.pos += 1;
                Ok(ReadOutcome::Data(c))
            }
            None => Ok(ReadOutcome::EndOfData),
        }
    }

    fn read(&mut self, max_len: Option<usize>) -> Result<ReadOutcome<String>, StreamError> {
        self.state.ensure_open("read")?;
        self.lines.reset();

        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(ReadOutcome::EndOfData);
        }

        let count = max_len
            .filter(|&n| n > 0)
            .map_or(remaining, |n| n.min(remaining));
        let text = self.source.substring(self.pos, count);
        self.pos += count;
        Ok(ReadOutcome::Data(text))
    }

    fn read_line(&mut self, max_len: Option<usize>) -> Result<ReadOutcome<String>, StreamError> {
        self.state.ensure_open("read line")?;

        let source = &self.source;
        let pos = &mut self.pos;
        self.lines.read_line(max_len, || {
            Ok(match source.char_at(*pos) {
                Some(c) => {
                    *pos += 1;
                    ReadOutcome::Data(c)
                }
                None => ReadOutcome::EndOfData,
            })
        })
    }

    fn chars(&self) -> Result<CharIter<'_>, StreamError> {
        self.state.ensure_open("iterate")?;
        Ok(Box::new(self.source.chars_from(self.pos).map(Ok::<char, StreamError>)))
    }
}

impl Seekable for StringInputStream {
    fn tell(&self) -> Result<u64, StreamError> {
        self.state.ensure_open("tell")?;
        Ok(self.pos as u64)
    }

    fn length(&self) -> Result<u64, StreamError> {
        self.state.ensure_open("query length")?;
        Ok(self.source.len() as u64)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<(), StreamError> {
        self.state.ensure_open("seek")?;

        let target = resolve_seek(offset, origin, self.pos as u64, self.source.len() as u64)?;
        tracing::trace!(offset, %origin, from = self.pos, to = target, "string stream seek");
        // Bounded by the buffer length, which is a usize.
        self.pos = target as usize;
        self.lines.reset();
        Ok(())
    }
}

/// Output stream collecting writes into an in-memory text buffer.
#[derive(Debug, Clone)]
pub struct StringOutputStream<C: StreamConfig = DefaultConfig> {
    sink: TextBuffer,
    state: BaseStream,
    _config: PhantomData<C>,
}

impl<C: StreamConfig> StringOutputStream<C> {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            sink: TextBuffer::new(),
            state: BaseStream::new(),
            _config: PhantomData,
        }
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.sink.to_string()
    }

    /// Borrow the backing buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.sink
    }

    /// Consume the stream, returning the backing buffer.
    pub fn into_buffer(self) -> TextBuffer {
        self.sink
    }
}

impl<C: StreamConfig> Default for StringOutputStream<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StreamConfig> Closable for StringOutputStream<C> {
    fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.state.close()
    }
}

impl<C: StreamConfig> OutputStream for StringOutputStream<C> {
    fn is_writable(&self) -> bool {
        !self.state.is_closed()
    }

    fn line_ending(&self) -> &'static str {
        C::LINE_ENDING
    }

    fn write(&mut self, text: &str) -> Result<(), StreamError> {
        self.state.ensure_open("write")?;
        self.sink.append(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StreamError> {
        self.state.ensure_open("flush")
    }
}
