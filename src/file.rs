//! File-backed streams.
//!
//! Positions and lengths are byte offsets into the file. Text is decoded as
//! UTF-8 one character at a time, so counts passed to `read` and `read_line`
//! are still characters.

use core::marker::PhantomData;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::closable::Closable;
use crate::config::{DefaultConfig, StreamConfig};
use crate::error::StreamError;
use crate::io::{CharIter, InputStream, OutputStream, ReadOutcome};
use crate::line::LineReader;
use crate::seek::{Seekable, SeekOrigin, resolve_seek};

/// Decoding failure, with the number of bytes taken from the reader.
#[derive(Debug)]
struct DecodeError {
    source: io::Error,
    consumed: usize,
}

impl DecodeError {
    fn new(kind: io::ErrorKind, msg: &'static str, consumed: usize) -> Self {
        Self {
            source: io::Error::new(kind, msg),
            consumed,
        }
    }
}

/// Decode the next UTF-8 character from `reader`.
///
/// Returns the character and its encoded width in bytes, or `None` at end of
/// file. Invalid or truncated sequences are reported as `InvalidData` /
/// `UnexpectedEof`. A byte is only consumed once it is known to belong to the
/// character or to the invalid sequence, so decoding resumes on the next
/// byte that can start a character.
fn decode_char<R: BufRead>(reader: &mut R) -> Result<Option<(char, usize)>, DecodeError> {
    let mut bytes: heapless::Vec<u8, 4> = heapless::Vec::new();

    loop {
        let next = reader.fill_buf().map_err(|e| DecodeError {
            source: e,
            consumed: bytes.len(),
        })?;
        let Some(&byte) = next.first() else {
            if bytes.is_empty() {
                return Ok(None);
            }
            return Err(DecodeError::new(
                io::ErrorKind::UnexpectedEof,
                "truncated UTF-8 sequence",
                bytes.len(),
            ));
        };

        if bytes.push(byte).is_err() {
            return Err(DecodeError::new(
                io::ErrorKind::InvalidData,
                "invalid UTF-8 sequence",
                bytes.len(),
            ));
        }

        match core::str::from_utf8(&bytes) {
            Ok(s) => {
                reader.consume(1);
                if let Some(c) = s.chars().next() {
                    return Ok(Some((c, bytes.len())));
                }
            }
            // Incomplete sequence, need another byte
            Err(e) if e.error_len().is_none() => reader.consume(1),
            Err(e) => {
                let invalid = e.error_len().unwrap_or(bytes.len());
                // The latest byte may start the next character
                if invalid == bytes.len() {
                    reader.consume(1);
                }
                return Err(DecodeError::new(
                    io::ErrorKind::InvalidData,
                    "invalid UTF-8 sequence",
                    invalid,
                ));
            }
        }
    }
}

/// Seekable input stream reading a file.
#[derive(Debug)]
pub struct FileInputStream<C: StreamConfig = DefaultConfig> {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    pos: u64,
    lines: LineReader,
    _config: PhantomData<C>,
}

impl<C: StreamConfig> FileInputStream<C> {
    /// Open `path` for reading, positioned at the first byte.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = path.as_ref().to_path_buf();
        let file =
            File::open(&path).map_err(|e| StreamError::medium("open for read", &path, e))?;
        tracing::debug!(path = %path.display(), "opened file input stream");

        Ok(Self {
            reader: Some(BufReader::with_capacity(C::BUFFER_SIZE, file)),
            path,
            pos: 0,
            lines: LineReader::new(),
            _config: PhantomData,
        })
    }

    /// Path this stream reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&mut self, op: &'static str) -> Result<&mut BufReader<File>, StreamError> {
        self.reader.as_mut().ok_or(StreamError::Closed { op })
    }

    fn file_len(&self, op: &'static str) -> Result<u64, StreamError> {
        let reader = self.reader.as_ref().ok_or(StreamError::Closed { op })?;
        reader
            .get_ref()
            .metadata()
            .map(|m| m.len())
            .map_err(|e| StreamError::medium(op, &self.path, e))
    }
}

impl<C: StreamConfig> Closable for FileInputStream<C> {
    fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    fn close(&mut self) -> Result<(), StreamError> {
        if self.reader.take().is_some() {
            tracing::debug!(path = %self.path.display(), "closed file input stream");
        }
        Ok(())
    }
}

impl<C: StreamConfig> InputStream for FileInputStream<C> {
    fn seekable(&self) -> bool {
        true
    }

    fn char_width(&self, c: char) -> u64 {
        c.len_utf8() as u64
    }

    fn is_readable(&self) -> bool {
        self.file_len("check readable")
            .is_ok_and(|len| self.pos < len)
    }

    fn read_char(&mut self) -> Result<ReadOutcome<char>, StreamError> {
        self.lines.reset();
        let reader = self.reader("read")?;

        match decode_char(reader) {
            Ok(Some((c, width))) => {
                self.pos += width as u64;
                Ok(ReadOutcome::Data(c))
            }
            Ok(None) => Ok(ReadOutcome::EndOfData),
            Err(e) => {
                self.pos += e.consumed as u64;
                tracing::warn!(path = %self.path.display(), error = %e.source, "file read failed");
                Err(StreamError::medium("read", &self.path, e.source))
            }
        }
    }

    fn read_line(&mut self, max_len: Option<usize>) -> Result<ReadOutcome<String>, StreamError> {
        let reader = self.reader.as_mut().ok_or(StreamError::Closed { op: "read line" })?;
        let path = &self.path;
        let pos = &mut self.pos;

        self.lines.read_line(max_len, || match decode_char(&mut *reader) {
            Ok(Some((c, width))) => {
                *pos += width as u64;
                Ok(ReadOutcome::Data(c))
            }
            Ok(None) => Ok(ReadOutcome::EndOfData),
            Err(e) => {
                *pos += e.consumed as u64;
                tracing::warn!(path = %path.display(), error = %e.source, "file line read failed");
                Err(StreamError::medium("read line", path, e.source))
            }
        })
    }

    fn chars(&self) -> Result<CharIter<'_>, StreamError> {
        if self.reader.is_none() {
            return Err(StreamError::Closed { op: "iterate" });
        }

        let mut file = File::open(&self.path)
            .map_err(|e| StreamError::medium("open for iteration", &self.path, e))?;
        file.seek(SeekFrom::Start(self.pos))
            .map_err(|e| StreamError::medium("seek for iteration", &self.path, e))?;

        Ok(Box::new(FileChars {
            reader: BufReader::with_capacity(C::BUFFER_SIZE, file),
            path: self.path.clone(),
            done: false,
        }))
    }
}

impl<C: StreamConfig> Seekable for FileInputStream<C> {
    fn tell(&self) -> Result<u64, StreamError> {
        if self.reader.is_none() {
            return Err(StreamError::Closed { op: "tell" });
        }
        Ok(self.pos)
    }

    fn length(&self) -> Result<u64, StreamError> {
        self.file_len("query length")
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<(), StreamError> {
        let length = self.file_len("seek")?;
        let target = resolve_seek(offset, origin, self.pos, length)?;

        let path = &self.path;
        let reader = self.reader.as_mut().ok_or(StreamError::Closed { op: "seek" })?;
        reader
            .seek(SeekFrom::Start(target))
            .map_err(|e| StreamError::medium("seek", path, e))?;

        tracing::trace!(offset, %origin, from = self.pos, to = target, "file stream seek");
        self.pos = target;
        self.lines.reset();
        Ok(())
    }
}

/// Independent character cursor over a file, created by [`FileInputStream::chars`].
#[derive(Debug)]
struct FileChars {
    reader: BufReader<File>,
    path: PathBuf,
    done: bool,
}

impl Iterator for FileChars {
    type Item = Result<char, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match decode_char(&mut self.reader) {
            Ok(Some((c, _))) => Some(Ok(c)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(StreamError::medium("iterate", &self.path, e.source)))
            }
        }
    }
}

/// How an existing file is treated when opened for writing.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Discard existing content
    #[default]
    Truncate,

    /// Keep existing content and write after it
    Append,
}

/// Output stream writing to a file through a buffered writer.
///
/// Buffered data reaches the file on [`flush`](OutputStream::flush),
/// [`close`](Closable::close) or drop.
#[derive(Debug)]
pub struct FileOutputStream<C: StreamConfig = DefaultConfig> {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    mode: WriteMode,
    _config: PhantomData<C>,
}

impl<C: StreamConfig> FileOutputStream<C> {
    /// Open `path` for writing, creating it if needed.
    pub fn create(path: impl AsRef<Path>, mode: WriteMode) -> Result<Self, StreamError> {
        let path = path.as_ref().to_path_buf();

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Truncate => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        let file = options
            .open(&path)
            .map_err(|e| StreamError::medium("open for write", &path, e))?;
        tracing::debug!(path = %path.display(), ?mode, "opened file output stream");

        Ok(Self {
            writer: Some(BufWriter::with_capacity(C::BUFFER_SIZE, file)),
            path,
            mode,
            _config: PhantomData,
        })
    }

    /// Path this stream writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the file was opened with.
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    fn writer(&mut self, op: &'static str) -> Result<&mut BufWriter<File>, StreamError> {
        self.writer.as_mut().ok_or(StreamError::Closed { op })
    }
}

impl<C: StreamConfig> Closable for FileOutputStream<C> {
    fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    fn close(&mut self) -> Result<(), StreamError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        tracing::debug!(path = %self.path.display(), "closing file output stream");
        writer
            .flush()
            .map_err(|e| StreamError::medium("flush on close", &self.path, e))
    }
}

impl<C: StreamConfig> OutputStream for FileOutputStream<C> {
    fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    fn line_ending(&self) -> &'static str {
        C::LINE_ENDING
    }

    fn write(&mut self, text: &str) -> Result<(), StreamError> {
        let writer = self.writer("write")?;
        if let Err(e) = writer.write_all(text.as_bytes()) {
            tracing::warn!(path = %self.path.display(), error = %e, "file write failed");
            return Err(StreamError::medium("write", &self.path, e));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StreamError> {
        let writer = self.writer("flush")?;
        writer
            .flush()
            .map_err(|e| StreamError::medium("flush", &self.path, e))
    }
}
