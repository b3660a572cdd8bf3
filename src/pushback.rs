//! Pushback decorator for any input stream.
//!
//! [`PushBackStream`] keeps its own ordered buffer of pushed-back characters
//! and serves reads from it before delegating to the wrapped stream. The
//! wrapped stream is never modified by `unread`.

use core::marker::PhantomData;
use std::collections::VecDeque;

use crate::closable::Closable;
use crate::config::{DefaultConfig, StreamConfig};
use crate::error::StreamError;
use crate::io::{CharIter, InputStream, PushBackInputStream, ReadOutcome};
use crate::line::LineReader;
use crate::seek::{Seekable, SeekOrigin, resolve_seek};

/// Input stream wrapper that supports pushing characters back.
///
/// The config parameter only sizes the initial pushback buffer; annotate the
/// binding (`PushBackStream<_>`) to use [`DefaultConfig`].
///
/// Position semantics when the wrapped stream is [`Seekable`]:
/// - `tell()` is the wrapped position minus the width of the pending
///   characters in the wrapped stream's units (bytes for files, saturating
///   at 0), so unreading what was just read restores the earlier position
/// - `seek()` discards all pending characters; a `Current` seek is relative
///   to the position `tell()` reports
///
/// # Examples
///
/// ```
/// use iostream::{InputStream, PushBackInputStream, PushBackStream, StringInputStream};
///
/// let mut pbs: PushBackStream<_> = PushBackStream::new(StringInputStream::new(", World!"));
/// pbs.unread("Hello").unwrap();
/// assert_eq!(pbs.read(Some(13)).unwrap().data().unwrap(), "Hello, World!");
/// ```
#[derive(Debug)]
pub struct PushBackStream<S, C: StreamConfig = DefaultConfig> {
    inner: S,
    pending: VecDeque<char>,
    lines: LineReader,
    _config: PhantomData<C>,
}

impl<S: InputStream, C: StreamConfig> PushBackStream<S, C> {
    /// Wrap `inner` with an empty pushback buffer.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pending: VecDeque::with_capacity(C::PUSHBACK_CAPACITY),
            lines: LineReader::new(),
            _config: PhantomData,
        }
    }

    /// Number of pushed-back characters not yet read.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Borrow the wrapped stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Unwrap, discarding any pending characters.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Width of the pending characters in the wrapped stream's position units.
    fn pending_width(&self) -> u64 {
        self.pending.iter().map(|&c| self.inner.char_width(c)).sum()
    }

    fn ensure_open(&self, op: &'static str) -> Result<(), StreamError> {
        if self.inner.is_closed() {
            return Err(StreamError::Closed { op });
        }
        Ok(())
    }
}

impl<S: InputStream, C: StreamConfig> Closable for PushBackStream<S, C> {
    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.pending.clear();
        self.inner.close()
    }
}

impl<S: InputStream, C: StreamConfig> InputStream for PushBackStream<S, C> {
    fn seekable(&self) -> bool {
        self.inner.seekable()
    }

    fn char_width(&self, c: char) -> u64 {
        self.inner.char_width(c)
    }

    fn is_readable(&self) -> bool {
        !self.inner.is_closed() && (!self.pending.is_empty() || self.inner.is_readable())
    }

    fn read_char(&mut self) -> Result<ReadOutcome<char>, StreamError> {
        self.ensure_open("read")?;
        self.lines.reset();

        match self.pending.pop_front() {
            Some(c) => Ok(ReadOutcome::Data(c)),
            None => self.inner.read_char(),
        }
    }

    fn read(&mut self, max_len: Option<usize>) -> Result<ReadOutcome<String>, StreamError> {
        self.ensure_open("read")?;
        self.lines.reset();

        let limit = max_len.filter(|&n| n > 0);
        let take = limit.map_or(self.pending.len(), |n| n.min(self.pending.len()));
        let mut text: String = self.pending.drain(..take).collect();

        let rest = match limit {
            Some(n) if n == take => return Ok(ReadOutcome::Data(text)),
            Some(n) => Some(n - take),
            None => None,
        };

        match self.inner.read(rest)? {
            ReadOutcome::Data(more) => text.push_str(&more),
            ReadOutcome::EndOfData if text.is_empty() => return Ok(ReadOutcome::EndOfData),
            ReadOutcome::EndOfData => {}
        }
        Ok(ReadOutcome::Data(text))
    }

    fn read_line(&mut self, max_len: Option<usize>) -> Result<ReadOutcome<String>, StreamError> {
        self.ensure_open("read line")?;

        let pending = &mut self.pending;
        let inner = &mut self.inner;
        self.lines.read_line(max_len, || match pending.pop_front() {
            Some(c) => Ok(ReadOutcome::Data(c)),
            None => inner.read_char(),
        })
    }

    fn chars(&self) -> Result<CharIter<'_>, StreamError> {
        self.ensure_open("iterate")?;

        let rest = self.inner.chars()?;
        Ok(Box::new(
            self.pending
                .iter()
                .copied()
                .map(Ok::<char, StreamError>)
                .chain(rest),
        ))
    }
}

impl<S: InputStream, C: StreamConfig> PushBackInputStream for PushBackStream<S, C> {
    fn unread(&mut self, buffer: &str) -> Result<(), StreamError> {
        self.ensure_open("unread")?;
        self.lines.reset();

        for c in buffer.chars().rev() {
            self.pending.push_front(c);
        }
        tracing::trace!(pushed = buffer.chars().count(), pending = self.pending.len(), "unread");
        Ok(())
    }
}

impl<S: InputStream + Seekable, C: StreamConfig> Seekable for PushBackStream<S, C> {
    fn tell(&self) -> Result<u64, StreamError> {
        let position = self.inner.tell()?;
        Ok(position.saturating_sub(self.pending_width()))
    }

    fn length(&self) -> Result<u64, StreamError> {
        self.inner.length()
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<(), StreamError> {
        match origin {
            SeekOrigin::Current => {
                let target = resolve_seek(offset, origin, self.tell()?, self.inner.length()?)?;
                let target = i64::try_from(target).unwrap_or(i64::MAX);
                self.inner.seek(target, SeekOrigin::Start)?;
            }
            SeekOrigin::Start | SeekOrigin::End => self.inner.seek(offset, origin)?,
        }

        self.pending.clear();
        self.lines.reset();
        Ok(())
    }
}
