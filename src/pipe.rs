//! Pipe coupling one input stream to one output stream.
//!
//! The pipe borrows its streams; it never opens or closes them. Each
//! `process_*` call reads from the input and writes what it read to the
//! output. A write failure after a successful read does not put the consumed
//! input back.

use core::fmt;

use crate::error::{Endpoint, StreamError};
use crate::io::{InputStream, OutputStream, ReadOutcome};

/// Coupler moving characters or lines from an input stream to an output stream.
///
/// Bindings follow a small state machine: each side is either attached or
/// not, and every `process_*` operation requires both. Attaching replaces an
/// existing binding; detaching only drops the borrow.
///
/// # Examples
///
/// ```
/// use iostream::{Pipe, StringInputStream, StringOutputStream};
///
/// let mut input = StringInputStream::new("Foo\nBar\n");
/// let mut output: StringOutputStream = StringOutputStream::new();
///
/// let mut pipe = Pipe::connect(&mut input, &mut output);
/// let first = pipe.process_line().unwrap().data().unwrap();
/// assert_eq!(first, "Foo");
/// drop(pipe);
///
/// assert!(output.contents().starts_with("Foo"));
/// ```
#[derive(Default)]
pub struct Pipe<'a> {
    input: Option<&'a mut dyn InputStream>,
    output: Option<&'a mut dyn OutputStream>,
}

impl fmt::Debug for Pipe<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("input_attached", &self.input.is_some())
            .field("output_attached", &self.output.is_some())
            .finish()
    }
}

impl<'a> Pipe<'a> {
    /// Create a pipe with nothing attached.
    pub fn new() -> Self {
        Self {
            input: None,
            output: None,
        }
    }

    /// Create a pipe with both ends attached.
    pub fn connect(input: &'a mut dyn InputStream, output: &'a mut dyn OutputStream) -> Self {
        Self {
            input: Some(input),
            output: Some(output),
        }
    }

    /// Attach both ends, replacing any existing bindings.
    pub fn attach(
        &mut self,
        input: &'a mut dyn InputStream,
        output: &'a mut dyn OutputStream,
    ) -> &mut Self {
        self.attach_input(input).attach_output(output)
    }

    /// Attach the input end, replacing any existing binding.
    pub fn attach_input(&mut self, input: &'a mut dyn InputStream) -> &mut Self {
        tracing::trace!(replaced = self.input.is_some(), "pipe input attached");
        self.input = Some(input);
        self
    }

    /// Attach the output end, replacing any existing binding.
    pub fn attach_output(&mut self, output: &'a mut dyn OutputStream) -> &mut Self {
        tracing::trace!(replaced = self.output.is_some(), "pipe output attached");
        self.output = Some(output);
        self
    }

    /// Detach both ends. The streams stay open.
    pub fn detach(&mut self) -> &mut Self {
        self.detach_input().detach_output()
    }

    /// Detach the input end. The stream stays open.
    pub fn detach_input(&mut self) -> &mut Self {
        self.input = None;
        self
    }

    /// Detach the output end. The stream stays open.
    pub fn detach_output(&mut self) -> &mut Self {
        self.output = None;
        self
    }

    /// Attached input stream, if any.
    pub fn input(&self) -> Option<&dyn InputStream> {
        self.input.as_deref()
    }

    /// Attached output stream, if any.
    pub fn output(&self) -> Option<&dyn OutputStream> {
        self.output.as_deref()
    }

    /// Returns `true` if both ends are attached.
    pub fn is_attached(&self) -> bool {
        self.input.is_some() && self.output.is_some()
    }

    fn ends(
        &mut self,
    ) -> Result<(&mut (dyn InputStream + 'a), &mut (dyn OutputStream + 'a)), StreamError> {
        let input = self
            .input
            .as_deref_mut()
            .ok_or(StreamError::Detached(Endpoint::Input))?;
        let output = self
            .output
            .as_deref_mut()
            .ok_or(StreamError::Detached(Endpoint::Output))?;
        Ok((input, output))
    }

    /// Move one character from input to output.
    ///
    /// Returns:
    /// - `Ok(Data(char))` with the character transferred
    /// - `Ok(EndOfData)` if the input is exhausted (nothing is written)
    /// - `Err(StreamError)` if an end is detached or either stream fails
    pub fn process_char(&mut self) -> Result<ReadOutcome<char>, StreamError> {
        let (input, output) = self.ends()?;

        match input.read_char()? {
            ReadOutcome::Data(c) => {
                output.write_char(c)?;
                Ok(ReadOutcome::Data(c))
            }
            ReadOutcome::EndOfData => Ok(ReadOutcome::EndOfData),
        }
    }

    /// Move up to `count` characters, one at a time.
    ///
    /// Stops early when the input runs out and returns what was transferred.
    /// Returns `EndOfData` only if `count > 0` and nothing could be read.
    pub fn process_chars(&mut self, count: usize) -> Result<ReadOutcome<String>, StreamError> {
        let (input, output) = self.ends()?;
        let mut text = String::new();

        for _ in 0..count {
            match input.read_char()? {
                ReadOutcome::Data(c) => {
                    output.write_char(c)?;
                    text.push(c);
                }
                ReadOutcome::EndOfData => break,
            }
        }

        if count > 0 && text.is_empty() {
            return Ok(ReadOutcome::EndOfData);
        }
        tracing::trace!(requested = count, transferred = text.chars().count(), "pipe chars");
        Ok(ReadOutcome::Data(text))
    }

    /// Move one line, writing it with the output's line ending.
    pub fn process_line(&mut self) -> Result<ReadOutcome<String>, StreamError> {
        let (input, output) = self.ends()?;

        match input.read_line(None)? {
            ReadOutcome::Data(line) => {
                output.write_line(&line)?;
                Ok(ReadOutcome::Data(line))
            }
            ReadOutcome::EndOfData => Ok(ReadOutcome::EndOfData),
        }
    }

    /// Move up to `count` lines.
    ///
    /// Stops early when the input runs out and returns the lines transferred.
    /// Returns `EndOfData` only if `count > 0` and no line could be read.
    pub fn process_lines(&mut self, count: usize) -> Result<ReadOutcome<Vec<String>>, StreamError> {
        let (input, output) = self.ends()?;
        let mut lines = Vec::new();

        for _ in 0..count {
            match input.read_line(None)? {
                ReadOutcome::Data(line) => {
                    output.write_line(&line)?;
                    lines.push(line);
                }
                ReadOutcome::EndOfData => break,
            }
        }

        if count > 0 && lines.is_empty() {
            return Ok(ReadOutcome::EndOfData);
        }
        tracing::trace!(requested = count, transferred = lines.len(), "pipe lines");
        Ok(ReadOutcome::Data(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closable::Closable;
    use crate::config::UnixConfig;
    use crate::seek::Seekable;
    use crate::string::{StringInputStream, StringOutputStream};

    #[test]
    fn test_bindings() {
        let mut input = StringInputStream::new("abc");
        let mut output = StringOutputStream::<UnixConfig>::new();

        let mut pipe = Pipe::new();
        assert!(pipe.input().is_none());
        assert!(pipe.output().is_none());
        assert!(!pipe.is_attached());

        pipe.attach_input(&mut input);
        assert!(pipe.input().is_some());
        assert!(!pipe.is_attached());

        pipe.attach_output(&mut output);
        assert!(pipe.is_attached());

        pipe.detach_input();
        assert!(pipe.input().is_none());
        assert!(pipe.output().is_some());

        pipe.detach();
        assert!(pipe.output().is_none());
    }

    #[test]
    fn test_requires_both_ends() {
        let mut input = StringInputStream::new("abc");
        let mut output = StringOutputStream::<UnixConfig>::new();

        let mut pipe = Pipe::new();
        let err = pipe.process_char().unwrap_err();
        assert!(matches!(err, StreamError::Detached(Endpoint::Input)));

        pipe.attach_input(&mut input);
        let err = pipe.process_line().unwrap_err();
        assert!(matches!(err, StreamError::Detached(Endpoint::Output)));

        pipe.detach_input().attach_output(&mut output);
        assert!(pipe.process_chars(2).unwrap_err().is_usage());
        assert!(pipe.process_lines(2).unwrap_err().is_usage());
    }

    #[test]
    fn test_process_char() {
        let mut input = StringInputStream::new("ab");
        let mut output = StringOutputStream::<UnixConfig>::new();
        {
            let mut pipe = Pipe::connect(&mut input, &mut output);
            assert_eq!(pipe.process_char().unwrap(), ReadOutcome::Data('a'));
            assert_eq!(pipe.process_char().unwrap(), ReadOutcome::Data('b'));
            assert!(pipe.process_char().unwrap().is_end());
        }
        assert_eq!(output.contents(), "ab");
    }

    #[test]
    fn test_process_chars_stops_at_end() {
        let mut input = StringInputStream::new("Hello");
        let mut output = StringOutputStream::<UnixConfig>::new();
        {
            let mut pipe = Pipe::connect(&mut input, &mut output);
            assert_eq!(pipe.process_chars(3).unwrap().data().unwrap(), "Hel");
            assert_eq!(pipe.process_chars(10).unwrap().data().unwrap(), "lo");
            assert!(pipe.process_chars(10).unwrap().is_end());
            assert_eq!(pipe.process_chars(0).unwrap().data().unwrap(), "");
        }
        assert_eq!(output.contents(), "Hello");
        assert_eq!(input.tell().unwrap(), 5);
    }

    #[test]
    fn test_process_lines() {
        let mut input = StringInputStream::new("Foo\r\nBar\nBaz");
        let mut output = StringOutputStream::<UnixConfig>::new();
        {
            let mut pipe = Pipe::connect(&mut input, &mut output);
            assert_eq!(pipe.process_line().unwrap().data().unwrap(), "Foo");
            assert_eq!(pipe.process_lines(5).unwrap().data().unwrap(), ["Bar", "Baz"]);
            assert!(pipe.process_lines(1).unwrap().is_end());
            assert!(pipe.process_line().unwrap().is_end());
        }
        assert_eq!(output.contents(), "Foo\nBar\nBaz\n");
    }

    #[test]
    fn test_rebinding_output() {
        let mut input = StringInputStream::new("abcd");
        let mut first = StringOutputStream::<UnixConfig>::new();
        let mut second = StringOutputStream::<UnixConfig>::new();
        {
            let mut pipe = Pipe::connect(&mut input, &mut first);
            pipe.process_chars(2).unwrap();
            pipe.attach_output(&mut second);
            pipe.process_chars(2).unwrap();
        }
        assert_eq!(first.contents(), "ab");
        assert_eq!(second.contents(), "cd");
    }

    #[test]
    fn test_write_failure_keeps_input_consumed() {
        let mut input = StringInputStream::new("xyz");
        let mut output = StringOutputStream::<UnixConfig>::new();
        output.close().unwrap();
        {
            let mut pipe = Pipe::connect(&mut input, &mut output);
            assert!(pipe.process_char().unwrap_err().is_usage());
        }
        assert_eq!(input.tell().unwrap(), 1);
    }

    #[test]
    fn test_pipe_never_closes_streams() {
        let mut input = StringInputStream::new("abc");
        let mut output = StringOutputStream::<UnixConfig>::new();
        {
            let mut pipe = Pipe::connect(&mut input, &mut output);
            pipe.process_chars(3).unwrap();
            pipe.detach();
        }
        assert!(!input.is_closed());
        assert!(!output.is_closed());
    }

    #[test]
    fn test_debug_shows_bindings() {
        let mut input = StringInputStream::new("");
        let mut pipe = Pipe::new();
        pipe.attach_input(&mut input);
        assert_eq!(
            format!("{:?}", pipe),
            "Pipe { input_attached: true, output_attached: false }"
        );
    }
}
