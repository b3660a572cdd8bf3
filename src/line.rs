//! Line splitting shared by every input stream.
//!
//! Streams differ in how they fetch the next character; they all split lines
//! the same way by handing a character source to [`LineReader::read_line`].
//!
//! After a line that ends in `\r`, `tell()` does not yet include a following
//! `\n`; that byte is consumed by the next `read_line`.

use crate::error::StreamError;
use crate::io::ReadOutcome;

/// Line-splitting state carried between `read_line` calls.
///
/// Terminators are `\n`, `\r` and `\r\n`; the terminator is consumed and
/// stripped. A line that ends on `\r` leaves a pending skip so that a `\n`
/// directly after it is swallowed by the next call instead of producing an
/// empty line. Any other cursor movement must call [`reset`](Self::reset).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineReader {
    skip_lf: bool,
}

impl LineReader {
    /// Create a reader with no pending state.
    pub fn new() -> Self {
        Self { skip_lf: false }
    }

    /// Forget any pending `\r\n` skip.
    pub fn reset(&mut self) {
        self.skip_lf = false;
    }

    /// Scan one line from `next`.
    ///
    /// # Arguments
    ///
    /// * `max_len` - Maximum content characters to return (`None`/`Some(0)`: unlimited)
    /// * `next` - Character source; each call consumes one character
    ///
    /// # Returns
    ///
    /// - `Data(line)` once a terminator, the length limit, or the end of data is hit
    /// - `EndOfData` if the source was already exhausted
    ///
    /// When the limit is hit the next character is left unread, so a
    /// terminator right after the limit yields an empty line on the next call.
    pub fn read_line<F>(
        &mut self,
        max_len: Option<usize>,
        mut next: F,
    ) -> Result<ReadOutcome<String>, StreamError>
    where
        F: FnMut() -> Result<ReadOutcome<char>, StreamError>,
    {
        let limit = max_len.filter(|&n| n > 0);
        let mut line = String::new();
        let mut count = 0;
        let mut scanned = false;

        loop {
            if limit.is_some_and(|n| count >= n) {
                return Ok(ReadOutcome::Data(line));
            }

            let c = match next()? {
                ReadOutcome::Data(c) => c,
                ReadOutcome::EndOfData => {
                    self.skip_lf = false;
                    if scanned {
                        return Ok(ReadOutcome::Data(line));
                    }
                    return Ok(ReadOutcome::EndOfData);
                }
            };

            // Second half of a "\r\n" that ended the previous line
            if core::mem::take(&mut self.skip_lf) && c == '\n' {
                continue;
            }
            scanned = true;

            match c {
                '\n' => return Ok(ReadOutcome::Data(line)),
                '\r' => {
                    self.skip_lf = true;
                    return Ok(ReadOutcome::Data(line));
                }
                _ => {
                    line.push(c);
                    count += 1;
                }
            }
        }
    }
}
