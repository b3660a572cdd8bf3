//! Character-indexed in-memory text buffer.
//!
//! All offsets and lengths are counted in `char`s, never bytes, so stream
//! positions over a `TextBuffer` are character positions.

use core::fmt;

/// Growable text stored as a sequence of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// Number of characters held.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the buffer holds no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index`, if any.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Copy out up to `len` characters starting at `offset`.
    ///
    /// The range is clipped to the buffer; an `offset` past the end yields an
    /// empty string.
    pub fn substring(&self, offset: usize, len: usize) -> String {
        let start = offset.min(self.chars.len());
        let end = start.saturating_add(len).min(self.chars.len());
        self.chars[start..end].iter().collect()
    }

    /// Append text at the end.
    pub fn append(&mut self, s: &str) {
        self.chars.extend(s.chars());
    }

    /// Insert text before the first character.
    pub fn prepend(&mut self, s: &str) {
        self.chars.splice(0..0, s.chars());
    }

    /// Iterate characters starting at `offset`.
    pub fn chars_from(&self, offset: usize) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().skip(offset).copied()
    }

    /// Remove all content.
    pub fn clear(&mut self) {
        self.chars.clear();
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;
        for &c in &self.chars {
            f.write_char(c)?;
        }
        Ok(())
    }
}
