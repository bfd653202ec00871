use std::borrow::Cow;

use bytes::Bytes;

/// A line handed to the caller.
///
/// Every line except possibly the last one of a stream ends with exactly
/// one `\n` and contains no other newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    bytes: Bytes,
}

impl Line {
    /// Create a line from raw bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The line contents, including the trailing newline if present.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes, including the trailing newline if present.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// False only for the final line of a stream that did not end in `\n`.
    pub fn ends_with_newline(&self) -> bool {
        self.bytes.last() == Some(&b'\n')
    }

    /// The contents without the trailing newline.
    pub fn trimmed(&self) -> &[u8] {
        self.bytes.strip_suffix(b"\n").unwrap_or(&self.bytes[..])
    }

    /// Lossy UTF-8 view of the contents.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Give up the line and take its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Line {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Outcome of a successful read call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLine {
    /// A complete line, or the unterminated tail of the stream.
    Line(Line),
    /// Nothing is left to read on the descriptor.
    EndOfStream,
}

impl NextLine {
    /// The line, or `None` at end-of-stream.
    pub fn into_line(self) -> Option<Line> {
        match self {
            NextLine::Line(line) => Some(line),
            NextLine::EndOfStream => None,
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, NextLine::EndOfStream)
    }
}
