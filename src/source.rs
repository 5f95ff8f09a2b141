//! Line-oriented input sources
//!
//! The tokenizer pulls one physical line at a time; it never opens, closes,
//! or seeks the underlying resource. Sources are consumed strictly
//! sequentially, which is what lets the multi-line retry loop append the next
//! line instead of re-reading anything.

use crate::error::{CsvParseError, Result};
use std::io::BufRead;

/// A pull-based source of physical text lines
pub trait LineSource {
    /// Read the next physical line, without its trailing newline
    ///
    /// Returns `Ok(None)` at end of source.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// [`LineSource`] over any buffered reader
///
/// Strips the trailing `\n` (and a preceding `\r`, for CRLF sources) from
/// each line. I/O failures surface as [`CsvParseError::Read`].
///
/// # Examples
///
/// ```
/// use tablestream::{LineReader, LineSource};
///
/// let mut lines = LineReader::from_string("a,b\r\nc,d\n");
/// assert_eq!(lines.next_line().unwrap(), Some("a,b".to_string()));
/// assert_eq!(lines.next_line().unwrap(), Some("c,d".to_string()));
/// assert_eq!(lines.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: BufRead> {
    inner: R,
    buffer: String,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        LineReader {
            inner,
            buffer: String::with_capacity(1024),
        }
    }
}

impl LineReader<std::io::Cursor<Vec<u8>>> {
    /// Read lines from an in-memory string
    pub fn from_string(text: impl Into<String>) -> Self {
        LineReader::new(std::io::Cursor::new(text.into().into_bytes()))
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self
            .inner
            .read_line(&mut self.buffer)
            .map_err(|e| CsvParseError::Read(format!("Failed to read line: {}", e)))?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        Ok(Some(self.buffer.clone()))
    }
}
