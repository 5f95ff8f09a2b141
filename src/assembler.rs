//! Multi-line row assembly and column-count validation
//!
//! Sits on top of the row tokenizer and turns a stream of physical lines into
//! logically complete rows. Whenever a line ends inside an unterminated
//! quoted field, the next physical line is appended (joined with `\n`) and
//! the whole accumulated text is re-tokenized from scratch; only the text
//! carries forward between attempts, never tokenizer state.

use crate::error::{CsvParseError, Result};
use crate::source::LineSource;
use crate::tokenizer::{LineOutcome, RowTokenizer};

/// Assembles physical lines into logical rows and enforces a uniform
/// column count
///
/// The expected count is normally taken from the header row: assemble the
/// first row with no expectation set, then call [`expect_columns`] with its
/// field count. Every subsequent row must match it exactly; downstream
/// consumers assume column-count-homogeneous rows, so a mismatch aborts the
/// source instead of skipping the row.
///
/// [`expect_columns`]: RowAssembler::expect_columns
///
/// # Examples
///
/// ```
/// use tablestream::{LineReader, RowAssembler, RowTokenizer};
///
/// let mut source = LineReader::from_string("A,B\n\"line1\nline2\",x\n");
/// let mut assembler = RowAssembler::new(RowTokenizer::new());
///
/// let header = assembler.next_row(&mut source).unwrap().unwrap();
/// assembler.expect_columns(header.len());
///
/// let row = assembler.next_row(&mut source).unwrap().unwrap();
/// assert_eq!(row, vec!["line1\nline2".to_string(), "x".to_string()]);
/// assert_eq!(assembler.next_row(&mut source).unwrap(), None);
/// ```
pub struct RowAssembler {
    tokenizer: RowTokenizer,
    expected_columns: Option<usize>,
    line_number: u64,
}

impl RowAssembler {
    pub fn new(tokenizer: RowTokenizer) -> Self {
        RowAssembler {
            tokenizer,
            expected_columns: None,
            line_number: 0,
        }
    }

    /// Fix the column count every subsequent row must have
    ///
    /// Set once from the header row and treated as immutable for the rest of
    /// the source's lifetime.
    pub fn expect_columns(&mut self, count: usize) {
        self.expected_columns = Some(count);
    }

    /// The column count rows are validated against, if established
    pub fn expected_columns(&self) -> Option<usize> {
        self.expected_columns
    }

    /// 1-based number of physical lines consumed so far
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Assemble the next logical row from `source`
    ///
    /// Returns `Ok(None)` at end of source with no buffered text. A row that
    /// completes with the wrong field count fails immediately with
    /// [`CsvParseError::ColumnCountMismatch`]; end of source inside an open
    /// quoted field fails with [`CsvParseError::UnterminatedField`]. Both
    /// carry the physical line number and the raw accumulated row text.
    pub fn next_row(&mut self, source: &mut impl LineSource) -> Result<Option<Vec<String>>> {
        let mut buffer = String::new();
        let mut started = false;

        loop {
            let line = match source.next_line()? {
                Some(line) => line,
                None if !started => return Ok(None),
                None => {
                    return Err(CsvParseError::UnterminatedField {
                        line: self.line_number,
                        buffer,
                    });
                }
            };

            self.line_number += 1;
            if started {
                buffer.push('\n');
            }
            buffer.push_str(&line);
            started = true;

            // Fresh chain per attempt: a failed parse never leaks handler
            // state into the retry, only the accumulated text
            match self.tokenizer.tokenize(&buffer) {
                LineOutcome::NeedsMoreInput => continue,
                LineOutcome::Complete(fields) => {
                    return match self.expected_columns {
                        Some(expected) if fields.len() != expected => {
                            Err(CsvParseError::ColumnCountMismatch {
                                line: self.line_number,
                                expected,
                                actual: fields.len(),
                                buffer,
                            })
                        }
                        _ => Ok(Some(fields)),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LineReader;

    fn assembler_for(text: &str, expected: usize) -> (RowAssembler, LineReader<std::io::Cursor<Vec<u8>>>) {
        let mut assembler = RowAssembler::new(RowTokenizer::new());
        assembler.expect_columns(expected);
        (assembler, LineReader::from_string(text))
    }

    #[test]
    fn test_single_line_rows() {
        let (mut assembler, mut source) = assembler_for("a,b\nc,d\n", 2);
        assert_eq!(
            assembler.next_row(&mut source).unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            assembler.next_row(&mut source).unwrap(),
            Some(vec!["c".to_string(), "d".to_string()])
        );
        assert_eq!(assembler.next_row(&mut source).unwrap(), None);
    }

    #[test]
    fn test_multi_line_field_reassembled() {
        let (mut assembler, mut source) = assembler_for("\"line1\nline2\",x\n", 2);
        assert_eq!(
            assembler.next_row(&mut source).unwrap(),
            Some(vec!["line1\nline2".to_string(), "x".to_string()])
        );
        assert_eq!(assembler.line_number(), 2);
    }

    #[test]
    fn test_field_spanning_three_lines() {
        let (mut assembler, mut source) = assembler_for("\"one\ntwo\nthree\",x\n", 2);
        assert_eq!(
            assembler.next_row(&mut source).unwrap(),
            Some(vec!["one\ntwo\nthree".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_column_count_mismatch() {
        let (mut assembler, mut source) = assembler_for("a,b\n", 3);
        match assembler.next_row(&mut source).unwrap_err() {
            CsvParseError::ColumnCountMismatch {
                line,
                expected,
                actual,
                buffer,
            } => {
                assert_eq!(line, 1);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
                assert_eq!(buffer, "a,b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_field_at_eof() {
        let (mut assembler, mut source) = assembler_for("\"never closed\nstill open", 1);
        match assembler.next_row(&mut source).unwrap_err() {
            CsvParseError::UnterminatedField { line, buffer } => {
                assert_eq!(line, 2);
                assert_eq!(buffer, "\"never closed\nstill open");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_state_leaks_after_failed_row() {
        let (mut assembler, mut source) = assembler_for("a,b,c\nx,y\n", 2);
        assert!(assembler.next_row(&mut source).is_err());
        // The failed row's fields must not bleed into the next one
        assert_eq!(
            assembler.next_row(&mut source).unwrap(),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_no_expectation_accepts_any_count() {
        let mut assembler = RowAssembler::new(RowTokenizer::new());
        let mut source = LineReader::from_string("a,b,c,d\n");
        let row = assembler.next_row(&mut source).unwrap().unwrap();
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn test_line_numbers_cross_logical_rows() {
        let (mut assembler, mut source) = assembler_for("a,b\n\"c\nd\",e\nf,g\n", 2);
        assembler.next_row(&mut source).unwrap();
        assert_eq!(assembler.line_number(), 1);
        assembler.next_row(&mut source).unwrap();
        assert_eq!(assembler.line_number(), 3);
        assembler.next_row(&mut source).unwrap();
        assert_eq!(assembler.line_number(), 4);
    }
}
