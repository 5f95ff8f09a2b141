//! CSV source reading with header-driven column validation
//!
//! Front-end entry points over files, readers, and in-memory strings. The
//! first logical row of a source is its header; the header's field count
//! becomes the expected column count for every data row that follows.

use crate::assembler::RowAssembler;
use crate::error::{CsvParseError, Result};
use crate::source::LineReader;
use crate::tokenizer::RowTokenizer;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// Streaming CSV reader producing logical rows of raw field strings
///
/// Reads one physical line at a time and reassembles fields that span
/// multiple lines (a quoted field containing a newline). Every data row is
/// validated against the header's column count; a mismatch aborts the source
/// with a line-numbered error rather than producing a partial dataset.
///
/// Fields come back as raw strings, positionally aligned with the header.
/// Typing, null-sentinel substitution, and header-name trimming are the
/// caller's concern.
///
/// # Examples
///
/// ```
/// use tablestream::CsvReader;
///
/// let mut reader = CsvReader::from_string("NAME,AGE\nalice,30\nbob,25\n");
///
/// assert_eq!(reader.headers().unwrap(), ["NAME", "AGE"]);
/// for row in reader.rows() {
///     let row = row.unwrap();
///     assert_eq!(row.len(), 2);
/// }
/// ```
///
/// # From a file
///
/// ```no_run
/// use tablestream::CsvReader;
///
/// let mut reader = CsvReader::open("fixtures/users.csv").unwrap();
/// while let Some(row) = reader.read_row().unwrap() {
///     println!("{:?}", row);
/// }
/// ```
pub struct CsvReader<R: BufRead> {
    source: LineReader<R>,
    source_name: String,
    tokenizer: RowTokenizer,

    // Populated together by the first header read
    assembler: Option<RowAssembler>,
    headers: Vec<String>,

    row_count: u64,
}

impl CsvReader<BufReader<File>> {
    /// Open a CSV file
    ///
    /// The file name is carried into errors so a failing fixture can be
    /// identified without re-running the parse.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)
            .map_err(|e| CsvParseError::Read(format!("Failed to open CSV file: {}", e)))?;
        Ok(CsvReader::from_reader(
            BufReader::new(file),
            path_ref.display().to_string(),
        ))
    }
}

impl CsvReader<Cursor<Vec<u8>>> {
    /// Read CSV from an in-memory string
    pub fn from_string(text: impl Into<String>) -> Self {
        CsvReader::from_reader(Cursor::new(text.into().into_bytes()), "<string>")
    }
}

impl<R: BufRead> CsvReader<R> {
    /// Read CSV from any buffered reader
    ///
    /// `source_name` identifies the source in errors (a path, a URL, ...).
    pub fn from_reader(reader: R, source_name: impl Into<String>) -> Self {
        CsvReader {
            source: LineReader::new(reader),
            source_name: source_name.into(),
            tokenizer: RowTokenizer::new(),
            assembler: None,
            headers: Vec::new(),
            row_count: 0,
        }
    }

    /// Set a custom field separator (builder pattern)
    ///
    /// Must be applied before the header is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablestream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_string("A;B\n1;2\n").delimiter(';');
    /// assert_eq!(reader.headers().unwrap(), ["A", "B"]);
    /// ```
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.tokenizer = self.tokenizer.delimiter(delimiter);
        self
    }

    /// Set a custom quote character (builder pattern)
    pub fn quote(mut self, quote: char) -> Self {
        self.tokenizer = self.tokenizer.quote(quote);
        self
    }

    /// Set a custom escape marker (builder pattern)
    pub fn escape(mut self, escape: char) -> Self {
        self.tokenizer = self.tokenizer.escape(escape);
        self
    }

    /// Parse the header row if it has not been read yet
    ///
    /// The header's field count becomes the expected column count for all
    /// subsequent rows. An empty source is fatal and names the source.
    fn ensure_header(&mut self) -> Result<()> {
        if self.assembler.is_some() {
            return Ok(());
        }
        let mut assembler = RowAssembler::new(self.tokenizer.clone());
        match assembler.next_row(&mut self.source)? {
            Some(header) => {
                assembler.expect_columns(header.len());
                self.headers = header;
                self.assembler = Some(assembler);
                Ok(())
            }
            None => Err(CsvParseError::EmptySource(self.source_name.clone())),
        }
    }

    /// The raw column names from the header row
    ///
    /// Reads the header from the source if it has not been consumed yet.
    pub fn headers(&mut self) -> Result<&[String]> {
        self.ensure_header()?;
        Ok(&self.headers)
    }

    /// The column count every data row must have
    pub fn expected_columns(&mut self) -> Result<usize> {
        self.ensure_header()?;
        Ok(self.headers.len())
    }

    /// Read the next logical data row
    ///
    /// Returns `Ok(None)` at end of source. The header row is consumed
    /// automatically on the first call.
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        self.ensure_header()?;
        let Some(assembler) = self.assembler.as_mut() else {
            return Ok(None);
        };
        let row = assembler.next_row(&mut self.source)?;
        if row.is_some() {
            self.row_count += 1;
        }
        Ok(row)
    }

    /// Iterate over the data rows
    ///
    /// # Examples
    ///
    /// ```
    /// use tablestream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_string("ID,NAME\n1,alice\n2,bob\n");
    /// let rows: Vec<_> = reader.rows().collect::<Result<_, _>>().unwrap();
    /// assert_eq!(rows.len(), 2);
    /// assert_eq!(rows[0], vec!["1", "alice"]);
    /// ```
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows { reader: self }
    }

    /// 1-based number of physical lines consumed so far
    pub fn line_number(&self) -> u64 {
        self.assembler.as_ref().map_or(0, |a| a.line_number())
    }

    /// Number of data rows read so far (the header is not counted)
    pub fn row_count(&self) -> u64 {
        self.row_count
    }
}

/// Iterator over logical data rows
pub struct Rows<'a, R: BufRead> {
    reader: &'a mut CsvReader<R>,
}

impl<'a, R: BufRead> Iterator for Rows<'a, R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_and_rows() {
        let mut reader = CsvReader::from_string("A,B,C\n1,2,3\n4,5,6\n");
        assert_eq!(reader.headers().unwrap(), ["A", "B", "C"]);
        assert_eq!(
            reader.read_row().unwrap(),
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
        assert_eq!(
            reader.read_row().unwrap(),
            Some(vec!["4".to_string(), "5".to_string(), "6".to_string()])
        );
        assert_eq!(reader.read_row().unwrap(), None);
        assert_eq!(reader.row_count(), 2);
    }

    #[test]
    fn test_empty_source_names_source() {
        let mut reader = CsvReader::from_reader(Cursor::new(Vec::new()), "users.csv");
        match reader.read_row().unwrap_err() {
            CsvParseError::EmptySource(name) => assert_eq!(name, "users.csv"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_mismatch_reports_line() {
        let mut reader = CsvReader::from_string("A,B,C\n1,2\n");
        match reader.read_row().unwrap_err() {
            CsvParseError::ColumnCountMismatch {
                line,
                expected,
                actual,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multi_line_row_through_reader() {
        let mut reader = CsvReader::from_string("A,B\n\"line1\nline2\",x\n");
        assert_eq!(
            reader.read_row().unwrap(),
            Some(vec!["line1\nline2".to_string(), "x".to_string()])
        );
        assert_eq!(reader.line_number(), 3);
    }

    #[test]
    fn test_rows_iterator_excludes_header() {
        let mut reader = CsvReader::from_string("H1,H2\na,b\nc,d\n");
        let rows: Vec<_> = reader
            .rows()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_custom_delimiter_applies_to_header() {
        let mut reader = CsvReader::from_string("A|B\n1|2\n").delimiter('|');
        assert_eq!(reader.headers().unwrap(), ["A", "B"]);
        assert_eq!(
            reader.read_row().unwrap(),
            Some(vec!["1".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn test_header_only_source() {
        let mut reader = CsvReader::from_string("A,B\n");
        assert_eq!(reader.headers().unwrap(), ["A", "B"]);
        assert_eq!(reader.read_row().unwrap(), None);
    }

    #[test]
    fn test_header_spanning_lines() {
        let mut reader = CsvReader::from_string("\"TWO\nLINES\",B\n1,2\n");
        assert_eq!(reader.headers().unwrap(), ["TWO\nLINES", "B"]);
        assert_eq!(reader.expected_columns().unwrap(), 2);
    }
}
