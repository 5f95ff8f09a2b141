//! # tablestream
//!
//! Streaming, character-level CSV tokenizer used as the ingestion front-end
//! for tabular test fixtures.
//!
//! Tokenization is a chain of composable character handlers, one per lexical
//! concern (whitespace elision, escaping, quoting, separator detection), fed
//! one character at a time over shared parse state. On top of it sits a
//! multi-line row assembler: a quoted field that runs past the end of a
//! physical line pulls in the next line and re-tokenizes, so logical rows may
//! span any number of physical lines. The first row of a source is its
//! header, and every data row must match the header's column count exactly.
//!
//! # Reading a source
//!
//! ```
//! use tablestream::CsvReader;
//!
//! let mut reader = CsvReader::from_string("NAME,NOTE\nalice,\"line1\nline2\"\n");
//!
//! assert_eq!(reader.headers().unwrap(), ["NAME", "NOTE"]);
//! let row = reader.read_row().unwrap().unwrap();
//! assert_eq!(row, vec!["alice", "line1\nline2"]);
//! ```
//!
//! # Ad hoc tokenization
//!
//! ```
//! use tablestream::RowTokenizer;
//!
//! let tokenizer = RowTokenizer::new();
//! let fields = tokenizer.tokenize_row(r#"a\,b, "kept " ,c"#).unwrap();
//! assert_eq!(fields, vec!["a,b", "kept ", "c"]);
//! ```

pub mod assembler;
pub mod error;
pub mod reader;
pub mod source;
pub mod tokenizer;

pub use assembler::RowAssembler;
pub use error::{CsvParseError, Result};
pub use reader::{CsvReader, Rows};
pub use source::{LineReader, LineSource};
pub use tokenizer::{LineOutcome, RowTokenizer};
