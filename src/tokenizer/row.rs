//! Row tokenizer: drives one physical line through the handler chain

use super::chain::{ChainConfig, HandlerChain};
use crate::error::{CsvParseError, Result};

/// Result of tokenizing one piece of text as a row
///
/// "Need more input" is ordinary control flow here, not an error: the caller
/// appends the next physical line and retries. Only the multi-line assembler
/// ever turns it into a user-facing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The text formed a complete row of fields
    Complete(Vec<String>),
    /// The text ended inside an unterminated quoted field; the row continues
    /// on the next physical line
    NeedsMoreInput,
}

/// Tokenizes one row of delimited text into field strings
///
/// Quoting, escaping, separator detection, and whitespace handling are each
/// implemented by an independent handler; the tokenizer composes them into a
/// fixed-order chain and feeds it one character at a time.
///
/// # Examples
///
/// ```
/// use tablestream::{LineOutcome, RowTokenizer};
///
/// let tokenizer = RowTokenizer::new();
/// assert_eq!(
///     tokenizer.tokenize(r#""a,b",c"#),
///     LineOutcome::Complete(vec!["a,b".to_string(), "c".to_string()])
/// );
///
/// // An open quote means the row continues on the next physical line
/// assert_eq!(tokenizer.tokenize("\"line1"), LineOutcome::NeedsMoreInput);
/// ```
#[derive(Debug, Clone)]
pub struct RowTokenizer {
    config: ChainConfig,
}

impl RowTokenizer {
    /// Create a tokenizer with the default `,` separator, `"` quote, and
    /// `\` escape marker
    pub fn new() -> Self {
        RowTokenizer {
            config: ChainConfig::default(),
        }
    }

    /// Set a custom field separator (builder pattern)
    ///
    /// # Examples
    ///
    /// ```
    /// use tablestream::{LineOutcome, RowTokenizer};
    ///
    /// let tokenizer = RowTokenizer::new().delimiter(';');
    /// assert_eq!(
    ///     tokenizer.tokenize("a;b"),
    ///     LineOutcome::Complete(vec!["a".to_string(), "b".to_string()])
    /// );
    /// ```
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set a custom quote character (builder pattern)
    pub fn quote(mut self, quote: char) -> Self {
        self.config.quote = quote;
        self
    }

    /// Set a custom escape marker (builder pattern)
    pub fn escape(mut self, escape: char) -> Self {
        self.config.escape = escape;
        self
    }

    /// Tokenize one piece of text as a single row
    ///
    /// Builds a fresh chain, feeds every character through it, and finalizes
    /// the trailing field. End of text does not force-close an open quote:
    /// that condition yields [`LineOutcome::NeedsMoreInput`] so the caller can
    /// fetch another physical line and retry on the joined text.
    pub fn tokenize(&self, text: &str) -> LineOutcome {
        let mut chain = HandlerChain::new(&self.config);
        for ch in text.chars() {
            chain.handle(ch);
        }
        if chain.in_open_quote() {
            return LineOutcome::NeedsMoreInput;
        }
        LineOutcome::Complete(chain.finish())
    }

    /// Tokenize an already-isolated single row, failing on an open quote
    ///
    /// Entry point for ad hoc one-string tokenization, where there is no
    /// further line to continue an unterminated field with.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablestream::RowTokenizer;
    ///
    /// let tokenizer = RowTokenizer::new();
    /// let fields = tokenizer.tokenize_row("x, y ,z").unwrap();
    /// assert_eq!(fields, vec!["x", "y", "z"]);
    ///
    /// assert!(tokenizer.tokenize_row("\"open").is_err());
    /// ```
    pub fn tokenize_row(&self, text: &str) -> Result<Vec<String>> {
        match self.tokenize(text) {
            LineOutcome::Complete(fields) => Ok(fields),
            LineOutcome::NeedsMoreInput => Err(CsvParseError::UnterminatedField {
                // The input may already carry embedded newlines; report the
                // physical line the text actually ends on
                line: 1 + text.chars().filter(|&ch| ch == '\n').count() as u64,
                buffer: text.to_string(),
            }),
        }
    }
}

impl Default for RowTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
