//! Shared parse state for the tokenization pipeline

/// Mutable state shared by all handlers in one in-flight chain
///
/// Exactly one `ParseState` exists per row being tokenized. It is built fresh
/// for every parse attempt (including multi-line retries), so no handler flag
/// ever survives from a failed attempt into the next one.
#[derive(Debug, Default)]
pub struct ParseState {
    /// Characters accumulated for the field in progress
    pub(crate) current_field: String,
    /// Fields completed so far in the current row
    pub(crate) fields: Vec<String>,
    /// True while inside a quoted field body
    pub(crate) in_quotes: bool,
    /// True immediately after an escape marker: the next character is taken
    /// literally regardless of its lexical class
    pub(crate) escape_pending: bool,
    /// True once the current field holds any data (written characters or a
    /// closed quoted region). A quote seen after that point is ordinary data,
    /// not a delimiter.
    pub(crate) field_has_data: bool,
    /// Whitespace seen outside quotes, held back until it is known to be
    /// interior (kept) or a field boundary (elided)
    pub(crate) pending_space: String,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one character of field data
    ///
    /// Whitespace buffered before the first data character is leading
    /// whitespace and dropped; buffered after data it is interior and kept.
    pub(crate) fn push_char(&mut self, ch: char) {
        if self.field_has_data {
            self.current_field.push_str(&self.pending_space);
        }
        self.pending_space.clear();
        self.current_field.push(ch);
        self.field_has_data = true;
    }

    /// Close out the field in progress and start a new one
    ///
    /// Trailing buffered whitespace is elided; per-field flags are cleared.
    pub(crate) fn complete_field(&mut self) {
        self.pending_space.clear();
        self.fields.push(std::mem::take(&mut self.current_field));
        self.field_has_data = false;
        self.escape_pending = false;
    }

    /// Clear all accumulated state, as if freshly constructed
    pub fn reset(&mut self) {
        self.current_field.clear();
        self.fields.clear();
        self.in_quotes = false;
        self.escape_pending = false;
        self.field_has_data = false;
        self.pending_space.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drops_leading_space() {
        let mut state = ParseState::new();
        state.pending_space.push(' ');
        state.push_char('a');
        assert_eq!(state.current_field, "a");
    }

    #[test]
    fn test_push_keeps_interior_space() {
        let mut state = ParseState::new();
        state.push_char('a');
        state.pending_space.push(' ');
        state.push_char('b');
        assert_eq!(state.current_field, "a b");
    }

    #[test]
    fn test_complete_field_elides_trailing_space() {
        let mut state = ParseState::new();
        state.push_char('a');
        state.pending_space.push(' ');
        state.complete_field();
        assert_eq!(state.fields, vec!["a"]);
        assert_eq!(state.current_field, "");
        assert!(!state.field_has_data);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = ParseState::new();
        state.push_char('x');
        state.complete_field();
        state.in_quotes = true;
        state.escape_pending = true;
        state.reset();
        assert!(state.fields.is_empty());
        assert!(state.current_field.is_empty());
        assert!(!state.in_quotes);
        assert!(!state.escape_pending);
    }
}
