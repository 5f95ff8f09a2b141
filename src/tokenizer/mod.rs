//! Character-level tokenization pipeline
//!
//! A row is tokenized by feeding it one character at a time through an
//! ordered chain of handlers, each owning a single lexical concern
//! (whitespace, escaping, quoting, separating) over one shared parse state.

mod chain;
mod handlers;
mod row;
mod state;

pub use chain::{ChainConfig, HandlerChain};
pub use handlers::{Consume, HandlerKind};
pub use row::{LineOutcome, RowTokenizer};
pub use state::ParseState;
