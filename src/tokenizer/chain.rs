//! Ordered handler chain over one shared parse state

use super::handlers::{Consume, HandlerKind};
use super::state::ParseState;

/// Character classes the chain dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// Field separator (outside quotes)
    pub delimiter: char,
    /// Quote character delimiting field bodies that may contain separators
    /// and newlines
    pub quote: char,
    /// Escape marker forcing the next character to be taken literally
    pub escape: char,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            delimiter: ',',
            quote: '"',
            escape: '\\',
        }
    }
}

/// One tokenization pipeline instance: the fixed handler order plus the
/// parse state shared by every handler in it
///
/// Exactly one chain is active per row being tokenized. A failed parse is
/// never resumed on the same chain; the caller rebuilds a fresh one, so
/// partially-advanced handler flags cannot leak into a retry.
pub struct HandlerChain<'a> {
    config: &'a ChainConfig,
    handlers: [HandlerKind; 5],
    state: ParseState,
}

impl<'a> HandlerChain<'a> {
    /// Evaluation order of the handler family, highest precedence first
    pub const ORDER: [HandlerKind; 5] = [
        HandlerKind::Whitespace,
        HandlerKind::Escape,
        HandlerKind::Quote,
        HandlerKind::Separator,
        HandlerKind::Transparent,
    ];

    pub fn new(config: &'a ChainConfig) -> Self {
        HandlerChain {
            config,
            handlers: Self::ORDER,
            state: ParseState::new(),
        }
    }

    /// Feed one character through the chain
    ///
    /// Handlers are tried in precedence order until one consumes. The
    /// transparent handler is last and never declines, so every character is
    /// either recorded or changes state.
    pub fn handle(&mut self, ch: char) {
        for handler in self.handlers {
            match handler.try_consume(ch, self.config, &mut self.state) {
                Consume::Declined => continue,
                Consume::Consumed => return,
                Consume::FieldBoundary => {
                    self.state.complete_field();
                    return;
                }
            }
        }
    }

    /// True when end of input was reached inside an unterminated quoted
    /// region: the line alone is not a complete row
    pub fn in_open_quote(&self) -> bool {
        self.state.in_quotes
    }

    /// Finalize the row: flush whatever remains as the final field and
    /// return the completed fields
    pub fn finish(mut self) -> Vec<String> {
        self.state.complete_field();
        self.state.fields
    }
}
