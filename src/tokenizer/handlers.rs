//! The handler family: one micro state machine per lexical concern
//!
//! Each handler inspects the next input character against the shared
//! [`ParseState`] and either consumes it or declines, letting the next handler
//! in the chain try. Precedence is fixed and part of the contract:
//! whitespace, escape, quote, separator, then the transparent fallback.

use super::chain::ChainConfig;
use super::state::ParseState;

/// Outcome of offering one character to one handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consume {
    /// Not this handler's concern; pass the character to the next one
    Declined,
    /// Character fully handled; stop the chain
    Consumed,
    /// Character closed the field in progress; stop the chain and push
    /// the accumulated field
    FieldBoundary,
}

/// A single lexical rule in the tokenization chain
///
/// A closed set of tagged variants dispatched in a fixed order, rather than a
/// trait-object hierarchy: the precedence between rules is explicit and each
/// rule stays independently testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Elides leading/trailing whitespace outside quotes
    Whitespace,
    /// Takes the character after an escape marker literally
    Escape,
    /// Opens and closes quoted field bodies
    Quote,
    /// Ends the current field on an unquoted separator
    Separator,
    /// Appends the raw character; always last, never declines
    Transparent,
}

impl HandlerKind {
    /// Offer `ch` to this handler, mutating `state` if it consumes
    pub fn try_consume(self, ch: char, config: &ChainConfig, state: &mut ParseState) -> Consume {
        match self {
            HandlerKind::Whitespace => whitespace(ch, state),
            HandlerKind::Escape => escape(ch, config, state),
            HandlerKind::Quote => quote(ch, config, state),
            HandlerKind::Separator => separator(ch, config, state),
            HandlerKind::Transparent => {
                state.push_char(ch);
                Consume::Consumed
            }
        }
    }
}

/// Outside quotes, whitespace at field boundaries is elided; it is held in
/// `pending_space` until a later data character proves it interior. Inside
/// quotes, and while an escape is pending, whitespace is ordinary data.
fn whitespace(ch: char, state: &mut ParseState) -> Consume {
    if state.in_quotes || state.escape_pending || !ch.is_whitespace() {
        return Consume::Declined;
    }
    state.pending_space.push(ch);
    Consume::Consumed
}

/// After the escape marker, the next character is accepted verbatim whatever
/// its lexical class; the marker itself is consumed with no visible output.
fn escape(ch: char, config: &ChainConfig, state: &mut ParseState) -> Consume {
    if state.escape_pending {
        state.escape_pending = false;
        state.push_char(ch);
        return Consume::Consumed;
    }
    if ch == config.escape {
        state.escape_pending = true;
        return Consume::Consumed;
    }
    Consume::Declined
}

/// A quote at the start of a field opens a quoted region; a quote while
/// inside one closes it. A quote after the field already holds data is
/// ambiguous and treated as ordinary data, so it declines here and falls
/// through to the transparent handler.
fn quote(ch: char, config: &ChainConfig, state: &mut ParseState) -> Consume {
    if ch != config.quote {
        return Consume::Declined;
    }
    if state.in_quotes {
        state.in_quotes = false;
        // A closed quoted region counts as field data, even when empty
        state.field_has_data = true;
        return Consume::Consumed;
    }
    if state.field_has_data {
        return Consume::Declined;
    }
    state.in_quotes = true;
    state.pending_space.clear();
    Consume::Consumed
}

/// Outside quotes the separator ends the current field; inside quotes it is
/// ordinary data.
fn separator(ch: char, config: &ChainConfig, state: &mut ParseState) -> Consume {
    if ch == config.delimiter && !state.in_quotes {
        return Consume::FieldBoundary;
    }
    Consume::Declined
}
