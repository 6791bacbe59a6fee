//! Composable terms for writing tokenizers.
//!
//! A tokenizer is an ordered list of [`Binding`]s, each pairing a token kind
//! with a [`Term`] built from small primitives:
//!
//! ```text
//! let bindings = [
//!     Binding::new(Kind::Hex, uint::<u64>("0x", Radix::HEX), "hex literal"),
//!     Binding::new(Kind::Decimal, uint::<u64>("", Radix::DECIMAL), "decimal literal"),
//!     Binding::new(Kind::Punct, any_of(["+", "+=", "="])?, "punctuation"),
//!     Binding::new(Kind::Whitespace, one_or_more(codepoint_fn(char::is_whitespace)), "white space"),
//! ];
//! tokenize(b"x += 0x1f", &bindings, |kind, cap, loc| { ... })?;
//! ```
//!
//! # Outcomes
//!
//! Terms return [`Match`]. `Err(ErrCode::Unmatched)` means "does not apply
//! here" and is the only outcome that lets an enclosing choice try another
//! alternative. Every other error is a hard failure that unwinds to
//! [`tokenize`], which reports it at the line/column where the failed
//! attempt started.
//!
//! # Logging
//!
//! The driver emits `tracing` events (`debug` for the call and its failure,
//! `trace` per token). [`init_tracing`] installs a subscriber for binaries
//! and tests that want to see them.

mod between;
mod capture;
mod combinator;
mod digits;
mod error;
mod escape;
mod numeric;
mod term;
#[cfg(test)]
mod test_helpers;
mod tokenize;

pub use between::{quoted, Between, Quoted, Terminator};
pub use capture::{Capture, Value};
pub use combinator::{
    any_of, first_of, one_or_more, optional, sequence, skip, zero_or_more, AnyOf, FirstOf,
    OneOrMore, Optional, Sequence, Skip, ZeroOrMore,
};
pub use digits::{
    extract_hex, extract_octal, extract_unsigned, Accumulator, Digits, Radix, Unsigned,
};
pub use error::{BuildError, ErrCode, Error, LocatedError};
pub use escape::{
    combine_surrogates, utf16_escape, EscapeKey, Escaped, HexByte, HexByteRun, HexCodepoint4,
    HexCodepoint8, OctalByte, Substitution, SurrogatePolicy, Utf16Escape,
};
pub use lexkit_core::{LineCol, Location, Source, Utf8Fault, Utf8Policy};
pub use numeric::{fixed_hex, uint, FixedHex, Uint};
pub use term::{
    codepoint, codepoint_fn, eof, eol, literal, start_continue, BoxTerm, Codepoint, CodepointFn,
    Eof, Eol, Literal, Match, StartContinue, Term,
};
pub use tokenize::{collect_tokens, tokenize, tokenize_with, Binding, Token, TokenizeOptions};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, if it is set.
///
/// `lexkit=debug` shows each tokenize call and the error that ended it;
/// `lexkit=trace` adds every token, and `lexkit_core=trace` every invalid
/// UTF-8 span replaced by the cursor. Does nothing when a subscriber is
/// already installed or on calls after the first.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_some() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
