//! The tokenize driver.
//!
//! At every position the driver snapshots the line/column, then tries the
//! bindings in declaration order against a freshly reset capture:
//!
//! - `Unmatched`: try the next binding.
//! - success: hand `(key, capture, snapshot)` to the caller, then restart
//!   from the first binding at the new position.
//! - any other code: stop, reporting the code and the binding's
//!   description at the snapshot.
//!
//! If no binding applies, the call fails with "unexpected content". The
//! first hard failure ends the call; tokens already delivered stay
//! delivered.

use std::borrow::Cow;

use lexkit_core::{LineCol, Source, Utf8Policy};
use tracing::{debug, trace};

use crate::{Capture, Error, ErrCode, LocatedError, Term, Value};

/// A token kind, the term that recognizes it, and what to call it in
/// error messages.
pub struct Binding<K> {
    key: K,
    term: Box<dyn Term>,
    description: Cow<'static, str>,
}

impl<K> Binding<K> {
    pub fn new(
        key: K,
        term: impl Term + 'static,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Binding {
            key,
            term: term.boxed(),
            description: description.into(),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Per-call configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizeOptions {
    pub utf8: Utf8Policy,
    /// Line/column of the first byte, for fragments of a larger document.
    pub origin: LineCol,
}

/// Tokenize `buf` with default options.
pub fn tokenize<K>(
    buf: &[u8],
    bindings: &[Binding<K>],
    on_token: impl FnMut(&K, &Capture, LineCol),
) -> Result<(), LocatedError> {
    tokenize_with(buf, bindings, TokenizeOptions::default(), on_token)
}

/// Tokenize `buf`, calling `on_token` once per token, left to right.
#[tracing::instrument(level = "debug", skip_all, fields(len = buf.len(), bindings = bindings.len()))]
pub fn tokenize_with<K>(
    buf: &[u8],
    bindings: &[Binding<K>],
    options: TokenizeOptions,
    mut on_token: impl FnMut(&K, &Capture, LineCol),
) -> Result<(), LocatedError> {
    let mut src = Source::new(buf)
        .with_policy(options.utf8)
        .with_origin(options.origin);
    let mut cap = Capture::new();

    'scan: while !src.done() {
        let start = src.loc();
        let start_offset = src.offset();

        for binding in bindings {
            cap.reset();
            match binding.term.attempt(&mut src, Some(&mut cap)) {
                Ok(()) if src.offset() == start_offset => {
                    // A zero-width token would never advance the scan.
                    trace!(binding = %binding.description, "ignoring zero-width match");
                }
                Ok(()) => {
                    trace!(binding = %binding.description, at = %start, "token");
                    on_token(&binding.key, &cap, start);
                    continue 'scan;
                }
                Err(ErrCode::Unmatched) => {}
                Err(code) => {
                    return Err(fail(
                        &src,
                        Error::new(code, binding.description.clone()),
                        start,
                    ));
                }
            }
        }

        return Err(fail(&src, Error::unexpected_content(), start));
    }
    Ok(())
}

/// Build the aborting error. A strict-mode UTF-8 fault outranks whatever
/// the terms concluded, since it is the reason they stopped.
fn fail(src: &Source<'_>, error: Error, start: LineCol) -> LocatedError {
    let err = match src.fault() {
        Some(fault) => LocatedError::new(Error::invalid_utf8(), fault.loc),
        None => LocatedError::new(error, start),
    };
    debug!(%err, "tokenize failed");
    err
}

/// A recognized token, detached from the driver's reusable capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<K> {
    pub key: K,
    pub text: Vec<u8>,
    pub values: Vec<Value>,
    pub loc: LineCol,
}

impl<K> Token<K> {
    /// Captured text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.text).ok()
    }
}

/// Tokenize `buf` and collect every token.
pub fn collect_tokens<K: Clone>(
    buf: &[u8],
    bindings: &[Binding<K>],
) -> Result<Vec<Token<K>>, LocatedError> {
    let mut tokens = Vec::new();
    tokenize(buf, bindings, |key, cap, loc| {
        tokens.push(Token {
            key: key.clone(),
            text: cap.bytes().to_vec(),
            values: cap.values().to_vec(),
            loc,
        });
    })?;
    Ok(tokens)
}

#[cfg(test)]
mod tests;
