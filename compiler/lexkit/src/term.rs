//! The term contract and the primitive matchers.
//!
//! Every matcher, primitive or combinator, has one signature:
//!
//! ```text
//! attempt(&self, src: &mut Source, cap: Option<&mut Capture>) -> Match
//! ```
//!
//! Passing `None` for the sink means "match but discard": the term consumes
//! exactly what it would have consumed, and writes nothing. Terms hold only
//! their configuration, so the same term can be attempted any number of
//! times at any position.
//!
//! Outcome discipline:
//! - `Ok(())`: matched; the cursor is past the match.
//! - `Err(ErrCode::Unmatched)`: does not apply here; nothing was consumed.
//! - any other `Err`: applies but is malformed; the cursor may have moved.

use lexkit_core::Source;

use crate::{Capture, ErrCode};

/// Outcome of a term attempt.
pub type Match = Result<(), ErrCode>;

/// A composable matcher over a [`Source`].
pub trait Term {
    /// Try to match at the cursor, writing recognized content into `cap`.
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match;

    /// Erase the concrete type, for heterogeneous lists.
    fn boxed(self) -> BoxTerm
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// A type-erased term.
pub type BoxTerm = Box<dyn Term>;

impl<T: Term + ?Sized> Term for Box<T> {
    #[inline]
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        (**self).attempt(src, cap)
    }
}

// === Literals ===

/// Exact text, compared byte for byte.
#[derive(Clone, Debug)]
pub struct Literal {
    text: Box<str>,
}

/// Match `text` exactly. An empty literal matches zero-width everywhere.
pub fn literal(text: impl Into<Box<str>>) -> Literal {
    Literal { text: text.into() }
}

impl Term for Literal {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        if !src.leap(&self.text) {
            return Err(ErrCode::Unmatched);
        }
        if let Some(cap) = cap {
            cap.push_str(&self.text);
        }
        Ok(())
    }
}

/// One exact codepoint.
#[derive(Clone, Copy, Debug)]
pub struct Codepoint(char);

pub fn codepoint(c: char) -> Codepoint {
    Codepoint(c)
}

impl Term for Codepoint {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        if !src.hop(self.0) {
            return Err(ErrCode::Unmatched);
        }
        if let Some(cap) = cap {
            cap.push_char(self.0);
        }
        Ok(())
    }
}

/// One codepoint accepted by a predicate.
#[derive(Clone, Copy)]
pub struct CodepointFn<F> {
    pred: F,
}

pub fn codepoint_fn<F: Fn(char) -> bool>(pred: F) -> CodepointFn<F> {
    CodepointFn { pred }
}

impl<F: Fn(char) -> bool> Term for CodepointFn<F> {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let c = src.fetch(&self.pred).ok_or(ErrCode::Unmatched)?;
        if let Some(cap) = cap {
            cap.push_char(c);
        }
        Ok(())
    }
}

/// Identifier-shaped run: one `start` codepoint, then a maximal run of
/// `cont` codepoints.
#[derive(Clone, Copy)]
pub struct StartContinue<S, C> {
    start: S,
    cont: C,
}

pub fn start_continue<S, C>(start: S, cont: C) -> StartContinue<S, C>
where
    S: Fn(char) -> bool,
    C: Fn(char) -> bool,
{
    StartContinue { start, cont }
}

impl<S, C> Term for StartContinue<S, C>
where
    S: Fn(char) -> bool,
    C: Fn(char) -> bool,
{
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        let first = src.fetch(&self.start).ok_or(ErrCode::Unmatched)?;
        if let Some(cap) = cap.as_deref_mut() {
            cap.push_char(first);
        }
        src.skip(|c| {
            let ok = (self.cont)(c);
            if ok {
                if let Some(cap) = cap.as_deref_mut() {
                    cap.push_char(c);
                }
            }
            ok
        });
        Ok(())
    }
}

// === Anchors ===

/// End of input.
#[derive(Clone, Copy, Debug)]
pub struct Eof;

pub fn eof() -> Eof {
    Eof
}

impl Term for Eof {
    fn attempt(&self, src: &mut Source<'_>, _cap: Option<&mut Capture>) -> Match {
        if src.done() {
            Ok(())
        } else {
            Err(ErrCode::Unmatched)
        }
    }
}

/// End of line: `"\n"`, `"\r\n"`, or zero-width at end of input.
#[derive(Clone, Copy, Debug)]
pub struct Eol;

pub fn eol() -> Eol {
    Eol
}

impl Term for Eol {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let text = if src.hop('\n') {
            "\n"
        } else if src.leap("\r\n") {
            "\r\n"
        } else if src.done() {
            ""
        } else {
            return Err(ErrCode::Unmatched);
        };
        if let Some(cap) = cap {
            cap.push_str(text);
        }
        Ok(())
    }
}
