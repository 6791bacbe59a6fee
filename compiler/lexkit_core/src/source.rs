//! Sequential codepoint cursor over an in-memory byte buffer.
//!
//! The cursor decodes UTF-8 lazily and keeps its [`LineCol`] current on every
//! consuming call, so a position is never recomputed by rescanning from the
//! start of the buffer.
//!
//! # Invalid UTF-8
//!
//! What happens at an invalid byte sequence is fixed when the cursor is
//! built (see [`Utf8Policy`]):
//!
//! - `Lenient` reads the whole invalid span as a single U+FFFD codepoint, so
//!   scanning carries on and the caller decides whether that matters.
//! - `Strict` reads the span as "no codepoint" and records a [`Utf8Fault`].
//!   Nothing past the fault can be consumed; the driver reports the fault
//!   instead of whatever the terms concluded.

use std::cell::Cell;

use crate::decode::{decode_utf8, Decoded};
use crate::line_col::{LineCol, Location};

/// How the cursor treats invalid UTF-8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Utf8Policy {
    /// Replace each invalid span with one U+FFFD codepoint.
    #[default]
    Lenient,
    /// Refuse to read past an invalid span and record a fault.
    Strict,
}

/// Where strict decoding hit an invalid byte sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Utf8Fault {
    /// Byte offset of the first invalid byte.
    pub offset: usize,
    /// Line/column of the first invalid byte.
    pub loc: LineCol,
    /// Length of the invalid span in bytes.
    pub len: usize,
}

/// Cursor over a byte buffer, one codepoint at a time.
///
/// A `Source` has a single logical owner for the duration of a scan; every
/// consuming method mutates the position and line/column in place.
#[derive(Debug)]
pub struct Source<'a> {
    buf: &'a [u8],
    /// Current read position; always on a codepoint boundary.
    pos: usize,
    loc: LineCol,
    policy: Utf8Policy,
    /// First invalid sequence seen under `Utf8Policy::Strict`.
    fault: Cell<Option<Utf8Fault>>,
}

impl<'a> Source<'a> {
    /// Create a lenient cursor at the start of `buf`, positioned at `1:1`.
    pub fn new(buf: &'a [u8]) -> Self {
        Source {
            buf,
            pos: 0,
            loc: LineCol::START,
            policy: Utf8Policy::default(),
            fault: Cell::new(None),
        }
    }

    /// Set the invalid UTF-8 policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Utf8Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Start line/column tracking at `origin` instead of `1:1`.
    ///
    /// Used when `buf` is a fragment of a larger document.
    #[must_use]
    pub fn with_origin(mut self, origin: LineCol) -> Self {
        self.loc = origin;
        self
    }

    #[inline]
    pub fn policy(&self) -> Utf8Policy {
        self.policy
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Current line/column.
    #[inline]
    pub fn loc(&self) -> LineCol {
        self.loc
    }

    #[inline]
    pub fn location(&self) -> Location {
        Location {
            offset: self.pos,
            loc: self.loc,
        }
    }

    /// Unconsumed bytes.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// The invalid sequence that stopped a strict cursor, if any.
    #[inline]
    pub fn fault(&self) -> Option<Utf8Fault> {
        self.fault.get()
    }

    /// True iff no bytes remain.
    #[inline]
    pub fn done(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Decode the codepoint at the current position without consuming it.
    ///
    /// Returns the codepoint, its width and whether it stands in for an
    /// invalid span. `None` at end of input, and at an invalid span under the
    /// strict policy.
    fn next(&self) -> Option<(char, usize, bool)> {
        match decode_utf8(self.rest()) {
            Decoded::Char(c, width) => Some((c, width, false)),
            Decoded::End => None,
            Decoded::Invalid(len) => match self.policy {
                Utf8Policy::Lenient => Some((char::REPLACEMENT_CHARACTER, len, true)),
                Utf8Policy::Strict => {
                    if self.fault.get().is_none() {
                        self.fault.set(Some(Utf8Fault {
                            offset: self.pos,
                            loc: self.loc,
                            len,
                        }));
                    }
                    None
                }
            },
        }
    }

    /// Consume `width` bytes decoded as `c`.
    #[inline]
    fn consume(&mut self, c: char, width: usize, replaced: bool) {
        if replaced {
            tracing::trace!(offset = self.pos, len = width, "replaced invalid utf-8 sequence");
        }
        self.pos += width;
        self.loc.advance_char(c);
    }

    /// Preview the next codepoint without consuming it.
    ///
    /// `None` at end of input.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.next().map(|(c, _, _)| c)
    }

    /// Consume one codepoint iff it equals `c`.
    pub fn hop(&mut self, c: char) -> bool {
        match self.next() {
            Some((have, width, replaced)) if have == c => {
                self.consume(have, width, replaced);
                true
            }
            _ => false,
        }
    }

    /// Consume `literal.len()` bytes iff they equal `literal` byte for byte.
    ///
    /// Line/column advance through any newlines embedded in `literal`.
    pub fn leap(&mut self, literal: &str) -> bool {
        if !self.rest().starts_with(literal.as_bytes()) {
            return false;
        }
        self.pos += literal.len();
        self.loc.advance_str(literal);
        true
    }

    /// Consume and return the next codepoint iff `pred` accepts it.
    pub fn fetch(&mut self, mut pred: impl FnMut(char) -> bool) -> Option<char> {
        let (c, width, replaced) = self.next()?;
        if !pred(c) {
            return None;
        }
        self.consume(c, width, replaced);
        Some(c)
    }

    /// Consume and return the next codepoint, whatever it is.
    #[inline]
    pub fn fetch_any(&mut self) -> Option<char> {
        self.fetch(|_| true)
    }

    /// Consume a maximal run of codepoints accepted by `pred`.
    ///
    /// Returns the number of bytes consumed and the first codepoint that was
    /// rejected (left unconsumed), or `None` if the run reached end of input
    /// or a strict-mode fault.
    pub fn skip(&mut self, mut pred: impl FnMut(char) -> bool) -> (usize, Option<char>) {
        let start = self.pos;
        loop {
            match self.next() {
                Some((c, width, replaced)) if pred(c) => self.consume(c, width, replaced),
                Some((c, _, _)) => return (self.pos - start, Some(c)),
                None => return (self.pos - start, None),
            }
        }
    }

    /// Consume `literal` followed by one codepoint accepted by `pred`, or
    /// nothing at all.
    ///
    /// An empty `literal` behaves like [`fetch`](Self::fetch).
    pub fn leap_fetch(&mut self, literal: &str, mut pred: impl FnMut(char) -> bool) -> Option<char> {
        let at = self.pos + literal.len();
        if at >= self.buf.len() || !self.rest().starts_with(literal.as_bytes()) {
            return None;
        }
        let (c, width) = match decode_utf8(&self.buf[at..]) {
            Decoded::Char(c, width) => (c, width),
            Decoded::Invalid(_) | Decoded::End => return None,
        };
        if !pred(c) {
            return None;
        }
        self.pos = at + width;
        self.loc.advance_str(literal);
        self.loc.advance_char(c);
        Some(c)
    }
}
