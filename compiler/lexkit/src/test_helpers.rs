//! Helpers for attempting a single term against a string.

use crate::{Capture, Match, Source, Term};

/// Outcome of one attempt: the result, what was captured, and how far the
/// cursor moved.
#[derive(Debug)]
pub(crate) struct Attempt {
    pub result: Match,
    pub cap: Capture,
    pub offset: usize,
}

impl Attempt {
    /// Captured text; panics on non-UTF-8 so tests fail loudly.
    pub fn text(&self) -> &str {
        match self.cap.as_str() {
            Some(s) => s,
            None => panic!("captured text is not UTF-8: {:?}", self.cap.bytes()),
        }
    }
}

/// Attempt `term` at the start of `input`, capturing.
pub(crate) fn attempt(term: &impl Term, input: &str) -> Attempt {
    attempt_bytes(term, input.as_bytes())
}

pub(crate) fn attempt_bytes(term: &impl Term, input: &[u8]) -> Attempt {
    let mut src = Source::new(input);
    let mut cap = Capture::new();
    let result = term.attempt(&mut src, Some(&mut cap));
    Attempt {
        result,
        cap,
        offset: src.offset(),
    }
}
