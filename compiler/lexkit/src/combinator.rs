//! Combinators: sequencing, repetition and choice.
//!
//! `Unmatched` is recovered locally at every level that offers an
//! alternative; every other code propagates out untouched.

use lexkit_core::Source;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{BoxTerm, BuildError, Capture, ErrCode, Match, Term};

// === Sequence ===

/// Terms applied in order.
///
/// Until the cursor moves, an `Unmatched` element means the whole sequence
/// does not apply. Once an element has consumed input the sequence is
/// committed: a later `Unmatched` becomes `Incomplete`, so partial
/// consumption is never hidden from the caller.
pub struct Sequence {
    terms: Vec<BoxTerm>,
}

pub fn sequence(terms: impl IntoIterator<Item = BoxTerm>) -> Sequence {
    Sequence {
        terms: terms.into_iter().collect(),
    }
}

impl Term for Sequence {
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        let start = src.offset();
        for term in &self.terms {
            match term.attempt(src, cap.as_deref_mut()) {
                Ok(()) => {}
                Err(ErrCode::Unmatched) if src.offset() == start => {
                    return Err(ErrCode::Unmatched);
                }
                Err(ErrCode::Unmatched) => return Err(ErrCode::Incomplete),
                Err(code) => return Err(code),
            }
        }
        Ok(())
    }
}

// === Optional / repetition ===

/// Zero or one occurrence.
pub struct Optional<T> {
    term: T,
}

pub fn optional<T: Term>(term: T) -> Optional<T> {
    Optional { term }
}

impl<T: Term> Term for Optional<T> {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        match self.term.attempt(src, cap) {
            Err(ErrCode::Unmatched) => Ok(()),
            other => other,
        }
    }
}

/// Repeat `term` until it stops applying. An iteration that succeeds
/// without consuming input also ends the run.
fn repeat(term: &impl Term, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
    loop {
        let before = src.offset();
        match term.attempt(src, cap.as_deref_mut()) {
            Ok(()) if src.offset() == before => return Ok(()),
            Ok(()) => {}
            Err(ErrCode::Unmatched) => return Ok(()),
            Err(code) => return Err(code),
        }
    }
}

/// Any number of occurrences, including none. Never reports `Unmatched`.
pub struct ZeroOrMore<T> {
    term: T,
}

pub fn zero_or_more<T: Term>(term: T) -> ZeroOrMore<T> {
    ZeroOrMore { term }
}

impl<T: Term> Term for ZeroOrMore<T> {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        repeat(&self.term, src, cap)
    }
}

/// At least one occurrence.
pub struct OneOrMore<T> {
    term: T,
}

pub fn one_or_more<T: Term>(term: T) -> OneOrMore<T> {
    OneOrMore { term }
}

impl<T: Term> Term for OneOrMore<T> {
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        self.term.attempt(src, cap.as_deref_mut())?;
        repeat(&self.term, src, cap)
    }
}

// === Choice ===

/// Longest-match alternation among literal strings.
///
/// Alternatives are grouped by first codepoint, and each group is ordered
/// longest first, so `"+="` wins over `"+"` wherever both apply.
#[derive(Debug)]
pub struct AnyOf {
    groups: FxHashMap<char, SmallVec<[Box<str>; 4]>>,
}

pub fn any_of<I, S>(alternatives: I) -> Result<AnyOf, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<Box<str>>,
{
    let mut groups: FxHashMap<char, SmallVec<[Box<str>; 4]>> = FxHashMap::default();
    for alt in alternatives {
        let alt: Box<str> = alt.into();
        let first = alt.chars().next().ok_or(BuildError::EmptyAlternative)?;
        let group = groups.entry(first).or_default();
        if !group.contains(&alt) {
            group.push(alt);
        }
    }
    if groups.is_empty() {
        return Err(BuildError::NoAlternatives);
    }
    for group in groups.values_mut() {
        // Stable: equal-length alternatives keep declaration order.
        group.sort_by(|a, b| b.len().cmp(&a.len()));
    }
    Ok(AnyOf { groups })
}

impl Term for AnyOf {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let first = src.peek().ok_or(ErrCode::Unmatched)?;
        let group = self.groups.get(&first).ok_or(ErrCode::Unmatched)?;
        let alt = group
            .iter()
            .find(|alt| src.leap(alt))
            .ok_or(ErrCode::Unmatched)?;
        if let Some(cap) = cap {
            cap.push_str(alt);
        }
        Ok(())
    }
}

/// Ordered choice: the first alternative that does not report `Unmatched`
/// decides the outcome.
pub struct FirstOf {
    terms: Vec<BoxTerm>,
}

pub fn first_of(terms: impl IntoIterator<Item = BoxTerm>) -> FirstOf {
    FirstOf {
        terms: terms.into_iter().collect(),
    }
}

impl Term for FirstOf {
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        for term in &self.terms {
            match term.attempt(src, cap.as_deref_mut()) {
                Err(ErrCode::Unmatched) => {}
                other => return other,
            }
        }
        Err(ErrCode::Unmatched)
    }
}

// === Skip ===

/// Match `term` without capturing anything.
pub struct Skip<T> {
    term: T,
}

pub fn skip<T: Term>(term: T) -> Skip<T> {
    Skip { term }
}

impl<T: Term> Term for Skip<T> {
    fn attempt(&self, src: &mut Source<'_>, _cap: Option<&mut Capture>) -> Match {
        self.term.attempt(src, None)
    }
}
