//! Escape sequences.
//!
//! [`Escaped`] is a dispatch table keyed by the codepoint after the escape
//! prefix. A key maps either to a literal substitution (`\n` writes a
//! newline) or to a decoder term that consumes the rest of the sequence
//! (`\x` hands off to [`HexByte`]). The remaining types in this module are
//! those decoders.

use lexkit_core::Source;
use rustc_hash::FxHashMap;

use crate::digits::{extract_hex, extract_octal};
use crate::{BoxTerm, BuildError, Capture, ErrCode, Match, Term};

/// Table key: one exact codepoint, or the fallback for every codepoint
/// without an exact entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EscapeKey {
    Exact(char),
    Default,
}

/// What an escape expands to.
pub enum Substitution {
    /// The key itself: `\"` writes `"`.
    Itself,
    /// One raw byte.
    Byte(u8),
    Char(char),
    Text(Box<str>),
    /// A decoder for the rest of the sequence. `Unmatched` from the decoder
    /// means the escape is malformed.
    Term(BoxTerm),
}

impl Substitution {
    pub fn term(term: impl Term + 'static) -> Self {
        Substitution::Term(term.boxed())
    }
}

impl From<char> for Substitution {
    fn from(c: char) -> Self {
        Substitution::Char(c)
    }
}

impl From<u8> for Substitution {
    fn from(b: u8) -> Self {
        Substitution::Byte(b)
    }
}

impl From<&str> for Substitution {
    fn from(s: &str) -> Self {
        Substitution::Text(s.into())
    }
}

fn write_literal(sub: &Substitution, key: char, cap: Option<&mut Capture>) {
    let Some(cap) = cap else { return };
    match sub {
        Substitution::Itself => cap.push_char(key),
        Substitution::Byte(b) => cap.push_byte(*b),
        Substitution::Char(c) => cap.push_char(*c),
        Substitution::Text(s) => cap.push_str(s),
        Substitution::Term(_) => {}
    }
}

fn invalid_if_unmatched(result: Match) -> Match {
    match result {
        Err(ErrCode::Unmatched) => Err(ErrCode::Invalid),
        other => other,
    }
}

/// Escape-sequence matcher.
///
/// `Unmatched` if the prefix is absent; `Invalid` if the prefix is present
/// but neither an exact entry nor the default applies.
///
/// An exact entry consumes its key codepoint before writing or decoding. A
/// default literal consumes the codepoint too; a default decoder does not,
/// because the codepoint is the start of what it decodes (octal escapes
/// `\0`..`\7` dispatch this way).
pub struct Escaped {
    prefix: char,
    exact: FxHashMap<char, Substitution>,
    default: Option<Substitution>,
}

impl Escaped {
    pub fn new(prefix: char) -> Self {
        Escaped {
            prefix,
            exact: FxHashMap::default(),
            default: None,
        }
    }

    /// Add or replace an entry.
    #[must_use]
    pub fn with(mut self, key: EscapeKey, sub: impl Into<Substitution>) -> Self {
        match key {
            EscapeKey::Exact(c) => {
                self.exact.insert(c, sub.into());
            }
            EscapeKey::Default => self.default = Some(sub.into()),
        }
        self
    }

    /// Shorthand for `with(EscapeKey::Exact(key), sub)`.
    #[must_use]
    pub fn map(self, key: char, sub: impl Into<Substitution>) -> Self {
        self.with(EscapeKey::Exact(key), sub)
    }

    /// Keys that stand for themselves, e.g. `"\"\\/"`.
    #[must_use]
    pub fn verbatim(self, keys: &str) -> Self {
        keys.chars()
            .fold(self, |table, key| table.map(key, Substitution::Itself))
    }
}

impl Term for Escaped {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        if !src.hop(self.prefix) {
            return Err(ErrCode::Unmatched);
        }
        let Some(key) = src.peek() else {
            return Err(ErrCode::Invalid);
        };

        if let Some(sub) = self.exact.get(&key) {
            src.hop(key);
            return match sub {
                Substitution::Term(term) => invalid_if_unmatched(term.attempt(src, cap)),
                literal => {
                    write_literal(literal, key, cap);
                    Ok(())
                }
            };
        }

        match &self.default {
            Some(Substitution::Term(term)) => invalid_if_unmatched(term.attempt(src, cap)),
            Some(literal) => {
                src.hop(key);
                write_literal(literal, key, cap);
                Ok(())
            }
            None => Err(ErrCode::Invalid),
        }
    }
}

// === Code unit decoders ===

/// Any number of hex digits naming one byte: `Invalid` above `0xff`.
///
/// Consumes every hex digit, whatever the value.
#[derive(Clone, Copy, Debug)]
pub struct HexByteRun;

impl Term for HexByteRun {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let digits = extract_hex(src, None);
        if digits.count == 0 {
            return Err(ErrCode::Unmatched);
        }
        if digits.overflow {
            return Err(ErrCode::Invalid);
        }
        let byte = u8::try_from(digits.value).map_err(|_| ErrCode::Invalid)?;
        if let Some(cap) = cap {
            cap.push_byte(byte);
        }
        Ok(())
    }
}

/// Exactly two hex digits naming one byte, written unvalidated.
///
/// One digit is `Incomplete`; a third digit is left unconsumed.
#[derive(Clone, Copy, Debug)]
pub struct HexByte;

impl Term for HexByte {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let digits = extract_hex(src, Some(2));
        match digits.count {
            0 => Err(ErrCode::Unmatched),
            1 => Err(ErrCode::Incomplete),
            _ => {
                if let Some(cap) = cap {
                    cap.push_byte(u8::try_from(digits.value).map_err(|_| ErrCode::Invalid)?);
                }
                Ok(())
            }
        }
    }
}

/// Exactly four hex digits naming a scalar value, e.g. the `00e9` of `\u00e9`.
///
/// Fewer digits, or a value in the surrogate range, is `Invalid`.
#[derive(Clone, Copy, Debug)]
pub struct HexCodepoint4;

impl Term for HexCodepoint4 {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let digits = extract_hex(src, Some(4));
        match digits.count {
            0 => Err(ErrCode::Unmatched),
            4 => write_scalar(digits.value, cap),
            _ => Err(ErrCode::Invalid),
        }
    }
}

/// Exactly eight hex digits naming a scalar value, e.g. `\U0001F600`.
///
/// Fewer digits is `Incomplete`; a surrogate or a value above U+10FFFF is
/// `Invalid`.
#[derive(Clone, Copy, Debug)]
pub struct HexCodepoint8;

impl Term for HexCodepoint8 {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let digits = extract_hex(src, Some(8));
        match digits.count {
            0 => Err(ErrCode::Unmatched),
            8 => write_scalar(digits.value, cap),
            _ => Err(ErrCode::Incomplete),
        }
    }
}

fn write_scalar(value: u64, cap: Option<&mut Capture>) -> Match {
    let c = u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .ok_or(ErrCode::Invalid)?;
    if let Some(cap) = cap {
        cap.push_char(c);
    }
    Ok(())
}

/// One to three octal digits naming one byte, e.g. `\0` or `\377`.
///
/// `Invalid` above `0o377`.
#[derive(Clone, Copy, Debug)]
pub struct OctalByte;

impl Term for OctalByte {
    fn attempt(&self, src: &mut Source<'_>, cap: Option<&mut Capture>) -> Match {
        let digits = extract_octal(src, Some(3));
        if digits.count == 0 {
            return Err(ErrCode::Unmatched);
        }
        let byte = u8::try_from(digits.value).map_err(|_| ErrCode::Invalid)?;
        if let Some(cap) = cap {
            cap.push_byte(byte);
        }
        Ok(())
    }
}

// === UTF-16 surrogate pairs ===

const HIGH_SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Combine a high and a low surrogate into the scalar value they encode.
#[inline]
pub fn combine_surrogates(high: u32, low: u32) -> u32 {
    (((high & 0x3FF) << 10) | (low & 0x3FF)) + 0x10000
}

/// What to do with a surrogate that is not part of a valid pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurrogatePolicy {
    /// Report `Invalid`.
    #[default]
    Strict,
    /// Write U+FFFD in its place and carry on.
    Lenient,
}

/// Four hex digits read as a UTF-16 code unit, JSON style.
///
/// A high surrogate (`D800..=DBFF`) must be followed by `second_prefix` and
/// four more digits naming a low surrogate (`DC00..=DFFF`); the pair decodes
/// to one scalar above U+FFFF. A missing second unit, a second unit that is
/// not a low surrogate, or a low surrogate on its own is `Invalid` under
/// [`SurrogatePolicy::Strict`].
pub struct Utf16Escape {
    first_prefix: Box<str>,
    second_prefix: Box<str>,
    policy: SurrogatePolicy,
}

/// Build a surrogate-pair decoder.
///
/// Inside an [`Escaped`] table keyed on `'u'`, the first prefix is empty
/// (the table already consumed `\u`) and the second is `"\\u"`.
pub fn utf16_escape(
    first_prefix: impl Into<Box<str>>,
    second_prefix: impl Into<Box<str>>,
) -> Result<Utf16Escape, BuildError> {
    let second_prefix = second_prefix.into();
    if second_prefix.is_empty() {
        return Err(BuildError::EmptySecondPrefix);
    }
    Ok(Utf16Escape {
        first_prefix: first_prefix.into(),
        second_prefix,
        policy: SurrogatePolicy::default(),
    })
}

impl Utf16Escape {
    #[must_use]
    pub fn with_policy(mut self, policy: SurrogatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Four hex digits as one code unit. `Unmatched` only when there is no
    /// digit at all and nothing has been consumed.
    fn unit(src: &mut Source<'_>, consumed: bool) -> Result<u32, ErrCode> {
        let digits = extract_hex(src, Some(4));
        match digits.count {
            0 if !consumed => Err(ErrCode::Unmatched),
            4 => u32::try_from(digits.value).map_err(|_| ErrCode::Invalid),
            _ => Err(ErrCode::Invalid),
        }
    }

    fn unpaired(&self, cap: Option<&mut Capture>) -> Match {
        match self.policy {
            SurrogatePolicy::Strict => Err(ErrCode::Invalid),
            SurrogatePolicy::Lenient => {
                if let Some(cap) = cap {
                    cap.push_char(char::REPLACEMENT_CHARACTER);
                }
                Ok(())
            }
        }
    }
}

impl Term for Utf16Escape {
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        if !src.leap(&self.first_prefix) {
            return Err(ErrCode::Unmatched);
        }
        let high = Self::unit(src, !self.first_prefix.is_empty())?;

        if LOW_SURROGATES.contains(&high) {
            return self.unpaired(cap);
        }
        if !HIGH_SURROGATES.contains(&high) {
            return write_scalar(u64::from(high), cap);
        }

        if !src.leap(&self.second_prefix) {
            return self.unpaired(cap);
        }
        let low = Self::unit(src, true)?;
        if LOW_SURROGATES.contains(&low) {
            return write_scalar(u64::from(combine_surrogates(high, low)), cap);
        }

        // The high surrogate is unpaired; the second unit stands alone.
        self.unpaired(cap.as_deref_mut())?;
        if HIGH_SURROGATES.contains(&low) {
            self.unpaired(cap)
        } else {
            write_scalar(u64::from(low), cap)
        }
    }
}
