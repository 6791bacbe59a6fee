//! Integer literal terms.
//!
//! Both terms capture the digit text (without the prefix) and push the
//! decoded value as [`Value::Unsigned`].

use std::marker::PhantomData;

use lexkit_core::Source;

use crate::digits::{Accumulator, Radix, Unsigned};
use crate::{Capture, ErrCode, Match, Term, Value};

/// Prefixed unsigned integer, e.g. `0x1F` or `42`.
///
/// The prefix and the first digit are matched together, so a bare prefix
/// with no digit after it does not apply. The rest of the digit run is
/// consumed even when the value overflows `T`.
pub struct Uint<T> {
    prefix: Box<str>,
    radix: Radix,
    _target: PhantomData<fn() -> T>,
}

pub fn uint<T: Unsigned>(prefix: impl Into<Box<str>>, radix: Radix) -> Uint<T> {
    Uint {
        prefix: prefix.into(),
        radix,
        _target: PhantomData,
    }
}

impl<T: Unsigned> Term for Uint<T> {
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        let radix = self.radix;
        let first = src
            .leap_fetch(&self.prefix, |c| radix.is_digit(c))
            .ok_or(ErrCode::Unmatched)?;

        let mut acc = Accumulator::new(radix, T::MAX);
        if let Some(d) = radix.digit(first) {
            acc.push(d);
        }
        if let Some(cap) = cap.as_deref_mut() {
            cap.push_char(first);
        }
        acc.scan(src, radix, None, |c| {
            if let Some(cap) = cap.as_deref_mut() {
                cap.push_char(c);
            }
        });

        if acc.overflow() {
            return Err(ErrCode::Overflow);
        }
        if let Some(cap) = cap {
            cap.push_value(Value::Unsigned(acc.value()));
        }
        Ok(())
    }
}

/// Prefix followed by exactly as many hex digits as `T` has nibbles,
/// e.g. `#ff` for `u8` or `#00e9` for `u16`.
///
/// Fewer digits than that is `Incomplete`; extra digits are left for the
/// next term.
pub struct FixedHex<T> {
    prefix: Box<str>,
    _target: PhantomData<fn() -> T>,
}

pub fn fixed_hex<T: Unsigned>(prefix: impl Into<Box<str>>) -> FixedHex<T> {
    FixedHex {
        prefix: prefix.into(),
        _target: PhantomData,
    }
}

impl<T: Unsigned> Term for FixedHex<T> {
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        let first = src
            .leap_fetch(&self.prefix, |c| Radix::HEX.is_digit(c))
            .ok_or(ErrCode::Unmatched)?;

        let mut acc = Accumulator::new(Radix::HEX, T::MAX);
        if let Some(d) = Radix::HEX.digit(first) {
            acc.push(d);
        }
        if let Some(cap) = cap.as_deref_mut() {
            cap.push_char(first);
        }
        acc.scan(src, Radix::HEX, Some(T::HEX_DIGITS), |c| {
            if let Some(cap) = cap.as_deref_mut() {
                cap.push_char(c);
            }
        });

        if acc.count() < T::HEX_DIGITS {
            return Err(ErrCode::Incomplete);
        }
        if let Some(cap) = cap {
            cap.push_value(Value::Unsigned(acc.value()));
        }
        Ok(())
    }
}
