//! Overflow-checked digit accumulation.
//!
//! Every extractor consumes the full run of digits it is allowed to, even
//! after the value has overflowed, so the cursor always ends where the
//! literal ends. Overflow is a flag on the result, not a reason to stop.

use lexkit_core::Source;

use crate::{BuildError, ErrCode};

/// A numeric base in `2..=36`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Radix(u32);

impl Radix {
    pub const BINARY: Radix = Radix(2);
    pub const OCTAL: Radix = Radix(8);
    pub const DECIMAL: Radix = Radix(10);
    pub const HEX: Radix = Radix(16);

    pub fn new(radix: u32) -> Result<Self, BuildError> {
        if (2..=36).contains(&radix) {
            Ok(Radix(radix))
        } else {
            Err(BuildError::UnsupportedRadix(radix))
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Value of `c` as a digit in this base. Letters are case-insensitive.
    #[inline]
    pub fn digit(self, c: char) -> Option<u32> {
        c.to_digit(self.0)
    }

    #[inline]
    pub fn is_digit(self, c: char) -> bool {
        c.is_digit(self.0)
    }
}

/// Unsigned integer types a numeric term can target.
pub trait Unsigned: Copy + Into<u64> {
    /// Largest representable value, widened.
    const MAX: u64;
    /// Hex digits needed to spell every value: two per byte.
    const HEX_DIGITS: usize;

    /// Narrow a value already known to be `<= Self::MAX`.
    fn from_u64(value: u64) -> Self;
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Unsigned for $ty {
            const MAX: u64 = <$ty>::MAX as u64;
            const HEX_DIGITS: usize = 2 * std::mem::size_of::<$ty>();

            #[allow(
                clippy::cast_possible_truncation,
                reason = "callers only narrow values bounded by Self::MAX"
            )]
            #[inline]
            fn from_u64(value: u64) -> Self {
                value as $ty
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64);

/// Running value of a digit sequence with a ceiling.
///
/// Before each multiply-then-add step the accumulator checks whether the
/// current value exceeds `max / radix` (the multiply would overflow) or the
/// product exceeds `max - digit` (the add would). Once either holds the
/// value freezes and `overflow` stays set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accumulator {
    radix: u64,
    max: u64,
    value: u64,
    count: usize,
    overflow: bool,
}

impl Accumulator {
    pub fn new(radix: Radix, max: u64) -> Self {
        Accumulator {
            radix: u64::from(radix.get()),
            max,
            value: 0,
            count: 0,
            overflow: false,
        }
    }

    pub fn push(&mut self, digit: u32) {
        let digit = u64::from(digit);
        self.count += 1;
        if self.overflow {
            return;
        }
        let Some(room) = self.max.checked_sub(digit) else {
            self.overflow = true;
            return;
        };
        if self.value > self.max / self.radix || self.value * self.radix > room {
            self.overflow = true;
            return;
        }
        self.value = self.value * self.radix + digit;
    }

    /// Accumulated value; meaningless once `overflow()` is set.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Digits pushed so far, including those past an overflow.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Consume up to `max_digits` more digits (`None`: unbounded), calling
    /// `on_digit` with each consumed codepoint.
    pub fn scan(
        &mut self,
        src: &mut Source<'_>,
        radix: Radix,
        max_digits: Option<usize>,
        mut on_digit: impl FnMut(char),
    ) {
        while max_digits.map_or(true, |max| self.count < max) {
            let Some(c) = src.fetch(|c| radix.is_digit(c)) else {
                break;
            };
            if let Some(d) = radix.digit(c) {
                self.push(d);
            }
            on_digit(c);
        }
    }
}

/// Result of a bounded digit extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits {
    pub value: u64,
    pub count: usize,
    pub overflow: bool,
}

impl From<Accumulator> for Digits {
    fn from(acc: Accumulator) -> Self {
        Digits {
            value: acc.value,
            count: acc.count,
            overflow: acc.overflow,
        }
    }
}

fn extract(src: &mut Source<'_>, radix: Radix, max_digits: Option<usize>) -> Digits {
    let mut acc = Accumulator::new(radix, u64::from(u32::MAX));
    acc.scan(src, radix, max_digits, |_| {});
    acc.into()
}

/// Up to `max_digits` hex digits (`None`: unbounded) into a 32-bit value.
pub fn extract_hex(src: &mut Source<'_>, max_digits: Option<usize>) -> Digits {
    extract(src, Radix::HEX, max_digits)
}

/// Up to `max_digits` octal digits (`None`: unbounded) into a 32-bit value.
pub fn extract_octal(src: &mut Source<'_>, max_digits: Option<usize>) -> Digits {
    extract(src, Radix::OCTAL, max_digits)
}

/// A maximal run of digits into `T`.
///
/// `Unmatched` if there is no digit at the cursor; `Overflow` if the value
/// does not fit `T`, with every digit of the run consumed regardless.
pub fn extract_unsigned<T: Unsigned>(src: &mut Source<'_>, radix: Radix) -> Result<T, ErrCode> {
    let mut acc = Accumulator::new(radix, T::MAX);
    acc.scan(src, radix, None, |_| {});
    if acc.count() == 0 {
        Err(ErrCode::Unmatched)
    } else if acc.overflow() {
        Err(ErrCode::Overflow)
    } else {
        Ok(T::from_u64(acc.value()))
    }
}

#[cfg(test)]
mod tests;
