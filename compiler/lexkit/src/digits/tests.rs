use super::*;
use pretty_assertions::assert_eq;

fn unsigned<T: Unsigned>(input: &str, radix: Radix) -> (Result<T, ErrCode>, usize) {
    let mut src = Source::new(input.as_bytes());
    let result = extract_unsigned::<T>(&mut src, radix);
    (result, src.offset())
}

// === Radix ===

#[test]
fn radix_bounds() {
    assert_eq!(Radix::new(2), Ok(Radix::BINARY));
    assert_eq!(Radix::new(36).map(Radix::get), Ok(36));
    assert_eq!(Radix::new(1), Err(BuildError::UnsupportedRadix(1)));
    assert_eq!(Radix::new(37), Err(BuildError::UnsupportedRadix(37)));
}

#[test]
fn radix_digits_case_insensitive() {
    assert_eq!(Radix::HEX.digit('F'), Some(15));
    assert_eq!(Radix::HEX.digit('f'), Some(15));
    assert_eq!(Radix::DECIMAL.digit('a'), None);
    assert!(Radix::OCTAL.is_digit('7'));
    assert!(!Radix::OCTAL.is_digit('8'));
}

// === extract_unsigned ===

#[test]
fn decimal_fits() {
    assert_eq!(unsigned::<u32>("4294967295", Radix::DECIMAL), (Ok(u32::MAX), 10));
    assert_eq!(unsigned::<u8>("255 ", Radix::DECIMAL), (Ok(255), 3));
}

#[test]
fn overflow_consumes_whole_run() {
    assert_eq!(
        unsigned::<u32>("4294967296", Radix::DECIMAL),
        (Err(ErrCode::Overflow), 10)
    );
    assert_eq!(unsigned::<u8>("256x", Radix::DECIMAL), (Err(ErrCode::Overflow), 3));
    assert_eq!(
        unsigned::<u64>("18446744073709551616", Radix::DECIMAL),
        (Err(ErrCode::Overflow), 20)
    );
}

#[test]
fn no_digits_is_unmatched() {
    assert_eq!(unsigned::<u32>("xyz", Radix::DECIMAL), (Err(ErrCode::Unmatched), 0));
    assert_eq!(unsigned::<u32>("", Radix::HEX), (Err(ErrCode::Unmatched), 0));
}

#[test]
fn hex_max_u64() {
    assert_eq!(
        unsigned::<u64>("ffffffffffffffff", Radix::HEX),
        (Ok(u64::MAX), 16)
    );
}

// === Bounded extractors ===

#[test]
fn extract_hex_respects_limit() {
    let mut src = Source::new(b"abcdef");
    let digits = extract_hex(&mut src, Some(4));
    assert_eq!(
        digits,
        Digits {
            value: 0xabcd,
            count: 4,
            overflow: false
        }
    );
    assert_eq!(src.offset(), 4);
}

#[test]
fn extract_hex_unbounded_overflows_past_32_bits() {
    let mut src = Source::new(b"123456789;");
    let digits = extract_hex(&mut src, None);
    assert_eq!((digits.count, digits.overflow), (9, true));
    assert_eq!(src.offset(), 9);
}

#[test]
fn extract_octal_stops_at_non_digit() {
    let mut src = Source::new(b"1789");
    let digits = extract_octal(&mut src, Some(3));
    assert_eq!((digits.value, digits.count), (0o17, 2));
    assert_eq!(src.offset(), 2);
}

#[test]
fn accumulator_freezes_after_overflow() {
    let mut acc = Accumulator::new(Radix::DECIMAL, 99);
    for d in [9, 9, 1, 2] {
        acc.push(d);
    }
    assert!(acc.overflow());
    assert_eq!((acc.value(), acc.count()), (99, 4));
}

#[test]
fn accumulator_digit_above_ceiling_overflows() {
    let mut acc = Accumulator::new(Radix::HEX, 5);
    acc.push(9);
    assert!(acc.overflow());
    assert_eq!((acc.value(), acc.count()), (0, 1));

    let mut acc = Accumulator::new(Radix::DECIMAL, 0);
    acc.push(0);
    assert!(!acc.overflow());
    acc.push(1);
    assert!(acc.overflow());
}

#[test]
fn unsigned_constants() {
    assert_eq!(<u8 as Unsigned>::HEX_DIGITS, 2);
    assert_eq!(<u16 as Unsigned>::HEX_DIGITS, 4);
    assert_eq!(<u32 as Unsigned>::HEX_DIGITS, 8);
    assert_eq!(<u64 as Unsigned>::MAX, u64::MAX);
}

// === Property tests ===

#[allow(clippy::disallowed_types, reason = "proptest macros internally use Arc")]
mod proptest_accumulator {
    use super::*;
    use proptest::prelude::*;

    fn checked(digits: &[u32], radix: u64, max: u64) -> Option<u64> {
        digits.iter().try_fold(0u64, |acc, &d| {
            acc.checked_mul(radix)
                .and_then(|v| v.checked_add(u64::from(d)))
                .filter(|&v| v <= max)
        })
    }

    proptest! {
        #[test]
        fn matches_checked_arithmetic(
            radix in 2u32..=36,
            raw in prop::collection::vec(0u32..36, 0..30),
            max in prop_oneof![
                0u64..40,
                Just(u64::from(u8::MAX)),
                Just(u64::from(u32::MAX)),
                Just(u64::MAX),
            ],
        ) {
            let digits: Vec<u32> = raw.into_iter().map(|d| d % radix).collect();
            let mut acc = Accumulator::new(Radix(radix), max);
            for &d in &digits {
                acc.push(d);
            }
            let expected = checked(&digits, u64::from(radix), max);
            prop_assert_eq!(acc.overflow(), expected.is_none());
            if let Some(value) = expected {
                prop_assert_eq!(acc.value(), value);
            }
            prop_assert_eq!(acc.count(), digits.len());
        }

        #[test]
        fn decimal_matches_std_parse(n in any::<u64>(), extra in 0u8..3) {
            let mut text = n.to_string();
            for _ in 0..extra {
                text.push('9');
            }
            let (result, offset) = unsigned::<u64>(&text, Radix::DECIMAL);
            prop_assert_eq!(offset, text.len());
            match text.parse::<u64>() {
                Ok(v) => prop_assert_eq!(result, Ok(v)),
                Err(_) => prop_assert_eq!(result, Err(ErrCode::Overflow)),
            }
        }
    }
}
