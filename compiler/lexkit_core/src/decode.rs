//! On-demand UTF-8 decoding.
//!
//! The cursor never validates the whole buffer up front. Each read decodes
//! exactly one codepoint from the current position, so a bad byte sequence
//! only matters once scanning reaches it.

/// Result of decoding the codepoint at the front of a byte slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A valid scalar value and its width in bytes.
    Char(char, usize),
    /// An invalid sequence spanning `len` bytes: the offending lead byte plus
    /// every continuation byte that immediately follows it.
    Invalid(usize),
    /// The slice is empty.
    End,
}

/// Returns the number of bytes in the UTF-8 character starting with `byte`.
///
/// - `0xC0..=0xDF`: 2 bytes
/// - `0xE0..=0xEF`: 3 bytes
/// - `0xF0..=0xF7`: 4 bytes
/// - Everything else (ASCII, continuation, invalid): 1 byte
#[inline]
fn utf8_char_width(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Decode the codepoint at the front of `bytes`.
///
/// Overlong encodings, encoded surrogates and values above U+10FFFF are
/// rejected the same way truncated sequences are.
pub fn decode_utf8(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::End;
    };
    if lead.is_ascii() {
        return Decoded::Char(char::from(lead), 1);
    }

    let width = utf8_char_width(lead);
    if width > 1 {
        if let Some(seq) = bytes.get(..width) {
            if let Some(c) = std::str::from_utf8(seq).ok().and_then(|s| s.chars().next()) {
                return Decoded::Char(c, width);
            }
        }
    }

    // Zip through the rest of the invalid span.
    let tail = bytes[1..].iter().take_while(|&&b| is_continuation(b)).count();
    Decoded::Invalid(1 + tail)
}
