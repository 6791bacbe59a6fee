//! Per-attempt output sink.
//!
//! One `Capture` is allocated per tokenize call and reset before every
//! binding attempt, so an abandoned attempt never leaks text or values into
//! the next one. Reset keeps the allocations.

use std::borrow::Cow;

/// A derived value pushed alongside the captured text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// Result of an unsigned integer term, widened to `u64`.
    Unsigned(u64),
}

impl Value {
    pub fn as_unsigned(self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(v),
        }
    }
}

/// Text recognized by a term plus any values it derived.
///
/// Text is kept as bytes: byte escapes such as `\xff` may produce content
/// that is not UTF-8.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capture {
    text: Vec<u8>,
    values: Vec<Value>,
}

impl Capture {
    pub fn new() -> Self {
        Capture::default()
    }

    /// Clear both channels, keeping capacity.
    pub fn reset(&mut self) {
        self.text.clear();
        self.values.clear();
    }

    #[inline]
    pub fn push_char(&mut self, c: char) {
        let mut utf8 = [0; 4];
        self.text.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.text.extend_from_slice(s.as_bytes());
    }

    /// Append one raw byte, unvalidated.
    #[inline]
    pub fn push_byte(&mut self, b: u8) {
        self.text.push(b);
    }

    #[inline]
    pub fn push_value(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Captured bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.text
    }

    /// Captured text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.text).ok()
    }

    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// First value as an unsigned integer.
    pub fn unsigned(&self) -> Option<u64> {
        self.values.first().and_then(|v| v.as_unsigned())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.values.is_empty()
    }
}

#[cfg(test)]
mod tests;
