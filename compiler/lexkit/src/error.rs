//! Match outcomes and tokenize errors.
//!
//! Three layers:
//! - [`ErrCode`]: what a term reports. `Unmatched` is control flow ("try the
//!   next alternative"); every other code is a hard failure.
//! - [`Error`] / [`LocatedError`]: what the driver reports, a code plus the
//!   failing binding's description, tagged with where the attempt started.
//! - [`BuildError`]: a term was assembled wrongly. Returned once by the
//!   fallible constructors, never from the scanning hot path.

use std::borrow::Cow;
use std::fmt;

use lexkit_core::LineCol;

/// Why a term did not succeed.
///
/// Success is `Ok(())`; see [`Match`](crate::Match).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrCode {
    /// The term does not apply here. The only code that permits trying a
    /// sibling alternative.
    Unmatched,
    /// Nothing recognizable at this position.
    Unexpected,
    /// A required element is missing.
    Expected,
    /// An opening delimiter has no close before end of input.
    Unterminated,
    /// A committed sequence stopped partway.
    Incomplete,
    /// A delimiter lacks its counterpart.
    Unpaired,
    /// Structurally matched, semantically wrong (bad escape, lone surrogate).
    Invalid,
    /// A numeric literal exceeds its target width.
    Overflow,
}

impl ErrCode {
    /// Lowercase word used in rendered messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrCode::Unmatched => "unmatched",
            ErrCode::Unexpected => "unexpected",
            ErrCode::Expected => "expected",
            ErrCode::Unterminated => "unterminated",
            ErrCode::Incomplete => "incomplete",
            ErrCode::Unpaired => "unpaired",
            ErrCode::Invalid => "invalid",
            ErrCode::Overflow => "overflow",
        }
    }

    /// True for every code except `Unmatched`.
    #[inline]
    pub fn is_hard(self) -> bool {
        self != ErrCode::Unmatched
    }
}

impl fmt::Display for ErrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hard failure with the description of what was being recognized.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{code} {what}")]
pub struct Error {
    pub code: ErrCode,
    pub what: Cow<'static, str>,
}

impl Error {
    pub fn new(code: ErrCode, what: impl Into<Cow<'static, str>>) -> Self {
        Error {
            code,
            what: what.into(),
        }
    }

    /// No binding applied.
    pub fn unexpected_content() -> Self {
        Error::new(ErrCode::Unexpected, "content")
    }

    /// Strict decoding hit a byte sequence that is not UTF-8.
    pub fn invalid_utf8() -> Self {
        Error::new(ErrCode::Invalid, "utf-8 sequence")
    }
}

/// An [`Error`] at the line/column where the failed attempt began.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("[{loc}] {error}")]
pub struct LocatedError {
    #[source]
    pub error: Error,
    pub loc: LineCol,
}

impl LocatedError {
    pub fn new(error: Error, loc: LineCol) -> Self {
        LocatedError { error, loc }
    }

    #[inline]
    pub fn code(&self) -> ErrCode {
        self.error.code
    }

    /// One-based line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.loc.line()
    }

    /// One-based column.
    #[inline]
    pub fn column(&self) -> u32 {
        self.loc.column()
    }
}

/// A term was assembled from invalid configuration.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum BuildError {
    #[error("literal alternative list is empty")]
    NoAlternatives,
    #[error("literal alternative is empty")]
    EmptyAlternative,
    #[error("unsupported radix {0} (expected 2..=36)")]
    UnsupportedRadix(u32),
    #[error("surrogate pair decoder needs a non-empty second prefix")]
    EmptySecondPrefix,
}
