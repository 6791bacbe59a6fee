//! Delimited forms: bracketed content, read-until scans and quoted literals.
//!
//! Once the opening delimiter has matched, running out of content before
//! the closing one is `Unterminated`, never `Unmatched`.

use lexkit_core::Source;

use crate::{BoxTerm, Capture, ErrCode, Match, Term};

/// What ends a read-until scan.
pub enum Terminator {
    /// `"\n"`, `"\r\n"` or end of input. The line break is consumed but not
    /// captured.
    LineEnd,
    /// An explicit term, attempted before every content codepoint.
    Term(BoxTerm),
}

impl Terminator {
    /// Terminate on exact text, e.g. `"*/"`. Empty text means
    /// [`Terminator::LineEnd`].
    pub fn literal(text: impl Into<Box<str>>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Terminator::LineEnd
        } else {
            Terminator::Term(crate::literal(text).boxed())
        }
    }
}

enum Body {
    /// Explicit content terms, then the terminator.
    Content { terms: Vec<BoxTerm>, terminator: BoxTerm },
    /// Any codepoints until the terminator.
    Scan(Terminator),
}

/// Prefix, body, terminator. Only the body is captured.
pub struct Between {
    prefix: BoxTerm,
    body: Body,
}

impl Between {
    /// Match `prefix`, then each of `content` (capturing), then `terminator`.
    ///
    /// After the prefix, an `Unmatched` content term or terminator becomes
    /// `Unterminated`; other failures inside the content pass through.
    pub fn new(
        prefix: impl Term + 'static,
        terminator: impl Term + 'static,
        content: impl IntoIterator<Item = BoxTerm>,
    ) -> Self {
        Between {
            prefix: prefix.boxed(),
            body: Body::Content {
                terms: content.into_iter().collect(),
                terminator: terminator.boxed(),
            },
        }
    }

    /// Match `prefix`, then capture codepoints one at a time until
    /// `terminator` matches.
    ///
    /// Reaching end of input is only a success for [`Terminator::LineEnd`].
    pub fn until(prefix: impl Term + 'static, terminator: Terminator) -> Self {
        Between {
            prefix: prefix.boxed(),
            body: Body::Scan(terminator),
        }
    }
}

fn unterminated_if_unmatched(code: ErrCode) -> ErrCode {
    match code {
        ErrCode::Unmatched => ErrCode::Unterminated,
        other => other,
    }
}

/// Consume a line break if one is next. End of input counts as one.
fn line_end(src: &mut Source<'_>) -> bool {
    src.done() || src.hop('\n') || src.leap("\r\n")
}

impl Term for Between {
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        self.prefix.attempt(src, None)?;
        match &self.body {
            Body::Content { terms, terminator } => {
                for term in terms {
                    term.attempt(src, cap.as_deref_mut())
                        .map_err(unterminated_if_unmatched)?;
                }
                terminator
                    .attempt(src, None)
                    .map_err(unterminated_if_unmatched)
            }
            Body::Scan(Terminator::LineEnd) => loop {
                if line_end(src) {
                    return Ok(());
                }
                // Only a strict-mode fault stops a non-empty source here.
                let c = src.fetch_any().ok_or(ErrCode::Unterminated)?;
                if let Some(cap) = cap.as_deref_mut() {
                    cap.push_char(c);
                }
            },
            Body::Scan(Terminator::Term(terminator)) => loop {
                match terminator.attempt(src, None) {
                    Ok(()) => return Ok(()),
                    Err(ErrCode::Unmatched) => {}
                    Err(code) => return Err(code),
                }
                let c = src.fetch_any().ok_or(ErrCode::Unterminated)?;
                if let Some(cap) = cap.as_deref_mut() {
                    cap.push_char(c);
                }
            },
        }
    }
}

/// Quoted literal whose closing quote repeats the opening one.
///
/// Any codepoint accepted by `quote` opens the literal; the same codepoint
/// closes it. Between them, `escape` (if any) is tried first, then a single
/// codepoint accepted by `content`. Anything else, including end of input,
/// is `Unterminated`. Only the unescaped content is captured.
pub struct Quoted<Q, C> {
    quote: Q,
    content: C,
    escape: Option<BoxTerm>,
}

pub fn quoted<Q, C>(quote: Q, content: C) -> Quoted<Q, C>
where
    Q: Fn(char) -> bool,
    C: Fn(char) -> bool,
{
    Quoted {
        quote,
        content,
        escape: None,
    }
}

impl<Q, C> Quoted<Q, C> {
    /// Decode escapes with `escape` inside the literal.
    #[must_use]
    pub fn with_escape(mut self, escape: impl Term + 'static) -> Self {
        self.escape = Some(escape.boxed());
        self
    }
}

impl<Q, C> Term for Quoted<Q, C>
where
    Q: Fn(char) -> bool,
    C: Fn(char) -> bool,
{
    fn attempt(&self, src: &mut Source<'_>, mut cap: Option<&mut Capture>) -> Match {
        let quote = src.fetch(&self.quote).ok_or(ErrCode::Unmatched)?;
        loop {
            if let Some(escape) = &self.escape {
                match escape.attempt(src, cap.as_deref_mut()) {
                    Ok(()) => continue,
                    Err(ErrCode::Unmatched) => {}
                    Err(code) => return Err(code),
                }
            }
            if src.hop(quote) {
                return Ok(());
            }
            let c = src.fetch(&self.content).ok_or(ErrCode::Unterminated)?;
            if let Some(cap) = cap.as_deref_mut() {
                cap.push_char(c);
            }
        }
    }
}
