use super::*;
use crate::{
    any_of, codepoint_fn, literal, one_or_more, optional, start_continue, uint, Between, Escaped,
    HexByteRun, Radix, Substitution, Terminator,
};
use pretty_assertions::assert_eq;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Hex,
    Dec,
    Ident,
    Punct,
    Space,
    Comment,
    Escape,
}

fn whitespace() -> Binding<Kind> {
    Binding::new(
        Kind::Space,
        one_or_more(codepoint_fn(char::is_whitespace)),
        "white space",
    )
}

fn bindings() -> Vec<Binding<Kind>> {
    vec![
        Binding::new(Kind::Hex, uint::<u64>("0x", Radix::HEX), "hex literal"),
        Binding::new(Kind::Dec, uint::<u64>("", Radix::DECIMAL), "decimal literal"),
        Binding::new(
            Kind::Ident,
            start_continue(char::is_alphabetic, char::is_alphanumeric),
            "identifier",
        ),
        Binding::new(
            Kind::Comment,
            Between::until(literal("/*"), Terminator::literal("*/")),
            "multi-line comment",
        ),
        Binding::new(Kind::Punct, any_of(["+", "+=", "="]).unwrap(), "punctuation"),
        whitespace(),
    ]
}

fn kinds(input: &str, bindings: &[Binding<Kind>]) -> Result<Vec<(Kind, String)>, String> {
    let mut out = Vec::new();
    tokenize(input.as_bytes(), bindings, |kind, cap, _| {
        out.push((*kind, cap.text_lossy().into_owned()));
    })
    .map_err(|e| e.to_string())?;
    Ok(out)
}

// === Ordering ===

#[test]
fn earlier_binding_wins() {
    let tokens = kinds("0x1f 42", &bindings()).unwrap();
    assert_eq!(
        tokens,
        vec![
            (Kind::Hex, "1f".to_string()),
            (Kind::Space, " ".to_string()),
            (Kind::Dec, "42".to_string()),
        ]
    );
}

#[test]
fn decimal_space_hex() {
    let mut values = Vec::new();
    tokenize(b"42 0xff", &bindings(), |kind, cap, _| {
        values.push((*kind, cap.unsigned()));
    })
    .unwrap();
    assert_eq!(
        values,
        vec![
            (Kind::Dec, Some(42)),
            (Kind::Space, None),
            (Kind::Hex, Some(0xFF)),
        ]
    );
}

#[test]
fn lone_semicolon_is_unexpected() {
    let err = tokenize(b";", &bindings(), |_, _, _| {}).unwrap_err();
    assert_eq!(err.code(), ErrCode::Unexpected);
    assert_eq!((err.line(), err.column()), (1, 1));
    assert_eq!(err.to_string(), "[1:1] unexpected content");
}

#[test]
fn hex_prefix_without_digit_falls_through() {
    // `0x` with no hex digit does not apply; `0` is then a decimal and `x` an
    // identifier.
    let tokens = kinds("0xg", &bindings()).unwrap();
    assert_eq!(
        tokens,
        vec![
            (Kind::Dec, "0".to_string()),
            (Kind::Ident, "xg".to_string()),
        ]
    );
}

#[test]
fn punctuation_is_maximal() {
    let tokens = kinds("a+=b", &bindings()).unwrap();
    assert_eq!(tokens[1], (Kind::Punct, "+=".to_string()));
    assert_eq!(tokens.len(), 3);
}

#[test]
fn empty_input_yields_nothing() {
    assert_eq!(kinds("", &bindings()), Ok(Vec::new()));
}

// === Locations ===

#[test]
fn tokens_report_start_location() {
    let mut locs = Vec::new();
    tokenize(b"ab\n  cd", &bindings(), |_, _, loc| locs.push(loc.to_string())).unwrap();
    assert_eq!(locs, vec!["1:1", "1:3", "2:3"]);
}

#[test]
fn origin_offsets_locations() {
    let options = TokenizeOptions {
        origin: LineCol::new(4, 9),
        ..TokenizeOptions::default()
    };
    let mut locs = Vec::new();
    tokenize_with(b"a b", &bindings(), options, |_, _, loc| locs.push(loc)).unwrap();
    assert_eq!(locs, vec![LineCol::new(4, 9), LineCol::new(4, 10), LineCol::new(4, 11)]);
}

// === Failures ===

#[test]
fn nothing_applies() {
    assert_eq!(
        kinds("a ;", &bindings()),
        Err("[1:3] unexpected content".to_string())
    );
}

#[test]
fn hard_failure_names_the_binding() {
    assert_eq!(
        kinds("x\n /*abc", &bindings()),
        Err("[2:2] unterminated multi-line comment".to_string())
    );
}

#[test]
fn overflow_is_reported_at_literal_start() {
    let err = tokenize(b"1 18446744073709551616", &bindings(), |_, _, _| {}).unwrap_err();
    assert_eq!(err.code(), ErrCode::Overflow);
    assert_eq!((err.line(), err.column()), (1, 3));
    assert_eq!(err.error.what, "decimal literal");
}

#[test]
fn tokens_before_failure_are_delivered() {
    let mut seen = Vec::new();
    let result = tokenize(b"ab ;", &bindings(), |kind, _, _| seen.push(*kind));
    assert!(result.is_err());
    assert_eq!(seen, vec![Kind::Ident, Kind::Space]);
}

#[test]
fn escape_error_located_on_second_line() {
    let mut bindings = bindings();
    bindings.push(Binding::new(
        Kind::Escape,
        Escaped::new('\\').map('x', Substitution::term(HexByteRun)),
        "escape sequence",
    ));
    bindings.push(Binding::new(Kind::Punct, literal(";"), "semicolon"));
    assert_eq!(
        kinds("42\n\\xxyz;", &bindings),
        Err("[2:1] invalid escape sequence".to_string())
    );
}

#[test]
fn zero_width_match_does_not_count() {
    let bindings = vec![
        Binding::new(Kind::Space, optional(literal(" ")), "optional space"),
        Binding::new(Kind::Ident, one_or_more(codepoint_fn(char::is_alphabetic)), "word"),
    ];
    let tokens = kinds("ab", &bindings).unwrap();
    assert_eq!(tokens, vec![(Kind::Ident, "ab".to_string())]);

    assert_eq!(
        kinds("1", &bindings),
        Err("[1:1] unexpected content".to_string())
    );
}

/// Writes into the capture, then declines.
struct Scribble;

impl Term for Scribble {
    fn attempt(&self, _src: &mut Source<'_>, cap: Option<&mut Capture>) -> crate::Match {
        if let Some(cap) = cap {
            cap.push_str("junk");
            cap.push_value(Value::Unsigned(7));
        }
        Err(ErrCode::Unmatched)
    }
}

#[test]
fn capture_is_reset_between_attempts() {
    let bindings = vec![
        Binding::new(Kind::Ident, Scribble, "scribble"),
        Binding::new(Kind::Punct, literal("x"), "x"),
    ];
    let tokens = collect_tokens(b"x", &bindings).unwrap();
    assert_eq!(tokens[0].as_str(), Some("x"));
    assert!(tokens[0].values.is_empty());
}

// === UTF-8 policy ===

#[test]
fn lenient_utf8_replaces_invalid_bytes() {
    let bindings = vec![Binding::new(Kind::Ident, codepoint_fn(|_| true), "any")];
    let mut texts = Vec::new();
    tokenize(b"a\xffb", &bindings, |_, cap, _| {
        texts.push(cap.text_lossy().into_owned());
    })
    .unwrap();
    assert_eq!(texts, vec!["a", "\u{FFFD}", "b"]);
}

#[test]
fn strict_utf8_reports_the_fault() {
    let options = TokenizeOptions {
        utf8: Utf8Policy::Strict,
        ..TokenizeOptions::default()
    };
    let mut count = 0;
    let err = tokenize_with(b"ab\n c\xff", &bindings(), options, |_, _, _| count += 1)
        .unwrap_err();
    assert_eq!(err.to_string(), "[2:3] invalid utf-8 sequence");
    assert_eq!(count, 3);
}

// === collect_tokens ===

#[test]
fn collect_tokens_detaches_captures() {
    let tokens = collect_tokens(b"0xff+=1", &bindings()).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token {
                key: Kind::Hex,
                text: b"ff".to_vec(),
                values: vec![Value::Unsigned(255)],
                loc: LineCol::new(0, 0),
            },
            Token {
                key: Kind::Punct,
                text: b"+=".to_vec(),
                values: vec![],
                loc: LineCol::new(0, 4),
            },
            Token {
                key: Kind::Dec,
                text: b"1".to_vec(),
                values: vec![Value::Unsigned(1)],
                loc: LineCol::new(0, 6),
            },
        ]
    );
    assert_eq!(tokens[1].as_str(), Some("+="));
}

#[test]
fn binding_accessors() {
    let b = whitespace();
    assert_eq!(*b.key(), Kind::Space);
    assert_eq!(b.description(), "white space");
}
