use super::*;
use pretty_assertions::assert_eq;

#[test]
fn text_channel_appends() {
    let mut cap = Capture::new();
    cap.push_str("ab");
    cap.push_char('é');
    cap.push_byte(b'!');
    assert_eq!(cap.as_str(), Some("abé!"));
    assert_eq!(cap.bytes(), "abé!".as_bytes());
}

#[test]
fn raw_bytes_may_be_invalid_utf8() {
    let mut cap = Capture::new();
    cap.push_byte(0xFF);
    assert_eq!(cap.as_str(), None);
    assert_eq!(cap.text_lossy(), "\u{FFFD}");
}

#[test]
fn values_keep_order() {
    let mut cap = Capture::new();
    cap.push_value(Value::Unsigned(42));
    cap.push_value(Value::Unsigned(7));
    assert_eq!(cap.values(), &[Value::Unsigned(42), Value::Unsigned(7)]);
    assert_eq!(cap.unsigned(), Some(42));
}

#[test]
fn reset_clears_both_channels() {
    let mut cap = Capture::new();
    cap.push_str("residue");
    cap.push_value(Value::Unsigned(1));
    cap.reset();
    assert!(cap.is_empty());
    assert_eq!(cap.unsigned(), None);
    assert_eq!(cap.as_str(), Some(""));
}
