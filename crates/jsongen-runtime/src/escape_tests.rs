use crate::escape::{escape, escape_bytes_into, escaped_len};

fn esc(s: &str) -> String {
    String::from_utf8(escape(s)).unwrap()
}

#[test]
fn plain_ascii_is_copied() {
    assert_eq!(esc("hello world"), "hello world");
    assert_eq!(esc(""), "");
}

#[test]
fn two_character_escapes() {
    assert_eq!(esc("tab\tquote\""), r#"tab\tquote\""#);
    assert_eq!(esc("a\\b"), r"a\\b");
    assert_eq!(esc("line\r\n"), r"line\r\n");
}

#[test]
fn control_bytes_use_unicode_escape() {
    assert_eq!(esc("\u{0}"), r"\u0000");
    assert_eq!(esc("\u{1f}x"), r"\u001fx");
    assert_eq!(esc("\u{8}"), r"\u0008");
}

#[test]
fn multibyte_text_passes_through() {
    assert_eq!(esc("héllo ✓ 🦀"), "héllo ✓ 🦀");
}

#[test]
fn script_separators_are_escaped() {
    assert_eq!(esc("a\u{2028}b\u{2029}c"), r"a\u2028b\u2029c");
}

#[test]
fn invalid_utf8_becomes_replacement_escape() {
    let mut out = Vec::new();
    escape_bytes_into(&mut out, b"ok\xffok\xe2\x82");
    assert_eq!(out, br"ok\ufffdok\ufffd\ufffd");
}

#[test]
fn escaped_len_matches_escape() {
    let samples = [
        "",
        "plain",
        "tab\tquote\"",
        "\u{0}\u{1}\u{2}",
        "日本語",
        "\u{2028}",
        "mixed \\ \" \n é \u{7f}",
    ];
    for s in samples {
        assert_eq!(escaped_len(s), escape(s).len(), "{s:?}");
    }
}

#[test]
fn escaping_is_deterministic() {
    let s = "repeat \t \u{2029} \"";
    assert_eq!(escape(s), escape(s));
}
