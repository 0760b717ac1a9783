//! JSON string escaping.
//!
//! One scanner drives both the escaper and the length precomputation, so
//! [`escaped_len`] always agrees byte-for-byte with [`escape_into`].
//!
//! Policy:
//! - runs of printable ASCII other than `"` and `\` are copied verbatim
//! - `\t`, `\r`, `\n`, `\\`, `\"` use two-character escapes
//! - other control bytes become `\u00XX`
//! - U+2028 and U+2029 become `\u2028` / `\u2029` (safe inside `<script>`)
//! - a byte that does not start a valid UTF-8 sequence becomes `\ufffd`
//!   and the scanner advances by one byte

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Receives the scanner's output.
trait Sink {
    fn verbatim(&mut self, run: &[u8]);
    fn escaped(&mut self, seq: &[u8]);
}

impl Sink for Vec<u8> {
    #[inline]
    fn verbatim(&mut self, run: &[u8]) {
        self.extend_from_slice(run);
    }

    #[inline]
    fn escaped(&mut self, seq: &[u8]) {
        self.extend_from_slice(seq);
    }
}

struct Counter(usize);

impl Sink for Counter {
    #[inline]
    fn verbatim(&mut self, run: &[u8]) {
        self.0 += run.len();
    }

    #[inline]
    fn escaped(&mut self, seq: &[u8]) {
        self.0 += seq.len();
    }
}

#[inline]
fn is_plain(c: u8) -> bool {
    c >= 0x20 && c < 0x80 && c != b'"' && c != b'\\'
}

/// Width of the UTF-8 sequence starting at `s[0]`, if it is well formed.
fn decode_char(s: &[u8]) -> Option<(char, usize)> {
    let width = match s[0] {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let seq = s.get(..width)?;
    let ch = std::str::from_utf8(seq).ok()?.chars().next()?;
    Some((ch, width))
}

fn scan<S: Sink>(s: &[u8], sink: &mut S) {
    let mut start = 0;
    let mut i = 0;

    while i < s.len() {
        let c = s[i];
        if is_plain(c) {
            i += 1;
            continue;
        }

        if c < 0x80 {
            sink.verbatim(&s[start..i]);
            match c {
                b'\t' => sink.escaped(b"\\t"),
                b'\r' => sink.escaped(b"\\r"),
                b'\n' => sink.escaped(b"\\n"),
                b'\\' => sink.escaped(b"\\\\"),
                b'"' => sink.escaped(b"\\\""),
                _ => sink.escaped(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX[(c >> 4) as usize],
                    HEX[(c & 0xF) as usize],
                ]),
            }
            i += 1;
            start = i;
            continue;
        }

        match decode_char(&s[i..]) {
            None => {
                sink.verbatim(&s[start..i]);
                sink.escaped(b"\\ufffd");
                i += 1;
                start = i;
            }
            Some((ch @ ('\u{2028}' | '\u{2029}'), width)) => {
                sink.verbatim(&s[start..i]);
                sink.escaped(&[b'\\', b'u', b'2', b'0', b'2', HEX[(ch as u32 & 0xF) as usize]]);
                i += width;
                start = i;
            }
            Some((_, width)) => i += width,
        }
    }

    sink.verbatim(&s[start..]);
}

/// Append the escaped form of `s` (without surrounding quotes) to `out`.
pub fn escape_into(out: &mut Vec<u8>, s: &str) {
    scan(s.as_bytes(), out);
}

/// Like [`escape_into`], for byte strings that may not be valid UTF-8.
pub fn escape_bytes_into(out: &mut Vec<u8>, s: &[u8]) {
    scan(s, out);
}

/// Escape `s` into a fresh buffer.
pub fn escape(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

/// Exact length of the escaped form of `s`, without quotes.
pub fn escaped_len(s: &str) -> usize {
    let mut counter = Counter(0);
    scan(s.as_bytes(), &mut counter);
    counter.0
}
