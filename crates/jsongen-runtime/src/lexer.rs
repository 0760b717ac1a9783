//! Streaming JSON token reader consumed by generated decode routines.
//!
//! Errors do not interrupt the read sequence. The first error is kept,
//! every later read returns a default value, and [`Lexer::is_delim`]
//! answers `true` so that generated loops unwind on their own. Callers
//! look at the error once, after the whole value has been read.

use base64::Engine as _;

use crate::error::DecodeError;
use crate::write::BASE64;

/// Maximum nesting accepted by [`Lexer::skip_recursive`].
pub const MAX_DEPTH: usize = 512;

pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
    error: Option<DecodeError>,
    /// A `,` was just consumed; a closing delimiter now is a trailing comma.
    after_comma: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            error: None,
            after_comma: false,
        }
    }

    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&DecodeError> {
        self.error.as_ref()
    }

    /// Byte offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Record an error. Only the first one is kept.
    pub fn add_error(&mut self, err: DecodeError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    pub fn into_result(self) -> Result<(), DecodeError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Require that only whitespace remains.
    pub fn consumed(&mut self) {
        if !self.ok() {
            return;
        }
        if self.peek().is_some() {
            self.syntax("trailing data after value");
        }
    }

    fn syntax(&mut self, reason: &'static str) {
        self.add_error(DecodeError::Syntax {
            offset: self.pos,
            reason,
        });
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.get(self.pos) {
            if !matches!(c, b' ' | b'\t' | b'\n' | b'\r') {
                break;
            }
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.data.get(self.pos).copied()
    }

    /// Position at the start of a value. `None` if in error or at EOF.
    fn begin_value(&mut self) -> Option<u8> {
        if !self.ok() {
            return None;
        }
        self.after_comma = false;
        let c = self.peek();
        if c.is_none() {
            self.add_error(DecodeError::UnexpectedEof);
        }
        c
    }

    /// Consume the structural delimiter `c`.
    pub fn delim(&mut self, c: u8) {
        if !self.ok() {
            return;
        }
        match self.peek() {
            Some(b) if b == c => {
                if self.after_comma && matches!(c, b']' | b'}') {
                    self.syntax("trailing comma");
                    return;
                }
                self.after_comma = false;
                self.pos += 1;
            }
            Some(_) => self.add_error(DecodeError::ExpectedDelimiter {
                offset: self.pos,
                expected: c as char,
            }),
            None => self.add_error(DecodeError::UnexpectedEof),
        }
    }

    /// Whether the next token is `c`. Always `true` once in error.
    pub fn is_delim(&mut self, c: u8) -> bool {
        if !self.ok() {
            return true;
        }
        self.peek() == Some(c)
    }

    pub fn want_colon(&mut self) {
        if !self.ok() {
            return;
        }
        match self.peek() {
            Some(b':') => self.pos += 1,
            Some(_) => self.add_error(DecodeError::ExpectedDelimiter {
                offset: self.pos,
                expected: ':',
            }),
            None => self.add_error(DecodeError::UnexpectedEof),
        }
    }

    /// Consume a `,` separator; a closing delimiter is left for the caller.
    pub fn want_comma(&mut self) {
        if !self.ok() {
            return;
        }
        match self.peek() {
            Some(b',') => {
                self.pos += 1;
                self.after_comma = true;
            }
            Some(b']' | b'}') => {}
            Some(_) => self.syntax("expected ',' or closing delimiter"),
            None => self.add_error(DecodeError::UnexpectedEof),
        }
    }

    pub fn is_null(&mut self) -> bool {
        if !self.ok() {
            return false;
        }
        self.skip_ws();
        self.data[self.pos..].starts_with(b"null")
    }

    /// Skip the next value, typically a `null` seen through [`Lexer::is_null`].
    pub fn skip(&mut self) {
        self.skip_recursive();
    }

    /// Skip the next value including everything nested inside it.
    pub fn skip_recursive(&mut self) {
        if self.begin_value().is_some() {
            self.skip_value(0);
        }
    }

    /// The raw text of the next value.
    pub fn raw(&mut self) -> &'a [u8] {
        if self.begin_value().is_none() {
            return &[];
        }
        let start = self.pos;
        self.skip_value(0);
        if !self.ok() {
            return &[];
        }
        let data = self.data;
        &data[start..self.pos]
    }

    fn skip_value(&mut self, depth: usize) {
        if depth > MAX_DEPTH {
            self.add_error(DecodeError::DepthLimit(MAX_DEPTH));
            return;
        }
        let Some(c) = self.peek() else {
            self.add_error(DecodeError::UnexpectedEof);
            return;
        };
        self.after_comma = false;
        match c {
            b'"' => {
                self.parse_string();
            }
            b'{' => {
                self.pos += 1;
                while self.ok() && self.peek() != Some(b'}') {
                    self.parse_string();
                    self.want_colon();
                    self.skip_value(depth + 1);
                    self.want_comma();
                }
                self.delim(b'}');
            }
            b'[' => {
                self.pos += 1;
                while self.ok() && self.peek() != Some(b']') {
                    self.skip_value(depth + 1);
                    self.want_comma();
                }
                self.delim(b']');
            }
            b't' => self.literal(b"true"),
            b'f' => self.literal(b"false"),
            b'n' => self.literal(b"null"),
            b'-' | b'0'..=b'9' => {
                self.number_token();
            }
            _ => self.syntax("unexpected character"),
        }
        self.after_comma = false;
    }

    fn literal(&mut self, word: &'static [u8]) {
        if self.data[self.pos..].starts_with(word) {
            self.pos += word.len();
        } else {
            self.syntax("invalid literal");
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Scan a number token. Returns `None` and records an error if malformed.
    fn number_token(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if self.data.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        if self.digits() == 0 {
            self.syntax("expected digit");
            return None;
        }
        if self.data.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            if self.digits() == 0 {
                self.syntax("expected digit after decimal point");
                return None;
            }
        }
        if matches!(self.data.get(self.pos), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.data.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.syntax("expected digit in exponent");
                return None;
            }
        }
        let data = self.data;
        std::str::from_utf8(&data[start..self.pos]).ok()
    }

    fn number<T: std::str::FromStr + Default>(&mut self) -> T {
        let Some(c) = self.begin_value() else {
            return T::default();
        };
        if c != b'-' && !c.is_ascii_digit() {
            self.syntax("expected number");
            return T::default();
        }
        let start = self.pos;
        let Some(token) = self.number_token() else {
            return T::default();
        };
        match token.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                self.add_error(DecodeError::InvalidNumber {
                    offset: start,
                    token: token.to_string(),
                });
                T::default()
            }
        }
    }

    /// Text of the next number token, or `""` after an error.
    pub fn number_literal(&mut self) -> &'a str {
        let Some(c) = self.begin_value() else {
            return "";
        };
        if c != b'-' && !c.is_ascii_digit() {
            self.syntax("expected number");
            return "";
        }
        self.number_token().unwrap_or_default()
    }

    pub fn int(&mut self) -> isize {
        self.number()
    }

    pub fn i8(&mut self) -> i8 {
        self.number()
    }

    pub fn i16(&mut self) -> i16 {
        self.number()
    }

    pub fn i32(&mut self) -> i32 {
        self.number()
    }

    pub fn i64(&mut self) -> i64 {
        self.number()
    }

    pub fn uint(&mut self) -> usize {
        self.number()
    }

    pub fn u8(&mut self) -> u8 {
        self.number()
    }

    pub fn u16(&mut self) -> u16 {
        self.number()
    }

    pub fn u32(&mut self) -> u32 {
        self.number()
    }

    pub fn u64(&mut self) -> u64 {
        self.number()
    }

    pub fn f32(&mut self) -> f32 {
        self.number()
    }

    pub fn f64(&mut self) -> f64 {
        self.number()
    }

    pub fn bool(&mut self) -> bool {
        match self.begin_value() {
            Some(b't') => {
                self.literal(b"true");
                self.ok()
            }
            Some(b'f') => {
                self.literal(b"false");
                false
            }
            Some(_) => {
                self.syntax("expected boolean");
                false
            }
            None => false,
        }
    }

    pub fn string(&mut self) -> String {
        if self.begin_value().is_none() {
            return String::new();
        }
        self.parse_string().unwrap_or_default()
    }

    /// A base64 payload in a JSON string.
    pub fn bytes(&mut self) -> Vec<u8> {
        let text = self.string();
        if !self.ok() {
            return Vec::new();
        }
        match BASE64.decode(text.as_bytes()) {
            Ok(b) => b,
            Err(e) => {
                self.add_error(DecodeError::Base64(e));
                Vec::new()
            }
        }
    }

    fn hex4(&mut self) -> Option<u32> {
        let digits = self.data.get(self.pos..self.pos + 4)?;
        let mut v = 0u32;
        for &d in digits {
            v = v * 16 + (d as char).to_digit(16)?;
        }
        self.pos += 4;
        Some(v)
    }

    /// Parse a string token at the current position (which must be `"`).
    fn parse_string(&mut self) -> Option<String> {
        if self.peek() != Some(b'"') {
            self.syntax("expected string");
            return None;
        }
        let start = self.pos;
        self.pos += 1;
        let mut buf: Vec<u8> = Vec::new();

        loop {
            let run_start = self.pos;
            while let Some(&c) = self.data.get(self.pos) {
                if c == b'"' || c == b'\\' || c < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            buf.extend_from_slice(&self.data[run_start..self.pos]);

            match self.data.get(self.pos) {
                None => {
                    self.add_error(DecodeError::UnexpectedEof);
                    return None;
                }
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    let Some(&e) = self.data.get(self.pos) else {
                        self.add_error(DecodeError::UnexpectedEof);
                        return None;
                    };
                    self.pos += 1;
                    match e {
                        b'"' => buf.push(b'"'),
                        b'\\' => buf.push(b'\\'),
                        b'/' => buf.push(b'/'),
                        b'b' => buf.push(0x08),
                        b'f' => buf.push(0x0C),
                        b'n' => buf.push(b'\n'),
                        b'r' => buf.push(b'\r'),
                        b't' => buf.push(b'\t'),
                        b'u' => {
                            let ch = self.unicode_escape()?;
                            let mut tmp = [0u8; 4];
                            buf.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
                        }
                        _ => {
                            self.syntax("invalid escape");
                            return None;
                        }
                    }
                }
                Some(_) => {
                    self.syntax("control character in string");
                    return None;
                }
            }
        }

        match String::from_utf8(buf) {
            Ok(s) => Some(s),
            Err(_) => {
                self.add_error(DecodeError::InvalidUtf8 { offset: start });
                None
            }
        }
    }

    /// The code point of a `\u` escape, after the `u`. Unpaired surrogates
    /// decode to U+FFFD.
    fn unicode_escape(&mut self) -> Option<char> {
        let Some(hi) = self.hex4() else {
            self.syntax("invalid unicode escape");
            return None;
        };
        if !(0xD800..0xDC00).contains(&hi) {
            return Some(char::from_u32(hi).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        if self.data[self.pos..].starts_with(b"\\u") {
            let save = self.pos;
            self.pos += 2;
            match self.hex4() {
                Some(lo) if (0xDC00..0xE000).contains(&lo) => {
                    let cp = 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00);
                    return Some(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                _ => self.pos = save,
            }
        }
        Some(char::REPLACEMENT_CHARACTER)
    }
}
