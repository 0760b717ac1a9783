//! Scalar decoders.
//!
//! One `read_*` function per scalar kind, so generated code can map a kind
//! to a reader without special cases. Readers never fail outright: errors
//! land on the [`Lexer`] and a default value is returned.

use crate::complex::{Complex64, Complex128};
use crate::error::DecodeError;
use crate::lexer::Lexer;
use crate::number::Number;
use crate::raw::Raw;
use crate::timestamp::{Timestamp, parse_timestamp};

pub use crate::dynamic::read_dynamic;

pub fn read_bool(l: &mut Lexer<'_>) -> bool {
    l.bool()
}

pub fn read_int(l: &mut Lexer<'_>) -> isize {
    l.int()
}

pub fn read_i8(l: &mut Lexer<'_>) -> i8 {
    l.i8()
}

pub fn read_i16(l: &mut Lexer<'_>) -> i16 {
    l.i16()
}

pub fn read_i32(l: &mut Lexer<'_>) -> i32 {
    l.i32()
}

pub fn read_i64(l: &mut Lexer<'_>) -> i64 {
    l.i64()
}

pub fn read_uint(l: &mut Lexer<'_>) -> usize {
    l.uint()
}

pub fn read_u8(l: &mut Lexer<'_>) -> u8 {
    l.u8()
}

pub fn read_byte(l: &mut Lexer<'_>) -> u8 {
    l.u8()
}

pub fn read_u16(l: &mut Lexer<'_>) -> u16 {
    l.u16()
}

pub fn read_u32(l: &mut Lexer<'_>) -> u32 {
    l.u32()
}

pub fn read_u64(l: &mut Lexer<'_>) -> u64 {
    l.u64()
}

pub fn read_f32(l: &mut Lexer<'_>) -> f32 {
    l.f32()
}

pub fn read_f64(l: &mut Lexer<'_>) -> f64 {
    l.f64()
}

pub fn read_complex64(l: &mut Lexer<'_>) -> Complex64 {
    l.delim(b'[');
    let re = l.f32();
    l.want_comma();
    let im = l.f32();
    l.delim(b']');
    Complex64::new(re, im)
}

pub fn read_complex128(l: &mut Lexer<'_>) -> Complex128 {
    l.delim(b'[');
    let re = l.f64();
    l.want_comma();
    let im = l.f64();
    l.delim(b']');
    Complex128::new(re, im)
}

pub fn read_string(l: &mut Lexer<'_>) -> String {
    l.string()
}

pub fn read_bytes(l: &mut Lexer<'_>) -> Vec<u8> {
    l.bytes()
}

pub fn read_raw(l: &mut Lexer<'_>) -> Raw {
    Raw(l.bytes())
}

/// Integers come back as `Int` or `Uint`, anything with a fraction or an
/// exponent as `Float64`.
pub fn read_number(l: &mut Lexer<'_>) -> Number {
    let offset = l.offset();
    let token = l.number_literal();
    if !l.ok() {
        return Number::default();
    }
    match Number::parse_token(token) {
        Some(n) => n,
        None => {
            l.add_error(DecodeError::InvalidNumber {
                offset,
                token: token.to_string(),
            });
            Number::default()
        }
    }
}

/// Decode a base64 payload into a fixed-length buffer.
///
/// The payload must decode to exactly `target.len()` bytes; otherwise
/// [`DecodeError::ArrayLength`] is recorded and `target` is left alone.
pub fn read_exact_bytes(l: &mut Lexer<'_>, target: &mut [u8]) {
    let bytes = l.bytes();
    if !l.ok() {
        return;
    }
    if bytes.len() != target.len() {
        l.add_error(DecodeError::ArrayLength {
            wanted: target.len(),
            got: bytes.len(),
        });
        return;
    }
    target.copy_from_slice(&bytes);
}

/// `null` and the empty string both decode to [`Timestamp::ZERO`].
pub fn read_time(l: &mut Lexer<'_>) -> Timestamp {
    if l.is_null() {
        l.skip();
        return Timestamp::ZERO;
    }
    let text = l.string();
    if !l.ok() {
        return Timestamp::ZERO;
    }
    match parse_timestamp(&text) {
        Ok(t) => t,
        Err(source) => {
            l.add_error(DecodeError::Timestamp {
                input: text,
                source,
            });
            Timestamp::ZERO
        }
    }
}
