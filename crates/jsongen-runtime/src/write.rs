//! Primitive encoders and size bounds.
//!
//! Every scalar kind has an `append_*` function writing its JSON text and
//! either a `*_SIZE` constant or a value-dependent `size_*` function. The
//! code generator reads the same constants through [`fixed_size_of`], so a
//! bound folded into generated code can never drift from the runtime.

use std::io::Write as _;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::complex::{Complex64, Complex128};
use crate::dynamic::Dynamic;
use crate::error::EncodeError;
use crate::escape::{escape_into, escaped_len};
use crate::number::Number;
use crate::raw::Raw;
use crate::timestamp::Timestamp;

/// Standard alphabet, no padding on output, padding tolerated on input.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub const NULL_SIZE: usize = 4;
pub const BOOL_SIZE: usize = 5;

pub const U8_SIZE: usize = 3;
pub const U16_SIZE: usize = 5;
pub const U32_SIZE: usize = 10;
pub const U64_SIZE: usize = 20;
pub const USIZE_SIZE: usize = U64_SIZE;
pub const I8_SIZE: usize = U8_SIZE + 1;
pub const I16_SIZE: usize = U16_SIZE + 1;
pub const I32_SIZE: usize = U32_SIZE + 1;
pub const I64_SIZE: usize = U64_SIZE + 1;
pub const ISIZE_SIZE: usize = I64_SIZE;
pub const BYTE_SIZE: usize = U8_SIZE;

/// `"2005-08-09T18:31:42.123456789-03:00"` including quotes.
pub const TIME_SIZE: usize = 37;

/// Placeholder for dynamic values that expose no size of their own.
pub const GUESS_SIZE: usize = 10;

/// Size-table entries, keyed the way the code generator names scalar kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixedSize {
    Null,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Byte,
    Time,
}

/// Kind-level constant size bound.
pub const fn fixed_size_of(kind: FixedSize) -> usize {
    match kind {
        FixedSize::Null => NULL_SIZE,
        FixedSize::Bool => BOOL_SIZE,
        FixedSize::Int => ISIZE_SIZE,
        FixedSize::Int8 => I8_SIZE,
        FixedSize::Int16 => I16_SIZE,
        FixedSize::Int32 => I32_SIZE,
        FixedSize::Int64 => I64_SIZE,
        FixedSize::Uint => USIZE_SIZE,
        FixedSize::Uint8 => U8_SIZE,
        FixedSize::Uint16 => U16_SIZE,
        FixedSize::Uint32 => U32_SIZE,
        FixedSize::Uint64 => U64_SIZE,
        FixedSize::Byte => BYTE_SIZE,
        FixedSize::Time => TIME_SIZE,
    }
}

/// Encoded length of an `n`-byte payload: quotes plus unpadded base64.
pub const fn bytes_len_size(n: usize) -> usize {
    2 + (n * 4).div_ceil(3)
}

pub fn size_bytes(b: &[u8]) -> usize {
    bytes_len_size(b.len())
}

pub fn size_string(s: &str) -> usize {
    2 + escaped_len(s)
}

/// Bound for the positional decimal form of a float with at most
/// `sig_digits` significant digits.
fn float_size(v: f64, sig_digits: usize) -> usize {
    if !v.is_finite() {
        return 0;
    }
    if v == 0.0 {
        return 2;
    }
    let exp = v.abs().log10().floor() as i64;
    let (int_digits, lead_zeros) = if exp >= 0 {
        (exp as usize + 1, 0)
    } else {
        (1, (-exp - 1) as usize)
    };
    // sign + integer part + '.' + leading zeros + digits, one digit of slack
    // for log10 rounding near powers of ten
    1 + int_digits + 1 + lead_zeros + sig_digits + 1
}

pub fn size_f32(v: f32) -> usize {
    float_size(f64::from(v), 9)
}

pub fn size_f64(v: f64) -> usize {
    float_size(v, 17)
}

pub fn size_complex64(c: Complex64) -> usize {
    3 + size_f32(c.re) + size_f32(c.im)
}

pub fn size_complex128(c: Complex128) -> usize {
    3 + size_f64(c.re) + size_f64(c.im)
}

pub fn size_number(n: Number) -> usize {
    match n {
        Number::Int(_) => I64_SIZE,
        Number::Uint(_) => U64_SIZE,
        Number::Float32(v) => size_f32(v),
        Number::Float64(v) => size_f64(v),
    }
}

pub fn size_raw(r: &Raw) -> usize {
    size_bytes(r.as_bytes())
}

/// Delegates to a native size hint when the value exposes one.
///
/// Anything else counts as [`GUESS_SIZE`], which may be less than the
/// encoded length.
pub fn size_dynamic(v: &Dynamic) -> usize {
    match v {
        Dynamic::Null => NULL_SIZE,
        Dynamic::Native(native) => native.size_hint().unwrap_or(GUESS_SIZE),
        Dynamic::Value(_) => GUESS_SIZE,
    }
}

pub fn append_null(out: &mut Vec<u8>) {
    out.extend_from_slice(b"null");
}

pub fn append_bool(out: &mut Vec<u8>, v: bool) {
    out.extend_from_slice(if v { b"true" } else { b"false" });
}

pub fn append_u64(out: &mut Vec<u8>, mut v: u64) {
    let mut buf = [0u8; 20];
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    out.extend_from_slice(&buf[i..]);
}

pub fn append_i64(out: &mut Vec<u8>, v: i64) {
    if v < 0 {
        out.push(b'-');
    }
    append_u64(out, v.unsigned_abs());
}

pub fn append_int(out: &mut Vec<u8>, v: isize) {
    append_i64(out, v as i64);
}

pub fn append_i8(out: &mut Vec<u8>, v: i8) {
    append_i64(out, i64::from(v));
}

pub fn append_i16(out: &mut Vec<u8>, v: i16) {
    append_i64(out, i64::from(v));
}

pub fn append_i32(out: &mut Vec<u8>, v: i32) {
    append_i64(out, i64::from(v));
}

pub fn append_uint(out: &mut Vec<u8>, v: usize) {
    append_u64(out, v as u64);
}

pub fn append_u8(out: &mut Vec<u8>, v: u8) {
    append_u64(out, u64::from(v));
}

pub fn append_byte(out: &mut Vec<u8>, v: u8) {
    append_u8(out, v);
}

pub fn append_u16(out: &mut Vec<u8>, v: u16) {
    append_u64(out, u64::from(v));
}

pub fn append_u32(out: &mut Vec<u8>, v: u32) {
    append_u64(out, u64::from(v));
}

/// Shortest round-tripping digits, never in exponent form.
pub fn append_f32(out: &mut Vec<u8>, v: f32) -> Result<(), EncodeError> {
    if !v.is_finite() {
        return Err(EncodeError::NonFiniteFloat(f64::from(v)));
    }
    write!(out, "{v}")?;
    Ok(())
}

/// Shortest round-tripping digits, never in exponent form.
pub fn append_f64(out: &mut Vec<u8>, v: f64) -> Result<(), EncodeError> {
    if !v.is_finite() {
        return Err(EncodeError::NonFiniteFloat(v));
    }
    write!(out, "{v}")?;
    Ok(())
}

pub fn append_complex64(out: &mut Vec<u8>, c: Complex64) -> Result<(), EncodeError> {
    out.push(b'[');
    append_f32(out, c.re)?;
    out.push(b',');
    append_f32(out, c.im)?;
    out.push(b']');
    Ok(())
}

pub fn append_complex128(out: &mut Vec<u8>, c: Complex128) -> Result<(), EncodeError> {
    out.push(b'[');
    append_f64(out, c.re)?;
    out.push(b',');
    append_f64(out, c.im)?;
    out.push(b']');
    Ok(())
}

pub fn append_string(out: &mut Vec<u8>, s: &str) {
    out.reserve(s.len() + 2);
    out.push(b'"');
    escape_into(out, s);
    out.push(b'"');
}

/// Quoted unpadded base64.
pub fn append_bytes(out: &mut Vec<u8>, b: &[u8]) {
    let len = bytes_len_size(b.len()) - 2;
    out.push(b'"');
    let start = out.len();
    out.resize(start + len, 0);
    if BASE64.encode_slice(b, &mut out[start..]).is_err() {
        out.truncate(start);
        out.extend_from_slice(BASE64.encode(b).as_bytes());
    }
    out.push(b'"');
}

pub fn append_raw(out: &mut Vec<u8>, r: &Raw) {
    append_bytes(out, r.as_bytes());
}

/// Floats keep a fractional part so they decode back as floats.
pub fn append_number(out: &mut Vec<u8>, n: Number) -> Result<(), EncodeError> {
    let start = out.len();
    match n {
        Number::Int(v) => append_i64(out, v),
        Number::Uint(v) => append_u64(out, v),
        Number::Float32(v) => append_f32(out, v)?,
        Number::Float64(v) => append_f64(out, v)?,
    }
    let float = matches!(n, Number::Float32(_) | Number::Float64(_));
    if float && !out[start..].contains(&b'.') {
        out.extend_from_slice(b".0");
    }
    Ok(())
}

pub fn append_time(out: &mut Vec<u8>, t: &Timestamp) -> Result<(), EncodeError> {
    let text = t.to_rfc3339()?;
    out.push(b'"');
    out.extend_from_slice(text.as_bytes());
    out.push(b'"');
    Ok(())
}

/// Native encoders win; anything else goes through `serde_json`.
pub fn append_dynamic(out: &mut Vec<u8>, v: &Dynamic) -> Result<(), EncodeError> {
    match v {
        Dynamic::Null => {
            append_null(out);
            Ok(())
        }
        Dynamic::Native(native) => native.encode_json(out),
        Dynamic::Value(value) => {
            serde_json::to_writer(&mut *out, value)?;
            Ok(())
        }
    }
}
