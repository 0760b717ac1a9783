//! Numbers whose width is decided at run time.

use crate::error::EncodeError;
use crate::lexer::Lexer;
use crate::read::read_number;
use crate::write::{append_number, size_number};
use crate::{DecodeJson, EncodeJson, SizeJson};

/// An integer or float that keeps the width it was built with.
///
/// Floats are always written with a fractional part or an exponent, so a
/// decoded integer token is never mistaken for a float. Decoding cannot
/// tell `f32` from `f64` and yields [`Number::Float64`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
}

impl Default for Number {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl Number {
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(v) => v == 0,
            Self::Uint(v) => v == 0,
            Self::Float32(v) => v == 0.0,
            Self::Float64(v) => v == 0.0,
        }
    }

    /// The value widened to `f64`; large integers lose precision.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Uint(v) => v as f64,
            Self::Float32(v) => f64::from(v),
            Self::Float64(v) => v,
        }
    }

    /// Classify a JSON number token: integers that fit `i64` first, then
    /// `u64`, then `f64`.
    pub fn parse_token(token: &str) -> Option<Self> {
        if !token.contains(['.', 'e', 'E']) {
            if let Ok(v) = token.parse::<i64>() {
                return Some(Self::Int(v));
            }
            if let Ok(v) = token.parse::<u64>() {
                return Some(Self::Uint(v));
            }
        }
        token.parse::<f64>().ok().map(Self::Float64)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl SizeJson for Number {
    fn size_json(&self) -> usize {
        size_number(*self)
    }
}

impl EncodeJson for Number {
    fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        append_number(out, *self)
    }
}

impl DecodeJson for Number {
    fn decode_json(&mut self, l: &mut Lexer<'_>) {
        *self = read_number(l);
    }
}
