//! Dynamic values whose shape is only known at run time.
//!
//! Encoding looks for the native capability first: a value that carries
//! its own jsongen routines is delegated to. Plain JSON values fall back to
//! `serde_json`.

use std::fmt;

use crate::error::{DecodeError, EncodeError};
use crate::lexer::Lexer;

/// A value that knows how to write itself, with optional extra capabilities.
pub trait NativeJson: fmt::Debug + Send + Sync {
    fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), EncodeError>;

    /// Size bound, when the value can compute one.
    fn size_hint(&self) -> Option<usize> {
        None
    }

    /// Decode in place. Returns `false` if the value cannot be decoded
    /// into, in which case the generic fallback is used.
    fn decode_json(&mut self, _lexer: &mut Lexer<'_>) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub enum Dynamic {
    #[default]
    Null,
    Value(serde_json::Value),
    Native(Box<dyn NativeJson>),
}

impl Dynamic {
    pub fn native<T: NativeJson + 'static>(value: T) -> Self {
        Self::Native(Box::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(serde_json::Value::Null))
    }
}

impl From<serde_json::Value> for Dynamic {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            value => Self::Value(value),
        }
    }
}

/// Native values have no structural identity and never compare equal.
impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }
}

/// Read a dynamic value into `target`.
pub fn read_dynamic(l: &mut Lexer<'_>, target: &mut Dynamic) {
    if !l.ok() {
        return;
    }
    if let Dynamic::Native(native) = target {
        if native.decode_json(l) {
            return;
        }
    }
    if l.is_null() {
        l.skip();
        *target = Dynamic::Null;
        return;
    }
    let raw = l.raw();
    if !l.ok() {
        return;
    }
    match serde_json::from_slice::<serde_json::Value>(raw) {
        Ok(value) => *target = Dynamic::from(value),
        Err(e) => l.add_error(DecodeError::Dynamic(e)),
    }
}
