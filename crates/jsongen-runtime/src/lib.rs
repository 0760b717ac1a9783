//! Runtime support for jsongen-generated JSON routines.
//!
//! Generated `SizeJson`/`EncodeJson`/`DecodeJson` impls call into this crate:
//! - `escape` - the string escaping scanner
//! - `write` - `append_*` encoders and the size-bound table
//! - `read` - `read_*` decoders over the [`Lexer`]
//! - `lexer` - streaming token reader with accumulated errors
//! - `timestamp`, `extension`, `dynamic`, `complex`, `number`, `raw` - value
//!   types for the non-native scalar kinds

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod complex;
pub mod dynamic;
mod error;
pub mod escape;
pub mod extension;
pub mod lexer;
pub mod number;
pub mod raw;
pub mod read;
pub mod timestamp;
pub mod write;

#[cfg(test)]
mod escape_tests;

pub use complex::{Complex64, Complex128};
pub use dynamic::{Dynamic, NativeJson};
pub use error::{BoxError, DecodeError, EncodeError};
pub use escape::{escape, escape_bytes_into, escape_into, escaped_len};
pub use extension::Extension;
pub use lexer::Lexer;
pub use number::Number;
pub use raw::Raw;
pub use read::*;
pub use timestamp::Timestamp;
pub use write::*;

/// Upper bound on the number of bytes a value occupies when encoded.
///
/// The bound is a capacity hint and is not required to be exact. It is
/// never smaller than the encoded length, except for dynamic values that
/// expose no size of their own: those count as
/// [`GUESS_SIZE`](write::GUESS_SIZE) bytes whatever they hold.
pub trait SizeJson {
    fn size_json(&self) -> usize;
}

/// Appends the JSON encoding of a value to a caller-owned buffer.
///
/// On error the buffer holds a valid prefix of the output, but the value
/// has not been fully written.
pub trait EncodeJson {
    fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), EncodeError>;
}

/// Populates a value from a streaming [`Lexer`].
///
/// Errors are recorded on the lexer rather than returned; callers inspect
/// [`Lexer::error`] once the whole value has been read.
pub trait DecodeJson {
    fn decode_json(&mut self, lexer: &mut Lexer<'_>);
}

/// Encode a value into a fresh buffer pre-sized with [`SizeJson::size_json`].
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, EncodeError>
where
    T: SizeJson + EncodeJson + ?Sized,
{
    let mut out = Vec::with_capacity(value.size_json());
    value.encode_json(&mut out)?;
    Ok(out)
}

/// Decode a complete JSON document into `target`.
///
/// Anything but whitespace after the value is rejected.
pub fn decode_into<T>(target: &mut T, data: &[u8]) -> Result<(), DecodeError>
where
    T: DecodeJson + ?Sized,
{
    let mut lexer = Lexer::new(data);
    target.decode_json(&mut lexer);
    lexer.consumed();
    lexer.into_result()
}

/// Decode a complete JSON document into a fresh `T::default()`.
pub fn from_slice<T>(data: &[u8]) -> Result<T, DecodeError>
where
    T: DecodeJson + Default,
{
    let mut value = T::default();
    decode_into(&mut value, data)?;
    Ok(value)
}
