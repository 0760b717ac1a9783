//! Opaque bytes carried through as a base64 payload.

use crate::error::EncodeError;
use crate::lexer::Lexer;
use crate::read::read_raw;
use crate::write::{append_raw, size_raw};
use crate::{DecodeJson, EncodeJson, SizeJson};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Raw(pub Vec<u8>);

impl Raw {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Raw {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Raw {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl SizeJson for Raw {
    fn size_json(&self) -> usize {
        size_raw(self)
    }
}

impl EncodeJson for Raw {
    fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        append_raw(out, self);
        Ok(())
    }
}

impl DecodeJson for Raw {
    fn decode_json(&mut self, l: &mut Lexer<'_>) {
        *self = read_raw(l);
    }
}
