//! Opaque extension payload: a type tag plus raw bytes.

use crate::error::EncodeError;
use crate::lexer::Lexer;
use crate::write::{I8_SIZE, append_bytes, append_i8, size_bytes};
use crate::{DecodeJson, EncodeJson, SizeJson};

/// Encoded as `{"type":<i8>,"data":"<base64>"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extension {
    pub kind: i8,
    pub data: Vec<u8>,
}

impl Extension {
    pub fn new(kind: i8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }
}

impl SizeJson for Extension {
    fn size_json(&self) -> usize {
        20 + I8_SIZE + size_bytes(&self.data)
    }
}

impl EncodeJson for Extension {
    fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(b"{\"type\":");
        append_i8(out, self.kind);
        out.extend_from_slice(b",\"data\":");
        append_bytes(out, &self.data);
        out.push(b'}');
        Ok(())
    }
}

impl DecodeJson for Extension {
    fn decode_json(&mut self, l: &mut Lexer<'_>) {
        let mut decoded = Extension::default();
        l.delim(b'{');
        while !l.is_delim(b'}') {
            let field = l.string();
            l.want_colon();
            match field.as_str() {
                "type" => decoded.kind = l.i8(),
                "data" => decoded.data = l.bytes(),
                _ => l.skip_recursive(),
            }
            l.want_comma();
        }
        l.delim(b'}');
        if l.ok() {
            *self = decoded;
        }
    }
}
