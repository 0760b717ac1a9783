//! Per-kind facts shared by the emitters.
//!
//! Size constants come from the runtime crate, so a bound folded into
//! generated code is the one the runtime itself uses.

use jsongen_core::{Record, Scalar, ScalarKind, SequenceOf, TypeNode};
use jsongen_runtime::{FixedSize, bytes_len_size, escaped_len, fixed_size_of};

use crate::context::Place;

fn fixed_kind(kind: &ScalarKind) -> Option<FixedSize> {
    let fixed = match kind {
        ScalarKind::Bool => FixedSize::Bool,
        ScalarKind::Int => FixedSize::Int,
        ScalarKind::Int8 => FixedSize::Int8,
        ScalarKind::Int16 => FixedSize::Int16,
        ScalarKind::Int32 => FixedSize::Int32,
        ScalarKind::Int64 => FixedSize::Int64,
        ScalarKind::Uint => FixedSize::Uint,
        ScalarKind::Uint8 => FixedSize::Uint8,
        ScalarKind::Uint16 => FixedSize::Uint16,
        ScalarKind::Uint32 => FixedSize::Uint32,
        ScalarKind::Uint64 => FixedSize::Uint64,
        ScalarKind::Byte => FixedSize::Byte,
        ScalarKind::Time => FixedSize::Time,
        _ => return None,
    };
    Some(fixed)
}

/// Kind-level constant bound, if the kind has one.
pub(crate) fn kind_size(kind: &ScalarKind) -> Option<usize> {
    fixed_kind(kind).map(fixed_size_of)
}

pub(crate) const NULL_SIZE: usize = fixed_size_of(FixedSize::Null);

/// Brackets plus separators for `n` slots.
pub(crate) fn container_overhead(n: usize) -> usize {
    2 + n.saturating_sub(1)
}

/// Constant part of a record: delimiters, separators and, in named mode,
/// every `"tag":` prefix.
pub(crate) fn record_overhead(record: &Record) -> usize {
    let mut size = container_overhead(record.fields.len());
    if !record.encode_as_array {
        size += record
            .fields
            .iter()
            .map(|f| escaped_len(&f.tag) + 3)
            .sum::<usize>();
    }
    size
}

/// A sequence of raw octets, encoded as one base64 payload.
pub(crate) fn is_byte_payload(seq: &SequenceOf) -> bool {
    matches!(
        seq.element.as_ref(),
        TypeNode::Scalar(Scalar {
            kind: ScalarKind::Byte,
            shim: None
        })
    )
}

/// Encoded size of a node when it does not depend on the value.
///
/// Scalars with a kind-level constant, fixed arrays and records built
/// only from such nodes, and optionals of those.
pub(crate) fn fixed_size(node: &TypeNode) -> Option<usize> {
    match node {
        TypeNode::Scalar(s) => kind_size(&s.kind),
        TypeNode::Sequence(seq) => {
            let n = seq.fixed_len?;
            if is_byte_payload(seq) {
                return Some(bytes_len_size(n));
            }
            let element = fixed_size(&seq.element)?;
            Some(container_overhead(n) + n * element)
        }
        TypeNode::Record(r) => {
            let mut size = record_overhead(r);
            for field in &r.fields {
                size += fixed_size(&field.ty)?;
            }
            Some(size)
        }
        TypeNode::Optional(inner) => fixed_size(inner).map(|n| n.max(NULL_SIZE)),
        TypeNode::Map(_) => None,
    }
}

/// Condition under which an omit-when-empty field is written.
///
/// `None` means the field is never omitted: fixed arrays, records, named
/// types, timestamps, extensions and shimmed scalars.
pub(crate) fn non_empty(place: &Place, node: &TypeNode) -> Option<String> {
    let p = place.by_val();
    let cond = match node {
        TypeNode::Scalar(Scalar { shim: Some(_), .. }) => return None,
        TypeNode::Scalar(Scalar { kind, .. }) => match kind {
            ScalarKind::Bool => p,
            ScalarKind::Int
            | ScalarKind::Int8
            | ScalarKind::Int16
            | ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::Uint
            | ScalarKind::Uint8
            | ScalarKind::Uint16
            | ScalarKind::Uint32
            | ScalarKind::Uint64
            | ScalarKind::Byte => format!("{p} != 0"),
            ScalarKind::Float32 | ScalarKind::Float64 => format!("{p} != 0.0"),
            ScalarKind::Complex64 | ScalarKind::Complex128 | ScalarKind::Number => {
                format!("!{}.is_zero()", place.expr())
            }
            ScalarKind::String | ScalarKind::Bytes | ScalarKind::Raw => {
                format!("!{}.is_empty()", place.expr())
            }
            ScalarKind::Any => format!("!{}.is_null()", place.expr()),
            ScalarKind::Time | ScalarKind::Extension | ScalarKind::Named(_) => return None,
        },
        TypeNode::Sequence(SequenceOf {
            fixed_len: Some(_),
            ..
        })
        | TypeNode::Record(_) => return None,
        TypeNode::Sequence(_) | TypeNode::Map(_) => format!("!{}.is_empty()", place.expr()),
        TypeNode::Optional(_) => format!("{}.is_some()", place.expr()),
    };
    Some(cond)
}

/// Runtime function encoding a scalar kind, and whether it is fallible.
pub(crate) enum Appender {
    /// `append_x(out, value)`.
    ByValue(&'static str, bool),
    /// `append_x(out, &value)`.
    ByRef(&'static str, bool),
    /// `EncodeJson::encode_json(&value, out)?`.
    Trait,
}

pub(crate) fn appender(kind: &ScalarKind) -> Appender {
    match kind {
        ScalarKind::Bool => Appender::ByValue("append_bool", false),
        ScalarKind::Int => Appender::ByValue("append_int", false),
        ScalarKind::Int8 => Appender::ByValue("append_i8", false),
        ScalarKind::Int16 => Appender::ByValue("append_i16", false),
        ScalarKind::Int32 => Appender::ByValue("append_i32", false),
        ScalarKind::Int64 => Appender::ByValue("append_i64", false),
        ScalarKind::Uint => Appender::ByValue("append_uint", false),
        ScalarKind::Uint8 => Appender::ByValue("append_u8", false),
        ScalarKind::Uint16 => Appender::ByValue("append_u16", false),
        ScalarKind::Uint32 => Appender::ByValue("append_u32", false),
        ScalarKind::Uint64 => Appender::ByValue("append_u64", false),
        ScalarKind::Byte => Appender::ByValue("append_byte", false),
        ScalarKind::Float32 => Appender::ByValue("append_f32", true),
        ScalarKind::Float64 => Appender::ByValue("append_f64", true),
        ScalarKind::Complex64 => Appender::ByValue("append_complex64", true),
        ScalarKind::Complex128 => Appender::ByValue("append_complex128", true),
        ScalarKind::String => Appender::ByRef("append_string", false),
        ScalarKind::Bytes => Appender::ByRef("append_bytes", false),
        ScalarKind::Time => Appender::ByRef("append_time", true),
        ScalarKind::Number => Appender::ByValue("append_number", true),
        ScalarKind::Raw => Appender::ByRef("append_raw", false),
        ScalarKind::Any => Appender::ByRef("append_dynamic", true),
        ScalarKind::Extension | ScalarKind::Named(_) => Appender::Trait,
    }
}

/// Runtime reader returning the decoded value, for kinds that have one.
///
/// Kinds without a reader decode in place through `DecodeJson` or
/// `read_dynamic`.
pub(crate) fn reader(kind: &ScalarKind) -> Option<&'static str> {
    let name = match kind {
        ScalarKind::Bool => "read_bool",
        ScalarKind::Int => "read_int",
        ScalarKind::Int8 => "read_i8",
        ScalarKind::Int16 => "read_i16",
        ScalarKind::Int32 => "read_i32",
        ScalarKind::Int64 => "read_i64",
        ScalarKind::Uint => "read_uint",
        ScalarKind::Uint8 => "read_u8",
        ScalarKind::Uint16 => "read_u16",
        ScalarKind::Uint32 => "read_u32",
        ScalarKind::Uint64 => "read_u64",
        ScalarKind::Byte => "read_byte",
        ScalarKind::Float32 => "read_f32",
        ScalarKind::Float64 => "read_f64",
        ScalarKind::Complex64 => "read_complex64",
        ScalarKind::Complex128 => "read_complex128",
        ScalarKind::String => "read_string",
        ScalarKind::Bytes => "read_bytes",
        ScalarKind::Time => "read_time",
        ScalarKind::Number => "read_number",
        ScalarKind::Raw => "read_raw",
        ScalarKind::Extension | ScalarKind::Any | ScalarKind::Named(_) => return None,
    };
    Some(name)
}
