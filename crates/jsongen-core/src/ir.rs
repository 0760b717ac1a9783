//! Type nodes.
//!
//! One tree per top-level type. Emitters dispatch over [`TypeNode`] with an
//! exhaustive match, so adding an emitter never touches this module.

use serde::{Deserialize, Serialize};

use crate::{IrError, Result};

/// A top-level type handed to the generator.
///
/// A `Record` root is addressed as `self`; any other root is a newtype
/// over the node's type and is addressed as `self.0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub type_name: String,
    pub node: TypeNode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNode {
    Record(Record),
    Map(MapOf),
    Sequence(SequenceOf),
    Optional(Box<TypeNode>),
    Scalar(Scalar),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Rust type name, used when the record needs a temporary.
    pub name: String,
    pub fields: Vec<Field>,
    /// Positional array encoding instead of named fields.
    #[serde(default)]
    pub encode_as_array: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Rust field identifier.
    pub name: String,
    /// Wire name.
    pub tag: String,
    #[serde(default)]
    pub omit_empty: bool,
    pub ty: TypeNode,
}

/// `HashMap<String, V>`. Only plain string keys are encodable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapOf {
    pub key: Box<TypeNode>,
    pub value: Box<TypeNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceOf {
    pub element: Box<TypeNode>,
    /// `[T; N]` when set, `Vec<T>` otherwise.
    #[serde(default)]
    pub fixed_len: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scalar {
    pub kind: ScalarKind,
    #[serde(default)]
    pub shim: Option<ConversionShim>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
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
    /// A raw octet. Sequences of bytes are a single base64 payload.
    Byte,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Bytes,
    Time,
    Extension,
    /// An integer or float whose width is only known at run time.
    Number,
    /// Opaque bytes passed through as a base64 payload.
    Raw,
    Any,
    /// A user type implementing the runtime traits itself.
    Named(String),
}

/// Converts between a user-facing type and the wire kind of a scalar.
///
/// `Cast` functions are infallible: `to_wire(&T) -> W`, `from_wire(W) -> T`.
/// `Convert` functions return `Result<_, E>` with `E` convertible into a
/// boxed error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionShim {
    pub type_name: String,
    pub to_wire: String,
    pub from_wire: String,
    #[serde(default)]
    pub mode: ShimMode,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShimMode {
    #[default]
    Cast,
    Convert,
}

impl Definition {
    pub fn new(type_name: impl Into<String>, node: TypeNode) -> Self {
        Self {
            type_name: type_name.into(),
            node,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the definition is addressed as `self` rather than `self.0`.
    pub fn is_record(&self) -> bool {
        matches!(self.node, TypeNode::Record(_))
    }

    pub fn validate(&self) -> Result<()> {
        self.node.validate()
    }
}

/// Parse a JSON array of definitions.
pub fn definitions_from_json(json: &str) -> Result<Vec<Definition>> {
    Ok(serde_json::from_str(json)?)
}

impl TypeNode {
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(Scalar { kind, shim: None })
    }

    pub fn optional(inner: TypeNode) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn vec(element: TypeNode) -> Self {
        Self::Sequence(SequenceOf {
            element: Box::new(element),
            fixed_len: None,
        })
    }

    pub fn array(element: TypeNode, len: usize) -> Self {
        Self::Sequence(SequenceOf {
            element: Box::new(element),
            fixed_len: Some(len),
        })
    }

    pub fn map(value: TypeNode) -> Self {
        Self::Map(MapOf {
            key: Box::new(Self::scalar(ScalarKind::String)),
            value: Box::new(value),
        })
    }

    /// Check tag uniqueness in every record of the tree.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Record(r) => r.validate(),
            Self::Map(m) => {
                m.key.validate()?;
                m.value.validate()
            }
            Self::Sequence(s) => s.element.validate(),
            Self::Optional(inner) => inner.validate(),
            Self::Scalar(_) => Ok(()),
        }
    }

    /// Rust spelling of the type; runtime types are qualified with `runtime`.
    pub fn rust_type(&self, runtime: &str) -> String {
        match self {
            Self::Record(r) => r.name.clone(),
            Self::Map(m) => format!(
                "::std::collections::HashMap<{}, {}>",
                m.key.rust_type(runtime),
                m.value.rust_type(runtime)
            ),
            Self::Sequence(SequenceOf {
                element,
                fixed_len: Some(n),
            }) => format!("[{}; {}]", element.rust_type(runtime), n),
            Self::Sequence(SequenceOf { element, .. }) => {
                format!("Vec<{}>", element.rust_type(runtime))
            }
            Self::Optional(inner) => format!("Option<{}>", inner.rust_type(runtime)),
            Self::Scalar(s) => s.rust_type(runtime),
        }
    }
}

impl Record {
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.tag.as_str()) {
                return Err(IrError::DuplicateTag {
                    record: self.name.clone(),
                    tag: field.tag.clone(),
                });
            }
            field.ty.validate()?;
        }
        Ok(())
    }
}

impl Scalar {
    /// The user-facing type: the shim's type if one applies.
    pub fn rust_type(&self, runtime: &str) -> String {
        match &self.shim {
            Some(shim) => shim.type_name.clone(),
            None => self.kind.rust_type(runtime),
        }
    }
}

impl ScalarKind {
    /// Directive spelling, as in `shim Celsius as:float64`.
    pub fn name(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Byte => "byte",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Time => "time",
            Self::Extension => "extension",
            Self::Number => "number",
            Self::Raw => "raw",
            Self::Any => "any",
            Self::Named(name) => name,
        }
    }

    /// Inverse of [`ScalarKind::name`] for the built-in kinds.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint" => Self::Uint,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "byte" => Self::Byte,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "complex64" => Self::Complex64,
            "complex128" => Self::Complex128,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            "time" => Self::Time,
            "extension" => Self::Extension,
            "number" => Self::Number,
            "raw" => Self::Raw,
            "any" => Self::Any,
            _ => return None,
        };
        Some(kind)
    }

    pub fn rust_type(&self, runtime: &str) -> String {
        let prim = match self {
            Self::Bool => "bool",
            Self::Int => "isize",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Uint => "usize",
            Self::Uint8 | Self::Byte => "u8",
            Self::Uint16 => "u16",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::String => "String",
            Self::Bytes => "Vec<u8>",
            Self::Complex64 => return format!("{runtime}::Complex64"),
            Self::Complex128 => return format!("{runtime}::Complex128"),
            Self::Time => return format!("{runtime}::Timestamp"),
            Self::Extension => return format!("{runtime}::Extension"),
            Self::Number => return format!("{runtime}::Number"),
            Self::Raw => return format!("{runtime}::Raw"),
            Self::Any => return format!("{runtime}::Dynamic"),
            Self::Named(name) => return name.clone(),
        };
        prim.to_string()
    }
}
