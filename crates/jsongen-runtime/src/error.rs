//! Errors raised by generated encode and decode routines.

/// Boxed error returned by user conversion functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure while appending a value to an output buffer.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// NaN and infinities have no JSON representation.
    #[error("cannot encode non-finite float {0}")]
    NonFiniteFloat(f64),

    #[error("cannot format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    /// A `to_wire` conversion function rejected the value.
    #[error("conversion failed: {0}")]
    Conversion(BoxError),

    /// The generic fallback encoder for dynamic values failed.
    #[error(transparent)]
    Dynamic(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    /// Wrap the error of a fallible `to_wire` conversion.
    pub fn conversion<E: Into<BoxError>>(err: E) -> Self {
        Self::Conversion(err.into())
    }
}

/// Failure while decoding; recorded on the lexer, first error wins.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("syntax error at offset {offset}: {reason}")]
    Syntax { offset: usize, reason: &'static str },

    #[error("expected '{expected}' at offset {offset}")]
    ExpectedDelimiter { offset: usize, expected: char },

    #[error("invalid number {token:?} at offset {offset}")]
    InvalidNumber { offset: usize, token: String },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("nesting deeper than {0} levels")]
    DepthLimit(usize),

    /// A fixed-length target received a payload of a different length.
    #[error("array length mismatch: wanted {wanted}, got {got}")]
    ArrayLength { wanted: usize, got: usize },

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid timestamp {input:?}")]
    Timestamp {
        input: String,
        #[source]
        source: time::error::Parse,
    },

    /// A `from_wire` conversion function rejected the decoded value.
    #[error("conversion failed: {0}")]
    Conversion(BoxError),

    /// The generic fallback decoder for dynamic values failed.
    #[error(transparent)]
    Dynamic(#[from] serde_json::Error),
}

impl DecodeError {
    /// Wrap the error of a fallible `from_wire` conversion.
    pub fn conversion<E: Into<BoxError>>(err: E) -> Self {
        Self::Conversion(err.into())
    }
}
