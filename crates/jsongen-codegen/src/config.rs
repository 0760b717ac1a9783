//! Configuration for routine generation.

/// Configuration for [`crate::Generator`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Path generated code uses to reach the runtime crate
    pub(crate) runtime_path: String,
    /// Whether to emit `SizeJson` impls
    pub(crate) emit_size: bool,
    /// Whether to emit `EncodeJson` impls
    pub(crate) emit_encode: bool,
    /// Whether to emit `DecodeJson` impls
    pub(crate) emit_decode: bool,
    /// Whether to emit a round-trip test per type
    pub(crate) emit_tests: bool,
    /// First line of the rendered output, as a line comment
    pub(crate) header: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_path: "::jsongen_runtime".to_string(),
            emit_size: true,
            emit_encode: true,
            emit_decode: true,
            emit_tests: false,
            header: Some("Code generated by jsongen. DO NOT EDIT.".to_string()),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path of the runtime crate, e.g. `crate::rt`.
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Set whether to emit `SizeJson` impls.
    pub fn emit_size(mut self, value: bool) -> Self {
        self.emit_size = value;
        self
    }

    /// Set whether to emit `EncodeJson` impls.
    pub fn emit_encode(mut self, value: bool) -> Self {
        self.emit_encode = value;
        self
    }

    /// Set whether to emit `DecodeJson` impls.
    pub fn emit_decode(mut self, value: bool) -> Self {
        self.emit_decode = value;
        self
    }

    /// Set whether to emit a `#[cfg(test)]` module with one round-trip
    /// test per type. The tests need `Default` on every type.
    pub fn emit_tests(mut self, value: bool) -> Self {
        self.emit_tests = value;
        self
    }

    /// Set the header comment; `None` omits it.
    pub fn header(mut self, value: Option<String>) -> Self {
        self.header = value;
        self
    }
}
