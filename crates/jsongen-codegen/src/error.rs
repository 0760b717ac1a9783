use jsongen_core::IrError;

/// Why a definition produced no routines.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Map keys must be plain `String` scalars.
    #[error("unsupported map key type `{0}`")]
    MapKey(String),

    #[error("filtered out by the `{pass}` pass")]
    Filtered { pass: &'static str },
}

/// Rejected pass directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PassError {
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    #[error("`{directive}` directive is missing {what}")]
    MissingArgument {
        directive: &'static str,
        what: &'static str,
    },

    #[error("malformed `{directive}` argument {arg:?}")]
    Malformed { directive: &'static str, arg: String },

    #[error("unknown scalar kind `{0}`")]
    UnknownKind(String),

    #[error("unknown shim mode `{0}`")]
    UnknownMode(String),

    #[error("`{0}` is not a valid function path")]
    InvalidPath(String),
}
