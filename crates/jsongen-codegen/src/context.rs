//! Per-routine emission state: output text, fresh names, value places.

use jsongen_core::utils::rust_ident;

/// Indented line writer for one routine body.
#[derive(Debug, Default)]
pub(crate) struct Code {
    out: String,
    depth: usize,
}

impl Code {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            out: String::new(),
            depth,
        }
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Write a line ending a block opener and indent what follows.
    pub(crate) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent and write the closing line.
    pub(crate) fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Dedent for one line, as in `} else {`.
    pub(crate) fn middle(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
        self.depth += 1;
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

/// Collision-free temporaries for one emitted routine: `zb0001`, `zb0002`, ...
///
/// Every routine starts from a fresh scope, so names are reproducible
/// across runs and independent of generation order.
#[derive(Debug, Default)]
pub(crate) struct Scope {
    next: u32,
}

impl Scope {
    pub(crate) fn fresh(&mut self) -> String {
        self.next += 1;
        format!("zb{:04}", self.next)
    }
}

/// Expression naming the value currently being visited.
///
/// Either a place of type `T` (`self.name`, `zb0001[3]`) or a binding of
/// type `&T` / `&mut T` introduced by a loop or pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Place {
    expr: String,
    binding: bool,
}

impl Place {
    pub(crate) fn owned(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            binding: false,
        }
    }

    pub(crate) fn binding(name: impl Into<String>) -> Self {
        Self {
            expr: name.into(),
            binding: true,
        }
    }

    /// Receiver for method calls; auto-ref and auto-deref apply.
    pub(crate) fn expr(&self) -> &str {
        &self.expr
    }

    pub(crate) fn by_ref(&self) -> String {
        if self.binding {
            self.expr.clone()
        } else {
            format!("&{}", self.expr)
        }
    }

    pub(crate) fn by_mut(&self) -> String {
        if self.binding {
            self.expr.clone()
        } else {
            format!("&mut {}", self.expr)
        }
    }

    /// The value itself (for `Copy` types) or an assignment target.
    pub(crate) fn by_val(&self) -> String {
        if self.binding {
            format!("*{}", self.expr)
        } else {
            self.expr.clone()
        }
    }

    pub(crate) fn field(&self, name: &str) -> Self {
        Self::owned(format!("{}.{}", self.expr, rust_ident(name)))
    }

    pub(crate) fn index(&self, index: &str) -> Self {
        Self::owned(format!("{}[{}]", self.expr, index))
    }
}

/// Rust literal for constant output bytes: `b'x'` or `b"..."`.
pub(crate) fn byte_literal(bytes: &[u8]) -> String {
    match bytes {
        [b] => format!("b'{}'", b.escape_ascii()),
        _ => format!("b\"{}\"", bytes.escape_ascii()),
    }
}
