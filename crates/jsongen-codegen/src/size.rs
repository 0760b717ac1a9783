//! Size bound emitter.
//!
//! Emits the body of `SizeJson::size_json`. Terms are collected into one
//! open statement and every integer literal of that statement is folded
//! into a single trailing constant:
//! - *start*: nothing written yet; the first statement declares `s`, and a
//!   routine that never needs one returns the expression directly
//! - *accumulate*: `s` exists and no statement is open
//! - *chained*: an `s += ...` statement is open and takes more terms
//!
//! Loops and branches close the open statement before they are written.

use jsongen_core::{MapOf, Scalar, ScalarKind, SequenceOf, ShimMode, TypeNode};
use jsongen_runtime::bytes_len_size;

use crate::context::{Code, Place, Scope};
use crate::kinds::{
    NULL_SIZE, container_overhead, fixed_size, is_byte_payload, kind_size, record_overhead,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Accumulate,
    Chained,
}

pub(crate) struct SizeEmitter<'a> {
    runtime: &'a str,
    code: Code,
    scope: Scope,
    state: State,
    terms: Vec<String>,
    literal: usize,
}

/// Body of `size_json` for the value at `place`.
pub(crate) fn emit_size(place: &Place, node: &TypeNode, runtime: &str) -> String {
    let mut emitter = SizeEmitter::new(runtime);
    emitter.node(place, node);
    emitter.finish()
}

impl<'a> SizeEmitter<'a> {
    fn new(runtime: &'a str) -> Self {
        Self {
            runtime,
            code: Code::new(2),
            scope: Scope::default(),
            state: State::Start,
            terms: Vec::new(),
            literal: 0,
        }
    }

    fn add_literal(&mut self, n: usize) {
        self.literal += n;
        self.chain();
    }

    fn add_term(&mut self, term: String) {
        self.terms.push(term);
        self.chain();
    }

    fn chain(&mut self) {
        if self.state == State::Accumulate {
            self.state = State::Chained;
        }
    }

    /// Take the open statement's expression.
    fn take_expr(&mut self) -> String {
        let mut parts = std::mem::take(&mut self.terms);
        let literal = std::mem::take(&mut self.literal);
        if literal > 0 || parts.is_empty() {
            parts.push(literal.to_string());
        }
        parts.join(" + ")
    }

    /// Close the open statement so control flow can follow.
    fn settle(&mut self) {
        match self.state {
            State::Start => {
                let expr = self.take_expr();
                self.code.line(format!("let mut s: usize = {expr};"));
            }
            State::Chained => {
                let expr = self.take_expr();
                self.code.line(format!("s += {expr};"));
            }
            State::Accumulate => {}
        }
        self.state = State::Accumulate;
    }

    fn finish(mut self) -> String {
        if self.state == State::Start {
            let expr = self.take_expr();
            self.code.line(expr);
        } else {
            self.settle();
            self.code.line("s");
        }
        self.code.finish()
    }

    fn node(&mut self, place: &Place, node: &TypeNode) {
        if let Some(n) = fixed_size(node) {
            self.add_literal(n);
            return;
        }
        match node {
            TypeNode::Scalar(s) => self.scalar(place, s),
            TypeNode::Record(r) => {
                self.add_literal(record_overhead(r));
                for field in &r.fields {
                    self.node(&place.field(&field.name), &field.ty);
                }
            }
            TypeNode::Sequence(seq) => self.sequence(place, seq),
            TypeNode::Map(m) => self.map(place, m),
            TypeNode::Optional(inner) => self.optional(place, inner),
        }
    }

    fn scalar(&mut self, place: &Place, scalar: &Scalar) {
        if let Some(n) = kind_size(&scalar.kind) {
            self.add_literal(n);
            return;
        }
        let term = match &scalar.shim {
            None => self.value_term(place, &scalar.kind),
            Some(shim) if shim.mode == ShimMode::Cast => {
                let wire = Place::owned(format!("{}({})", shim.to_wire, place.by_ref()));
                self.value_term(&wire, &scalar.kind)
            }
            Some(shim) => {
                // a value that fails to convert encodes nothing
                let wire = self.scope.fresh();
                let inner = self.value_term(&Place::owned(wire.clone()), &scalar.kind);
                format!(
                    "{}({}).map_or(0, |{wire}| {inner})",
                    shim.to_wire,
                    place.by_ref()
                )
            }
        };
        self.add_term(term);
    }

    fn value_term(&self, place: &Place, kind: &ScalarKind) -> String {
        let rt = self.runtime;
        match kind {
            ScalarKind::Float32 => format!("{rt}::size_f32({})", place.by_val()),
            ScalarKind::Float64 => format!("{rt}::size_f64({})", place.by_val()),
            ScalarKind::Complex64 => format!("{rt}::size_complex64({})", place.by_val()),
            ScalarKind::Complex128 => format!("{rt}::size_complex128({})", place.by_val()),
            ScalarKind::String => format!("{rt}::size_string({})", place.by_ref()),
            ScalarKind::Bytes => format!("{rt}::size_bytes({})", place.by_ref()),
            ScalarKind::Number => format!("{rt}::size_number({})", place.by_val()),
            ScalarKind::Raw => format!("{rt}::size_raw({})", place.by_ref()),
            ScalarKind::Any => format!("{rt}::size_dynamic({})", place.by_ref()),
            ScalarKind::Extension | ScalarKind::Named(_) => {
                format!("{rt}::SizeJson::size_json({})", place.by_ref())
            }
            fixed => kind_size(fixed).unwrap_or_default().to_string(),
        }
    }

    fn sequence(&mut self, place: &Place, seq: &SequenceOf) {
        if is_byte_payload(seq) {
            match seq.fixed_len {
                Some(n) => self.add_literal(bytes_len_size(n)),
                None => self.add_term(format!("{}::size_bytes({})", self.runtime, place.by_ref())),
            }
            return;
        }
        match seq.fixed_len {
            Some(n) => {
                self.add_literal(container_overhead(n));
                self.each(place, &seq.element);
            }
            None => {
                self.add_literal(2);
                match fixed_size(&seq.element) {
                    // one separator per element is a safe over-count
                    Some(element) => {
                        self.add_term(format!("{}.len() * {}", place.expr(), element + 1))
                    }
                    None => {
                        self.add_term(format!("{}.len()", place.expr()));
                        self.each(place, &seq.element);
                    }
                }
            }
        }
    }

    fn each(&mut self, place: &Place, element: &TypeNode) {
        self.settle();
        let item = self.scope.fresh();
        self.code
            .open(format!("for {item} in {} {{", place.by_ref()));
        self.node(&Place::binding(&item), element);
        self.settle();
        self.code.close("}");
    }

    /// Per entry: the escaped key, its colon and a separator.
    fn map(&mut self, place: &Place, map: &MapOf) {
        let rt = self.runtime;
        self.add_literal(2);
        self.settle();
        let key = self.scope.fresh();
        match fixed_size(&map.value) {
            Some(value) => {
                self.code
                    .open(format!("for {key} in {}.keys() {{", place.expr()));
                self.add_term(format!("{rt}::size_string({key})"));
                self.add_literal(value + 2);
            }
            None => {
                let value = self.scope.fresh();
                self.code
                    .open(format!("for ({key}, {value}) in {} {{", place.by_ref()));
                self.add_term(format!("{rt}::size_string({key})"));
                self.add_literal(2);
                self.node(&Place::binding(&value), &map.value);
            }
        }
        self.settle();
        self.code.close("}");
    }

    fn optional(&mut self, place: &Place, inner: &TypeNode) {
        self.settle();
        let value = self.scope.fresh();
        self.code
            .open(format!("if let Some({value}) = {} {{", place.by_ref()));
        self.node(&Place::binding(&value), inner);
        self.settle();
        self.code.middle("} else {");
        self.add_literal(NULL_SIZE);
        self.settle();
        self.code.close("}");
    }
}
