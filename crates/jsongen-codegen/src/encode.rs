//! Encode emitter.
//!
//! Emits the body of `EncodeJson::encode_json`. Constant output (braces,
//! separators, `"tag":` prefixes) is collected in a [`Pending`] buffer that
//! is passed down the traversal and flushed as one append right before
//! dynamic output, before a branch, and at the end of the routine.

use jsongen_core::{MapOf, Record, Scalar, ScalarKind, SequenceOf, ShimMode, TypeNode};
use jsongen_runtime::escape_into;

use crate::context::{Code, Place, Scope, byte_literal};
use crate::kinds::{Appender, appender, is_byte_payload, non_empty};

/// Constant bytes not yet written to `out`.
#[derive(Debug, Default)]
pub(crate) struct Pending(Vec<u8>);

impl Pending {
    fn with(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    fn push(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    fn push_tag(&mut self, tag: &str) {
        self.0.push(b'"');
        escape_into(&mut self.0, tag);
        self.0.extend_from_slice(b"\":");
    }
}

/// Whether anything has been written inside the current object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Written {
    No,
    Yes,
    /// Decided at run time by a flag variable.
    Maybe,
}

pub(crate) struct EncodeEmitter<'a> {
    runtime: &'a str,
    code: Code,
    scope: Scope,
}

/// Body of `encode_json` for the value at `place`.
pub(crate) fn emit_encode(place: &Place, node: &TypeNode, runtime: &str) -> String {
    let mut emitter = EncodeEmitter {
        runtime,
        code: Code::new(2),
        scope: Scope::default(),
    };
    let mut pending = Pending::default();
    emitter.node(&mut pending, place, node);
    emitter.flush(&mut pending);
    emitter.code.line("Ok(())");
    emitter.code.finish()
}

impl EncodeEmitter<'_> {
    fn flush(&mut self, pending: &mut Pending) {
        let bytes = std::mem::take(&mut pending.0);
        match bytes.len() {
            0 => {}
            1 => self.code.line(format!("out.push({});", byte_literal(&bytes))),
            _ => self
                .code
                .line(format!("out.extend_from_slice({});", byte_literal(&bytes))),
        }
    }

    fn node(&mut self, pending: &mut Pending, place: &Place, node: &TypeNode) {
        match node {
            TypeNode::Scalar(s) => self.scalar(pending, place, s),
            TypeNode::Record(r) if r.encode_as_array => self.tuple(pending, place, r),
            TypeNode::Record(r) => self.record(pending, place, r),
            TypeNode::Sequence(seq) => self.sequence(pending, place, seq),
            TypeNode::Map(m) => self.map(pending, place, m),
            TypeNode::Optional(inner) => self.optional(pending, place, inner),
        }
    }

    fn scalar(&mut self, pending: &mut Pending, place: &Place, scalar: &Scalar) {
        self.flush(pending);
        match &scalar.shim {
            None => self.append(place, &scalar.kind),
            Some(shim) if shim.mode == ShimMode::Cast => {
                let wire = Place::owned(format!("{}({})", shim.to_wire, place.by_ref()));
                self.append(&wire, &scalar.kind);
            }
            Some(shim) => {
                let wire = self.scope.fresh();
                self.code.line(format!(
                    "let {wire} = {}({}).map_err({}::EncodeError::conversion)?;",
                    shim.to_wire,
                    place.by_ref(),
                    self.runtime
                ));
                self.append(&Place::owned(wire), &scalar.kind);
            }
        }
    }

    fn append(&mut self, place: &Place, kind: &ScalarKind) {
        let rt = self.runtime;
        let line = match appender(kind) {
            Appender::ByValue(f, fallible) => {
                format!("{rt}::{f}(out, {}){};", place.by_val(), try_op(fallible))
            }
            Appender::ByRef(f, fallible) => {
                format!("{rt}::{f}(out, {}){};", place.by_ref(), try_op(fallible))
            }
            Appender::Trait => format!("{rt}::EncodeJson::encode_json({}, out)?;", place.by_ref()),
        };
        self.code.line(line);
    }

    /// Named fields. An omit-when-empty field is wrapped in a condition;
    /// once the first field is conditional the leading comma of later
    /// fields depends on a run-time flag.
    fn record(&mut self, pending: &mut Pending, place: &Place, record: &Record) {
        let n = record.fields.len();
        let places: Vec<Place> = record.fields.iter().map(|f| place.field(&f.name)).collect();
        let conds: Vec<Option<String>> = record
            .fields
            .iter()
            .zip(&places)
            .map(|(f, p)| if f.omit_empty { non_empty(p, &f.ty) } else { None })
            .collect();

        let mut needs_flag = false;
        let mut state = Written::No;
        for (i, cond) in conds.iter().enumerate() {
            if cond.is_some() {
                needs_flag |= state != Written::Yes && i + 1 < n;
                if state == Written::No {
                    state = Written::Maybe;
                }
            } else {
                state = Written::Yes;
            }
        }
        let flag = needs_flag.then(|| self.scope.fresh());
        if let Some(flag) = &flag {
            self.code.line(format!("let mut {flag} = false;"));
        }

        pending.push(b"{");
        let mut state = Written::No;
        for (i, ((field, cond), fp)) in record.fields.iter().zip(conds).zip(&places).enumerate() {
            match cond {
                Some(cond) => {
                    self.flush(pending);
                    self.code.open(format!("if {cond} {{"));
                    let mut inner = Pending::default();
                    self.separator(&mut inner, state, flag.as_deref());
                    inner.push_tag(&field.tag);
                    self.node(&mut inner, fp, &field.ty);
                    self.flush(&mut inner);
                    if let Some(flag) = &flag
                        && state != Written::Yes
                        && i + 1 < n
                    {
                        self.code.line(format!("{flag} = true;"));
                    }
                    self.code.close("}");
                    if state == Written::No {
                        state = Written::Maybe;
                    }
                }
                None => {
                    self.separator(pending, state, flag.as_deref());
                    pending.push_tag(&field.tag);
                    self.node(pending, fp, &field.ty);
                    state = Written::Yes;
                }
            }
        }
        pending.push(b"}");
    }

    fn separator(&mut self, pending: &mut Pending, state: Written, flag: Option<&str>) {
        match (state, flag) {
            (Written::No, _) => {}
            (Written::Yes, _) => pending.push(b","),
            (Written::Maybe, Some(flag)) => {
                self.flush(pending);
                self.code.open(format!("if {flag} {{"));
                self.code.line("out.push(b',');");
                self.code.close("}");
            }
            (Written::Maybe, None) => {}
        }
    }

    /// Positional fields; nothing is ever omitted.
    fn tuple(&mut self, pending: &mut Pending, place: &Place, record: &Record) {
        pending.push(b"[");
        for (i, field) in record.fields.iter().enumerate() {
            if i > 0 {
                pending.push(b",");
            }
            self.node(pending, &place.field(&field.name), &field.ty);
        }
        pending.push(b"]");
    }

    fn sequence(&mut self, pending: &mut Pending, place: &Place, seq: &SequenceOf) {
        if is_byte_payload(seq) {
            self.flush(pending);
            self.code.line(format!(
                "{}::append_bytes(out, {});",
                self.runtime,
                place.by_ref()
            ));
            return;
        }
        pending.push(b"[");
        self.flush(pending);
        let index = self.scope.fresh();
        let item = self.scope.fresh();
        self.code.open(format!(
            "for ({index}, {item}) in {}.iter().enumerate() {{",
            place.expr()
        ));
        self.code.open(format!("if {index} > 0 {{"));
        self.code.line("out.push(b',');");
        self.code.close("}");
        let mut inner = Pending::default();
        self.node(&mut inner, &Place::binding(&item), &seq.element);
        self.flush(&mut inner);
        self.code.close("}");
        pending.push(b"]");
    }

    /// Entry order is only known at run time, so the comma is guarded by
    /// a flag on every iteration.
    fn map(&mut self, pending: &mut Pending, place: &Place, map: &MapOf) {
        pending.push(b"{");
        self.flush(pending);
        let flag = self.scope.fresh();
        let key = self.scope.fresh();
        let value = self.scope.fresh();
        self.code.line(format!("let mut {flag} = false;"));
        self.code
            .open(format!("for ({key}, {value}) in {} {{", place.by_ref()));
        self.code.open(format!("if {flag} {{"));
        self.code.line("out.push(b',');");
        self.code.close("}");
        self.code.line(format!("{flag} = true;"));
        self.code
            .line(format!("{}::append_string(out, {key});", self.runtime));
        let mut inner = Pending::with(b":");
        self.node(&mut inner, &Place::binding(&value), &map.value);
        self.flush(&mut inner);
        self.code.close("}");
        pending.push(b"}");
    }

    fn optional(&mut self, pending: &mut Pending, place: &Place, inner: &TypeNode) {
        self.flush(pending);
        let value = self.scope.fresh();
        self.code
            .open(format!("if let Some({value}) = {} {{", place.by_ref()));
        let mut some = Pending::default();
        self.node(&mut some, &Place::binding(&value), inner);
        self.flush(&mut some);
        self.code.middle("} else {");
        let mut none = Pending::with(b"null");
        self.flush(&mut none);
        self.code.close("}");
    }
}

fn try_op(fallible: bool) -> &'static str {
    if fallible { "?" } else { "" }
}
