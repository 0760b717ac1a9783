//! Decode emitter.
//!
//! Emits the body of `DecodeJson::decode_json`. Generated code never
//! returns early on malformed input: the lexer keeps the first error and
//! answers `is_delim` with `true` from then on, so every loop unwinds.
//! Only a failed `from_wire` conversion returns immediately.

use jsongen_core::{MapOf, Record, Scalar, ScalarKind, SequenceOf, ShimMode, TypeNode};

use crate::context::{Code, Place, Scope};
use crate::kinds::{is_byte_payload, reader};

pub(crate) struct DecodeEmitter<'a> {
    runtime: &'a str,
    code: Code,
    scope: Scope,
}

/// Body of `decode_json` for the value at `place`.
pub(crate) fn emit_decode(place: &Place, node: &TypeNode, runtime: &str) -> String {
    let mut emitter = DecodeEmitter {
        runtime,
        code: Code::new(2),
        scope: Scope::default(),
    };
    emitter.node(place, node);
    emitter.code.finish()
}

/// Reader for a scalar that can be assigned directly from a call.
fn direct_reader(node: &TypeNode) -> Option<&'static str> {
    match node {
        TypeNode::Scalar(Scalar { kind, shim: None }) => reader(kind),
        _ => None,
    }
}

impl DecodeEmitter<'_> {
    fn node(&mut self, place: &Place, node: &TypeNode) {
        match node {
            TypeNode::Scalar(s) => self.scalar(place, s),
            TypeNode::Record(r) if r.encode_as_array => self.tuple(place, r),
            TypeNode::Record(r) => self.record(place, r),
            TypeNode::Sequence(seq) => self.sequence(place, seq),
            TypeNode::Map(m) => self.map(place, m),
            TypeNode::Optional(inner) => self.optional(place, inner),
        }
    }

    fn scalar(&mut self, place: &Place, scalar: &Scalar) {
        let rt = self.runtime;
        let Some(shim) = &scalar.shim else {
            self.read_into(place, &scalar.kind);
            return;
        };

        let wire = self.scope.fresh();
        match reader(&scalar.kind) {
            Some(f) => self.code.line(format!("let {wire} = {rt}::{f}(l);")),
            None => {
                self.code.line(format!(
                    "let mut {wire}: {} = Default::default();",
                    scalar.kind.rust_type(rt)
                ));
                self.read_into(&Place::owned(wire.clone()), &scalar.kind);
            }
        }

        match shim.mode {
            ShimMode::Cast => {
                self.code
                    .line(format!("{} = {}({wire});", place.by_val(), shim.from_wire));
            }
            ShimMode::Convert => {
                let value = self.scope.fresh();
                let err = self.scope.fresh();
                self.code
                    .open(format!("match {}({wire}) {{", shim.from_wire));
                self.code
                    .line(format!("Ok({value}) => {} = {value},", place.by_val()));
                self.convert_error(&err);
                self.code.close("}");
            }
        }
    }

    /// The `Err` arm of a fallible conversion: record and stop.
    fn convert_error(&mut self, err: &str) {
        self.code.open(format!("Err({err}) => {{"));
        self.code.line(format!(
            "l.add_error({}::DecodeError::conversion({err}));",
            self.runtime
        ));
        self.code.line("return;");
        self.code.close("}");
    }

    /// An expression for a freshly read value of `node`, for nodes that are
    /// replaced wholesale rather than filled in place. Setup lines are
    /// emitted first.
    fn fresh_value(&mut self, node: &TypeNode) -> Option<String> {
        let rt = self.runtime;
        match node {
            TypeNode::Scalar(Scalar { kind, shim: None }) => {
                reader(kind).map(|f| format!("{rt}::{f}(l)"))
            }
            TypeNode::Scalar(Scalar {
                kind,
                shim: Some(shim),
            }) => {
                let f = reader(kind)?;
                let wire = self.scope.fresh();
                self.code.line(format!("let {wire} = {rt}::{f}(l);"));
                match shim.mode {
                    ShimMode::Cast => Some(format!("{}({wire})", shim.from_wire)),
                    ShimMode::Convert => {
                        let value = self.scope.fresh();
                        let err = self.scope.fresh();
                        self.code
                            .open(format!("let {value} = match {}({wire}) {{", shim.from_wire));
                        self.code.line(format!("Ok({value}) => {value},"));
                        self.convert_error(&err);
                        self.code.close("};");
                        Some(value)
                    }
                }
            }
            TypeNode::Sequence(seq) if is_byte_payload(seq) && seq.fixed_len.is_none() => {
                Some(format!("{rt}::read_bytes(l)"))
            }
            _ => None,
        }
    }

    /// Decode a new value of `node` and return an expression for it.
    fn fresh_item(&mut self, node: &TypeNode) -> String {
        if let Some(expr) = self.fresh_value(node) {
            return expr;
        }
        let local = self.scope.fresh();
        self.code.line(format!(
            "let mut {local}: {} = Default::default();",
            node.rust_type(self.runtime)
        ));
        self.node(&Place::owned(local.clone()), node);
        local
    }

    fn read_into(&mut self, place: &Place, kind: &ScalarKind) {
        let rt = self.runtime;
        let line = match (reader(kind), kind) {
            (Some(f), _) => format!("{} = {rt}::{f}(l);", place.by_val()),
            (None, ScalarKind::Any) => format!("{rt}::read_dynamic(l, {});", place.by_mut()),
            (None, _) => format!("{rt}::DecodeJson::decode_json({}, l);", place.by_mut()),
        };
        self.code.line(line);
    }

    /// Unknown keys are skipped; a `null` value leaves the field untouched.
    fn record(&mut self, place: &Place, record: &Record) {
        self.code.line("l.delim(b'{');");
        self.code.open("while !l.is_delim(b'}') {");
        if record.fields.is_empty() {
            self.code.line("l.string();");
            self.code.line("l.want_colon();");
            self.code.line("l.skip_recursive();");
        } else {
            let key = self.scope.fresh();
            self.code.line(format!("let {key} = l.string();"));
            self.code.line("l.want_colon();");
            self.code.open("if l.is_null() {");
            self.code.line("l.skip();");
            self.code.line("l.want_comma();");
            self.code.line("continue;");
            self.code.close("}");
            self.code.open(format!("match {key}.as_str() {{"));
            for field in &record.fields {
                self.code.open(format!("{:?} => {{", field.tag));
                self.node(&place.field(&field.name), &field.ty);
                self.code.close("}");
            }
            self.code.line("_ => l.skip_recursive(),");
            self.code.close("}");
        }
        self.code.line("l.want_comma();");
        self.code.close("}");
        self.code.line("l.delim(b'}');");
    }

    /// Positional fields: the array must hold exactly one value per field.
    fn tuple(&mut self, place: &Place, record: &Record) {
        self.code.line("l.delim(b'[');");
        for field in &record.fields {
            self.node(&place.field(&field.name), &field.ty);
            self.code.line("l.want_comma();");
        }
        self.code.line("l.delim(b']');");
    }

    fn sequence(&mut self, place: &Place, seq: &SequenceOf) {
        let rt = self.runtime;
        if is_byte_payload(seq) {
            let line = match seq.fixed_len {
                Some(_) => format!("{rt}::read_exact_bytes(l, {});", place.by_mut()),
                None => format!("{} = {rt}::read_bytes(l);", place.by_val()),
            };
            self.code.line(line);
            return;
        }

        self.code.line("l.delim(b'[');");
        match seq.fixed_len {
            None => self.growable(place, &seq.element),
            Some(n) => self.fixed(place, &seq.element, n),
        }
    }

    /// `[]` leaves an empty vector; otherwise room for a few elements is
    /// reserved up front.
    fn growable(&mut self, place: &Place, element: &TypeNode) {
        let vec = place.expr();
        self.code.line(format!("{vec}.clear();"));
        self.code.open("if !l.is_delim(b']') {");
        self.code.line(format!("{vec}.reserve(4);"));
        self.code.close("}");
        self.code.open("while !l.is_delim(b']') {");
        let item = self.fresh_item(element);
        self.code.line(format!("{vec}.push({item});"));
        self.code.line("l.want_comma();");
        self.code.close("}");
        self.code.line("l.delim(b']');");
    }

    /// Surplus elements are skipped and counted; the count must match.
    fn fixed(&mut self, place: &Place, element: &TypeNode, n: usize) {
        let count = self.scope.fresh();
        self.code.line(format!("let mut {count} = 0usize;"));
        self.code.open("while !l.is_delim(b']') {");
        if n > 0 {
            self.code.open(format!("if {count} < {n} {{"));
            self.node(&place.index(&count), element);
            self.code.middle("} else {");
            self.code.line("l.skip_recursive();");
            self.code.close("}");
        } else {
            self.code.line("l.skip_recursive();");
        }
        self.code.line(format!("{count} += 1;"));
        self.code.line("l.want_comma();");
        self.code.close("}");
        self.code.line("l.delim(b']');");
        self.code.open(format!("if {count} != {n} {{"));
        self.code.line(format!(
            "l.add_error({}::DecodeError::ArrayLength {{ wanted: {n}, got: {count} }});",
            self.runtime
        ));
        self.code.close("}");
    }

    /// A repeated key replaces the earlier entry outright.
    fn map(&mut self, place: &Place, map: &MapOf) {
        let target = place.expr();
        self.code.line("l.delim(b'{');");
        self.code.line(format!("{target}.clear();"));
        self.code.open("while !l.is_delim(b'}') {");
        let key = self.scope.fresh();
        self.code.line(format!("let {key} = l.string();"));
        self.code.line("l.want_colon();");
        let value = self.fresh_item(&map.value);
        self.code.line(format!("{target}.insert({key}, {value});"));
        self.code.line("l.want_comma();");
        self.code.close("}");
        self.code.line("l.delim(b'}');");
    }

    fn optional(&mut self, place: &Place, inner: &TypeNode) {
        self.code.open("if l.is_null() {");
        self.code.line("l.skip();");
        self.code.line(format!("{} = None;", place.by_val()));
        self.code.middle("} else {");
        match direct_reader(inner) {
            Some(f) => self.code.line(format!(
                "{} = Some({}::{f}(l));",
                place.by_val(),
                self.runtime
            )),
            None => {
                let value = self.scope.fresh();
                self.code.line(format!(
                    "let {value} = {}.get_or_insert_with(Default::default);",
                    place.expr()
                ));
                self.node(&Place::binding(&value), inner);
            }
        }
        self.code.close("}");
    }
}
