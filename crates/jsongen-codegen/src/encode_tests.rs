use insta::assert_snapshot;
use jsongen_core::{ConversionShim, Definition, Record, Scalar, ScalarKind, ShimMode, TypeNode};

use crate::test_utils::{def, encode_impl, field, omit, person, record, scalar};

#[test]
fn person_omits_empty_tags() {
    assert_snapshot!(encode_impl(&person()), @r#"
    impl ::jsongen_runtime::EncodeJson for Person {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            out.extend_from_slice(b"{\"name\":");
            ::jsongen_runtime::append_string(out, &self.name);
            if !self.tags.is_empty() {
                out.extend_from_slice(b",\"tags\":[");
                for (zb0001, zb0002) in self.tags.iter().enumerate() {
                    if zb0001 > 0 {
                        out.push(b',');
                    }
                    ::jsongen_runtime::append_string(out, zb0002);
                }
                out.push(b']');
            }
            out.push(b'}');
            Ok(())
        }
    }
    "#);
}

#[test]
fn leading_omitted_field_needs_flag() {
    let flags = def(
        "Flags",
        vec![
            omit("a", scalar(ScalarKind::Int64)),
            omit("b", scalar(ScalarKind::String)),
        ],
    );
    assert_snapshot!(encode_impl(&flags), @r#"
    impl ::jsongen_runtime::EncodeJson for Flags {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            let mut zb0001 = false;
            out.push(b'{');
            if self.a != 0 {
                out.extend_from_slice(b"\"a\":");
                ::jsongen_runtime::append_i64(out, self.a);
                zb0001 = true;
            }
            if !self.b.is_empty() {
                if zb0001 {
                    out.push(b',');
                }
                out.extend_from_slice(b"\"b\":");
                ::jsongen_runtime::append_string(out, &self.b);
            }
            out.push(b'}');
            Ok(())
        }
    }
    "#);
}

#[test]
fn nested_constants_are_fused() {
    let outer = def(
        "Outer",
        vec![field(
            "inner",
            record("Inner", vec![field("a", scalar(ScalarKind::Bool))]),
        )],
    );
    assert_snapshot!(encode_impl(&outer), @r#"
    impl ::jsongen_runtime::EncodeJson for Outer {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            out.extend_from_slice(b"{\"inner\":{\"a\":");
            ::jsongen_runtime::append_bool(out, self.inner.a);
            out.extend_from_slice(b"}}");
            Ok(())
        }
    }
    "#);
}

#[test]
fn empty_record_is_one_append() {
    assert_snapshot!(encode_impl(&def("Unit", vec![])), @r#"
    impl ::jsongen_runtime::EncodeJson for Unit {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            out.extend_from_slice(b"{}");
            Ok(())
        }
    }
    "#);
}

#[test]
fn positional_record() {
    let point = Definition::new(
        "Point",
        TypeNode::Record(Record {
            name: "Point".into(),
            fields: vec![
                field("x", scalar(ScalarKind::Int64)),
                field("y", scalar(ScalarKind::Int64)),
            ],
            encode_as_array: true,
        }),
    );
    assert_snapshot!(encode_impl(&point), @r"
    impl ::jsongen_runtime::EncodeJson for Point {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            out.push(b'[');
            ::jsongen_runtime::append_i64(out, self.x);
            out.push(b',');
            ::jsongen_runtime::append_i64(out, self.y);
            out.push(b']');
            Ok(())
        }
    }
    ");
}

#[test]
fn map_entries() {
    let counts = Definition::new("Counts", TypeNode::map(scalar(ScalarKind::Uint32)));
    assert_snapshot!(encode_impl(&counts), @r"
    impl ::jsongen_runtime::EncodeJson for Counts {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            out.push(b'{');
            let mut zb0001 = false;
            for (zb0002, zb0003) in &self.0 {
                if zb0001 {
                    out.push(b',');
                }
                zb0001 = true;
                ::jsongen_runtime::append_string(out, zb0002);
                out.push(b':');
                ::jsongen_runtime::append_u32(out, *zb0003);
            }
            out.push(b'}');
            Ok(())
        }
    }
    ");
}

#[test]
fn optional_writes_null() {
    let maybe = def(
        "Maybe",
        vec![field("n", TypeNode::optional(scalar(ScalarKind::Int64)))],
    );
    assert_snapshot!(encode_impl(&maybe), @r#"
    impl ::jsongen_runtime::EncodeJson for Maybe {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            out.extend_from_slice(b"{\"n\":");
            if let Some(zb0001) = &self.n {
                ::jsongen_runtime::append_i64(out, *zb0001);
            } else {
                out.extend_from_slice(b"null");
            }
            out.push(b'}');
            Ok(())
        }
    }
    "#);
}

#[test]
fn fallible_shim_propagates_error() {
    let event = def(
        "Event",
        vec![field(
            "when",
            TypeNode::Scalar(Scalar {
                kind: ScalarKind::String,
                shim: Some(ConversionShim {
                    type_name: "Stamp".into(),
                    to_wire: "to_text".into(),
                    from_wire: "from_text".into(),
                    mode: ShimMode::Convert,
                }),
            }),
        )],
    );
    assert_snapshot!(encode_impl(&event), @r#"
    impl ::jsongen_runtime::EncodeJson for Event {
        fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), ::jsongen_runtime::EncodeError> {
            out.extend_from_slice(b"{\"when\":");
            let zb0001 = to_text(&self.when).map_err(::jsongen_runtime::EncodeError::conversion)?;
            ::jsongen_runtime::append_string(out, &zb0001);
            out.push(b'}');
            Ok(())
        }
    }
    "#);
}

#[test]
fn tag_is_escaped_once_at_generation() {
    let quoted = def(
        "Quoted",
        vec![jsongen_core::Field {
            tag: "say \"hi\"".into(),
            ..field("say", scalar(ScalarKind::Bool))
        }],
    );
    let code = encode_impl(&quoted);
    assert!(code.contains(r#"out.extend_from_slice(b"{\"say \\\"hi\\\"\":");"#));
}

#[test]
fn fallible_appenders_use_question_mark() {
    let reading = def(
        "Reading",
        vec![
            field("t", scalar(ScalarKind::Float64)),
            field("at", scalar(ScalarKind::Time)),
            field("any", scalar(ScalarKind::Any)),
        ],
    );
    let code = encode_impl(&reading);
    assert!(code.contains("::jsongen_runtime::append_f64(out, self.t)?;"));
    assert!(code.contains("::jsongen_runtime::append_time(out, &self.at)?;"));
    assert!(code.contains("::jsongen_runtime::append_dynamic(out, &self.any)?;"));
}

#[test]
fn number_and_raw_appenders() {
    let sample = def(
        "Sample",
        vec![
            field("n", scalar(ScalarKind::Number)),
            omit("r", scalar(ScalarKind::Raw)),
        ],
    );
    let code = encode_impl(&sample);
    assert!(code.contains("::jsongen_runtime::append_number(out, self.n)?;"));
    assert!(code.contains("if !self.r.is_empty() {"));
    assert!(code.contains("::jsongen_runtime::append_raw(out, &self.r);"));
}
