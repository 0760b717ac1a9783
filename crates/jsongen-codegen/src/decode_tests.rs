use insta::assert_snapshot;
use jsongen_core::{ConversionShim, Definition, Record, Scalar, ScalarKind, ShimMode, TypeNode};

use crate::test_utils::{decode_impl, def, field, person, record, scalar};

fn inner() -> TypeNode {
    record("Inner", vec![field("a", scalar(ScalarKind::Bool))])
}

#[test]
fn person_skips_unknown_keys() {
    assert_snapshot!(decode_impl(&person()), @r#"
    impl ::jsongen_runtime::DecodeJson for Person {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            l.delim(b'{');
            while !l.is_delim(b'}') {
                let zb0001 = l.string();
                l.want_colon();
                if l.is_null() {
                    l.skip();
                    l.want_comma();
                    continue;
                }
                match zb0001.as_str() {
                    "name" => {
                        self.name = ::jsongen_runtime::read_string(l);
                    }
                    "tags" => {
                        l.delim(b'[');
                        self.tags.clear();
                        if !l.is_delim(b']') {
                            self.tags.reserve(4);
                        }
                        while !l.is_delim(b']') {
                            self.tags.push(::jsongen_runtime::read_string(l));
                            l.want_comma();
                        }
                        l.delim(b']');
                    }
                    _ => l.skip_recursive(),
                }
                l.want_comma();
            }
            l.delim(b'}');
        }
    }
    "#);
}

#[test]
fn fixed_array_checks_length() {
    let triple = Definition::new("Triple", TypeNode::array(scalar(ScalarKind::Int32), 3));
    assert_snapshot!(decode_impl(&triple), @r"
    impl ::jsongen_runtime::DecodeJson for Triple {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            l.delim(b'[');
            let mut zb0001 = 0usize;
            while !l.is_delim(b']') {
                if zb0001 < 3 {
                    self.0[zb0001] = ::jsongen_runtime::read_i32(l);
                } else {
                    l.skip_recursive();
                }
                zb0001 += 1;
                l.want_comma();
            }
            l.delim(b']');
            if zb0001 != 3 {
                l.add_error(::jsongen_runtime::DecodeError::ArrayLength { wanted: 3, got: zb0001 });
            }
        }
    }
    ");
}

#[test]
fn optional_record_decodes_in_place() {
    let wrapper = def("Wrapper", vec![field("inner", TypeNode::optional(inner()))]);
    assert_snapshot!(decode_impl(&wrapper), @r#"
    impl ::jsongen_runtime::DecodeJson for Wrapper {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            l.delim(b'{');
            while !l.is_delim(b'}') {
                let zb0001 = l.string();
                l.want_colon();
                if l.is_null() {
                    l.skip();
                    l.want_comma();
                    continue;
                }
                match zb0001.as_str() {
                    "inner" => {
                        if l.is_null() {
                            l.skip();
                            self.inner = None;
                        } else {
                            let zb0002 = self.inner.get_or_insert_with(Default::default);
                            l.delim(b'{');
                            while !l.is_delim(b'}') {
                                let zb0003 = l.string();
                                l.want_colon();
                                if l.is_null() {
                                    l.skip();
                                    l.want_comma();
                                    continue;
                                }
                                match zb0003.as_str() {
                                    "a" => {
                                        zb0002.a = ::jsongen_runtime::read_bool(l);
                                    }
                                    _ => l.skip_recursive(),
                                }
                                l.want_comma();
                            }
                            l.delim(b'}');
                        }
                    }
                    _ => l.skip_recursive(),
                }
                l.want_comma();
            }
            l.delim(b'}');
        }
    }
    "#);
}

#[test]
fn map_values_decode_into_entries() {
    let labels = Definition::new("Labels", TypeNode::map(scalar(ScalarKind::String)));
    assert_snapshot!(decode_impl(&labels), @r"
    impl ::jsongen_runtime::DecodeJson for Labels {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            l.delim(b'{');
            self.0.clear();
            while !l.is_delim(b'}') {
                let zb0001 = l.string();
                l.want_colon();
                self.0.insert(zb0001, ::jsongen_runtime::read_string(l));
                l.want_comma();
            }
            l.delim(b'}');
        }
    }
    ");

}

#[test]
fn repeated_map_key_replaces_entry() {
    let index = Definition::new("Index", TypeNode::map(inner()));
    assert_snapshot!(decode_impl(&index), @r#"
    impl ::jsongen_runtime::DecodeJson for Index {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            l.delim(b'{');
            self.0.clear();
            while !l.is_delim(b'}') {
                let zb0001 = l.string();
                l.want_colon();
                let mut zb0002: Inner = Default::default();
                l.delim(b'{');
                while !l.is_delim(b'}') {
                    let zb0003 = l.string();
                    l.want_colon();
                    if l.is_null() {
                        l.skip();
                        l.want_comma();
                        continue;
                    }
                    match zb0003.as_str() {
                        "a" => {
                            zb0002.a = ::jsongen_runtime::read_bool(l);
                        }
                        _ => l.skip_recursive(),
                    }
                    l.want_comma();
                }
                l.delim(b'}');
                self.0.insert(zb0001, zb0002);
                l.want_comma();
            }
            l.delim(b'}');
        }
    }
    "#);
}

#[test]
fn replaced_values_bind_without_default() {
    let celsius = |mode| {
        TypeNode::Scalar(Scalar {
            kind: ScalarKind::Float64,
            shim: Some(ConversionShim {
                type_name: "Celsius".into(),
                to_wire: "to_f64".into(),
                from_wire: "from_f64".into(),
                mode,
            }),
        })
    };
    let readings = def(
        "Readings",
        vec![
            field("blobs", TypeNode::vec(TypeNode::vec(scalar(ScalarKind::Byte)))),
            field("temps", TypeNode::vec(celsius(ShimMode::Cast))),
            field("checked", TypeNode::map(celsius(ShimMode::Convert))),
        ],
    );
    let code = decode_impl(&readings);
    assert!(!code.contains("Default::default()"), "{code}");
    assert!(code.contains("self.blobs.push(::jsongen_runtime::read_bytes(l));"));
    assert!(code.contains("let zb0002 = ::jsongen_runtime::read_f64(l);"));
    assert!(code.contains("self.temps.push(from_f64(zb0002));"));
    assert!(code.contains("let zb0004 = ::jsongen_runtime::read_f64(l);"));
    assert!(code.contains("let zb0005 = match from_f64(zb0004) {"));
    assert!(code.contains("Ok(zb0005) => zb0005,"));
    assert!(code.contains("self.checked.insert(zb0003, zb0005);"));
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
    assert_snapshot!(decode_impl(&point), @r"
    impl ::jsongen_runtime::DecodeJson for Point {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            l.delim(b'[');
            self.x = ::jsongen_runtime::read_i64(l);
            l.want_comma();
            self.y = ::jsongen_runtime::read_i64(l);
            l.want_comma();
            l.delim(b']');
        }
    }
    ");
}

#[test]
fn empty_record_skips_everything() {
    assert_snapshot!(decode_impl(&def("Unit", vec![])), @r"
    impl ::jsongen_runtime::DecodeJson for Unit {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            l.delim(b'{');
            while !l.is_delim(b'}') {
                l.string();
                l.want_colon();
                l.skip_recursive();
                l.want_comma();
            }
            l.delim(b'}');
        }
    }
    ");
}

#[test]
fn fallible_shim_returns_on_error() {
    let stamp = Definition::new(
        "Stamped",
        TypeNode::Scalar(Scalar {
            kind: ScalarKind::String,
            shim: Some(ConversionShim {
                type_name: "Stamp".into(),
                to_wire: "to_text".into(),
                from_wire: "from_text".into(),
                mode: ShimMode::Convert,
            }),
        }),
    );
    assert_snapshot!(decode_impl(&stamp), @r"
    impl ::jsongen_runtime::DecodeJson for Stamped {
        fn decode_json(&mut self, l: &mut ::jsongen_runtime::Lexer<'_>) {
            let zb0001 = ::jsongen_runtime::read_string(l);
            match from_text(zb0001) {
                Ok(zb0002) => self.0 = zb0002,
                Err(zb0003) => {
                    l.add_error(::jsongen_runtime::DecodeError::conversion(zb0003));
                    return;
                }
            }
        }
    }
    ");
}

#[test]
fn byte_payloads() {
    let keys = def(
        "Keys",
        vec![
            field("id", TypeNode::array(scalar(ScalarKind::Byte), 16)),
            field("blob", TypeNode::vec(scalar(ScalarKind::Byte))),
            field("ext", scalar(ScalarKind::Extension)),
            field("any", scalar(ScalarKind::Any)),
        ],
    );
    let code = decode_impl(&keys);
    assert!(code.contains("::jsongen_runtime::read_exact_bytes(l, &mut self.id);"));
    assert!(code.contains("self.blob = ::jsongen_runtime::read_bytes(l);"));
    assert!(code.contains("::jsongen_runtime::DecodeJson::decode_json(&mut self.ext, l);"));
    assert!(code.contains("::jsongen_runtime::read_dynamic(l, &mut self.any);"));
}

#[test]
fn number_and_raw_readers() {
    let sample = def(
        "Sample",
        vec![
            field("n", scalar(ScalarKind::Number)),
            field("r", TypeNode::vec(scalar(ScalarKind::Raw))),
        ],
    );
    let code = decode_impl(&sample);
    assert!(code.contains("self.n = ::jsongen_runtime::read_number(l);"));
    assert!(code.contains("self.r.push(::jsongen_runtime::read_raw(l));"));
}
