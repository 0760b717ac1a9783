use insta::assert_snapshot;
use jsongen_core::{ConversionShim, Definition, Scalar, ScalarKind, ShimMode, TypeNode};

use crate::test_utils::{def, field, person, scalar, size_impl};

#[test]
fn person_loops_over_tags() {
    assert_snapshot!(size_impl(&person()), @r"
    impl ::jsongen_runtime::SizeJson for Person {
        fn size_json(&self) -> usize {
            let mut s: usize = ::jsongen_runtime::size_string(&self.name) + self.tags.len() + 19;
            for zb0001 in &self.tags {
                s += ::jsongen_runtime::size_string(zb0001);
            }
            s
        }
    }
    ");
}

#[test]
fn fixed_record_folds_to_constant() {
    let point = def(
        "Point",
        vec![
            field("x", scalar(ScalarKind::Int64)),
            field("y", scalar(ScalarKind::Int64)),
        ],
    );
    assert_snapshot!(size_impl(&point), @r"
    impl ::jsongen_runtime::SizeJson for Point {
        fn size_json(&self) -> usize {
            53
        }
    }
    ");
}

#[test]
fn fixed_byte_array_is_exact() {
    let blob = Definition::new("Blob", TypeNode::array(scalar(ScalarKind::Byte), 3));
    assert_snapshot!(size_impl(&blob), @r"
    impl ::jsongen_runtime::SizeJson for Blob {
        fn size_json(&self) -> usize {
            6
        }
    }
    ");
}

#[test]
fn vec_of_fixed_elements_multiplies() {
    let ids = Definition::new("Ids", TypeNode::vec(scalar(ScalarKind::Int32)));
    assert_snapshot!(size_impl(&ids), @r"
    impl ::jsongen_runtime::SizeJson for Ids {
        fn size_json(&self) -> usize {
            self.0.len() * 12 + 2
        }
    }
    ");
}

#[test]
fn optional_fields() {
    let maybe = def(
        "Maybe",
        vec![
            field("n", TypeNode::optional(scalar(ScalarKind::Int64))),
            field("s", TypeNode::optional(scalar(ScalarKind::String))),
        ],
    );
    assert_snapshot!(size_impl(&maybe), @r"
    impl ::jsongen_runtime::SizeJson for Maybe {
        fn size_json(&self) -> usize {
            let mut s: usize = 32;
            if let Some(zb0001) = &self.s {
                s += ::jsongen_runtime::size_string(zb0001);
            } else {
                s += 4;
            }
            s
        }
    }
    ");
}

#[test]
fn map_with_fixed_values_walks_keys() {
    let counts = Definition::new("Counts", TypeNode::map(scalar(ScalarKind::Uint32)));
    assert_snapshot!(size_impl(&counts), @r"
    impl ::jsongen_runtime::SizeJson for Counts {
        fn size_json(&self) -> usize {
            let mut s: usize = 2;
            for zb0001 in self.0.keys() {
                s += ::jsongen_runtime::size_string(zb0001) + 12;
            }
            s
        }
    }
    ");
}

#[test]
fn map_with_variable_values_walks_entries() {
    let labels = Definition::new("Labels", TypeNode::map(scalar(ScalarKind::String)));
    assert_snapshot!(size_impl(&labels), @r"
    impl ::jsongen_runtime::SizeJson for Labels {
        fn size_json(&self) -> usize {
            let mut s: usize = 2;
            for (zb0001, zb0002) in &self.0 {
                s += ::jsongen_runtime::size_string(zb0001) + ::jsongen_runtime::size_string(zb0002) + 2;
            }
            s
        }
    }
    ");
}

#[test]
fn shimmed_scalars() {
    let shim = |type_name: &str, to: &str, from: &str, mode| ConversionShim {
        type_name: type_name.to_string(),
        to_wire: to.to_string(),
        from_wire: from.to_string(),
        mode,
    };
    let reading = def(
        "Reading",
        vec![
            field(
                "temp",
                TypeNode::Scalar(Scalar {
                    kind: ScalarKind::Float64,
                    shim: Some(shim("Celsius", "to_f64", "from_f64", ShimMode::Cast)),
                }),
            ),
            field(
                "when",
                TypeNode::Scalar(Scalar {
                    kind: ScalarKind::String,
                    shim: Some(shim("Stamp", "to_text", "from_text", ShimMode::Convert)),
                }),
            ),
        ],
    );
    assert_snapshot!(size_impl(&reading), @r"
    impl ::jsongen_runtime::SizeJson for Reading {
        fn size_json(&self) -> usize {
            ::jsongen_runtime::size_f64(to_f64(&self.temp)) + to_text(&self.when).map_or(0, |zb0001| ::jsongen_runtime::size_string(&zb0001)) + 17
        }
    }
    ");
}

#[test]
fn named_type_delegates() {
    let outer = def("Outer", vec![field("inner", scalar(ScalarKind::Named("Inner".into())))]);
    assert_snapshot!(size_impl(&outer), @r"
    impl ::jsongen_runtime::SizeJson for Outer {
        fn size_json(&self) -> usize {
            ::jsongen_runtime::SizeJson::size_json(&self.inner) + 10
        }
    }
    ");
}

#[test]
fn number_and_raw_are_value_dependent() {
    let sample = def(
        "Sample",
        vec![
            field("n", scalar(ScalarKind::Number)),
            field("r", scalar(ScalarKind::Raw)),
        ],
    );
    assert_snapshot!(size_impl(&sample), @r"
    impl ::jsongen_runtime::SizeJson for Sample {
        fn size_json(&self) -> usize {
            ::jsongen_runtime::size_number(self.n) + ::jsongen_runtime::size_raw(&self.r) + 11
        }
    }
    ");
}
