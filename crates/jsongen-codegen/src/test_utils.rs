//! Fixtures and render helpers shared by the emitter tests.

use jsongen_core::{Definition, Field, Record, ScalarKind, TypeNode};

use crate::{Config, Generator};

fn only(config: Config) -> Config {
    config.header(None)
}

fn render(def: &Definition, config: Config) -> String {
    match Generator::new(only(config)).routine(def) {
        Ok(routine) => routine.render(),
        Err(err) => panic!("generation failed for `{}`: {err}", def.type_name),
    }
}

pub(crate) fn size_impl(def: &Definition) -> String {
    render(def, Config::new().emit_encode(false).emit_decode(false))
}

pub(crate) fn encode_impl(def: &Definition) -> String {
    render(def, Config::new().emit_size(false).emit_decode(false))
}

pub(crate) fn decode_impl(def: &Definition) -> String {
    render(def, Config::new().emit_size(false).emit_encode(false))
}

pub(crate) fn field(name: &str, ty: TypeNode) -> Field {
    Field {
        name: name.to_string(),
        tag: name.to_string(),
        omit_empty: false,
        ty,
    }
}

pub(crate) fn omit(name: &str, ty: TypeNode) -> Field {
    Field {
        omit_empty: true,
        ..field(name, ty)
    }
}

pub(crate) fn record(name: &str, fields: Vec<Field>) -> TypeNode {
    TypeNode::Record(Record {
        name: name.to_string(),
        fields,
        encode_as_array: false,
    })
}

pub(crate) fn def(name: &str, fields: Vec<Field>) -> Definition {
    Definition::new(name, record(name, fields))
}

pub(crate) fn scalar(kind: ScalarKind) -> TypeNode {
    TypeNode::scalar(kind)
}

/// `Person { name: String, tags: Vec<String> }` with `tags` omitted when empty.
pub(crate) fn person() -> Definition {
    def(
        "Person",
        vec![
            field("name", scalar(ScalarKind::String)),
            omit("tags", TypeNode::vec(scalar(ScalarKind::String))),
        ],
    )
}
