//! Driver: runs the pass chain and the three emitters per definition.

use jsongen_core::{Definition, Scalar, ScalarKind, TypeNode};

use crate::config::Config;
use crate::context::Place;
use crate::decode::emit_decode;
use crate::encode::emit_encode;
use crate::error::GenError;
use crate::passes::Passes;
use crate::size::emit_size;
use crate::testgen::{TEST_MODULE, emit_test};

/// Generated impls for one definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routine {
    pub type_name: String,
    pub size: Option<String>,
    pub encode: Option<String>,
    pub decode: Option<String>,
    /// Round-trip test function, rendered inside the test module.
    pub test: Option<String>,
}

/// A definition that produced no routines, and why.
#[derive(Debug)]
pub struct Skipped {
    pub type_name: String,
    pub reason: GenError,
}

#[derive(Debug, Default)]
pub struct Generated {
    pub routines: Vec<Routine>,
    pub skipped: Vec<Skipped>,
    header: Option<String>,
}

pub struct Generator {
    config: Config,
    passes: Passes,
}

/// Generate with `config` and no passes.
pub fn generate(defs: &[Definition], config: &Config) -> Generated {
    Generator::new(config.clone()).generate(defs)
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            passes: Passes::new(),
        }
    }

    pub fn with_passes(mut self, passes: Passes) -> Self {
        self.passes = passes;
        self
    }

    pub fn generate(&self, defs: &[Definition]) -> Generated {
        let mut generated = Generated {
            header: self.config.header.clone(),
            ..Default::default()
        };
        for def in defs {
            match self.routine(def) {
                Ok(routine) => {
                    tracing::debug!(type_name = %def.type_name, "generated routines");
                    generated.routines.push(routine);
                }
                Err(reason) => {
                    tracing::warn!(type_name = %def.type_name, %reason, "skipping definition");
                    generated.skipped.push(Skipped {
                        type_name: def.type_name.clone(),
                        reason,
                    });
                }
            }
        }
        generated
    }

    /// Impls for one definition.
    pub fn routine(&self, def: &Definition) -> Result<Routine, GenError> {
        let def = self.passes.apply(def)?;
        def.validate()?;
        check_encodable(&def.node, &self.config.runtime_path)?;

        let rt = self.config.runtime_path.as_str();
        let ty = &def.type_name;
        let place = if def.is_record() {
            Place::binding("self")
        } else {
            Place::owned("self.0")
        };

        let size = self.config.emit_size.then(|| {
            let body = emit_size(&place, &def.node, rt);
            format!(
                "impl {rt}::SizeJson for {ty} {{\n    fn size_json(&self) -> usize {{\n{body}    }}\n}}\n"
            )
        });
        let encode = self.config.emit_encode.then(|| {
            let body = emit_encode(&place, &def.node, rt);
            format!(
                "impl {rt}::EncodeJson for {ty} {{\n    fn encode_json(&self, out: &mut Vec<u8>) -> Result<(), {rt}::EncodeError> {{\n{body}    }}\n}}\n"
            )
        });
        let decode = self.config.emit_decode.then(|| {
            let body = emit_decode(&place, &def.node, rt);
            format!(
                "impl {rt}::DecodeJson for {ty} {{\n    fn decode_json(&mut self, l: &mut {rt}::Lexer<'_>) {{\n{body}    }}\n}}\n"
            )
        });

        let test = self.config.emit_tests.then(|| emit_test(ty, rt));

        Ok(Routine {
            type_name: def.type_name.clone(),
            size,
            encode,
            decode,
            test,
        })
    }
}

/// Reject nodes no emitter can handle.
fn check_encodable(node: &TypeNode, runtime: &str) -> Result<(), GenError> {
    match node {
        TypeNode::Record(r) => r
            .fields
            .iter()
            .try_for_each(|f| check_encodable(&f.ty, runtime)),
        TypeNode::Map(m) => match m.key.as_ref() {
            TypeNode::Scalar(Scalar {
                kind: ScalarKind::String,
                shim: None,
            }) => check_encodable(&m.value, runtime),
            key => Err(GenError::MapKey(key.rust_type(runtime))),
        },
        TypeNode::Sequence(s) => check_encodable(&s.element, runtime),
        TypeNode::Optional(inner) => check_encodable(inner, runtime),
        TypeNode::Scalar(_) => Ok(()),
    }
}

impl Routine {
    /// The impls, without the test.
    pub fn render(&self) -> String {
        [&self.size, &self.encode, &self.decode]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Generated {
    /// All routines as one source file.
    pub fn render(&self) -> String {
        let mut output = String::new();
        if let Some(header) = &self.header {
            output.push_str(&format!("// {header}\n"));
        }
        for routine in &self.routines {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&routine.render());
        }
        let tests: Vec<&str> = self
            .routines
            .iter()
            .filter_map(|r| r.test.as_deref())
            .collect();
        if !tests.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!("#[cfg(test)]\nmod {TEST_MODULE} {{\n    use super::*;\n"));
            for test in tests {
                output.push('\n');
                output.push_str(test);
            }
            output.push_str("}\n");
        }
        output
    }
}
