//! Passes applied to every definition before the emitters see it.
//!
//! A pass may rewrite a definition or filter it out. Passes are configured
//! through one-line directives:
//!
//! ```text
//! shim Celsius as:float64 using:celsius_to_f64/celsius_from_f64 mode:cast
//! ignore Scratch Debug
//! tuple Point
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;

use jsongen_core::utils::is_path;
use jsongen_core::{ConversionShim, Definition, Scalar, ScalarKind, ShimMode, TypeNode};

use crate::error::{GenError, PassError};

pub trait Pass: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Offer a directive. `Ok(false)` means it is not addressed to this
    /// pass; the default accepts none.
    fn directive(&mut self, _name: &str, _args: &[&str]) -> Result<bool, PassError> {
        Ok(false)
    }

    /// Rewrite a definition; `None` filters it out. The default keeps it.
    fn apply<'a>(&self, def: Cow<'a, Definition>) -> Option<Cow<'a, Definition>> {
        Some(def)
    }
}

/// An ordered chain of passes.
#[derive(Debug, Default)]
pub struct Passes {
    chain: Vec<Box<dyn Pass>>,
}

impl Passes {
    /// An empty chain; every definition passes through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in passes: ignore, shim, tuple.
    pub fn builtin() -> Self {
        Self::new()
            .with(IgnorePass::default())
            .with(ShimPass::default())
            .with(TuplePass::default())
    }

    pub fn with(mut self, pass: impl Pass + 'static) -> Self {
        self.chain.push(Box::new(pass));
        self
    }

    /// Hand one directive line to the first pass that accepts it.
    pub fn directive(&mut self, line: &str) -> Result<(), PassError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(());
        };
        let args: Vec<&str> = words.collect();
        for pass in &mut self.chain {
            if pass.directive(name, &args)? {
                tracing::debug!(pass = pass.name(), directive = name, "directive accepted");
                return Ok(());
            }
        }
        Err(PassError::UnknownDirective(name.to_string()))
    }

    /// Directives one per line; blank lines and `#` comments are skipped.
    pub fn directives(&mut self, text: &str) -> Result<(), PassError> {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.directive(line)?;
        }
        Ok(())
    }

    pub fn apply<'a>(&self, def: &'a Definition) -> Result<Cow<'a, Definition>, GenError> {
        let mut current = Cow::Borrowed(def);
        for pass in &self.chain {
            match pass.apply(current) {
                Some(next) => current = next,
                None => return Err(GenError::Filtered { pass: pass.name() }),
            }
        }
        Ok(current)
    }
}

/// Run `edit` over every node of `def`, cloning it only when some node
/// `matches`.
fn rewrite<'a>(
    def: Cow<'a, Definition>,
    matches: impl Fn(&TypeNode) -> bool,
    edit: impl Fn(&mut TypeNode),
) -> Cow<'a, Definition> {
    fn any(node: &TypeNode, matches: &dyn Fn(&TypeNode) -> bool) -> bool {
        matches(node)
            || match node {
                TypeNode::Record(r) => r.fields.iter().any(|f| any(&f.ty, matches)),
                TypeNode::Map(m) => any(&m.key, matches) || any(&m.value, matches),
                TypeNode::Sequence(s) => any(&s.element, matches),
                TypeNode::Optional(inner) => any(inner, matches),
                TypeNode::Scalar(_) => false,
            }
    }

    fn walk(node: &mut TypeNode, edit: &dyn Fn(&mut TypeNode)) {
        edit(node);
        match node {
            TypeNode::Record(r) => r.fields.iter_mut().for_each(|f| walk(&mut f.ty, edit)),
            TypeNode::Map(m) => {
                walk(&mut m.key, edit);
                walk(&mut m.value, edit);
            }
            TypeNode::Sequence(s) => walk(&mut s.element, edit),
            TypeNode::Optional(inner) => walk(inner, edit),
            TypeNode::Scalar(_) => {}
        }
    }

    if !any(&def.node, &matches) {
        return def;
    }
    let mut def = def.into_owned();
    walk(&mut def.node, &edit);
    Cow::Owned(def)
}

/// `ignore <Type>...`: drop definitions by type name.
#[derive(Debug, Default)]
pub struct IgnorePass {
    names: HashSet<String>,
}

impl Pass for IgnorePass {
    fn name(&self) -> &'static str {
        "ignore"
    }

    fn directive(&mut self, name: &str, args: &[&str]) -> Result<bool, PassError> {
        if name != "ignore" {
            return Ok(false);
        }
        if args.is_empty() {
            return Err(PassError::MissingArgument {
                directive: "ignore",
                what: "type name",
            });
        }
        self.names.extend(args.iter().map(|s| s.to_string()));
        Ok(true)
    }

    fn apply<'a>(&self, def: Cow<'a, Definition>) -> Option<Cow<'a, Definition>> {
        if self.names.contains(&def.type_name) {
            tracing::debug!(type_name = %def.type_name, "ignored");
            return None;
        }
        Some(def)
    }
}

/// `shim <Type> as:<kind> using:<to>/<from> [mode:cast|convert]`: encode a
/// named type through conversion functions to and from a wire kind.
#[derive(Debug, Default)]
pub struct ShimPass {
    shims: HashMap<String, (ScalarKind, ConversionShim)>,
}

impl ShimPass {
    fn parse(args: &[&str]) -> Result<(String, ScalarKind, ConversionShim), PassError> {
        let Some((type_name, options)) = args.split_first() else {
            return Err(PassError::MissingArgument {
                directive: "shim",
                what: "type name",
            });
        };

        let mut kind = None;
        let mut functions = None;
        let mut mode = ShimMode::Cast;
        for option in options {
            let Some((key, value)) = option.split_once(':') else {
                return Err(PassError::Malformed {
                    directive: "shim",
                    arg: option.to_string(),
                });
            };
            match key {
                "as" => {
                    kind = Some(
                        ScalarKind::from_name(value)
                            .ok_or_else(|| PassError::UnknownKind(value.to_string()))?,
                    );
                }
                "using" => {
                    let (to, from) = value.split_once('/').ok_or_else(|| PassError::Malformed {
                        directive: "shim",
                        arg: option.to_string(),
                    })?;
                    for path in [to, from] {
                        if !is_path(path) {
                            return Err(PassError::InvalidPath(path.to_string()));
                        }
                    }
                    functions = Some((to.to_string(), from.to_string()));
                }
                "mode" => {
                    mode = match value {
                        "cast" => ShimMode::Cast,
                        "convert" => ShimMode::Convert,
                        other => return Err(PassError::UnknownMode(other.to_string())),
                    };
                }
                _ => {
                    return Err(PassError::Malformed {
                        directive: "shim",
                        arg: option.to_string(),
                    });
                }
            }
        }

        let kind = kind.ok_or(PassError::MissingArgument {
            directive: "shim",
            what: "as:<kind>",
        })?;
        let (to_wire, from_wire) = functions.ok_or(PassError::MissingArgument {
            directive: "shim",
            what: "using:<to>/<from>",
        })?;
        let shim = ConversionShim {
            type_name: type_name.to_string(),
            to_wire,
            from_wire,
            mode,
        };
        Ok((type_name.to_string(), kind, shim))
    }

    fn lookup(&self, node: &TypeNode) -> Option<&(ScalarKind, ConversionShim)> {
        match node {
            TypeNode::Scalar(Scalar {
                kind: ScalarKind::Named(name),
                shim: None,
            }) => self.shims.get(name),
            _ => None,
        }
    }
}

impl Pass for ShimPass {
    fn name(&self) -> &'static str {
        "shim"
    }

    fn directive(&mut self, name: &str, args: &[&str]) -> Result<bool, PassError> {
        if name != "shim" {
            return Ok(false);
        }
        let (type_name, kind, shim) = Self::parse(args)?;
        self.shims.insert(type_name, (kind, shim));
        Ok(true)
    }

    fn apply<'a>(&self, def: Cow<'a, Definition>) -> Option<Cow<'a, Definition>> {
        let def = rewrite(
            def,
            |node| self.lookup(node).is_some(),
            |node| {
                if let Some((kind, shim)) = self.lookup(node) {
                    tracing::debug!(type_name = %shim.type_name, wire = kind.name(), "shim applied");
                    *node = TypeNode::Scalar(Scalar {
                        kind: kind.clone(),
                        shim: Some(shim.clone()),
                    });
                }
            },
        );
        Some(def)
    }
}

/// `tuple <Type>...`: encode the named records positionally.
#[derive(Debug, Default)]
pub struct TuplePass {
    names: HashSet<String>,
}

impl Pass for TuplePass {
    fn name(&self) -> &'static str {
        "tuple"
    }

    fn directive(&mut self, name: &str, args: &[&str]) -> Result<bool, PassError> {
        if name != "tuple" {
            return Ok(false);
        }
        if args.is_empty() {
            return Err(PassError::MissingArgument {
                directive: "tuple",
                what: "type name",
            });
        }
        self.names.extend(args.iter().map(|s| s.to_string()));
        Ok(true)
    }

    fn apply<'a>(&self, def: Cow<'a, Definition>) -> Option<Cow<'a, Definition>> {
        let is_target = |node: &TypeNode| {
            matches!(node, TypeNode::Record(r) if !r.encode_as_array && self.names.contains(&r.name))
        };
        let def = rewrite(def, is_target, |node| {
            if is_target(node)
                && let TypeNode::Record(r) = node
            {
                r.encode_as_array = true;
            }
        });
        Some(def)
    }
}
