#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Generates JSON size, encode and decode routines from the type IR.
//!
//! Each definition goes through:
//! - `passes` - rewrites and filters (shims, ignored types, tuples)
//! - `size` - the `SizeJson` upper bound, with constant folding
//! - `encode` - the `EncodeJson` appender, with literal fusion
//! - `decode` - the `DecodeJson` reader over the runtime lexer
//! - `testgen` - an optional round-trip test per type
//!
//! The emitted code calls into `jsongen-runtime` through a configurable
//! path and needs no imports.

mod config;
mod context;
mod decode;
mod encode;
mod error;
mod generator;
mod kinds;
pub mod passes;
mod size;
mod testgen;

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod decode_tests;
#[cfg(test)]
mod encode_tests;
#[cfg(test)]
mod size_tests;
#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{GenError, PassError};
pub use generator::{Generated, Generator, Routine, Skipped, generate};
pub use passes::{IgnorePass, Pass, Passes, ShimPass, TuplePass};
