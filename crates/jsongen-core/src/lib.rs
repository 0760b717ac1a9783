#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Type description IR for the jsongen code generator.
//!
//! The IR is produced by an external front end (usually as JSON) and is
//! read-only for the whole generation run:
//! - `ir` - type nodes, scalar kinds, conversion shims
//! - `utils` - identifier helpers shared by emitters

pub mod ir;
pub mod utils;


pub use ir::{
    ConversionShim, Definition, Field, MapOf, Record, Scalar, ScalarKind, SequenceOf, ShimMode,
    TypeNode, definitions_from_json,
};

/// Errors raised while loading or validating type descriptions.
#[derive(Debug, thiserror::Error)]
pub enum IrError {
    #[error("record `{record}` declares wire name {tag:?} more than once")]
    DuplicateTag { record: String, tag: String },

    #[error("invalid type description: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IrError>;
