#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Fixture types for end-to-end tests.
//!
//! Their `SizeJson`, `EncodeJson` and `DecodeJson` impls are generated by
//! the build script from `types.json`, with the passes configured in
//! `directives.txt`. The build script also emits a round-trip test per
//! type.

use std::collections::HashMap;

use jsongen_runtime::{Complex64, Complex128, Dynamic, Extension, Number, Raw, Timestamp};


#[derive(Clone, Debug, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub tags: Vec<String>,
}

/// Encoded positionally as `[x,y]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels(pub HashMap<String, String>);

/// Encoded as a plain number.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Celsius(pub f64);

/// Encoded as `"C<n>"`; only codes below 1000 are valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Code(pub u16);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    pub note: Option<String>,
    pub level: i8,
}

#[derive(Debug, Default, PartialEq)]
pub struct Inventory {
    pub id: [u8; 3],
    pub blob: Vec<u8>,
    pub scores: [i32; 3],
    pub counts: HashMap<String, u32>,
    pub owner: Option<Person>,
    pub origin: Point,
    pub temp: Celsius,
    pub code: Code,
    pub meta: Meta,
    pub created: Timestamp,
    pub ratio: f64,
    pub extra: Dynamic,
    pub kind: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub sku: String,
    pub qty: u16,
}

#[derive(Debug, Default, PartialEq)]
pub struct Catalog {
    pub entries: Vec<Entry>,
    pub by_name: HashMap<String, Meta>,
    pub maybe: Option<Option<i32>>,
    pub wave: Complex128,
    pub small: Complex64,
    pub ext: Extension,
    pub gain: f32,
    pub corners: [Point; 2],
    pub grid: [[i16; 2]; 2],
    pub checked: Option<Code>,
    pub temps: Vec<Celsius>,
    pub blobs: Vec<Vec<u8>>,
    pub reading: Number,
    pub raw: Raw,
}

pub mod units {
    use super::{Celsius, Code};

    pub fn celsius_to_f64(c: &Celsius) -> f64 {
        c.0
    }

    pub fn celsius_from_f64(v: f64) -> Celsius {
        Celsius(v)
    }

    pub fn code_to_text(code: &Code) -> Result<String, String> {
        if code.0 >= 1000 {
            return Err(format!("code {} out of range", code.0));
        }
        Ok(format!("C{}", code.0))
    }

    pub fn code_from_text(text: String) -> Result<Code, String> {
        text.strip_prefix('C')
            .and_then(|digits| digits.parse().ok())
            .filter(|&n| n < 1000)
            .map(Code)
            .ok_or_else(|| format!("invalid code {text:?}"))
    }
}

include!(concat!(env!("OUT_DIR"), "/generated.rs"));
