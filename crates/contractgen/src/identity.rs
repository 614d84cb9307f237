//! Unit identity: a stable, collision-free name per (candidate, engine).
//!
//! Segments are joined with `_`. A literal `_` inside a segment is written
//! as `_0` and a generic arity as `_<n>` with `n >= 1`, so a separator is
//! always followed by a letter (or by `_` when the next segment starts with
//! one) and the flattened name decodes unambiguously.
//!
//! Hosts write units to case-insensitive file systems, so the name must also
//! stay unique after case folding. A trailing case signature records which
//! letters are upper case: one bit per letter in order, most significant
//! bit first, packed into lower-case hex digits. The engine suffix always
//! ends in a letter that is not a hex digit, so the signature splits off
//! unambiguously and is omitted when the name has no cased letters.

use crate::{
    engine::EngineDescriptor,
    model::{CandidateDeclaration, QualifiedName},
};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

const SEPARATOR: char = '_';
const ESCAPED_SEPARATOR: &str = "_0";

///
/// UnitName
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct UnitName(String);

impl UnitName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File the unit is written to by directory-backed hosts.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.g.cs", self.0)
    }

    /// Case-folded form. Distinct names stay distinct under folding.
    #[must_use]
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

#[must_use]
pub fn unit_name(candidate: &CandidateDeclaration, engine: &EngineDescriptor) -> UnitName {
    flatten(&candidate.qualified_name(), engine)
}

#[must_use]
pub fn flatten(name: &QualifiedName, engine: &EngineDescriptor) -> UnitName {
    let mut out = String::new();

    for segment in &name.segments {
        out.push_str(&segment.name.replace(SEPARATOR, ESCAPED_SEPARATOR));
        if segment.arity > 0 {
            out.push(SEPARATOR);
            out.push_str(&segment.arity.to_string());
        }
        out.push(SEPARATOR);
    }
    let signature = case_signature(&out);
    out.push_str(engine.unit_suffix);

    if !signature.is_empty() {
        out.push(SEPARATOR);
        out.push_str(&signature);
    }

    UnitName(out)
}

// case_signature
// upper-case bits of every cased letter, four to a hex digit
fn case_signature(text: &str) -> String {
    let bits: Vec<bool> = text
        .chars()
        .filter(|c| c.is_uppercase() || c.is_lowercase())
        .map(char::is_uppercase)
        .collect();

    bits.chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .enumerate()
                .fold(0, |acc, (i, &upper)| acc | (u32::from(upper) << (3 - i)));

            char::from_digit(value, 16).unwrap_or('0')
        })
        .collect()
}

///
/// TESTS
///
