use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Namespace
///
/// Full dotted name of the namespace enclosing a declaration, for example
/// `Company.Product.Models`. Nested namespace blocks are flattened by the
/// host into one name.
///

#[derive(Clone, Debug, Deref, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').map(str::trim).filter(|s| !s.is_empty())
    }

    /// Dotted name rebuilt from [`Namespace::segments`]; empty when there
    /// are none.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.segments().collect::<Vec<_>>().join(".")
    }
}

///
/// NameSegment
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NameSegment {
    pub name: String,

    /// Number of generic type parameters; zero for namespaces.
    pub arity: usize,
}

impl NameSegment {
    #[must_use]
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for NameSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arity == 0 {
            f.write_str(&self.name)
        } else {
            write!(f, "{}`{}", self.name, self.arity)
        }
    }
}

///
/// QualifiedName
///
/// Fully qualified, non-generic name of a declaration: namespace segments,
/// then every enclosing type, then the type itself. Generic parameter
/// lists are reduced to their arity (`Outer`1.Inner`).
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct QualifiedName {
    pub segments: Vec<NameSegment>,
}

impl QualifiedName {
    #[must_use]
    pub const fn new(segments: Vec<NameSegment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn last(&self) -> Option<&NameSegment> {
        self.segments.last()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }

        Ok(())
    }
}

///
/// TESTS
///
