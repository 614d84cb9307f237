use serde::{Deserialize, Serialize};
use std::fmt;

///
/// DeclKind
///
/// Structural kind of a type declaration. Only kinds that can be declared
/// `partial` (and so can receive generated members) are modelled.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    #[default]
    Class,

    /// Only reachable as an enclosing scope: hosts never bind a data contract
    /// to an interface.
    Interface,

    Record,
    RecordStruct,
    Struct,
}

impl DeclKind {
    /// Declaration keyword(s) reproduced in a re-emitted header.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
            Self::Struct => "struct",
        }
    }

    // is_value_type
    // instances can never be null, which changes the shape of emitted guards
    #[must_use]
    pub const fn is_value_type(self) -> bool {
        matches!(self, Self::RecordStruct | Self::Struct)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
