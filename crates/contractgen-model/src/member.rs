use crate::Modifiers;
use serde::{Deserialize, Serialize};

///
/// Parameter
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

impl Parameter {
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

///
/// Member
///
/// A direct (non-inherited) member of a type declaration, in declaration
/// order. Only the shapes the engine inspects carry detail; everything
/// else (constructors, events, nested types...) is `Other`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Field {
        #[serde(default)]
        modifiers: Modifiers,
        ty: String,
        variables: Vec<String>,
    },

    Property {
        #[serde(default)]
        modifiers: Modifiers,
        ty: String,
        name: String,
    },

    Method {
        #[serde(default)]
        modifiers: Modifiers,
        return_type: String,
        name: String,
        #[serde(default)]
        parameters: Vec<Parameter>,
    },

    Other {
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Member {
    #[must_use]
    pub fn field(
        modifiers: impl Into<Modifiers>,
        ty: impl Into<String>,
        variables: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Field {
            modifiers: modifiers.into(),
            ty: ty.into(),
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn property(
        modifiers: impl Into<Modifiers>,
        ty: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::Property {
            modifiers: modifiers.into(),
            ty: ty.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn method(
        modifiers: impl Into<Modifiers>,
        return_type: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self::Method {
            modifiers: modifiers.into(),
            return_type: return_type.into(),
            name: name.into(),
            parameters,
        }
    }

    #[must_use]
    pub const fn modifiers(&self) -> &Modifiers {
        match self {
            Self::Field { modifiers, .. }
            | Self::Property { modifiers, .. }
            | Self::Method { modifiers, .. }
            | Self::Other { modifiers, .. } => modifiers,
        }
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().is_static()
    }

    /// Declared name; for fields, the first declared variable.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Field { variables, .. } => variables.first().map(String::as_str),
            Self::Property { name, .. } | Self::Method { name, .. } => Some(name),
            Self::Other { name, .. } => name.as_deref(),
        }
    }
}
