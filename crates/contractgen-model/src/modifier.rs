use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Modifier
///
/// C# declaration modifier keyword, as written on a type or member.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum Modifier {
    Abstract,
    Async,
    Const,
    Extern,
    File,
    Internal,
    New,
    Override,
    Partial,
    Private,
    Protected,
    Public,
    Readonly,
    Ref,
    Required,
    Sealed,
    Static,
    Unsafe,
    Virtual,
    Volatile,
}

impl Modifier {
    /// Source keyword for this modifier.
    #[must_use]
    #[remain::check]
    pub const fn keyword(self) -> &'static str {
        #[remain::sorted]
        match self {
            Self::Abstract => "abstract",
            Self::Async => "async",
            Self::Const => "const",
            Self::Extern => "extern",
            Self::File => "file",
            Self::Internal => "internal",
            Self::New => "new",
            Self::Override => "override",
            Self::Partial => "partial",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Public => "public",
            Self::Readonly => "readonly",
            Self::Ref => "ref",
            Self::Required => "required",
            Self::Sealed => "sealed",
            Self::Static => "static",
            Self::Unsafe => "unsafe",
            Self::Virtual => "virtual",
            Self::Volatile => "volatile",
        }
    }

    /// Parse a source keyword back into a modifier.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let modifier = match keyword {
            "abstract" => Self::Abstract,
            "async" => Self::Async,
            "const" => Self::Const,
            "extern" => Self::Extern,
            "file" => Self::File,
            "internal" => Self::Internal,
            "new" => Self::New,
            "override" => Self::Override,
            "partial" => Self::Partial,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "public" => Self::Public,
            "readonly" => Self::Readonly,
            "ref" => Self::Ref,
            "required" => Self::Required,
            "sealed" => Self::Sealed,
            "static" => Self::Static,
            "unsafe" => Self::Unsafe,
            "virtual" => Self::Virtual,
            "volatile" => Self::Volatile,
            _ => return None,
        };

        Some(modifier)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

///
/// Modifiers
///
/// Ordered modifier list. Order is preserved exactly as declared so that
/// re-emitted headers are byte-identical to the original. Snapshots may
/// spell it as a keyword array or as the declaration text itself
/// (`"internal static partial"`).
///

#[derive(
    Clone, Debug, Default, Deref, Deserialize, Eq, Hash, IntoIterator, PartialEq, Serialize,
)]
#[serde(into = "Vec<Modifier>", try_from = "ModifiersRepr")]
pub struct Modifiers(Vec<Modifier>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ModifiersRepr {
    List(Vec<Modifier>),
    Text(String),
}

impl TryFrom<ModifiersRepr> for Modifiers {
    type Error = String;

    fn try_from(repr: ModifiersRepr) -> Result<Self, Self::Error> {
        match repr {
            ModifiersRepr::List(list) => Ok(Self(list)),
            ModifiersRepr::Text(text) => {
                Self::parse(&text).map_err(|word| format!("unknown modifier `{word}`"))
            }
        }
    }
}

impl From<Modifiers> for Vec<Modifier> {
    fn from(modifiers: Modifiers) -> Self {
        modifiers.0
    }
}

impl Modifiers {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a whitespace separated keyword list such as `"internal sealed partial"`.
    /// Unknown keywords are returned as the error value.
    pub fn parse(text: &str) -> Result<Self, String> {
        text.split_whitespace()
            .map(|word| Modifier::from_keyword(word).ok_or_else(|| word.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn has(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.has(Modifier::Partial)
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, modifier) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{modifier}")?;
        }

        Ok(())
    }
}

impl From<Vec<Modifier>> for Modifiers {
    fn from(v: Vec<Modifier>) -> Self {
        Self(v)
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(v: [Modifier; N]) -> Self {
        Self(v.to_vec())
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_declared_order() {
        let modifiers = Modifiers::parse("internal sealed partial").unwrap();

        assert_eq!(modifiers.to_string(), "internal sealed partial");
        assert!(modifiers.is_partial());
        assert!(!modifiers.is_static());
    }

    #[test]
    fn parse_rejects_unknown_keyword() {
        assert_eq!(Modifiers::parse("public partial mutable"), Err("mutable".to_string()));
    }

    #[test]
    fn deserializes_from_list_or_declaration_text() {
        let list: Modifiers = serde_json::from_str(r#"["internal", "static", "partial"]"#).unwrap();
        let text: Modifiers = serde_json::from_str(r#""internal static partial""#).unwrap();

        assert_eq!(list, text);
        assert_eq!(serde_json::to_string(&text).unwrap(), r#"["internal","static","partial"]"#);
        assert!(serde_json::from_str::<Modifiers>(r#""public mutable""#).is_err());
    }

    #[test]
    fn keyword_and_from_keyword_agree() {
        for modifier in [Modifier::File, Modifier::Readonly, Modifier::Static] {
            assert_eq!(Modifier::from_keyword(modifier.keyword()), Some(modifier));
        }
    }
}
