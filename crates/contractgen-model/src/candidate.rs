use crate::{AttributeUsage, DeclKind, Member, Modifiers, NameSegment, Namespace, QualifiedName};
use serde::{Deserialize, Serialize};

///
/// TypeScope
///
/// The header of one type declaration: everything needed to re-open the
/// same declaration as a partial continuation.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TypeScope {
    pub name: String,

    #[serde(default)]
    pub kind: DeclKind,

    #[serde(default)]
    pub modifiers: Modifiers,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
}

impl TypeScope {
    #[must_use]
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::new(),
            type_parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl Into<Modifiers>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    #[must_use]
    pub fn with_type_parameters(
        mut self,
        params: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.type_parameters = params.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// Source text that refers to this type from inside its own body,
    /// e.g. `Pair` or `Envelope<TKey, TValue>`.
    #[must_use]
    pub fn reference(&self) -> String {
        if self.type_parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}<{}>", self.name, self.type_parameters.join(", "))
        }
    }

    #[must_use]
    pub fn segment(&self) -> NameSegment {
        NameSegment::new(self.name.clone(), self.arity())
    }
}

///
/// CandidateDeclaration
///
/// A type declaration the host offers for generation, together with the
/// context needed to re-open it: enclosing types (outermost first) and the
/// enclosing namespace.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CandidateDeclaration {
    #[serde(flatten)]
    pub scope: TypeScope,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeUsage>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containing_types: Vec<TypeScope>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
}

impl CandidateDeclaration {
    #[must_use]
    pub const fn new(scope: TypeScope) -> Self {
        Self {
            scope,
            attributes: Vec::new(),
            members: Vec::new(),
            containing_types: Vec::new(),
            namespace: None,
        }
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(Namespace::new(namespace));
        self
    }

    /// Add the next enclosing type, moving inward: call outermost first.
    #[must_use]
    pub fn nested_in(mut self, scope: TypeScope) -> Self {
        self.containing_types.push(scope);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeUsage) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.scope.name
    }

    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        self.scope.kind
    }

    #[must_use]
    pub const fn modifiers(&self) -> &Modifiers {
        &self.scope.modifiers
    }

    /// Attribute usages bound to the given attribute type, in source order.
    pub fn attributes_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a AttributeUsage> {
        self.attributes.iter().filter(move |a| a.is(path))
    }

    #[must_use]
    pub fn has_attribute(&self, path: &str) -> bool {
        self.attributes_of(path).next().is_some()
    }

    /// Every scope from the outermost enclosing type down to this one.
    pub fn scope_chain(&self) -> impl DoubleEndedIterator<Item = &TypeScope> {
        self.containing_types
            .iter()
            .chain(std::iter::once(&self.scope))
    }

    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        let namespace = self
            .namespace
            .iter()
            .flat_map(Namespace::segments)
            .map(|s| NameSegment::new(s, 0));
        let types = self.scope_chain().map(TypeScope::segment);

        QualifiedName::new(namespace.chain(types).collect())
    }
}

///
/// TESTS
///
