use crate::model::{Parameter, TypeScope};

///
/// SourceUnit
///
/// Structured form of one generated unit: the candidate's members wrapped
/// in every enclosing scope. Rendered to text only at the host boundary.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceUnit {
    pub root: Node,
}

impl SourceUnit {
    #[must_use]
    pub const fn new(root: Node) -> Self {
        Self { root }
    }

    /// Namespace wrapping the unit, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match &self.root {
            Node::Namespace { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type headers from the outermost enclosing type to the candidate.
    #[must_use]
    pub fn type_scopes(&self) -> Vec<&TypeScope> {
        let mut scopes = Vec::new();
        self.root.walk(&mut |node| {
            if let Node::Type { scope, .. } = node {
                scopes.push(scope);
            }
        });

        scopes
    }

    /// Method fragments, in emission order.
    #[must_use]
    pub fn methods(&self) -> Vec<&MethodFragment> {
        let mut methods = Vec::new();
        self.root.walk(&mut |node| {
            if let Node::Method(method) = node {
                methods.push(method);
            }
        });

        methods
    }
}

///
/// Node
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Namespace { name: String, body: Vec<Self> },
    Type { scope: TypeScope, body: Vec<Self> },
    Method(MethodFragment),
}

impl Node {
    /// Wrap `body` in a partial continuation of `scope`.
    #[must_use]
    pub fn wrap_in_type(scope: TypeScope, body: Vec<Self>) -> Self {
        Self::Type { scope, body }
    }

    #[must_use]
    pub fn wrap_in_namespace(name: impl Into<String>, body: Vec<Self>) -> Self {
        Self::Namespace {
            name: name.into(),
            body,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Namespace { body, .. } | Self::Type { body, .. } => body,
            Self::Method(_) => &[],
        }
    }

    // walk
    // pre-order, so scopes are visited outermost first
    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

///
/// MethodKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MethodKind {
    StaticWrite,
    StaticRead,
    InstanceWrite,
}

impl MethodKind {
    #[must_use]
    pub const fn is_static(self) -> bool {
        !matches!(self, Self::InstanceWrite)
    }
}

///
/// MethodFragment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodFragment {
    pub kind: MethodKind,
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
    pub doc: MethodDoc,
}

impl MethodFragment {
    #[must_use]
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// The serializer construction statement, if this method builds one.
    #[must_use]
    pub fn construction(&self) -> Option<&Statement> {
        self.body
            .iter()
            .find(|s| matches!(s, Statement::ConstructSerializer { .. }))
    }
}

///
/// MethodDoc
///
/// XML documentation attached to a generated method.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MethodDoc {
    pub summary: String,
    pub params: Vec<(String, String)>,
    pub returns: Option<String>,

    /// Parameters named by the `ArgumentNullException` remark.
    pub throws_for: Vec<String>,
}

///
/// Statement
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Statement {
    /// Guard that throws `ArgumentNullException` naming `param`.
    ThrowIfNull { param: String },

    /// Binds `serializer`, using `settings` when it evaluates non-null.
    ConstructSerializer {
        serializer_type: String,
        target_type: String,
        settings: Option<String>,
    },

    WriteObject { stream: String, instance: String },

    /// Returns the read object converted to `target_type`, or `default`.
    ReadObject { stream: String, target_type: String },

    /// Calls `method` with `arguments`, discarding the result.
    Forward { method: String, arguments: Vec<String> },
}
