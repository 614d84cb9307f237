//! Source synthesizer.
//!
//! Builds the companion members of one candidate as a [`SourceUnit`] tree,
//! wraps them through every enclosing type and the namespace, and renders
//! the tree to text.

mod render;
mod tree;

pub use render::{ARGUMENT_NULL_EXCEPTION, RenderOptions, STREAM_TYPE};
pub use tree::{MethodDoc, MethodFragment, MethodKind, Node, SourceUnit, Statement};

use crate::{
    engine::EngineDescriptor,
    error::GenerateError,
    extract::ResolvedConfiguration,
    identity::UnitName,
    model::{CandidateDeclaration, Namespace, Parameter, TypeScope},
};

///
/// GeneratedUnit
///
/// One emitted source fragment and the name it is submitted under.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedUnit {
    pub name: UnitName,
    pub source: String,
}

impl GeneratedUnit {
    #[must_use]
    pub const fn new(name: UnitName, source: String) -> Self {
        Self { name, source }
    }
}

/// Build the unit tree for `candidate` under `engine`.
pub fn synthesize(
    candidate: &CandidateDeclaration,
    engine: &EngineDescriptor,
    config: &ResolvedConfiguration,
) -> Result<SourceUnit, GenerateError> {
    if let Some(scope) = candidate
        .containing_types
        .iter()
        .find(|scope| !scope.modifiers.is_partial())
    {
        return Err(GenerateError::NonPartialScope {
            scope: scope.reference(),
        });
    }

    let methods = Builder::new(&candidate.scope, engine, config)
        .methods()
        .into_iter()
        .map(Node::Method)
        .collect();

    // innermost first
    let mut node = Node::wrap_in_type(candidate.scope.clone(), methods);
    for scope in candidate.containing_types.iter().rev() {
        node = Node::wrap_in_type(scope.clone(), vec![node]);
    }
    let namespace = candidate
        .namespace
        .as_ref()
        .map(Namespace::canonical)
        .filter(|name| !name.is_empty());
    if let Some(namespace) = namespace {
        node = Node::wrap_in_namespace(namespace, vec![node]);
    }

    Ok(SourceUnit::new(node))
}

///
/// Builder
///

struct Builder<'a> {
    scope: &'a TypeScope,
    engine: &'a EngineDescriptor,
    config: &'a ResolvedConfiguration,
}

impl<'a> Builder<'a> {
    const fn new(
        scope: &'a TypeScope,
        engine: &'a EngineDescriptor,
        config: &'a ResolvedConfiguration,
    ) -> Self {
        Self {
            scope,
            engine,
            config,
        }
    }

    fn methods(&self) -> Vec<MethodFragment> {
        let mut methods = Vec::with_capacity(3);
        if self.config.emit_instance_method {
            methods.push(self.instance_write());
        }
        methods.push(self.static_write());
        methods.push(self.static_read());

        methods
    }

    fn static_write(&self) -> MethodFragment {
        let target = self.scope.reference();
        let mut body = vec![Statement::ThrowIfNull {
            param: "target".to_string(),
        }];
        let mut throws_for = vec!["target".to_string()];
        if !self.scope.kind.is_value_type() {
            body.push(Statement::ThrowIfNull {
                param: "instance".to_string(),
            });
            throws_for.insert(0, "instance".to_string());
        }
        body.push(self.construction());
        body.push(Statement::WriteObject {
            stream: "target".to_string(),
            instance: "instance".to_string(),
        });

        MethodFragment {
            kind: MethodKind::StaticWrite,
            name: self.engine.write_method(),
            return_type: "void".to_string(),
            parameters: vec![
                Parameter::new(STREAM_TYPE, "target"),
                Parameter::new(target, "instance"),
            ],
            body,
            doc: MethodDoc {
                summary: format!(
                    "Serializes an instance of <see cref=\"{}\"/> into a stream.",
                    self.cref()
                ),
                params: vec![
                    param_doc("target", "The stream to serialize into."),
                    param_doc("instance", "The instance to serialize."),
                ],
                returns: None,
                throws_for,
            },
        }
    }

    fn static_read(&self) -> MethodFragment {
        let target = self.scope.reference();
        let return_type = if self.scope.kind.is_value_type() {
            target.clone()
        } else {
            format!("{target}?")
        };

        MethodFragment {
            kind: MethodKind::StaticRead,
            name: self.engine.read_method(),
            return_type,
            parameters: vec![Parameter::new(STREAM_TYPE, "source")],
            body: vec![
                Statement::ThrowIfNull {
                    param: "source".to_string(),
                },
                self.construction(),
                Statement::ReadObject {
                    stream: "source".to_string(),
                    target_type: target,
                },
            ],
            doc: MethodDoc {
                summary: format!(
                    "Deserializes an instance of <see cref=\"{}\"/> from a stream.",
                    self.cref()
                ),
                params: vec![param_doc("source", "The stream to deserialize from.")],
                returns: Some(format!(
                    "A deserialized instance of <see cref=\"{}\"/> if deserialized successfully; otherwise, the default value.",
                    self.cref()
                )),
                throws_for: vec!["source".to_string()],
            },
        }
    }

    fn instance_write(&self) -> MethodFragment {
        MethodFragment {
            kind: MethodKind::InstanceWrite,
            name: self.engine.write_method(),
            return_type: "void".to_string(),
            parameters: vec![Parameter::new(STREAM_TYPE, "target")],
            body: vec![
                Statement::ThrowIfNull {
                    param: "target".to_string(),
                },
                Statement::Forward {
                    method: self.engine.write_method(),
                    arguments: vec!["target".to_string(), "this".to_string()],
                },
            ],
            doc: MethodDoc {
                summary: "Serializes this instance into a stream.".to_string(),
                params: vec![param_doc("target", "The stream to serialize into.")],
                returns: None,
                throws_for: vec!["target".to_string()],
            },
        }
    }

    // construction
    // read and write must build the serializer from the same expression
    fn construction(&self) -> Statement {
        Statement::ConstructSerializer {
            serializer_type: self.engine.serializer_type.to_string(),
            target_type: self.scope.reference(),
            settings: self.config.settings_access.as_ref().map(|a| a.expression()),
        }
    }

    // cref
    // doc references spell type parameter lists with braces
    fn cref(&self) -> String {
        self.scope.reference().replace('<', "{").replace('>', "}")
    }
}

fn param_doc(name: &str, text: &str) -> (String, String) {
    (name.to_string(), text.to_string())
}

///
/// TESTS
///
