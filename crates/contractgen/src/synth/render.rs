use crate::{
    model::TypeScope,
    synth::tree::{MethodDoc, MethodFragment, Node, SourceUnit, Statement},
};
use serde::{Deserialize, Serialize};

/// Fully qualified stream type used by every generated signature.
pub const STREAM_TYPE: &str = "global::System.IO.Stream";

/// Exception thrown by the generated null guards.
pub const ARGUMENT_NULL_EXCEPTION: &str = "global::System.ArgumentNullException";

const AUTO_GENERATED: &str = "// <auto-generated/>";
const NULLABLE_ENABLE: &str = "#nullable enable";

///
/// RenderOptions
///
/// Text-level choices that never change the structure of a unit.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub indent: String,
    pub doc_comments: bool,

    /// Emit `// <auto-generated/>` and `#nullable enable` before the code.
    pub auto_generated_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            doc_comments: true,
            auto_generated_header: true,
        }
    }
}

impl SourceUnit {
    #[must_use]
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut w = Writer::new(&options.indent);

        if options.auto_generated_header {
            w.line(AUTO_GENERATED);
            w.line(NULLABLE_ENABLE);
            w.line("");
        }
        w.node(&self.root, options);

        w.out
    }
}

///
/// Writer
///

struct Writer<'a> {
    out: String,
    indent: &'a str,
    depth: usize,
}

impl<'a> Writer<'a> {
    const fn new(indent: &'a str) -> Self {
        Self {
            out: String::new(),
            indent,
            depth: 0,
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(self.indent);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn node(&mut self, node: &Node, options: &RenderOptions) {
        match node {
            Node::Namespace { name, body } => {
                self.line(format!("namespace {name}"));
                self.block(body, options);
            }
            Node::Type { scope, body } => {
                self.line(header(scope));
                self.block(body, options);
            }
            Node::Method(method) => self.method(method, options),
        }
    }

    fn block(&mut self, body: &[Node], options: &RenderOptions) {
        self.open();
        for (i, child) in body.iter().enumerate() {
            if i > 0 {
                self.line("");
            }
            self.node(child, options);
        }
        self.close();
    }

    fn method(&mut self, method: &MethodFragment, options: &RenderOptions) {
        if options.doc_comments {
            self.doc(&method.doc);
        }

        let parameters = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let modifiers = if method.kind.is_static() {
            "public static"
        } else {
            "public"
        };
        self.line(format!(
            "{modifiers} {} {}({parameters})",
            method.return_type, method.name
        ));

        self.open();
        let mut guarded = false;
        for statement in &method.body {
            let is_guard = matches!(statement, Statement::ThrowIfNull { .. });
            if guarded && !is_guard {
                self.line("");
            }
            guarded = is_guard;
            self.statement(statement);
        }
        self.close();
    }

    fn doc(&mut self, doc: &MethodDoc) {
        self.line("/// <summary>");
        self.line(format!("/// {}", doc.summary));
        self.line("/// </summary>");
        for (name, text) in &doc.params {
            self.line(format!("/// <param name=\"{name}\">{text}</param>"));
        }
        if let Some(returns) = &doc.returns {
            self.line(format!("/// <returns>{returns}</returns>"));
        }
        if !doc.throws_for.is_empty() {
            let refs = doc
                .throws_for
                .iter()
                .map(|p| format!("<paramref name=\"{p}\"/>"))
                .collect::<Vec<_>>()
                .join(" or ");
            self.line(format!(
                "/// <exception cref=\"{ARGUMENT_NULL_EXCEPTION}\">Thrown when {refs} is <see langword=\"null\"/>.</exception>"
            ));
        }
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::ThrowIfNull { param } => {
                self.line(format!("if ({param} is null)"));
                self.open();
                self.line(format!(
                    "throw new {ARGUMENT_NULL_EXCEPTION}(nameof({param}));"
                ));
                self.close();
            }
            Statement::ConstructSerializer {
                serializer_type,
                target_type,
                settings,
            } => {
                let default = format!("new {serializer_type}(typeof({target_type}))");
                match settings {
                    Some(expr) => {
                        self.line(format!("var settings = {expr};"));
                        self.line(format!(
                            "var serializer = settings is not null ? new {serializer_type}(typeof({target_type}), settings) : {default};"
                        ));
                    }
                    None => self.line(format!("var serializer = {default};")),
                }
            }
            Statement::WriteObject { stream, instance } => {
                self.line(format!("serializer.WriteObject({stream}, {instance});"));
            }
            Statement::ReadObject {
                stream,
                target_type,
            } => {
                self.line(format!(
                    "return serializer.ReadObject({stream}) is {target_type} deserialized ? deserialized : default;"
                ));
            }
            Statement::Forward { method, arguments } => {
                self.line(format!("{method}({});", arguments.join(", ")));
            }
        }
    }
}

// header
// the re-opened declaration line, modifiers reproduced verbatim
fn header(scope: &TypeScope) -> String {
    let modifiers = scope.modifiers.to_string();
    let declaration = format!("{} {}", scope.kind.keyword(), scope.reference());

    if modifiers.is_empty() {
        declaration
    } else {
        format!("{modifiers} {declaration}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclKind, Modifier};

    #[test]
    fn header_reproduces_modifiers_kind_and_parameters() {
        let scope = TypeScope::new(DeclKind::RecordStruct, "Entry")
            .with_modifiers([Modifier::Public, Modifier::Readonly, Modifier::Partial])
            .with_type_parameters(["TKey", "TValue"]);

        assert_eq!(
            header(&scope),
            "public readonly partial record struct Entry<TKey, TValue>"
        );
    }

    #[test]
    fn header_without_modifiers_has_no_leading_space() {
        let scope = TypeScope::new(DeclKind::Class, "Outer");

        assert_eq!(header(&scope), "class Outer");
    }

    #[test]
    fn indent_applies_per_depth() {
        let unit = SourceUnit::new(Node::wrap_in_namespace(
            "App",
            vec![Node::wrap_in_type(
                TypeScope::new(DeclKind::Class, "Outer").with_modifiers([Modifier::Partial]),
                vec![],
            )],
        ));
        let options = RenderOptions {
            indent: "  ".to_string(),
            auto_generated_header: false,
            ..RenderOptions::default()
        };

        assert_eq!(
            unit.render(&options),
            "namespace App\n{\n  partial class Outer\n  {\n  }\n}\n"
        );
    }

    #[test]
    fn settings_construction_falls_back_on_null() {
        let mut w = Writer::new("\t");
        w.statement(&Statement::ConstructSerializer {
            serializer_type: "S".to_string(),
            target_type: "T".to_string(),
            settings: Some("Provider()".to_string()),
        });

        assert_eq!(
            w.out,
            "var settings = Provider();\nvar serializer = settings is not null ? new S(typeof(T), settings) : new S(typeof(T));\n"
        );
    }
}
