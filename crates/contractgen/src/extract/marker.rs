use crate::{
    engine::{EngineDescriptor, MarkerSpec},
    model::{AttributeUsage, ConstValue, NamedArgument},
};
use darling::{Error as DarlingError, FromMeta, ast::NestedMeta};
use proc_macro2::{Literal, Span, TokenStream};
use syn::{
    Expr, ExprCall, ExprLit, Ident, Lit, LitBool, LitStr, Member, Meta, MetaNameValue, Path,
};

///
/// MarkerArgs
///
/// Named arguments accepted by both marker attributes. Unknown names,
/// positional arguments and mistyped values fail the binding. Constants the
/// host already evaluated take precedence over the raw argument text.
///

#[derive(Debug, Default, FromMeta)]
pub struct MarkerArgs {
    #[darling(default, rename = "SettingsMember")]
    pub settings_member: Option<SettingsMemberName>,

    #[darling(default, rename = "ImplementInstanceWriteMethod")]
    pub implement_instance_write_method: bool,
}

impl MarkerArgs {
    /// Bind one attribute usage into a [`MarkerSpec`] for `engine`.
    ///
    /// Returns `Ok(None)` when the usage is bound to some other attribute.
    pub fn try_build(
        usage: &AttributeUsage,
        engine: &EngineDescriptor,
    ) -> Result<Option<MarkerSpec>, DarlingError> {
        if !usage.is(engine.marker.path) {
            return Ok(None);
        }

        let args = if usage.named.is_empty() {
            Self::parse(&usage.arguments)?
        } else {
            Self::from_list(&named_items(&usage.named)?)?
        };

        Ok(Some(MarkerSpec {
            settings_member: args.settings_member.map(|name| name.0),
            implement_instance_write_method: args.implement_instance_write_method,
        }))
    }

    // parse
    // the argument list shares its surface syntax with a meta list
    fn parse(arguments: &str) -> Result<Self, DarlingError> {
        let tokens: TokenStream = arguments
            .parse()
            .map_err(|e| DarlingError::custom(format!("malformed argument list: {e}")))?;
        let items = NestedMeta::parse_meta_list(tokens)?;

        Self::from_list(&items)
    }
}

// named_items
// evaluated constants re-enter darling as literal name-value items; null
// leaves the option at its default
fn named_items(named: &[NamedArgument]) -> Result<Vec<NestedMeta>, DarlingError> {
    let span = Span::call_site();
    let mut items = Vec::with_capacity(named.len());

    for arg in named {
        let lit = match &arg.value {
            ConstValue::Null => continue,
            ConstValue::Bool(value) => Lit::Bool(LitBool::new(*value, span)),
            ConstValue::Int(value) => Lit::new(Literal::i64_unsuffixed(*value)),
            ConstValue::String(value) => Lit::Str(LitStr::new(value, span)),
        };
        let ident: Ident =
            syn::parse_str(&arg.name).map_err(|_| DarlingError::unknown_field(&arg.name))?;

        items.push(NestedMeta::Meta(Meta::NameValue(MetaNameValue {
            path: Path::from(ident),
            eq_token: syn::token::Eq::default(),
            value: Expr::Lit(ExprLit {
                attrs: Vec::new(),
                lit,
            }),
        })));
    }

    Ok(items)
}

///
/// SettingsMemberName
///
/// Accepts a string literal or a `nameof(Member)` expression.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettingsMemberName(pub String);

impl FromMeta for SettingsMemberName {
    fn from_string(value: &str) -> Result<Self, DarlingError> {
        Ok(Self(value.to_string()))
    }

    fn from_expr(expr: &Expr) -> Result<Self, DarlingError> {
        match expr {
            Expr::Lit(lit) => match &lit.lit {
                Lit::Str(s) => Self::from_string(&s.value()),
                other => Err(DarlingError::unexpected_lit_type(other)),
            },
            Expr::Group(group) => Self::from_expr(&group.expr),
            Expr::Paren(paren) => Self::from_expr(&paren.expr),
            Expr::Call(call) => nameof_target(call).map(Self),

            _ => Err(DarlingError::unexpected_expr_type(expr)),
        }
    }
}

// nameof_target
// `nameof(A.B.Member)` names the last segment
fn nameof_target(call: &ExprCall) -> Result<String, DarlingError> {
    let is_nameof = matches!(&*call.func, Expr::Path(p) if p.path.is_ident("nameof"));
    if !is_nameof || call.args.len() != 1 {
        return Err(DarlingError::custom(
            "expected a string literal or nameof(Member)",
        ));
    }

    call.args
        .first()
        .and_then(member_name)
        .ok_or_else(|| DarlingError::custom("nameof requires a member name"))
}

// member_name
// C# member access `A.B.C` parses as nested field expressions
fn member_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        Expr::Field(field) => match &field.member {
            Member::Named(ident) => Some(ident.to_string()),
            Member::Unnamed(_) => None,
        },

        _ => None,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{JSON, XML};

    fn json(arguments: &str) -> AttributeUsage {
        AttributeUsage::new(JSON.marker.path).with_arguments(arguments)
    }

    #[test]
    fn empty_arguments_bind_to_defaults() {
        let spec = MarkerArgs::try_build(&json(""), &JSON).unwrap().unwrap();

        assert_eq!(spec, MarkerSpec::default());
    }

    #[test]
    fn named_arguments_bind() {
        let usage = json(r#"SettingsMember = "JsonSettings", ImplementInstanceWriteMethod = true"#);
        let spec = MarkerArgs::try_build(&usage, &JSON).unwrap().unwrap();

        assert_eq!(spec.settings_member(), Some("JsonSettings"));
        assert!(spec.implement_instance_write_method);
    }

    #[test]
    fn nameof_argument_binds_last_segment() {
        let usage = json("SettingsMember = nameof(Program.Settings.Json)");
        let spec = MarkerArgs::try_build(&usage, &JSON).unwrap().unwrap();

        assert_eq!(spec.settings_member(), Some("Json"));
    }

    #[test]
    fn usage_of_other_engine_is_skipped() {
        assert_eq!(MarkerArgs::try_build(&json(""), &XML).unwrap(), None);
    }

    #[test]
    fn unknown_option_fails() {
        let err = MarkerArgs::try_build(&json("Indent = true"), &JSON).unwrap_err();

        assert!(err.to_string().contains("Indent"), "{err}");
    }

    #[test]
    fn mistyped_values_fail() {
        assert!(MarkerArgs::try_build(&json("ImplementInstanceWriteMethod = \"yes\""), &JSON).is_err());
        assert!(MarkerArgs::try_build(&json("SettingsMember = 4"), &JSON).is_err());
        assert!(MarkerArgs::try_build(&json("SettingsMember = typeof(Foo)"), &JSON).is_err());
    }

    #[test]
    fn evaluated_constant_reference_binds() {
        // SettingsMember = Names.Json, evaluated by the host
        let usage = AttributeUsage::new(JSON.marker.path)
            .with_named("SettingsMember", "JsonSettings")
            .with_arguments("SettingsMember = Names.Json");
        let spec = MarkerArgs::try_build(&usage, &JSON).unwrap().unwrap();

        assert_eq!(spec.settings_member(), Some("JsonSettings"));
    }

    #[test]
    fn evaluated_concatenation_binds() {
        // SettingsMember = "Json" + "Settings", ImplementInstanceWriteMethod = !false
        let usage = AttributeUsage::new(XML.marker.path)
            .with_named("SettingsMember", "JsonSettings")
            .with_named("ImplementInstanceWriteMethod", true)
            .with_arguments(r#"SettingsMember = "Json" + "Settings", ImplementInstanceWriteMethod = !false"#);
        let spec = MarkerArgs::try_build(&usage, &XML).unwrap().unwrap();

        assert_eq!(spec.settings_member(), Some("JsonSettings"));
        assert!(spec.implement_instance_write_method);
    }

    #[test]
    fn raw_constant_expressions_do_not_bind() {
        assert!(MarkerArgs::try_build(&json("SettingsMember = Names.Json"), &JSON).is_err());
        assert!(MarkerArgs::try_build(&json(r#"SettingsMember = "A" + "B""#), &JSON).is_err());
    }

    #[test]
    fn evaluated_null_keeps_default() {
        let usage = AttributeUsage::new(JSON.marker.path)
            .with_named("SettingsMember", ConstValue::Null);
        let spec = MarkerArgs::try_build(&usage, &JSON).unwrap().unwrap();

        assert_eq!(spec, MarkerSpec::default());
    }

    #[test]
    fn evaluated_values_are_still_checked() {
        let unknown = AttributeUsage::new(JSON.marker.path).with_named("Indent", true);
        let mistyped = AttributeUsage::new(JSON.marker.path).with_named("SettingsMember", 4_i64);
        let not_a_name = AttributeUsage::new(JSON.marker.path).with_named("Settings Member", "X");

        assert!(MarkerArgs::try_build(&unknown, &JSON).is_err());
        assert!(MarkerArgs::try_build(&mistyped, &JSON).is_err());
        assert!(MarkerArgs::try_build(&not_a_name, &JSON).is_err());
    }

    #[test]
    fn positional_argument_fails() {
        assert!(MarkerArgs::try_build(&json("\"JsonSettings\""), &JSON).is_err());
    }
}
