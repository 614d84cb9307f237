use crate::model::Member;
use std::fmt;

///
/// SettingsShape
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SettingsShape {
    Property,
    Field,
    Method,
}

///
/// SettingsAccess
///
/// A resolved settings-provider member and how to read it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettingsAccess {
    pub member: String,
    pub shape: SettingsShape,
}

impl SettingsAccess {
    /// Source expression evaluating to the settings object.
    #[must_use]
    pub fn expression(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SettingsAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            SettingsShape::Method => write!(f, "{}()", self.member),
            SettingsShape::Property | SettingsShape::Field => f.write_str(&self.member),
        }
    }
}

/// Find the first direct member, in declaration order, that can supply
/// settings under `name`.
#[must_use]
pub fn resolve(members: &[Member], name: &str) -> Option<SettingsAccess> {
    members.iter().find_map(|member| {
        settings_shape(member, name).map(|shape| SettingsAccess {
            member: name.to_string(),
            shape,
        })
    })
}

// settings_shape
// which provider shape `member` has, if any
fn settings_shape(member: &Member, name: &str) -> Option<SettingsShape> {
    if !member.is_static() {
        return None;
    }

    match member {
        Member::Property { name: n, .. } if n == name => Some(SettingsShape::Property),
        Member::Field { variables, .. } if variables.first().is_some_and(|v| v == name) => {
            Some(SettingsShape::Field)
        }
        Member::Method {
            name: n,
            return_type,
            parameters,
            ..
        } if n == name && return_type.trim() == "void" && parameters.is_empty() => {
            Some(SettingsShape::Method)
        }

        _ => None,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modifier, Parameter};

    const STATIC: [Modifier; 2] = [Modifier::Private, Modifier::Static];

    #[test]
    fn static_property_resolves_to_bare_access() {
        let members = [Member::property(STATIC, "Settings", "JsonSettings")];
        let access = resolve(&members, "JsonSettings").unwrap();

        assert_eq!(access.shape, SettingsShape::Property);
        assert_eq!(access.expression(), "JsonSettings");
    }

    #[test]
    fn field_matches_only_first_variable() {
        let members = [Member::field(STATIC, "Settings", ["Primary", "JsonSettings"])];
        assert_eq!(resolve(&members, "JsonSettings"), None);

        let members = [Member::field(STATIC, "Settings", ["JsonSettings", "Other"])];
        assert_eq!(resolve(&members, "JsonSettings").unwrap().shape, SettingsShape::Field);
    }

    #[test]
    fn method_resolves_to_invocation() {
        let members = [Member::method(STATIC, "void", "JsonSettings", vec![])];
        let access = resolve(&members, "JsonSettings").unwrap();

        assert_eq!(access.expression(), "JsonSettings()");
    }

    #[test]
    fn method_shape_is_strict() {
        let with_param = Member::method(
            STATIC,
            "void",
            "JsonSettings",
            vec![Parameter::new("int", "x")],
        );
        let non_void = Member::method(STATIC, "Settings", "JsonSettings", vec![]);

        assert_eq!(resolve(&[with_param, non_void], "JsonSettings"), None);
    }

    #[test]
    fn instance_members_are_ignored() {
        let members = [
            Member::property([Modifier::Public], "Settings", "JsonSettings"),
            Member::field([Modifier::Private], "Settings", ["JsonSettings"]),
        ];

        assert_eq!(resolve(&members, "JsonSettings"), None);
    }

    #[test]
    fn names_are_case_sensitive() {
        let members = [Member::property(STATIC, "Settings", "jsonSettings")];

        assert_eq!(resolve(&members, "JsonSettings"), None);
    }

    #[test]
    fn declaration_order_breaks_ties() {
        let property = Member::property(STATIC, "Settings", "Shared");
        let method = Member::method(STATIC, "void", "Shared", vec![]);

        let first = resolve(&[property.clone(), method.clone()], "Shared").unwrap();
        assert_eq!(first.shape, SettingsShape::Property);

        let first = resolve(&[method, property], "Shared").unwrap();
        assert_eq!(first.shape, SettingsShape::Method);
    }
}
