use serde::{Deserialize, Serialize};

///
/// AttributeUsage
///
/// One attribute applied to a declaration. `path` is the fully qualified
/// name of the attribute type the host bound the usage to (for example
/// `System.Runtime.Serialization.DataContractAttribute`).
///
/// `named` carries the named arguments as constants the host already
/// evaluated, so `Names.Json` or `"Json" + "Settings"` arrive as plain
/// strings. `arguments` is the raw argument list between the parentheses,
/// exactly as written, and is only consulted when `named` is empty.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeUsage {
    pub path: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named: Vec<NamedArgument>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub arguments: String,
}

impl AttributeUsage {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            named: Vec::new(),
            arguments: String::new(),
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<ConstValue>) -> Self {
        self.named.push(NamedArgument {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// True when the host bound this usage to the given attribute type.
    #[must_use]
    pub fn is(&self, path: &str) -> bool {
        self.path == path
    }
}

///
/// NamedArgument
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamedArgument {
    pub name: String,
    pub value: ConstValue,
}

///
/// ConstValue
///
/// Compile-time constant as evaluated by the host.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConstValue {
    Null,

    Bool(bool),

    Int(i64),

    String(String),
}

impl From<bool> for ConstValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConstValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ConstValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConstValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_values_deserialize_untagged() {
        let usage: AttributeUsage = serde_json::from_str(
            r#"{
                "path": "X",
                "named": [
                    { "name": "SettingsMember", "value": "JsonSettings" },
                    { "name": "ImplementInstanceWriteMethod", "value": true },
                    { "name": "Order", "value": -2 },
                    { "name": "Other", "value": null }
                ]
            }"#,
        )
        .unwrap();

        let values: Vec<_> = usage.named.iter().map(|n| n.value.clone()).collect();
        assert_eq!(
            values,
            [
                ConstValue::from("JsonSettings"),
                ConstValue::from(true),
                ConstValue::from(-2_i64),
                ConstValue::Null,
            ]
        );
        assert!(usage.arguments.is_empty());
    }
}
