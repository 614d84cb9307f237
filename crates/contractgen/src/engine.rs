//! Marker declaration registry.
//!
//! Both serialization engines are plain table entries: every engine-specific
//! difference (marker attribute, backing serializer, method and unit naming)
//! lives in an [`EngineDescriptor`] value, and the rest of the crate is
//! parameterized by it.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Namespace the marker attributes are declared in.
pub const MARKER_NAMESPACE: &str = "ContractGen.Attributes";

/// Attribute the backing data-contract engines require on every serialized type.
pub const SERIALIZABLE_MARKER: &str = "System.Runtime.Serialization.DataContractAttribute";

/// Marker option naming the static settings-provider member.
pub const SETTINGS_MEMBER_OPTION: &str = "SettingsMember";

/// Marker option requesting the instance convenience writer.
pub const INSTANCE_WRITE_OPTION: &str = "ImplementInstanceWriteMethod";

///
/// EngineTag
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EngineTag {
    Json,
    Xml,
}

///
/// MarkerShape
///
/// The attribute class declared to the host for one engine.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MarkerShape {
    pub type_name: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
}

///
/// EngineDescriptor
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EngineDescriptor {
    pub tag: EngineTag,
    pub marker: MarkerShape,

    /// Fully qualified backing serializer type, as referenced from generated code.
    pub serializer_type: &'static str,

    /// Final segment of every unit name produced for this engine.
    pub unit_suffix: &'static str,
}

pub const JSON: EngineDescriptor = EngineDescriptor {
    tag: EngineTag::Json,
    marker: MarkerShape {
        type_name: "JsonContractAttribute",
        path: "ContractGen.Attributes.JsonContractAttribute",
        summary: "Denotes the target type for code generation of json serialization members.",
    },
    serializer_type: "global::System.Runtime.Serialization.Json.DataContractJsonSerializer",
    unit_suffix: "JsonSerialization",
};

pub const XML: EngineDescriptor = EngineDescriptor {
    tag: EngineTag::Xml,
    marker: MarkerShape {
        type_name: "XmlContractAttribute",
        path: "ContractGen.Attributes.XmlContractAttribute",
        summary: "Denotes the target type for code generation of xml serialization members.",
    },
    serializer_type: "global::System.Runtime.Serialization.DataContractSerializer",
    unit_suffix: "XmlSerialization",
};

/// Every supported engine, in default dispatch order.
pub static ENGINES: [EngineDescriptor; 2] = [JSON, XML];

impl EngineDescriptor {
    #[must_use]
    pub fn lookup(tag: EngineTag) -> &'static Self {
        match tag {
            EngineTag::Json => &ENGINES[0],
            EngineTag::Xml => &ENGINES[1],
        }
    }

    /// Suffix of the generated method names (`WriteJson`, `ReadXml`...).
    #[must_use]
    pub const fn method_suffix(&self) -> &'static str {
        match self.tag {
            EngineTag::Json => "Json",
            EngineTag::Xml => "Xml",
        }
    }

    #[must_use]
    pub fn write_method(&self) -> String {
        format!("Write{}", self.method_suffix())
    }

    #[must_use]
    pub fn read_method(&self) -> String {
        format!("Read{}", self.method_suffix())
    }

    /// Source declaring this engine's marker attribute to the host.
    #[must_use]
    pub fn prelude(&self) -> MarkerDeclaration {
        MarkerDeclaration {
            name: format!("{}.{}", MARKER_NAMESPACE, self.marker.type_name),
            source: marker_source(&self.marker),
        }
    }
}

///
/// MarkerSpec
///
/// Content of one bound marker usage.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MarkerSpec {
    pub settings_member: Option<String>,
    pub implement_instance_write_method: bool,
}

impl MarkerSpec {
    /// Configured settings member, with an empty name treated as none.
    #[must_use]
    pub fn settings_member(&self) -> Option<&str> {
        self.settings_member.as_deref().filter(|s| !s.is_empty())
    }
}

///
/// MarkerDeclaration
///
/// Prelude source registered with the host before discovery, so the marker
/// attributes exist as real symbols.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarkerDeclaration {
    pub name: String,
    pub source: String,
}

// marker_source
// the literal template every marker declaration is rendered from
fn marker_source(marker: &MarkerShape) -> String {
    format!(
        r"// <auto-generated/>
using System;

namespace {MARKER_NAMESPACE}
{{
	/// <summary>
	/// {summary}
	/// </summary>
	[AttributeUsage(AttributeTargets.Class | AttributeTargets.Struct, Inherited = false, AllowMultiple = false)]
	internal sealed class {type_name} : Attribute
	{{
		/// <summary>
		/// The name of the static member providing settings for serialization.
		/// </summary>
		public String {SETTINGS_MEMBER_OPTION} {{ get; set; }} = String.Empty;
		/// <summary>
		/// Defines whether an instance method for writing into a stream shall be generated.
		/// </summary>
		public Boolean {INSTANCE_WRITE_OPTION} {{ get; set; }}
	}}
}}
",
        summary = marker.summary,
        type_name = marker.type_name,
    )
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_matching_table_entry() {
        assert_eq!(EngineDescriptor::lookup(EngineTag::Json).tag, EngineTag::Json);
        assert_eq!(EngineDescriptor::lookup(EngineTag::Xml).tag, EngineTag::Xml);
    }

    #[test]
    fn marker_paths_live_in_marker_namespace() {
        for engine in &ENGINES {
            assert_eq!(
                engine.marker.path,
                format!("{MARKER_NAMESPACE}.{}", engine.marker.type_name)
            );
        }
    }

    #[test]
    fn prelude_declares_both_options() {
        let prelude = XML.prelude();

        assert_eq!(prelude.name, "ContractGen.Attributes.XmlContractAttribute");
        assert!(prelude.source.contains("namespace ContractGen.Attributes"));
        assert!(prelude.source.contains("internal sealed class XmlContractAttribute : Attribute"));
        assert!(prelude.source.contains("public String SettingsMember { get; set; } = String.Empty;"));
        assert!(prelude.source.contains("public Boolean ImplementInstanceWriteMethod { get; set; }"));
    }

    #[test]
    fn method_names_follow_engine_tag() {
        assert_eq!(JSON.write_method(), "WriteJson");
        assert_eq!(XML.read_method(), "ReadXml");
    }

    #[test]
    fn empty_settings_member_means_none() {
        let spec = MarkerSpec {
            settings_member: Some(String::new()),
            implement_instance_write_method: false,
        };

        assert_eq!(spec.settings_member(), None);
    }
}
