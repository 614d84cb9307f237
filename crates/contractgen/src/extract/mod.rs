//! Configuration extractor.
//!
//! Binds the single marker usage for an engine and resolves the optional
//! settings-provider member. Engine-agnostic: everything engine specific
//! arrives through the [`EngineDescriptor`].

mod marker;
mod settings;

pub use marker::{MarkerArgs, SettingsMemberName};
pub use settings::{SettingsAccess, SettingsShape, resolve as resolve_settings};

use crate::{
    engine::{EngineDescriptor, MarkerSpec},
    error::GenerateError,
    model::CandidateDeclaration,
};
use tracing::trace;

///
/// ResolvedConfiguration
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResolvedConfiguration {
    /// Absent means the serializer is default-constructed.
    pub settings_access: Option<SettingsAccess>,
    pub emit_instance_method: bool,

    /// Settings member named by the marker, resolved or not.
    pub requested_settings_member: Option<String>,
}

impl ResolvedConfiguration {
    /// Settings member the marker named that no member could satisfy.
    #[must_use]
    pub fn unresolved_settings_member(&self) -> Option<&str> {
        match self.settings_access {
            Some(_) => None,
            None => self.requested_settings_member.as_deref(),
        }
    }
}

/// Extract the generation parameters of `candidate` for `engine`.
pub fn extract(
    candidate: &CandidateDeclaration,
    engine: &EngineDescriptor,
) -> Result<ResolvedConfiguration, GenerateError> {
    let spec = bind_marker(candidate, engine)?;

    let requested = spec.settings_member().map(ToString::to_string);
    let settings_access = requested
        .as_deref()
        .and_then(|name| settings::resolve(&candidate.members, name));

    trace!(
        candidate = candidate.name(),
        engine = %engine.tag,
        requested = ?requested,
        resolved = ?settings_access,
        "resolved settings member"
    );

    Ok(ResolvedConfiguration {
        settings_access,
        emit_instance_method: spec.implement_instance_write_method,
        requested_settings_member: requested,
    })
}

/// Bind the one authoritative marker usage for `engine`.
///
/// Every usage bound to the marker is tried; exactly one must succeed.
pub fn bind_marker(
    candidate: &CandidateDeclaration,
    engine: &EngineDescriptor,
) -> Result<MarkerSpec, GenerateError> {
    let marker = engine.marker.path;
    let mut bound = Vec::new();
    let mut first_error = None;

    for usage in candidate.attributes_of(marker) {
        match MarkerArgs::try_build(usage, engine) {
            Ok(Some(spec)) => bound.push(spec),
            Ok(None) => {}
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match bound.len() {
        1 => Ok(bound.remove(0)),
        0 => Err(match first_error {
            Some(source) => GenerateError::InvalidMarker { marker, source },
            None => GenerateError::MissingMarker { marker },
        }),
        count => Err(GenerateError::AmbiguousMarker { marker, count }),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{JSON, SERIALIZABLE_MARKER, XML},
        model::{AttributeUsage, DeclKind, Member, Modifier, TypeScope},
    };

    fn pair() -> CandidateDeclaration {
        CandidateDeclaration::new(
            TypeScope::new(DeclKind::Class, "Pair").with_modifiers([Modifier::Partial]),
        )
        .with_attribute(AttributeUsage::new(SERIALIZABLE_MARKER))
    }

    #[test]
    fn defaults_without_arguments() {
        let c = pair().with_attribute(AttributeUsage::new(JSON.marker.path));
        let config = extract(&c, &JSON).unwrap();

        assert_eq!(config, ResolvedConfiguration::default());
    }

    #[test]
    fn settings_member_and_instance_flag_are_extracted() {
        let c = pair()
            .with_attribute(
                AttributeUsage::new(XML.marker.path).with_arguments(
                    r#"SettingsMember = "XmlSettings", ImplementInstanceWriteMethod = true"#,
                ),
            )
            .with_member(Member::field(
                [Modifier::Private, Modifier::Static, Modifier::Readonly],
                "DataContractSerializerSettings",
                ["XmlSettings"],
            ));
        let config = extract(&c, &XML).unwrap();

        assert_eq!(config.settings_access.unwrap().expression(), "XmlSettings");
        assert!(config.emit_instance_method);
    }

    #[test]
    fn unresolved_settings_member_falls_back() {
        let c = pair().with_attribute(
            AttributeUsage::new(JSON.marker.path).with_arguments(r#"SettingsMember = "Missing""#),
        );
        let config = extract(&c, &JSON).unwrap();

        assert_eq!(config.settings_access, None);
        assert_eq!(config.unresolved_settings_member(), Some("Missing"));
    }

    #[test]
    fn two_bound_usages_are_ambiguous() {
        let c = pair()
            .with_attribute(AttributeUsage::new(JSON.marker.path))
            .with_attribute(
                AttributeUsage::new(JSON.marker.path)
                    .with_arguments("ImplementInstanceWriteMethod = true"),
            );

        assert!(matches!(
            extract(&c, &JSON),
            Err(GenerateError::AmbiguousMarker { count: 2, .. })
        ));
    }

    #[test]
    fn one_good_usage_beside_a_broken_one_wins() {
        let c = pair()
            .with_attribute(AttributeUsage::new(JSON.marker.path).with_arguments("Bogus = 1"))
            .with_attribute(
                AttributeUsage::new(JSON.marker.path)
                    .with_arguments("ImplementInstanceWriteMethod = true"),
            );

        assert!(extract(&c, &JSON).unwrap().emit_instance_method);
    }

    #[test]
    fn only_broken_usages_report_binding_error() {
        let c = pair()
            .with_attribute(AttributeUsage::new(JSON.marker.path).with_arguments("Bogus = 1"));

        let err = extract(&c, &JSON).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidMarker { .. }));
        assert!(err.to_string().contains("JsonContractAttribute"), "{err}");
    }

    #[test]
    fn other_engine_usage_is_not_counted() {
        let c = pair()
            .with_attribute(AttributeUsage::new(JSON.marker.path))
            .with_attribute(AttributeUsage::new(XML.marker.path));

        assert!(extract(&c, &JSON).is_ok());
        assert!(extract(&c, &XML).is_ok());
    }

    #[test]
    fn missing_marker_is_reported() {
        assert!(matches!(
            extract(&pair(), &JSON),
            Err(GenerateError::MissingMarker { .. })
        ));
    }
}
