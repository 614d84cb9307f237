//! Declaration matcher: which candidates qualify for which engine.

use crate::{
    engine::{EngineDescriptor, SERIALIZABLE_MARKER},
    model::CandidateDeclaration,
};
use derive_more::Display;

///
/// Rejection
///
/// First unmet eligibility condition, in evaluation order.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Rejection {
    #[display("not declared partial")]
    NotPartial,

    #[display("declared static")]
    Static,

    #[display("missing engine marker")]
    MissingMarker,

    #[display("missing serializable marker")]
    MissingSerializable,
}

/// Check every eligibility condition for `engine`.
pub fn check(candidate: &CandidateDeclaration, engine: &EngineDescriptor) -> Result<(), Rejection> {
    let modifiers = candidate.modifiers();

    if !modifiers.is_partial() {
        return Err(Rejection::NotPartial);
    }
    if modifiers.is_static() {
        return Err(Rejection::Static);
    }
    if !candidate.has_attribute(engine.marker.path) {
        return Err(Rejection::MissingMarker);
    }
    if !candidate.has_attribute(SERIALIZABLE_MARKER) {
        return Err(Rejection::MissingSerializable);
    }

    Ok(())
}

#[must_use]
pub fn can_generate(candidate: &CandidateDeclaration, engine: &EngineDescriptor) -> bool {
    check(candidate, engine).is_ok()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{ENGINES, JSON, XML},
        model::{AttributeUsage, DeclKind, Modifier, Modifiers, TypeScope},
    };
    use proptest::prelude::*;

    fn candidate(modifiers: impl Into<Modifiers>) -> CandidateDeclaration {
        CandidateDeclaration::new(
            TypeScope::new(DeclKind::Class, "Pair").with_modifiers(modifiers),
        )
        .with_attribute(AttributeUsage::new(SERIALIZABLE_MARKER))
        .with_attribute(AttributeUsage::new(JSON.marker.path))
        .with_attribute(AttributeUsage::new(XML.marker.path))
    }

    #[test]
    fn partial_marked_type_matches_both_engines() {
        let c = candidate([Modifier::Public, Modifier::Partial]);

        assert!(can_generate(&c, &JSON));
        assert!(can_generate(&c, &XML));
    }

    #[test]
    fn engine_marker_is_engine_specific() {
        let c = CandidateDeclaration::new(
            TypeScope::new(DeclKind::Record, "Pair").with_modifiers([Modifier::Partial]),
        )
        .with_attribute(AttributeUsage::new(SERIALIZABLE_MARKER))
        .with_attribute(AttributeUsage::new(JSON.marker.path));

        assert!(can_generate(&c, &JSON));
        assert_eq!(check(&c, &XML), Err(Rejection::MissingMarker));
    }

    #[test]
    fn serializable_marker_is_required() {
        let c = CandidateDeclaration::new(
            TypeScope::new(DeclKind::Class, "Pair").with_modifiers([Modifier::Partial]),
        )
        .with_attribute(AttributeUsage::new(JSON.marker.path));

        assert_eq!(check(&c, &JSON), Err(Rejection::MissingSerializable));
    }

    #[test]
    fn marker_bound_elsewhere_does_not_count() {
        let c = CandidateDeclaration::new(
            TypeScope::new(DeclKind::Class, "Pair").with_modifiers([Modifier::Partial]),
        )
        .with_attribute(AttributeUsage::new(SERIALIZABLE_MARKER))
        .with_attribute(AttributeUsage::new("Other.JsonContractAttribute"));

        assert!(!can_generate(&c, &JSON));
    }

    fn arb_modifiers() -> impl Strategy<Value = Vec<Modifier>> {
        prop::collection::vec(
            prop_oneof![
                Just(Modifier::Public),
                Just(Modifier::Internal),
                Just(Modifier::Sealed),
                Just(Modifier::Abstract),
                Just(Modifier::Readonly),
                Just(Modifier::Static),
                Just(Modifier::Partial),
            ],
            0..5,
        )
    }

    proptest! {
        #[test]
        fn non_partial_or_static_never_matches(modifiers in arb_modifiers()) {
            let c = candidate(modifiers.clone());
            let expected = modifiers.contains(&Modifier::Partial)
                && !modifiers.contains(&Modifier::Static);

            for engine in &ENGINES {
                prop_assert_eq!(can_generate(&c, engine), expected);
            }
        }
    }
}
