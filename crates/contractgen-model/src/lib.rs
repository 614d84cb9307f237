//! Host-facing declaration model for contractgen.
//!
//! Everything in here is supplied by the host compiler: type declarations,
//! their enclosing scopes, direct members and bound attribute usages. The
//! engine only ever borrows these values for the duration of one pass.

mod attribute;
mod candidate;
mod kind;
mod member;
mod modifier;
mod name;

pub use self::attribute::*;
pub use self::candidate::*;
pub use self::kind::*;
pub use self::member::*;
pub use self::modifier::*;
pub use self::name::*;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        AttributeUsage, CandidateDeclaration, ConstValue, DeclKind, Member, Modifier, Modifiers,
        Namespace, Parameter, QualifiedName, TypeScope,
    };
}
