//! contractgen: companion serialization members for marked C# types.
//!
//! A host compiler supplies candidate declarations; the engine matches them
//! against the JSON and XML marker attributes, extracts their configuration,
//! synthesizes `Write*`/`Read*` members re-wrapped through every enclosing
//! scope, and submits each result under a collision-free unit name.

// public exports are one module level down
pub mod cache;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod extract;
pub mod generator;
pub mod host;
pub mod identity;
pub mod matcher;
pub mod pass;
pub mod synth;

pub use contractgen_model as model;
pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::GeneratorConfig,
        diagnostic::{Diagnostic, DiagnosticCode, Severity},
        engine::{EngineDescriptor, EngineTag},
        generator::Generator,
        host::{DirectoryHost, Host, MemoryHost},
        identity::UnitName,
        model::prelude::*,
        pass::PassReport,
        synth::GeneratedUnit,
    };
}
