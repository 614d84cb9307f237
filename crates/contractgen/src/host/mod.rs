//! Host boundary.
//!
//! The host compiler owns parsing and semantic analysis. It hands over
//! candidate declarations and receives marker preludes, generated units and
//! diagnostics back.

mod directory;
mod memory;

pub use directory::DirectoryHost;
pub use memory::MemoryHost;

use crate::{diagnostic::Diagnostic, model::CandidateDeclaration, synth::GeneratedUnit};
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// HostError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum HostError {
    #[error("i/o error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid candidate snapshot '{}': {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

///
/// Host
///
/// Pull contract for one generation pass. `discover_candidates` is called
/// once per pass and its iterator consumed to the end before any unit is
/// submitted.
///

pub trait Host {
    fn discover_candidates(&mut self) -> impl Iterator<Item = CandidateDeclaration> + '_;

    /// Declare a marker attribute source before discovery runs.
    fn register_prelude(&mut self, name: &str, source: &str) -> Result<(), HostError>;

    fn submit_unit(&mut self, unit: &GeneratedUnit) -> Result<(), HostError>;

    fn report(&mut self, diagnostic: Diagnostic);
}
