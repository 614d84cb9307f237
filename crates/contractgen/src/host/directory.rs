use crate::{
    diagnostic::{Diagnostic, Diagnostics},
    host::{Host, HostError},
    model::CandidateDeclaration,
    synth::GeneratedUnit,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

///
/// DirectoryHost
///
/// Reads candidates from a JSON snapshot (an array of candidate
/// declarations) and writes every prelude and unit as `<name>.g.cs` into
/// an output directory.
///

#[derive(Debug)]
pub struct DirectoryHost {
    candidates: Vec<CandidateDeclaration>,
    out_dir: PathBuf,
    written: Vec<PathBuf>,
    diagnostics: Diagnostics,
}

impl DirectoryHost {
    /// Load `snapshot` and create `out_dir` if needed.
    pub fn open(snapshot: impl AsRef<Path>, out_dir: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = snapshot.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let candidates: Vec<CandidateDeclaration> =
            serde_json::from_str(&text).map_err(|source| HostError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(snapshot = %path.display(), candidates = candidates.len(), "snapshot loaded");

        Self::with_candidates(candidates, out_dir)
    }

    pub fn with_candidates(
        candidates: Vec<CandidateDeclaration>,
        out_dir: impl Into<PathBuf>,
    ) -> Result<Self, HostError> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir).map_err(|source| HostError::Io {
            path: out_dir.clone(),
            source,
        })?;

        Ok(Self {
            candidates,
            out_dir,
            written: Vec::new(),
            diagnostics: Diagnostics::new(),
        })
    }

    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Files written so far, in write order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn write(&mut self, file_name: &str, source: &str) -> Result<(), HostError> {
        let path = self.out_dir.join(file_name);
        fs::write(&path, source).map_err(|source| HostError::Io {
            path: path.clone(),
            source,
        })?;
        self.written.push(path);

        Ok(())
    }
}

impl Host for DirectoryHost {
    fn discover_candidates(&mut self) -> impl Iterator<Item = CandidateDeclaration> + '_ {
        self.candidates.iter().cloned()
    }

    fn register_prelude(&mut self, name: &str, source: &str) -> Result<(), HostError> {
        self.write(&format!("{name}.g.cs"), source)
    }

    fn submit_unit(&mut self, unit: &GeneratedUnit) -> Result<(), HostError> {
        self.write(&unit.name.file_name(), &unit.source)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
    }
}

///
/// TESTS
///
