use crate::{
    diagnostic::{Diagnostic, Diagnostics},
    host::{Host, HostError},
    model::CandidateDeclaration,
    synth::GeneratedUnit,
};

///
/// MemoryHost
///
/// Keeps everything in memory. Every pass rediscovers the same candidates;
/// outputs accumulate until [`MemoryHost::clear_outputs`].
///

#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    candidates: Vec<CandidateDeclaration>,
    preludes: Vec<(String, String)>,
    units: Vec<GeneratedUnit>,
    diagnostics: Diagnostics,
}

impl MemoryHost {
    #[must_use]
    pub fn new(candidates: impl IntoIterator<Item = CandidateDeclaration>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn preludes(&self) -> &[(String, String)] {
        &self.preludes
    }

    #[must_use]
    pub fn units(&self) -> &[GeneratedUnit] {
        &self.units
    }

    /// Submitted unit by name.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.name.as_str() == name)
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn clear_outputs(&mut self) {
        self.preludes.clear();
        self.units.clear();
        self.diagnostics = Diagnostics::new();
    }
}

impl Host for MemoryHost {
    fn discover_candidates(&mut self) -> impl Iterator<Item = CandidateDeclaration> + '_ {
        self.candidates.iter().cloned()
    }

    fn register_prelude(&mut self, name: &str, source: &str) -> Result<(), HostError> {
        self.preludes.push((name.to_string(), source.to_string()));

        Ok(())
    }

    fn submit_unit(&mut self, unit: &GeneratedUnit) -> Result<(), HostError> {
        self.units.push(unit.clone());

        Ok(())
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
    }
}
