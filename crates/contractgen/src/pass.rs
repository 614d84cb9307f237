//! One generation pass: register preludes, collect matches, emit units.

use crate::{
    cache::{CacheKey, CachedUnit, UnitCache},
    config::GeneratorConfig,
    diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, Severity},
    engine::{ENGINES, EngineDescriptor},
    error::GenerateError,
    extract::extract,
    host::{Host, HostError},
    identity::{UnitName, unit_name},
    matcher,
    model::CandidateDeclaration,
    synth::{GeneratedUnit, synthesize},
};
use derive_more::Display;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tracing::{debug, trace, warn};

///
/// PassError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum PassError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("cannot {operation} a pass that is {state}")]
    OutOfOrder {
        operation: &'static str,
        state: PassState,
    },
}

///
/// PassState
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum PassState {
    #[default]
    #[display("idle")]
    Idle,

    #[display("initialized")]
    Initialized,

    #[display("collecting")]
    Collecting,

    #[display("emitting")]
    Emitting,
}

///
/// PassReport
///

#[derive(Clone, Debug, Default)]
pub struct PassReport {
    pub visited: usize,
    pub matched: usize,
    pub submitted: Vec<UnitName>,
    pub cache_hits: usize,
    pub evicted: usize,
    pub diagnostics: Diagnostics,
}

///
/// Match
///

#[derive(Clone, Debug)]
struct Match {
    candidate: Arc<CandidateDeclaration>,
    engine: &'static EngineDescriptor,
}

///
/// Pass
///
/// `Idle -> Initialized -> Collecting -> Emitting -> Idle`. Matches are
/// emitted in discovery order; a failing candidate only produces a
/// diagnostic.
///

#[derive(Debug)]
pub struct Pass<'a> {
    state: PassState,
    config: &'a GeneratorConfig,
    cache: Option<&'a mut UnitCache>,
    engines: Vec<&'static EngineDescriptor>,
    matches: Vec<Match>,
    visited: usize,
}

impl<'a> Pass<'a> {
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        let engines = config
            .engines
            .iter()
            .map(|tag| EngineDescriptor::lookup(*tag))
            .collect();

        Self {
            state: PassState::Idle,
            config,
            cache: None,
            engines,
            matches: Vec::new(),
            visited: 0,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: &'a mut UnitCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub const fn state(&self) -> PassState {
        self.state
    }

    /// Register every marker declaration with the host.
    pub fn initialize(&mut self, host: &mut impl Host) -> Result<(), PassError> {
        self.expect_state("initialize", &[PassState::Idle])?;

        // markers are declared even for disabled engines so usages still bind
        for engine in &ENGINES {
            let prelude = engine.prelude();
            host.register_prelude(&prelude.name, &prelude.source)?;
        }

        self.transition(PassState::Initialized);

        Ok(())
    }

    /// Dispatch one discovered candidate through the matcher.
    pub fn visit(&mut self, candidate: CandidateDeclaration) -> Result<(), PassError> {
        self.expect_state("visit", &[PassState::Initialized, PassState::Collecting])?;
        if self.state == PassState::Initialized {
            self.transition(PassState::Collecting);
        }
        self.visited += 1;

        let mut shared: Option<Arc<CandidateDeclaration>> = None;
        for &engine in &self.engines {
            match matcher::check(&candidate, engine) {
                Ok(()) => {
                    trace!(candidate = candidate.name(), engine = %engine.tag, "matched");
                    let candidate = shared
                        .get_or_insert_with(|| Arc::new(candidate.clone()))
                        .clone();
                    self.matches.push(Match { candidate, engine });
                }
                Err(reason) => {
                    trace!(candidate = candidate.name(), engine = %engine.tag, %reason, "skipped");
                }
            }
        }

        Ok(())
    }

    /// Emit every accumulated match and return to `Idle`.
    pub fn finish(&mut self, host: &mut impl Host) -> Result<PassReport, PassError> {
        self.expect_state("finish", &[PassState::Initialized, PassState::Collecting])?;
        self.transition(PassState::Emitting);

        let result = self.emit(host);
        self.transition(PassState::Idle);

        result
    }

    // emit
    // a host failure aborts emission; accumulated state is dropped either way
    fn emit(&mut self, host: &mut impl Host) -> Result<PassReport, PassError> {
        let matches = std::mem::take(&mut self.matches);
        let mut report = PassReport {
            visited: std::mem::take(&mut self.visited),
            matched: matches.len(),
            ..PassReport::default()
        };

        for m in &matches {
            let target = m.candidate.qualified_name().to_string();

            let cached = match self.produce(m, &mut report) {
                Ok(cached) => cached,
                Err(err) => {
                    emit_diagnostic(host, &mut report, err.into_diagnostic(&target));
                    continue;
                }
            };

            for warning in cached.warnings {
                emit_diagnostic(host, &mut report, warning);
            }

            let unit = cached.unit;
            host.submit_unit(&unit)?;
            debug!(unit = %unit.name, engine = %m.engine.tag, "unit submitted");

            report.submitted.push(unit.name);
        }

        if let Some(cache) = self.cache.as_deref_mut() {
            report.evicted = cache.sweep();
        }

        Ok(report)
    }

    // produce
    // cached output when available, otherwise a fresh unit
    fn produce(&mut self, m: &Match, report: &mut PassReport) -> Result<CachedUnit, GenerateError> {
        let key = self
            .cache
            .is_some()
            .then(|| CacheKey::of(&m.candidate, m.engine, self.config));

        if let (Some(cache), Some(key)) = (self.cache.as_deref_mut(), key)
            && let Some(hit) = cache.get(key)
        {
            trace!(candidate = m.candidate.name(), engine = %m.engine.tag, %key, "cache hit");
            report.cache_hits += 1;
            return Ok(hit.clone());
        }

        let cached = generate(&m.candidate, m.engine, self.config)?;
        if let (Some(cache), Some(key)) = (self.cache.as_deref_mut(), key) {
            cache.insert(key, cached.clone());
        }

        Ok(cached)
    }

    fn expect_state(&self, operation: &'static str, allowed: &[PassState]) -> Result<(), PassError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(PassError::OutOfOrder {
                operation,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, next: PassState) {
        debug!(from = %self.state, to = %next, "pass state");
        self.state = next;
    }
}

/// Run one match through extract, synthesize and naming.
pub fn generate(
    candidate: &CandidateDeclaration,
    engine: &EngineDescriptor,
    config: &GeneratorConfig,
) -> Result<CachedUnit, GenerateError> {
    let target = candidate.qualified_name().to_string();
    let resolved = extract(candidate, engine)?;

    let mut warnings = Vec::new();
    if let Some(member) = resolved.unresolved_settings_member() {
        let err = GenerateError::UnresolvedSettingsMember {
            member: member.to_string(),
        };
        match config.settings_member.unresolved.severity() {
            None => {}
            Some(Severity::Warning) => warnings.push(Diagnostic::new(
                DiagnosticCode::UnresolvedSettingsMember,
                Severity::Warning,
                &target,
                err.to_string(),
            )),
            Some(Severity::Error) => return Err(err),
        }
    }

    let source = synthesize(candidate, engine, &resolved)?.render(&config.output);
    let unit = GeneratedUnit::new(unit_name(candidate, engine), source);

    Ok(CachedUnit { unit, warnings })
}

// emit_diagnostic
// every diagnostic goes to the host, the log and the report
fn emit_diagnostic(host: &mut impl Host, report: &mut PassReport, diagnostic: Diagnostic) {
    if diagnostic.is_error() {
        debug!(%diagnostic, "candidate skipped");
    } else {
        warn!(%diagnostic);
    }

    host.report(diagnostic.clone());
    report.diagnostics.add(diagnostic);
}

///
/// TESTS
///
