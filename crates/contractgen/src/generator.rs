use crate::{
    cache::UnitCache,
    config::{ConfigError, GeneratorConfig},
    error::Error,
    host::Host,
    pass::{Pass, PassReport},
};
use tracing::debug;

///
/// Generator
///
/// Owns the configuration and the unit cache across passes. Each call to
/// [`Generator::run`] is one independent pass over the host.
///

#[derive(Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
    cache: UnitCache,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            cache: UnitCache::new(),
        })
    }

    /// Generator configured from `CONTRACTGEN_CONFIG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(GeneratorConfig::from_env()?)
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[must_use]
    pub const fn cache(&self) -> &UnitCache {
        &self.cache
    }

    pub fn run(&mut self, host: &mut impl Host) -> Result<PassReport, Error> {
        let mut pass = Pass::new(&self.config);
        if self.config.cache.enabled {
            pass = pass.with_cache(&mut self.cache);
        }

        pass.initialize(host)?;
        for candidate in host.discover_candidates() {
            pass.visit(candidate)?;
        }
        let report = pass.finish(host)?;

        debug!(
            visited = report.visited,
            matched = report.matched,
            submitted = report.submitted.len(),
            cache_hits = report.cache_hits,
            diagnostics = report.diagnostics.len(),
            "pass complete"
        );

        Ok(report)
    }
}
