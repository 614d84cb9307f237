//! Unit cache carried between passes.
//!
//! Entries are keyed by an xxh3-128 fingerprint of everything that can
//! influence a unit: the candidate's scope chain, the engine, the marker
//! usages, the static members, and the rendering configuration. Output
//! served from the cache is identical to a fresh synthesis.

use crate::{
    config::GeneratorConfig,
    diagnostic::Diagnostic,
    engine::EngineDescriptor,
    model::CandidateDeclaration,
    synth::GeneratedUnit,
};
use derive_more::Display;
use std::{collections::HashMap, hash::Hash};
use xxhash_rust::xxh3::Xxh3;

///
/// CacheKey
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{_0:032x}")]
pub struct CacheKey(u128);

impl CacheKey {
    #[must_use]
    pub fn of(
        candidate: &CandidateDeclaration,
        engine: &EngineDescriptor,
        config: &GeneratorConfig,
    ) -> Self {
        let mut h = Xxh3::new();

        candidate.namespace.hash(&mut h);
        candidate.containing_types.hash(&mut h);
        candidate.scope.hash(&mut h);
        engine.tag.hash(&mut h);

        for usage in candidate.attributes_of(engine.marker.path) {
            usage.hash(&mut h);
        }
        // only static members can supply settings
        for member in candidate.members.iter().filter(|m| m.is_static()) {
            member.hash(&mut h);
        }

        config.output.hash(&mut h);
        config.settings_member.unresolved.hash(&mut h);

        Self(h.digest128())
    }
}

///
/// CachedUnit
///
/// A synthesized unit together with the warnings its generation raised,
/// replayed on every hit.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CachedUnit {
    pub unit: GeneratedUnit,
    pub warnings: Vec<Diagnostic>,
}

///
/// UnitCache
///

#[derive(Debug, Default)]
pub struct UnitCache {
    entries: HashMap<CacheKey, Entry>,
}

#[derive(Debug)]
struct Entry {
    cached: CachedUnit,
    touched: bool,
}

impl UnitCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, marking the entry as used by the current pass.
    pub fn get(&mut self, key: CacheKey) -> Option<&CachedUnit> {
        self.entries.get_mut(&key).map(|entry| {
            entry.touched = true;
            &entry.cached
        })
    }

    pub fn insert(&mut self, key: CacheKey, cached: CachedUnit) {
        self.entries.insert(
            key,
            Entry {
                cached,
                touched: true,
            },
        );
    }

    /// Evict entries the finished pass never touched and reset the rest.
    /// Returns the number of evicted entries.
    pub fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.touched);
        for entry in self.entries.values_mut() {
            entry.touched = false;
        }

        before - self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// TESTS
///
