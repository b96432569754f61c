//! Codec registry (spec.md §4.A, §9 "Registry").
//!
//! Populated once, read-only thereafter. Grounded in `dzip-cli`'s
//! `CodecRegistry` (a name-keyed map built once at startup and threaded
//! through the caller rather than reached for as a global singleton).

use std::collections::BTreeMap;

use super::{lz4::Lz4, lzfse::Lzfse, lzma::Lzma, zlib::Zlib, CodecCapability};

/// An immutable, case-insensitive name → [`CodecCapability`] map.
///
/// Construction happens once, via [`Registry::with_defaults`]; there is no
/// mutable-singleton access pattern (spec.md §9 warns against one
/// explicitly) — the orchestrator is handed a `&Registry` at construction.
pub struct Registry {
    capabilities: BTreeMap<&'static str, Box<dyn CodecCapability>>,
}

impl Registry {
    /// An empty registry, for tests that want to exercise `lookup` misses
    /// or register a fake capability.
    pub fn new() -> Self {
        Registry {
            capabilities: BTreeMap::new(),
        }
    }

    /// The registry populated with the four standard codecs (spec.md §2).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Zlib));
        registry.register(Box::new(Lz4));
        registry.register(Box::new(Lzma));
        registry.register(Box::new(Lzfse));
        registry
    }

    /// Registers a capability under its own canonical name.
    pub fn register(&mut self, capability: Box<dyn CodecCapability>) {
        self.capabilities.insert(capability.name(), capability);
    }

    /// Case-insensitive lookup by name.
    pub fn lookup(&self, name: &str) -> Option<&dyn CodecCapability> {
        let lower = name.to_ascii_lowercase();
        self.capabilities.get(lower.as_str()).map(|b| b.as_ref())
    }

    /// The sorted set of canonical names currently registered.
    pub fn supported(&self) -> Vec<&'static str> {
        self.capabilities.keys().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
