//! Process-wide registry of catalog sources and parsed documents.
//!
//! Each module registers the text of its catalog once, typically embedded in the
//! binary with `include_str!`. The registry parses a module's catalog on first
//! use and caches the parsed [`CatalogDocument`] for the process lifetime; there
//! is no eviction. Concurrent first use of the same module is serialized so the
//! source is loaded and parsed at most once.
//!
//! # Thread Safety
//!
//! Both the source table and the document cache are concurrent maps. The
//! load-or-fetch step holds the document cache's entry lock for the duration of
//! the parse, which is the coarse-grained policy loads being rare makes cheap.

use std::{
    borrow::Cow,
    sync::{Arc, OnceLock},
};

use dashmap::{mapref::entry::Entry, DashMap};

use super::document::CatalogDocument;
use crate::{Error, Result};

/// Where a module's catalog text comes from.
///
/// The embedded-resource case is [`CatalogSource::from_static`]; a loader closure
/// covers generated or instrumented sources.
#[derive(Clone)]
pub enum CatalogSource {
    /// Catalog XML embedded in the binary
    Static(&'static str),
    /// Catalog XML produced on demand; returning `None` means the source could
    /// not be located
    Loader(Arc<dyn Fn() -> Option<String> + Send + Sync>),
}

impl CatalogSource {
    /// Creates a source over embedded catalog text.
    #[must_use]
    pub fn from_static(xml: &'static str) -> Self {
        CatalogSource::Static(xml)
    }

    /// Creates a source backed by a loader closure.
    pub fn loader<F>(load: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        CatalogSource::Loader(Arc::new(load))
    }

    fn load(&self) -> Option<Cow<'static, str>> {
        match self {
            CatalogSource::Static(xml) => Some(Cow::Borrowed(xml)),
            CatalogSource::Loader(load) => load().map(Cow::Owned),
        }
    }
}

impl std::fmt::Debug for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Static(_) => f.write_str("CatalogSource::Static"),
            CatalogSource::Loader(_) => f.write_str("CatalogSource::Loader"),
        }
    }
}

/// Registry mapping module identities to their catalogs.
///
/// Normally accessed through [`CatalogRegistry::global`]; independent instances
/// exist so tests can isolate their catalogs.
#[derive(Default)]
pub struct CatalogRegistry {
    sources: DashMap<String, CatalogSource>,
    documents: DashMap<String, Arc<CatalogDocument>>,
}

impl CatalogRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        CatalogRegistry::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<CatalogRegistry> {
        static GLOBAL: OnceLock<Arc<CatalogRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(CatalogRegistry::new())))
    }

    /// Registers the catalog source for a module, replacing any previous source.
    ///
    /// A document already parsed from the previous source stays cached; sources
    /// are expected to be registered once, at startup.
    pub fn register(&self, module: impl Into<String>, source: CatalogSource) {
        self.sources.insert(module.into(), source);
    }

    /// Returns `true` when a source is registered for `module`.
    #[must_use]
    pub fn is_registered(&self, module: &str) -> bool {
        self.sources.contains_key(module)
    }

    /// Returns the parsed catalog for `module`, loading and parsing it on first
    /// use. At most one load happens per module, even under concurrent first
    /// access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationMissing`] when no source is registered for
    /// the module or its loader yields nothing, and [`Error::CatalogMalformed`]
    /// when the source text fails to parse.
    pub fn document(&self, module: &str) -> Result<Arc<CatalogDocument>> {
        if let Some(document) = self.documents.get(module) {
            return Ok(Arc::clone(&document));
        }

        // The vacant entry holds its shard lock across the load, serializing
        // concurrent first access to the same module.
        match self.documents.entry(module.to_string()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(slot) => {
                let missing = || Error::ConfigurationMissing {
                    module: module.to_string(),
                };

                let xml = {
                    let source = self.sources.get(module).ok_or_else(missing)?;
                    source.load().ok_or_else(missing)?
                };

                let document = Arc::new(CatalogDocument::parse(module, &xml)?);
                slot.insert(Arc::clone(&document));

                Ok(document)
            }
        }
    }
}
