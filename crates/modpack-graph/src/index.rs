//! Loading and querying the import graph.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use crate::record::ModuleRecord;
use crate::{Error, Result};

/// Shape of `index.json`. Keys are optional here so that an absent key can be
/// reported by name instead of as a generic parse error. Module order in the
/// document carries no meaning; listings are sorted by name.
#[derive(Debug, Deserialize)]
struct IndexDocument {
    modules: Option<FxHashMap<String, ModuleRecord>>,
    preload: Option<Vec<String>>,
}

/// Shape of `meta.json`.
#[derive(Debug, Deserialize)]
struct MetaDocument {
    exclude: Option<Vec<String>>,
    missing: Option<Vec<String>>,
}

/// Read-only view of the module import graph.
///
/// Built once at startup and never mutated afterwards, which makes it safe to
/// share between threads resolving different roots.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    modules: FxHashMap<String, ModuleRecord>,
    excluded: FxHashSet<String>,
    preloaded: FxHashSet<String>,
    missing: FxHashSet<String>,
}

/// Counters describing a loaded index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStatistics {
    pub modules: usize,
    pub packages: usize,
    pub with_file: usize,
    pub excluded: usize,
    pub preloaded: usize,
    pub missing: usize,
}

impl GraphIndex {
    /// Create an index from module records, with empty exclude/preload/missing sets.
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = (S, ModuleRecord)>,
        S: Into<String>,
    {
        Self {
            modules: modules
                .into_iter()
                .map(|(name, record)| (name.into(), record))
                .collect(),
            ..Self::default()
        }
    }

    /// Add names that must never be bundled.
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add names the runtime already provides.
    pub fn with_preloaded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preloaded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add names known to be referenced but absent from the corpus.
    pub fn with_missing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing.extend(names.into_iter().map(Into::into));
        self
    }

    /// Load the index and metadata documents from disk.
    ///
    /// # Errors
    ///
    /// Fails if either document is absent, unreadable, not valid JSON, or lacks
    /// one of the required keys (`modules`, `preload`, `exclude`, `missing`).
    pub fn load(index_path: &Path, meta_path: &Path) -> Result<Self> {
        tracing::debug!("read {}", index_path.display());
        let index = read_document(index_path)?;

        tracing::debug!("read {}", meta_path.display());
        let meta = read_document(meta_path)?;

        let graph = Self::from_documents(
            &index,
            &index_path.display().to_string(),
            &meta,
            &meta_path.display().to_string(),
        )?;

        tracing::info!(
            modules = graph.modules.len(),
            excluded = graph.excluded.len(),
            preloaded = graph.preloaded.len(),
            "loaded module index"
        );

        Ok(graph)
    }

    /// Parse the two documents from in-memory JSON.
    pub fn from_json_str(index: &str, meta: &str) -> Result<Self> {
        Self::from_documents(index, "index", meta, "metadata")
    }

    fn from_documents(index: &str, index_label: &str, meta: &str, meta_label: &str) -> Result<Self> {
        let index_doc: IndexDocument =
            serde_json::from_str(index).map_err(|e| Error::Malformed {
                document: index_label.to_string(),
                reason: e.to_string(),
            })?;
        let meta_doc: MetaDocument = serde_json::from_str(meta).map_err(|e| Error::Malformed {
            document: meta_label.to_string(),
            reason: e.to_string(),
        })?;

        let missing_key = |document: &str, key| Error::MissingKey {
            document: document.to_string(),
            key,
        };

        let modules = index_doc
            .modules
            .ok_or_else(|| missing_key(index_label, "modules"))?;
        let preload = index_doc
            .preload
            .ok_or_else(|| missing_key(index_label, "preload"))?;
        let exclude = meta_doc
            .exclude
            .ok_or_else(|| missing_key(meta_label, "exclude"))?;
        let missing = meta_doc
            .missing
            .ok_or_else(|| missing_key(meta_label, "missing"))?;

        let graph = Self {
            modules,
            ..Self::default()
        };
        Ok(graph
            .with_preloaded(preload)
            .with_excluded(exclude)
            .with_missing(missing))
    }

    /// Metadata for `name`. `None` means there is nothing further to resolve.
    pub fn lookup(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.get(name)
    }

    /// Whether `name` has a record.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// True iff `name` is excluded or preloaded.
    pub fn is_skippable(&self, name: &str) -> bool {
        self.excluded.contains(name) || self.preloaded.contains(name)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    pub fn is_preloaded(&self, name: &str) -> bool {
        self.preloaded.contains(name)
    }

    /// Whether `name` is listed as referenced-but-absent. Informational only.
    pub fn is_missing(&self, name: &str) -> bool {
        self.missing.contains(name)
    }

    /// Number of module records.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// All module names, sorted.
    pub fn module_names(&self) -> Vec<&str> {
        sorted(self.modules.keys())
    }

    /// Excluded names, sorted.
    pub fn excluded(&self) -> Vec<&str> {
        sorted(self.excluded.iter())
    }

    /// Preloaded names, sorted.
    pub fn preloaded(&self) -> Vec<&str> {
        sorted(self.preloaded.iter())
    }

    /// Missing names, sorted.
    pub fn missing(&self) -> Vec<&str> {
        sorted(self.missing.iter())
    }

    pub fn statistics(&self) -> IndexStatistics {
        IndexStatistics {
            modules: self.modules.len(),
            packages: self.modules.values().filter(|r| r.is_package()).count(),
            with_file: self
                .modules
                .values()
                .filter(|r| r.source_file.is_some())
                .count(),
            excluded: self.excluded.len(),
            preloaded: self.preloaded.len(),
            missing: self.missing.len(),
        }
    }

    /// Imported names that have no record and are not declared missing, sorted
    /// and de-duplicated. Skippable names are not reported.
    pub fn unknown_imports(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .modules
            .values()
            .flat_map(|record| record.imports.iter())
            .map(String::as_str)
            .filter(|name| {
                !self.contains(name) && !self.is_missing(name) && !self.is_skippable(name)
            })
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        unknown
    }

    /// For every excluded or preloaded module that has a record, the imports the
    /// resolver will never look at because it does not descend into that module.
    ///
    /// Imports that are themselves skippable are left out: they would be pruned
    /// anyway.
    pub fn pruned_imports(&self) -> BTreeMap<&str, Vec<&str>> {
        self.excluded
            .iter()
            .chain(self.preloaded.iter())
            .filter_map(|name| {
                let record = self.lookup(name)?;
                let hidden: Vec<&str> = record
                    .imports
                    .iter()
                    .map(String::as_str)
                    .filter(|import| !self.is_skippable(import))
                    .collect();
                Some((name.as_str(), hidden))
            })
            .filter(|(_, hidden)| !hidden.is_empty())
            .collect()
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn sorted<'a>(names: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.into_iter().map(String::as_str).collect();
    names.sort_unstable();
    names
}
