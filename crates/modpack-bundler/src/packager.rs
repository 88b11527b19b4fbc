//! Batch packaging: resolve each module and hand its files to a backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use modpack_graph::{DependencyResolver, GraphIndex};
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::Result;
use crate::backend::{ArchiveBackend, PackedArtifact};
use crate::output::{artifact_path, remove_partial};
use crate::stats::{BatchReport, BatchStats, ModuleOutcome, SkipReason};

/// Cooperative cancellation signal, checked between modules.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for [`Packager::run`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Stop after this many artifacts were produced. Forces sequential
    /// processing so the cap is exact.
    pub max_archives: Option<usize>,
    /// Number of worker threads. `1` packs modules one after another.
    pub jobs: usize,
    pub cancel: CancellationFlag,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_archives: None,
            jobs: 1,
            cancel: CancellationFlag::default(),
        }
    }
}

impl BatchOptions {
    fn is_parallel(&self) -> bool {
        self.jobs > 1 && self.max_archives.is_none()
    }
}

/// Drives resolution and packaging over a batch of modules.
///
/// The index is only read, so a packager can be shared across worker threads.
/// One module's failure never aborts the batch.
#[derive(Debug, Clone)]
pub struct Packager<'a> {
    index: &'a GraphIndex,
    files_dir: PathBuf,
    out_dir: PathBuf,
}

impl<'a> Packager<'a> {
    /// `files_dir` is the root the index's file names are relative to;
    /// artifacts are written to `out_dir`, which must exist.
    pub fn new(index: &'a GraphIndex, files_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            index,
            files_dir: files_dir.into(),
            out_dir: out_dir.into(),
        }
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn resolver(&self) -> DependencyResolver<'a> {
        DependencyResolver::new(self.index)
    }

    /// Resolve and pack a single module.
    pub fn pack_module(&self, module: &str, backend: &dyn ArchiveBackend) -> ModuleOutcome {
        let resolution = self.resolver().resolve(module);
        if resolution.is_empty() {
            let reason = SkipReason::classify(self.index, module);
            tracing::warn!(module, %reason, "skip");
            return ModuleOutcome::Skipped {
                module: module.to_string(),
                reason,
            };
        }

        tracing::debug!(module, files = resolution.file_count(), "resolved");

        match pack_files(backend, &self.out_dir, module, &self.files_dir, &resolution.files) {
            Ok(artifact) => ModuleOutcome::Packed {
                module: module.to_string(),
                artifact,
            },
            Err(error) => {
                tracing::error!(module, "packaging failed: {}", error);
                ModuleOutcome::Failed {
                    module: module.to_string(),
                    error,
                }
            }
        }
    }

    /// Pack `modules` (all indexed modules, sorted, when `None`).
    pub fn run(
        &self,
        modules: Option<&[String]>,
        backend: &dyn ArchiveBackend,
        options: &BatchOptions,
    ) -> BatchReport {
        self.run_with(modules, backend, options, |_| {})
    }

    /// Like [`run`](Self::run), calling `observer` with every outcome as soon
    /// as it and all outcomes before it are known. Calls are serialised and
    /// follow the module order even when packing in parallel.
    pub fn run_with<F>(
        &self,
        modules: Option<&[String]>,
        backend: &dyn ArchiveBackend,
        options: &BatchOptions,
        observer: F,
    ) -> BatchReport
    where
        F: Fn(&ModuleOutcome) + Sync,
    {
        let start = Instant::now();
        let names: Vec<&str> = match modules {
            Some(modules) => modules.iter().map(String::as_str).collect(),
            None => self.index.module_names(),
        };

        tracing::info!(
            modules = names.len(),
            backend = %backend.info(),
            out_dir = %self.out_dir.display(),
            "packing"
        );

        let mut report = if options.is_parallel() {
            self.run_parallel(&names, backend, options, &observer)
        } else {
            self.run_sequential(&names, backend, options, &observer)
        };

        report.stats.elapsed = start.elapsed();
        if report.cancelled {
            tracing::warn!(
                processed = report.outcomes.len(),
                total = names.len(),
                "batch cancelled"
            );
        }
        report
    }

    fn run_sequential<F>(
        &self,
        names: &[&str],
        backend: &dyn ArchiveBackend,
        options: &BatchOptions,
        observer: &F,
    ) -> BatchReport
    where
        F: Fn(&ModuleOutcome) + Sync,
    {
        let mut report = BatchReport::default();

        for name in names {
            if options.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let outcome = self.pack_module(name, backend);
            observer(&outcome);
            report.stats.record(&outcome);
            report.outcomes.push(outcome);

            if options
                .max_archives
                .is_some_and(|max| report.stats.total_archives >= max)
            {
                tracing::info!(archives = report.stats.total_archives, "archive limit reached");
                break;
            }
        }

        report
    }

    fn run_parallel<F>(
        &self,
        names: &[&str],
        backend: &dyn ArchiveBackend,
        options: &BatchOptions,
        observer: &F,
    ) -> BatchReport
    where
        F: Fn(&ModuleOutcome) + Sync,
    {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("failed to start {} workers, packing sequentially: {}", options.jobs, e);
                return self.run_sequential(names, backend, options, observer);
            }
        };

        let emitter = Mutex::new(OrderedEmitter::new(observer, names.len()));
        pool.install(|| {
            names.par_iter().enumerate().for_each(|(index, name)| {
                let outcome = if options.cancel.is_cancelled() {
                    None
                } else {
                    Some(self.pack_module(name, backend))
                };
                emitter.lock().push(index, outcome);
            });
        });
        let results = emitter.into_inner().done;

        let mut report = BatchReport {
            cancelled: results.iter().any(Option::is_none),
            ..BatchReport::default()
        };
        let mut stats = BatchStats::default();
        for outcome in results.into_iter().flatten() {
            stats.record(&outcome);
            report.outcomes.push(outcome);
        }
        report.stats = stats;
        report
    }
}

/// Hands outcomes to the observer in input order while workers finish in
/// any order. `None` marks a module dropped by cancellation.
struct OrderedEmitter<'a, F> {
    observer: &'a F,
    next: usize,
    pending: BTreeMap<usize, Option<ModuleOutcome>>,
    done: Vec<Option<ModuleOutcome>>,
}

impl<'a, F: Fn(&ModuleOutcome)> OrderedEmitter<'a, F> {
    fn new(observer: &'a F, len: usize) -> Self {
        Self {
            observer,
            next: 0,
            pending: BTreeMap::new(),
            done: Vec::with_capacity(len),
        }
    }

    fn push(&mut self, index: usize, outcome: Option<ModuleOutcome>) {
        self.pending.insert(index, outcome);
        while let Some(outcome) = self.pending.remove(&self.next) {
            if let Some(outcome) = &outcome {
                (self.observer)(outcome);
            }
            self.done.push(outcome);
            self.next += 1;
        }
    }
}

/// Pack an explicit file list into `out_dir/<name><suffix>`.
///
/// Unlike [`ArchiveBackend::pack`], a partially written artifact is removed
/// when packing fails.
pub fn pack_files(
    backend: &dyn ArchiveBackend,
    out_dir: &Path,
    name: &str,
    files_dir: &Path,
    files: &[String],
) -> Result<PackedArtifact> {
    backend
        .pack(out_dir, name, files_dir, files)
        .inspect_err(|_| {
            if let Ok((_, path)) = artifact_path(out_dir, name, backend.suffix()) {
                remove_partial(&path);
            }
        })
}
