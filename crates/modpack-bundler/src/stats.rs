//! Per-module outcomes and batch statistics.

use std::fmt;
use std::time::Duration;

use modpack_graph::GraphIndex;

use crate::Error;
use crate::backend::PackedArtifact;

/// Why a module produced no artifact without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The name has no record in the graph.
    UnknownModule,
    /// The name is excluded or preloaded.
    Skippable,
    /// The module resolved to an empty file list.
    NoFiles,
}

impl SkipReason {
    /// Explain why `module` resolved to no files.
    pub fn classify(index: &GraphIndex, module: &str) -> Self {
        if index.is_skippable(module) {
            Self::Skippable
        } else if index.contains(module) {
            Self::NoFiles
        } else {
            Self::UnknownModule
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnknownModule => "not in the module index",
            Self::Skippable => "excluded or preloaded",
            Self::NoFiles => "no files",
        })
    }
}

/// Result of packaging one module.
#[derive(Debug)]
pub enum ModuleOutcome {
    Packed {
        module: String,
        artifact: PackedArtifact,
    },
    Skipped {
        module: String,
        reason: SkipReason,
    },
    Failed {
        module: String,
        error: Error,
    },
}

impl ModuleOutcome {
    pub fn module(&self) -> &str {
        match self {
            Self::Packed { module, .. } | Self::Skipped { module, .. } | Self::Failed { module, .. } => {
                module
            }
        }
    }

    pub fn artifact(&self) -> Option<&PackedArtifact> {
        match self {
            Self::Packed { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    pub fn is_packed(&self) -> bool {
        matches!(self, Self::Packed { .. })
    }

    /// Turn a non-packed outcome into an error, for callers that treat any
    /// missing artifact as fatal.
    pub fn into_result(self) -> crate::Result<PackedArtifact> {
        match self {
            Self::Packed { artifact, .. } => Ok(artifact),
            Self::Skipped { module, reason } => Err(Error::Unresolvable { module, reason }),
            Self::Failed { error, .. } => Err(error),
        }
    }
}

/// Aggregate totals of a batch run.
///
/// Failed and skipped modules are counted but contribute nothing to the
/// file and byte totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchStats {
    pub total_files: usize,
    pub total_archives: usize,
    pub total_uncompressed_bytes: u64,
    pub total_compressed_bytes: u64,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl BatchStats {
    /// Fold one outcome into the totals.
    pub fn record(&mut self, outcome: &ModuleOutcome) {
        match outcome {
            ModuleOutcome::Packed { artifact, .. } => {
                self.total_files += artifact.file_count;
                self.total_archives += 1;
                self.total_uncompressed_bytes += artifact.uncompressed_bytes;
                self.total_compressed_bytes += artifact.compressed_bytes;
            }
            ModuleOutcome::Skipped { .. } => self.skipped += 1,
            ModuleOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Overall compressed size as a percentage of the uncompressed size.
    pub fn ratio(&self) -> Option<f64> {
        (self.total_uncompressed_bytes > 0).then(|| {
            self.total_compressed_bytes as f64 / self.total_uncompressed_bytes as f64 * 100.0
        })
    }
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub stats: BatchStats,
    /// One entry per processed module, in processing order.
    pub outcomes: Vec<ModuleOutcome>,
    /// The run stopped early because cancellation was requested.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn packed(&self) -> impl Iterator<Item = &PackedArtifact> {
        self.outcomes.iter().filter_map(ModuleOutcome::artifact)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            ModuleOutcome::Failed { module, error } => Some((module.as_str(), error)),
            _ => None,
        })
    }
}
