//! # modpack-bundler
//!
//! Turns resolved module file sets into per-module artifacts.
//!
//! The crate sits on top of [`modpack_graph`]: a [`Packager`] resolves every
//! requested module through a [`DependencyResolver`](modpack_graph::DependencyResolver)
//! and hands the resulting file list to an [`ArchiveBackend`]. Three backends are
//! provided, selected through [`ArchiveFormat`]:
//!
//! | format     | backend            | artifact suffix |
//! |------------|--------------------|-----------------|
//! | `tar-gz`   | [`TarGzBackend`]   | `.tar.gz`       |
//! | `zip`      | [`ZipBackend`]     | `.zip`          |
//! | `lzma-zip` | [`LzmaZipBackend`] | `.lzma.zip`     |
//!
//! [`JsonSnapshotPacker`] is the uncompressed alternative: it writes the file
//! contents of one module into a single JSON document.
//!
//! Every artifact is byte-reproducible: entry owners, permissions and
//! timestamps are normalised to fixed values regardless of the source
//! filesystem.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use modpack_bundler::{ArchiveFormat, BatchOptions, CompressionLevel, Packager};
//! use modpack_graph::GraphIndex;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = GraphIndex::load(
//!     Path::new("modules/index.json"),
//!     Path::new("modules/meta.json"),
//! )?;
//! let backend = ArchiveFormat::TarGz.backend(CompressionLevel::new(9)?);
//!
//! let packager = Packager::new(&index, "modules", "download");
//! let report = packager.run(None, backend.as_ref(), &BatchOptions::default());
//! println!(
//!     "{} files in {} archives",
//!     report.stats.total_files, report.stats.total_archives
//! );
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod output;
pub mod packager;
pub mod snapshot;
pub mod stats;

pub use backend::{
    ArchiveBackend, ArchiveFormat, CompressionLevel, LzmaZipBackend, PackedArtifact, TarGzBackend,
    ZipBackend,
};
pub use packager::{BatchOptions, CancellationFlag, Packager, pack_files};
pub use snapshot::{JsonSnapshotPacker, SnapshotEntry, read_snapshot};
pub use stats::{BatchReport, BatchStats, ModuleOutcome, SkipReason};

use std::path::PathBuf;

/// Error types for packaging operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The artifact file could not be created or written.
    #[error("Failed to write archive '{artifact}': {source}")]
    ArchiveWrite {
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    /// The zip encoder rejected an entry or could not finish the archive.
    #[error("Failed to write archive '{artifact}': {source}")]
    Zip {
        artifact: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// An input file could not be read.
    #[error("Failed to read input file '{}': {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid artifact name or input path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// Compression level outside 0-9.
    #[error("Invalid compression level {0} (expected 0-9)")]
    InvalidCompressionLevel(u32),

    /// Unrecognised archive format name.
    #[error("Unknown archive format '{0}' (expected tar-gz, zip or lzma-zip)")]
    UnknownFormat(String),

    /// The artifact on disk is empty although input bytes were written.
    #[error("Archive '{artifact}' is empty on disk although {uncompressed} bytes were packed")]
    EmptyArtifact { artifact: String, uncompressed: u64 },

    /// The module is not in the graph or resolves to no files.
    #[error("Module '{module}' cannot be packaged: {reason}")]
    Unresolvable { module: String, reason: SkipReason },

    /// The JSON snapshot could not be serialized.
    #[error("Failed to serialize snapshot '{artifact}': {source}")]
    Snapshot {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    /// Error from the graph crate.
    #[error(transparent)]
    Graph(#[from] modpack_graph::Error),
}

impl Error {
    /// Whether this error belongs to the archive-write family: the artifact
    /// could not be produced from inputs that were otherwise resolvable.
    pub fn is_write_error(&self) -> bool {
        matches!(
            self,
            Self::ArchiveWrite { .. }
                | Self::Zip { .. }
                | Self::ReadInput { .. }
                | Self::InvalidOutputPath(_)
                | Self::EmptyArtifact { .. }
                | Self::Snapshot { .. }
        )
    }

    pub(crate) fn archive_write(artifact: &str, source: std::io::Error) -> Self {
        Self::ArchiveWrite {
            artifact: artifact.to_string(),
            source,
        }
    }

    pub(crate) fn zip(artifact: &str, source: zip::result::ZipError) -> Self {
        Self::Zip {
            artifact: artifact.to_string(),
            source,
        }
    }
}

/// Result type alias for modpack-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;
