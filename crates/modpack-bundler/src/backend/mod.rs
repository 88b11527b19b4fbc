//! Archive backends.
//!
//! An [`ArchiveBackend`] turns a list of files, relative to a files root, into
//! exactly one compressed artifact and reports how many bytes went in and how
//! large the artifact ended up on disk.
//!
//! The compression level is part of each backend instance. Backends never
//! consult or modify process-wide defaults.

mod lzma_zip;
mod tar_gz;
mod zip_archive;

pub use lzma_zip::LzmaZipBackend;
pub use tar_gz::TarGzBackend;
pub use zip_archive::ZipBackend;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Permission bits every archive entry is stored with.
pub const NORMALIZED_MODE: u32 = 0o777;

/// Owner and group name every tar entry is stored with.
pub const NORMALIZED_OWNER: &str = "root";

/// A compressed archive written by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedArtifact {
    /// File name of the artifact (base name + suffix).
    pub name: String,
    /// Location of the artifact on disk.
    pub path: PathBuf,
    /// Number of input files stored in the artifact.
    pub file_count: usize,
    /// Sum of the input file sizes.
    pub uncompressed_bytes: u64,
    /// Size of the finished artifact, read back from disk.
    pub compressed_bytes: u64,
}

impl PackedArtifact {
    /// Compressed size as a percentage of the uncompressed size.
    ///
    /// `None` when nothing was packed.
    pub fn ratio(&self) -> Option<f64> {
        (self.uncompressed_bytes > 0)
            .then(|| self.compressed_bytes as f64 / self.uncompressed_bytes as f64 * 100.0)
    }

    /// Stat the finished artifact and build the result.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyArtifact`] if the file is empty on disk although input
    /// bytes were written to it.
    pub(crate) fn from_disk(
        name: String,
        path: PathBuf,
        file_count: usize,
        uncompressed_bytes: u64,
    ) -> Result<Self> {
        let compressed_bytes = fs::metadata(&path)
            .map_err(|e| Error::archive_write(&name, e))?
            .len();

        if compressed_bytes == 0 && uncompressed_bytes > 0 {
            return Err(Error::EmptyArtifact {
                artifact: name,
                uncompressed: uncompressed_bytes,
            });
        }

        Ok(Self {
            name,
            path,
            file_count,
            uncompressed_bytes,
            compressed_bytes,
        })
    }
}

/// Capability to pack a set of files into one compressed artifact.
pub trait ArchiveBackend: Send + Sync {
    /// Suffix appended to the archive base name (`.tar.gz`, `.zip`, ...).
    fn suffix(&self) -> &'static str;

    /// Human-readable description including the compression level and any
    /// limitation in applying it.
    fn info(&self) -> String;

    /// Write `files` (relative to `files_dir`) into `out_dir/<base_name><suffix>`.
    ///
    /// Entries are stored under their relative names, in the given order.
    /// A partially written artifact is left behind on failure; removing it is
    /// the caller's job.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be read, a name is not a safe relative path,
    /// or the artifact cannot be written.
    fn pack(
        &self,
        out_dir: &Path,
        base_name: &str,
        files_dir: &Path,
        files: &[String],
    ) -> Result<PackedArtifact>;
}

/// Compression level in the range 0 (store) to 9 (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    pub const MAX: u32 = 9;
    pub const BEST: Self = Self(9);

    /// # Errors
    ///
    /// [`Error::InvalidCompressionLevel`] for values above 9.
    pub fn new(level: u32) -> Result<Self> {
        if level > Self::MAX {
            return Err(Error::InvalidCompressionLevel(level));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::BEST
    }
}

impl TryFrom<u32> for CompressionLevel {
    type Error = Error;

    fn try_from(level: u32) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Available archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// tar container compressed with gzip.
    #[default]
    TarGz,
    /// zip container with deflate entries.
    Zip,
    /// zip container with LZMA entries.
    LzmaZip,
}

impl ArchiveFormat {
    pub const ALL: [Self; 3] = [Self::TarGz, Self::Zip, Self::LzmaZip];

    /// Name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::TarGz => "tar-gz",
            Self::Zip => "zip",
            Self::LzmaZip => "lzma-zip",
        }
    }

    /// Artifact suffix produced by this format's backend.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::TarGz => TarGzBackend::SUFFIX,
            Self::Zip => ZipBackend::SUFFIX,
            Self::LzmaZip => LzmaZipBackend::SUFFIX,
        }
    }

    /// Construct the backend for this format.
    pub fn backend(self, level: CompressionLevel) -> Box<dyn ArchiveBackend> {
        match self {
            Self::TarGz => Box::new(TarGzBackend::new(level)),
            Self::Zip => Box::new(ZipBackend::new(level)),
            Self::LzmaZip => Box::new(LzmaZipBackend::new(level)),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

/// Read one input file completely.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}
