//! `.zip` backend.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::{ArchiveBackend, CompressionLevel, NORMALIZED_MODE, PackedArtifact, read_input};
use crate::output::{artifact_path, input_path};
use crate::{Error, Result};

/// zip container with deflate entries.
///
/// Every entry is stored with permissions `0o777` and the zip epoch
/// (1980-01-01 00:00:00) as modification time. Level 0 stores entries
/// uncompressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipBackend {
    level: CompressionLevel,
}

impl ZipBackend {
    pub const SUFFIX: &'static str = ".zip";

    pub fn new(level: CompressionLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    fn options(&self) -> SimpleFileOptions {
        let (method, level) = match self.level.get() {
            0 => (CompressionMethod::Stored, None),
            level => (CompressionMethod::Deflated, Some(i64::from(level))),
        };

        SimpleFileOptions::default()
            .compression_method(method)
            .compression_level(level)
            .unix_permissions(NORMALIZED_MODE)
            .last_modified_time(DateTime::default())
    }
}

impl ArchiveBackend for ZipBackend {
    fn suffix(&self) -> &'static str {
        Self::SUFFIX
    }

    fn info(&self) -> String {
        format!("{} with level={}", Self::SUFFIX, self.level)
    }

    fn pack(
        &self,
        out_dir: &Path,
        base_name: &str,
        files_dir: &Path,
        files: &[String],
    ) -> Result<PackedArtifact> {
        let (name, path) = artifact_path(out_dir, base_name, Self::SUFFIX)?;
        let file = File::create(&path).map_err(|e| Error::archive_write(&name, e))?;

        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = self.options();

        let mut uncompressed = 0u64;
        for file_name in files {
            let source = input_path(files_dir, file_name)?;
            let start = Instant::now();
            let data = read_input(&source)?;

            zip.start_file(file_name.as_str(), options)
                .map_err(|e| Error::zip(&name, e))?;
            zip.write_all(&data)
                .map_err(|e| Error::archive_write(&name, e))?;

            uncompressed += data.len() as u64;
            tracing::debug!(
                artifact = %name,
                file = %file_name,
                size = data.len(),
                elapsed = ?start.elapsed(),
                "archived"
            );
        }

        let mut writer = zip.finish().map_err(|e| Error::zip(&name, e))?;
        writer.flush().map_err(|e| Error::archive_write(&name, e))?;
        drop(writer);

        PackedArtifact::from_disk(name, path, files.len(), uncompressed)
    }
}
