//! `.tar.gz` backend.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{EntryType, Header};

use super::{
    ArchiveBackend, CompressionLevel, NORMALIZED_MODE, NORMALIZED_OWNER, PackedArtifact,
    read_input,
};
use crate::output::{artifact_path, input_path};
use crate::{Error, Result};

/// tar container compressed with gzip.
///
/// Entry headers are normalised: owner and group `root`, uid/gid 0, mode
/// `0o777`, mtime 0. The gzip header carries no timestamp either, so packing
/// the same inputs twice yields identical bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzBackend {
    level: CompressionLevel,
}

impl TarGzBackend {
    pub const SUFFIX: &'static str = ".tar.gz";

    pub fn new(level: CompressionLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }
}

impl ArchiveBackend for TarGzBackend {
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

        let encoder = GzEncoder::new(BufWriter::new(file), Compression::new(self.level.get()));
        let mut builder = tar::Builder::new(encoder);

        let mut uncompressed = 0u64;
        for file_name in files {
            let source = input_path(files_dir, file_name)?;
            let start = Instant::now();
            let data = read_input(&source)?;

            let mut header = normalized_header(data.len() as u64)
                .map_err(|e| Error::archive_write(&name, e))?;
            builder
                .append_data(&mut header, file_name, data.as_slice())
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

        let mut writer = builder
            .into_inner()
            .and_then(GzEncoder::finish)
            .map_err(|e| Error::archive_write(&name, e))?;
        writer.flush().map_err(|e| Error::archive_write(&name, e))?;
        drop(writer);

        PackedArtifact::from_disk(name, path, files.len(), uncompressed)
    }
}

fn normalized_header(size: u64) -> std::io::Result<Header> {
    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Regular);
    header.set_size(size);
    header.set_mode(NORMALIZED_MODE);
    header.set_uid(0);
    header.set_gid(0);
    header.set_mtime(0);
    header.set_username(NORMALIZED_OWNER)?;
    header.set_groupname(NORMALIZED_OWNER)?;
    Ok(header)
}
