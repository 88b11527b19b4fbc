//! JSON snapshots: the resolved files of one module in a single document.
//!
//! `<module>.json` holds a tab-indented array of entries in resolution order:
//!
//! ```json
//! [
//! 	{
//! 		"file_name": "platform.py",
//! 		"content": "..."
//! 	}
//! ]
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use modpack_graph::{DependencyResolver, GraphIndex};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::backend::PackedArtifact;
use crate::output::{artifact_path, input_path, remove_partial};
use crate::stats::{ModuleOutcome, SkipReason};
use crate::{Error, Result};

/// One file inside a snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub file_name: String,
    pub content: String,
}

/// Writes `<module>.json` snapshots instead of compressed archives.
#[derive(Debug, Clone)]
pub struct JsonSnapshotPacker<'a> {
    index: &'a GraphIndex,
    files_dir: PathBuf,
    out_dir: PathBuf,
}

impl<'a> JsonSnapshotPacker<'a> {
    pub const SUFFIX: &'static str = ".json";

    pub fn new(index: &'a GraphIndex, files_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            index,
            files_dir: files_dir.into(),
            out_dir: out_dir.into(),
        }
    }

    /// Resolve `module` and write its snapshot.
    ///
    /// The returned artifact reports the summed size of the file contents as
    /// uncompressed bytes and the size of the JSON document as compressed bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Unresolvable`] when the module yields no files; the write
    /// errors of [`ArchiveBackend::pack`](crate::ArchiveBackend::pack) otherwise.
    /// Input files must be UTF-8 text.
    pub fn pack_module(&self, module: &str) -> Result<PackedArtifact> {
        let resolution = DependencyResolver::new(self.index).resolve(module);
        if resolution.is_empty() {
            return Err(Error::Unresolvable {
                module: module.to_string(),
                reason: SkipReason::classify(self.index, module),
            });
        }

        let (name, path) = artifact_path(&self.out_dir, module, Self::SUFFIX)?;
        let (entries, uncompressed) = self.read_entries(&resolution.files)?;
        write_document(&name, &path, &entries)?;
        PackedArtifact::from_disk(name, path, entries.len(), uncompressed)
    }

    /// Pack every module in turn; one module's failure does not stop the rest.
    pub fn pack_modules<S: AsRef<str>>(&self, modules: &[S]) -> Vec<ModuleOutcome> {
        modules
            .iter()
            .map(|module| {
                let module = module.as_ref().to_string();
                match self.pack_module(&module) {
                    Ok(artifact) => {
                        tracing::debug!(
                            artifact = %artifact.name,
                            size = artifact.compressed_bytes,
                            "snapshot written"
                        );
                        ModuleOutcome::Packed { module, artifact }
                    }
                    Err(Error::Unresolvable { reason, .. }) => {
                        tracing::warn!(module = %module, %reason, "skip");
                        ModuleOutcome::Skipped { module, reason }
                    }
                    Err(error) => {
                        tracing::error!(module = %module, "snapshot failed: {}", error);
                        ModuleOutcome::Failed { module, error }
                    }
                }
            })
            .collect()
    }

    /// Read every input up front so a missing file never touches the output.
    fn read_entries(&self, files: &[String]) -> Result<(Vec<SnapshotEntry>, u64)> {
        let mut entries = Vec::with_capacity(files.len());
        let mut uncompressed = 0u64;

        for file_name in files {
            let source = input_path(&self.files_dir, file_name)?;
            let content = fs::read_to_string(&source).map_err(|source_err| Error::ReadInput {
                path: source.clone(),
                source: source_err,
            })?;
            uncompressed += content.len() as u64;
            entries.push(SnapshotEntry {
                file_name: file_name.clone(),
                content,
            });
        }
        Ok((entries, uncompressed))
    }
}

/// Write `entries` to `path`. Once the file exists, a failure removes it.
fn write_document(name: &str, path: &Path, entries: &[SnapshotEntry]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::archive_write(name, e))?;
    serialize_entries(BufWriter::new(file), name, entries).inspect_err(|_| remove_partial(path))
}

fn serialize_entries<W: Write>(mut writer: W, name: &str, entries: &[SnapshotEntry]) -> Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"\t"));
    entries
        .serialize(&mut serializer)
        .map_err(|source| Error::Snapshot {
            artifact: name.to_string(),
            source,
        })?;
    writer.flush().map_err(|e| Error::archive_write(name, e))
}

/// Parse a snapshot document back into its entries.
pub fn read_snapshot(content: &str) -> serde_json::Result<Vec<SnapshotEntry>> {
    serde_json::from_str(content)
}
