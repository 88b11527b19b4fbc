//! Layered configuration for the modpack CLI.
//!
//! Priority: CLI flags > `MODPACK_*` environment variables > config file >
//! defaults. The config file is `--config <path>` or, when present,
//! `modpack.config.json` in the working directory.

mod conversions;
mod defaults;
mod loading;
mod tests;
mod types;
mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use modpack_bundler::{ArchiveBackend, ArchiveFormat, CompressionLevel};
use modpack_graph::GraphIndex;

use crate::error::Result;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};
pub use types::*;

/// modpack configuration, loaded from modpack.config.json, the environment
/// and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModpackConfig {
    /// Root directory of the module sources; file names in the index are
    /// relative to it
    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,

    /// Index document, relative to modulesDir unless absolute
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,

    /// Metadata document, relative to modulesDir unless absolute
    #[serde(default = "default_meta_file")]
    pub meta_file: PathBuf,

    /// Output directory for archives and snapshots
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Archive format (tar-gz, zip, lzma-zip)
    #[serde(default)]
    pub format: Format,

    /// Compression level (0-9)
    #[serde(default = "default_level")]
    #[schemars(range(max = 9))]
    pub level: u32,

    /// Empty outDir before packing
    #[serde(default)]
    pub clean: bool,

    /// Worker threads for batch packing (1 = sequential)
    #[serde(default = "default_jobs")]
    #[schemars(range(min = 1))]
    pub jobs: usize,
}

impl ModpackConfig {
    /// Keys accepted in the config file and through the environment.
    pub const FIELDS: [&'static str; 8] = [
        "modulesDir",
        "indexFile",
        "metaFile",
        "outDir",
        "format",
        "level",
        "clean",
        "jobs",
    ];

    /// JSON Schema for modpack.config.json.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(ModpackConfig);
        schema.to_value()
    }

    /// Path of the index document.
    pub fn index_path(&self) -> PathBuf {
        under(&self.modules_dir, &self.index_file)
    }

    /// Path of the metadata document.
    pub fn meta_path(&self) -> PathBuf {
        under(&self.modules_dir, &self.meta_file)
    }

    /// Load the module graph described by this configuration.
    pub fn load_index(&self) -> Result<GraphIndex> {
        let index_path = self.index_path();
        let meta_path = self.meta_path();
        tracing::debug!(index = %index_path.display(), meta = %meta_path.display(), "loading module graph");
        Ok(GraphIndex::load(&index_path, &meta_path)?)
    }

    pub fn archive_format(&self) -> ArchiveFormat {
        self.format.into()
    }

    pub fn compression_level(&self) -> Result<CompressionLevel> {
        Ok(CompressionLevel::new(self.level)?)
    }

    /// Construct the archive backend for the configured format and level.
    pub fn backend(&self) -> Result<Box<dyn ArchiveBackend>> {
        Ok(self.archive_format().backend(self.compression_level()?))
    }
}

fn under(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
