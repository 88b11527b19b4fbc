use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Archive format as written in modpack.config.json.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// .tar.gz
    #[default]
    TarGz,
    /// .zip with deflate entries
    Zip,
    /// .zip with LZMA entries (.lzma.zip)
    LzmaZip,
}

/// Command-line values layered over the file and environment.
///
/// Unset fields are not serialized, so they never shadow lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules_dir: Option<std::path::PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<std::path::PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}
