use crate::config::{ConfigOverrides, ModpackConfig};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
    value::Uncased,
};
use std::path::Path;

/// Config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "modpack.config.json";

/// Prefix of configuration environment variables (`MODPACK_OUT_DIR`, ...).
pub const ENV_PREFIX: &str = "MODPACK_";

impl ModpackConfig {
    /// Load configuration from every source.
    ///
    /// Priority: CLI overrides > environment variables > config file > defaults.
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                default_path.is_file().then(|| default_path.to_path_buf())
            }
        };

        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "reading config file");
            figment = figment.merge(Json::file(path));
        }

        // MODPACK_OUT_DIR -> outDir
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| Uncased::new(env_key_to_field(key.as_str())))
                .only(&Self::FIELDS)
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: format!("Check {} and {}* variables for field names and types", CONFIG_FILE_NAME, ENV_PREFIX),
            }
            .into()
        })
    }

    /// Default configuration values.
    pub fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            modules_dir: default_modules_dir(),
            index_file: default_index_file(),
            meta_file: default_meta_file(),
            out_dir: default_out_dir(),
            format: Default::default(),
            level: default_level(),
            clean: false,
            jobs: default_jobs(),
        }
    }
}

impl Default for ModpackConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// `MODULES_DIR` -> `modulesDir`.
pub(crate) fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }
    field
}
