use crate::config::ModpackConfig;
use crate::error::{ConfigError, Result};

impl ModpackConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.level > 9 {
            return Err(ConfigError::InvalidValue {
                field: "level".to_string(),
                value: self.level.to_string(),
                hint: "Compression level must be between 0 and 9".to_string(),
            }
            .into());
        }

        if self.jobs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "jobs".to_string(),
                value: "0".to_string(),
                hint: "Use at least one worker thread".to_string(),
            }
            .into());
        }

        if self.out_dir.components().eq(self.modules_dir.components()) {
            return Err(ConfigError::ConflictingOptions(format!(
                "outDir and modulesDir are both '{}'",
                self.out_dir.display()
            ))
            .into());
        }

        if self.modules_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "modulesDir".to_string(),
                hint: "Point modulesDir at the directory holding index.json".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
