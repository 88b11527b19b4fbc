#[cfg(test)]
mod tests {
    use crate::config::loading::env_key_to_field;
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use modpack_bundler::ArchiveFormat;
    use serial_test::serial;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn clear_env() {
        for field in ["MODULES_DIR", "INDEX_FILE", "META_FILE", "OUT_DIR", "FORMAT", "LEVEL", "CLEAN", "JOBS"] {
            unsafe { std::env::remove_var(format!("{ENV_PREFIX}{field}")) };
        }
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("modpack.config.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_serialization() {
        let config = ModpackConfig::default_config();
        let json_val = serde_json::to_value(&config).unwrap();

        assert_eq!(json_val["modulesDir"], "modules");
        assert_eq!(json_val["outDir"], "download");
        assert_eq!(json_val["format"], "tar-gz");
        assert_eq!(json_val["level"], 9);
        assert!(json_val.get("out_dir").is_none());

        assert_eq!(serde_json::to_string(&Format::LzmaZip).unwrap(), "\"lzma-zip\"");

        let back: ModpackConfig = serde_json::from_value(json_val).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<ModpackConfig, _> = serde_json::from_str(r#"{ "outdir": "x" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(ModpackConfig::default_config().validate().is_ok());

        let err = ModpackConfig {
            level: 10,
            ..ModpackConfig::default_config()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "level"));

        let err = ModpackConfig {
            jobs: 0,
            ..ModpackConfig::default_config()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "jobs"));

        let err = ModpackConfig {
            out_dir: PathBuf::from("modules"),
            ..ModpackConfig::default_config()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::ConflictingOptions(_))));
    }

    #[test]
    fn test_document_paths() {
        let config = ModpackConfig {
            modules_dir: PathBuf::from("corpus"),
            meta_file: PathBuf::from("/etc/modpack/meta.json"),
            ..ModpackConfig::default_config()
        };
        assert_eq!(config.index_path(), Path::new("corpus/index.json"));
        assert_eq!(config.meta_path(), Path::new("/etc/modpack/meta.json"));
    }

    #[test]
    fn test_backend_selection() {
        let config = ModpackConfig {
            format: Format::Zip,
            level: 3,
            ..ModpackConfig::default_config()
        };
        assert_eq!(config.archive_format(), ArchiveFormat::Zip);
        assert_eq!(config.backend().unwrap().info(), ".zip with level=3");

        let config = ModpackConfig {
            level: 42,
            ..ModpackConfig::default_config()
        };
        assert!(matches!(config.backend(), Err(CliError::Bundler(_))));
    }

    #[test]
    fn test_json_schema() {
        let schema = ModpackConfig::json_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in ModpackConfig::FIELDS {
            assert!(properties.contains_key(field), "{field} missing from schema");
        }
    }

    #[test]
    fn test_env_key_to_field() {
        assert_eq!(env_key_to_field("MODULES_DIR"), "modulesDir");
        assert_eq!(env_key_to_field("OUT_DIR"), "outDir");
        assert_eq!(env_key_to_field("LEVEL"), "level");
        assert_eq!(env_key_to_field("index_file"), "indexFile");
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        let config = ModpackConfig::load(&ConfigOverrides::default(), None).unwrap();
        assert_eq!(config, ModpackConfig::default_config());
    }

    #[test]
    #[serial]
    fn test_load_missing_explicit_file() {
        clear_env();
        let err = ModpackConfig::load(
            &ConfigOverrides::default(),
            Some(Path::new("/nonexistent/modpack.config.json")),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_file_env_and_cli_layering() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"{ "outDir": "from-file", "format": "zip", "level": 4, "jobs": 2 }"#,
        );

        let config = ModpackConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("from-file"));
        assert_eq!(config.format, Format::Zip);
        assert_eq!(config.level, 4);
        assert_eq!(config.jobs, 2);
        assert_eq!(config.modules_dir, PathBuf::from("modules"));

        unsafe {
            std::env::set_var("MODPACK_OUT_DIR", "from-env");
            std::env::set_var("MODPACK_LEVEL", "6");
        }
        let config = ModpackConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("from-env"));
        assert_eq!(config.level, 6);
        assert_eq!(config.format, Format::Zip);

        let overrides = ConfigOverrides {
            level: Some(1),
            format: Some(Format::LzmaZip),
            ..ConfigOverrides::default()
        };
        let config = ModpackConfig::load(&overrides, Some(&path)).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("from-env"));
        assert_eq!(config.level, 1);
        assert_eq!(config.format, Format::LzmaZip);
        assert_eq!(config.jobs, 2);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unrelated_env_vars_are_ignored() {
        clear_env();
        unsafe { std::env::set_var("MODPACK_UNRELATED_SETTING", "1") };
        let result = ModpackConfig::load(&ConfigOverrides::default(), None);
        unsafe { std::env::remove_var("MODPACK_UNRELATED_SETTING") };
        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn test_invalid_file_value() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"{ "format": "rar" }"#);

        let err = ModpackConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidValue { .. })));
    }
}
