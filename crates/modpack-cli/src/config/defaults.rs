use std::path::PathBuf;

pub fn default_modules_dir() -> PathBuf {
    PathBuf::from("modules")
}

pub fn default_index_file() -> PathBuf {
    PathBuf::from("index.json")
}

pub fn default_meta_file() -> PathBuf {
    PathBuf::from("meta.json")
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("download")
}

pub fn default_level() -> u32 {
    9
}

pub fn default_jobs() -> usize {
    1
}
