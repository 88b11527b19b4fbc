//! Shared test utilities for modpack-bundler tests
//!
//! Builds a small module corpus in a temporary directory:
//!
//! ```text
//! modules/
//!   index.json, meta.json
//!   time.py, platform.py, os.py
//!   pkg/__init__.py, pkg/sub.py
//! ```
//!
//! `os` is preloaded, `_winreg` is excluded, `broken` points at a file that
//! does not exist and `ns` has no file at all.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use modpack_graph::GraphIndex;
use tempfile::TempDir;

pub const INDEX: &str = r#"{
    "modules": {
        "time": { "file": "time.py", "imports": [] },
        "platform": { "file": "platform.py", "imports": ["time", "os", "_winreg"] },
        "os": { "file": "os.py", "imports": [] },
        "pkg": { "dir": "pkg", "file": "pkg/__init__.py", "imports": [] },
        "pkg.sub": { "file": "pkg/sub.py", "imports": ["time"] },
        "broken": { "file": "broken.py", "imports": [] },
        "ns": { "imports": [] }
    },
    "preload": ["os"]
}"#;

pub const META: &str = r#"{ "exclude": ["_winreg"], "missing": [] }"#;

pub const TIME_PY: &str = "import sys\n\ndef time():\n    return 0.0\n";
pub const PLATFORM_PY: &str = "import time\nimport os\n\ndef system():\n    return 'js'\n";

pub struct Corpus {
    _temp: TempDir,
    pub modules: PathBuf,
    pub out: PathBuf,
    pub index: GraphIndex,
}

impl Corpus {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let modules = temp.path().join("modules");
        let out = temp.path().join("download");
        fs::create_dir_all(modules.join("pkg")).unwrap();
        fs::create_dir_all(&out).unwrap();

        fs::write(modules.join("index.json"), INDEX).unwrap();
        fs::write(modules.join("meta.json"), META).unwrap();
        fs::write(modules.join("time.py"), TIME_PY).unwrap();
        fs::write(modules.join("platform.py"), PLATFORM_PY).unwrap();
        fs::write(modules.join("os.py"), "import posix\n").unwrap();
        fs::write(modules.join("pkg/__init__.py"), "").unwrap();
        fs::write(modules.join("pkg/sub.py"), "from time import time\n").unwrap();

        let index = GraphIndex::load(&modules.join("index.json"), &modules.join("meta.json"))
            .unwrap();

        Self {
            _temp: temp,
            modules,
            out,
            index,
        }
    }

    /// A fresh, empty output directory next to the default one.
    pub fn extra_out_dir(&self, name: &str) -> PathBuf {
        let dir = self.out.parent().unwrap().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }
}

/// Names of the files currently in `dir`, sorted.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
