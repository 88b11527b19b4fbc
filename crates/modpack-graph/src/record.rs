//! Per-module metadata as stored in the index document.

use serde::{Deserialize, Serialize};

use crate::{MODULE_DELIMITER, PACKAGE_INIT, PATH_SEPARATOR};

/// Metadata for one module of the corpus.
///
/// Mirrors a `modules.<name>` entry of the index document:
///
/// ```json
/// { "dir": "xml/sax", "file": "xml/sax/handler.py", "imports": ["xml.sax._exceptions"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Directory of the package this module *is*, relative to the modules root.
    ///
    /// When present the package initializer and every ancestor package are
    /// bundled alongside the module.
    #[serde(rename = "dir", default, skip_serializing_if = "Option::is_none")]
    pub containing_dir: Option<String>,

    /// The module's own source file, relative to the modules root.
    ///
    /// Absent for namespace-only packages.
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Names of imported modules, in source order. May reference names that
    /// have no record in the index.
    #[serde(default)]
    pub imports: Vec<String>,
}

impl ModuleRecord {
    /// Create a record for a plain module file.
    pub fn file(source_file: impl Into<String>) -> Self {
        Self {
            source_file: Some(source_file.into()),
            ..Self::default()
        }
    }

    /// Set the package directory.
    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.containing_dir = Some(dir.into());
        self
    }

    /// Append imported module names.
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    /// Synthetic module name of this package's initializer (`a/b` → `a.b.__init__`).
    pub fn package_init_name(&self) -> Option<String> {
        self.containing_dir.as_deref().map(package_init_name)
    }

    /// Whether this module is a package.
    pub fn is_package(&self) -> bool {
        self.containing_dir.is_some()
    }
}

/// Convert a relative directory path into a dotted module name.
pub fn dir_to_module_name(dir: &str) -> String {
    dir.trim_matches(PATH_SEPARATOR)
        .replace(PATH_SEPARATOR, &MODULE_DELIMITER.to_string())
}

/// Module name of the initializer of the package stored in `dir`.
pub fn package_init_name(dir: &str) -> String {
    format!(
        "{}{}{}",
        dir_to_module_name(dir),
        MODULE_DELIMITER,
        PACKAGE_INIT
    )
}

/// Package that contains `path`, if the path has a directory component.
///
/// `pkg/sub.py` → `pkg`, `a/b/c` → `a.b`, `time.py` → `None`.
pub fn parent_package(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches(PATH_SEPARATOR);
    let (parent, _) = trimmed.rsplit_once(PATH_SEPARATOR)?;
    let name = dir_to_module_name(parent);
    (!name.is_empty()).then_some(name)
}

/// Every package enclosing `dir`, nearest first.
///
/// `a/b/c` → `["a.b", "a"]`.
pub fn ancestor_packages(dir: &str) -> Vec<String> {
    let mut ancestors = Vec::new();
    let mut current = parent_package(dir);
    while let Some(name) = current {
        current = name
            .rsplit_once(MODULE_DELIMITER)
            .map(|(parent, _)| parent.to_string());
        ancestors.push(name);
    }
    ancestors
}
