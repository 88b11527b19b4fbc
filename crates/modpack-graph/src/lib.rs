//! # modpack-graph
//!
//! Import graph index and transitive file resolution for per-module archives.
//!
//! ## Overview
//!
//! A module corpus is described by two static JSON documents:
//!
//! - the **index** (`index.json`): every known module with its optional package
//!   directory, optional source file and the ordered list of modules it imports,
//!   plus the `preload` list of modules the runtime already ships with;
//! - the **metadata** (`meta.json`): the `exclude` list of modules that are never
//!   bundled and the informational `missing` list of names that are referenced
//!   but have no record.
//!
//! [`GraphIndex`] loads both once and is immutable afterwards, so it can be shared
//! freely (e.g. behind an `Arc`) between concurrent resolutions.
//! [`DependencyResolver`] walks the graph from a root module and produces a
//! [`ResolutionResult`]: the ordered, de-duplicated list of files that an archive
//! for that module has to contain.
//!
//! ```text
//!   index.json ─┐
//!               ├─► GraphIndex ──► DependencyResolver::resolve(root) ──► ResolutionResult
//!   meta.json ──┘                                                         (files, visited)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use modpack_graph::{DependencyResolver, GraphIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = GraphIndex::from_json_str(
//!     r#"{
//!         "modules": {
//!             "time": { "file": "time.py", "imports": [] },
//!             "platform": { "file": "platform.py", "imports": ["time"] }
//!         },
//!         "preload": []
//!     }"#,
//!     r#"{ "exclude": [], "missing": [] }"#,
//! )?;
//!
//! let resolution = DependencyResolver::new(&index).resolve("platform");
//! assert_eq!(resolution.files, vec!["platform.py", "time.py"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pruning
//!
//! Excluded and preloaded modules are assumed to be satisfied by the runtime.
//! The resolver never descends into them, so anything reachable *only* through
//! such a module is not bundled. [`GraphIndex::pruned_imports`] lists what each
//! skip entry hides so the assumption can be checked.

pub mod index;
pub mod record;
pub mod resolver;

pub use index::{GraphIndex, IndexStatistics};
pub use record::ModuleRecord;
pub use resolver::{DependencyResolver, ResolutionResult};

use std::path::PathBuf;

/// Delimiter between the segments of a dotted module name.
pub const MODULE_DELIMITER: char = '.';

/// Separator used by relative paths inside the index document.
pub const PATH_SEPARATOR: char = '/';

/// Last segment of the synthetic module name of a package initializer.
pub const PACKAGE_INIT: &str = "__init__";

/// Error types for graph loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index or metadata document does not exist.
    #[error("Graph document not found: {}", .path.display())]
    DocumentNotFound { path: PathBuf },

    /// A document exists but could not be read.
    #[error("Failed to read graph document '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON or has the wrong shape.
    #[error("Malformed graph document '{document}': {reason}")]
    Malformed { document: String, reason: String },

    /// A document is valid JSON but lacks a required top-level key.
    #[error("Graph document '{document}' is missing required key '{key}'")]
    MissingKey { document: String, key: &'static str },
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
