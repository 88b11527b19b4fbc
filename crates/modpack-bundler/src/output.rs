//! Path validation for artifacts and archive inputs.
//!
//! Module names and file names come from the index document, so neither may
//! be trusted to stay inside the directories they are joined with:
//!
//! - an artifact base name must be a single path component,
//! - an input file name must be relative and must not climb out of the files
//!   root once `.` and `..` components are resolved.

use std::fs;
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use crate::{Error, Result};

/// Join `out_dir` with `base_name` + `suffix` and return `(artifact_name, path)`.
///
/// # Errors
///
/// Returns [`Error::InvalidOutputPath`] if the base name is empty, is `.` or
/// `..`, or contains a path separator or a null byte.
pub fn artifact_path(out_dir: &Path, base_name: &str, suffix: &str) -> Result<(String, PathBuf)> {
    if base_name.is_empty() || base_name == "." || base_name == ".." {
        return Err(Error::InvalidOutputPath(format!(
            "Artifact name '{}' is not a valid file name",
            base_name
        )));
    }

    if base_name.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidOutputPath(format!(
            "Artifact name '{}' must not contain path separators",
            base_name
        )));
    }

    let artifact = format!("{base_name}{suffix}");
    let path = out_dir.join(&artifact);
    Ok((artifact, path))
}

/// Resolve a relative input `name` against `files_dir`.
///
/// # Errors
///
/// Returns [`Error::InvalidOutputPath`] for empty names, names containing a
/// null byte, absolute paths, and paths that escape `files_dir`
/// (`../x`, `a/../../x`).
pub fn input_path(files_dir: &Path, name: &str) -> Result<PathBuf> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidOutputPath(format!(
            "Input file name '{}' is not a valid relative path",
            name.escape_default()
        )));
    }

    let cleaned = Path::new(name).clean();
    let escapes = cleaned.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes {
        return Err(Error::InvalidOutputPath(format!(
            "Input file '{}' escapes the files directory '{}'",
            name,
            files_dir.display()
        )));
    }

    Ok(files_dir.join(cleaned))
}

/// Best-effort removal of a partially written artifact.
pub(crate) fn remove_partial(path: &Path) {
    if path.is_file() {
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!("removed partial artifact {}", path.display()),
            Err(e) => tracing::warn!(
                "failed to remove partial artifact {}: {}",
                path.display(),
                e
            ),
        }
    }
}
