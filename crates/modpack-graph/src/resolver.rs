//! Transitive file resolution for a single root module.
//!
//! The walk is a depth-first traversal driven by an explicit stack of steps,
//! so arbitrarily deep or cyclic import graphs terminate without recursion.
//! The emitted file order matches a recursive walk exactly:
//!
//! 1. the package initializer and the enclosing packages (for packages),
//! 2. the module's own file, then the package the file lives in,
//! 3. every import, in the order listed in the index.

use std::borrow::Cow;

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::index::GraphIndex;
use crate::record::{ModuleRecord, ancestor_packages, parent_package};

/// Files an archive for one root module has to contain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// The module the walk started from.
    pub root: String,
    /// Relative file paths in discovery order, without duplicates.
    pub files: Vec<String>,
    /// Every module name the walk reached, in discovery order.
    pub visited: IndexSet<String>,
    /// Excluded or preloaded names the walk reached and did not descend into.
    pub skipped: Vec<String>,
}

impl ResolutionResult {
    /// Nothing to package for this root.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// One unit of pending work on the traversal stack.
enum Step<'a> {
    /// Process a module name, unless it was reached before.
    Visit(Cow<'a, str>),
    /// Append a file, unless it is already in the output.
    Emit(&'a str),
}

/// Computes the transitive file closure of a module.
///
/// Holds only a shared reference to the index; every call to
/// [`resolve`](Self::resolve) owns its own traversal state.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    index: &'a GraphIndex,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(index: &'a GraphIndex) -> Self {
        Self { index }
    }

    /// Resolve `root` into the ordered list of files it needs.
    ///
    /// Unknown names (including an unknown root) contribute nothing.
    /// Excluded and preloaded names contribute neither their own file nor
    /// anything reachable only through them.
    pub fn resolve(&self, root: &str) -> ResolutionResult {
        let _span = tracing::debug_span!("resolve", root).entered();

        let mut visited: IndexSet<String> = IndexSet::new();
        let mut skipped = Vec::new();
        let mut files = Vec::new();
        let mut emitted: FxHashSet<&str> = FxHashSet::default();
        let mut stack = vec![Step::Visit(Cow::Borrowed(root))];

        while let Some(step) = stack.pop() {
            match step {
                Step::Emit(file) => {
                    if emitted.insert(file) {
                        files.push(file.to_string());
                    }
                }
                Step::Visit(name) => {
                    if visited.contains(&*name) {
                        continue;
                    }
                    visited.insert(name.to_string());

                    if self.index.is_skippable(&name) {
                        tracing::trace!(module = %name, "skip excluded/preloaded module");
                        skipped.push(name.into_owned());
                        continue;
                    }

                    match self.index.lookup(&name) {
                        Some(record) => schedule(record, &mut stack),
                        None => tracing::trace!(module = %name, "no record, nothing to resolve"),
                    }
                }
            }
        }

        tracing::debug!(
            files = files.len(),
            visited = visited.len(),
            skipped = skipped.len(),
            "resolved"
        );

        ResolutionResult {
            root: root.to_string(),
            files,
            visited,
            skipped,
        }
    }
}

/// Push the work for `record` so that it pops in processing order.
fn schedule<'a>(record: &'a ModuleRecord, stack: &mut Vec<Step<'a>>) {
    for import in record.imports.iter().rev() {
        stack.push(Step::Visit(Cow::Borrowed(import.as_str())));
    }

    if let Some(file) = record.source_file.as_deref().filter(|f| !f.is_empty()) {
        if let Some(parent) = parent_package(file) {
            stack.push(Step::Visit(Cow::Owned(parent)));
        }
        stack.push(Step::Emit(file));
    }

    if let Some(dir) = record.containing_dir.as_deref() {
        for ancestor in ancestor_packages(dir).into_iter().rev() {
            stack.push(Step::Visit(Cow::Owned(ancestor)));
        }
        if let Some(init) = record.package_init_name() {
            stack.push(Step::Visit(Cow::Owned(init)));
        }
    }
}
