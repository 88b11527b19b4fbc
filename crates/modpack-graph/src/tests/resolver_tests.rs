//! Resolver behaviour on small hand-written graphs.

use crate::{DependencyResolver, GraphIndex, ModuleRecord};

fn platform_graph() -> GraphIndex {
    GraphIndex::new([
        ("time", ModuleRecord::file("time.py")),
        (
            "platform",
            ModuleRecord::file("platform.py").with_imports(["time"]),
        ),
    ])
}

fn files(index: &GraphIndex, root: &str) -> Vec<String> {
    DependencyResolver::new(index).resolve(root).files
}

#[test]
fn test_own_file_before_imports() {
    let index = platform_graph();
    assert_eq!(files(&index, "platform"), vec!["platform.py", "time.py"]);
    assert_eq!(files(&index, "time"), vec!["time.py"]);
}

#[test]
fn test_excluded_import_is_not_bundled() {
    let index = platform_graph().with_excluded(["time"]);
    let result = DependencyResolver::new(&index).resolve("platform");

    assert_eq!(result.files, vec!["platform.py"]);
    assert_eq!(result.skipped, vec!["time"]);
    assert!(result.visited.contains("time"));
}

#[test]
fn test_preloaded_import_is_not_bundled() {
    let index = platform_graph().with_preloaded(["time"]);
    assert_eq!(files(&index, "platform"), vec!["platform.py"]);
}

#[test]
fn test_skippable_root_yields_nothing() {
    let index = platform_graph().with_excluded(["platform"]);
    let result = DependencyResolver::new(&index).resolve("platform");

    assert!(result.is_empty());
    assert_eq!(result.skipped, vec!["platform"]);
}

#[test]
fn test_unknown_root_yields_nothing() {
    let index = platform_graph();
    let result = DependencyResolver::new(&index).resolve("does.not.exist");

    assert!(result.is_empty());
    assert_eq!(result.root, "does.not.exist");
    assert_eq!(result.visited.len(), 1);
}

#[test]
fn test_unknown_imports_are_dropped() {
    let index = GraphIndex::new([(
        "app",
        ModuleRecord::file("app.py").with_imports(["nope", "also_nope"]),
    )])
    .with_missing(["nope"]);

    assert_eq!(files(&index, "app"), vec!["app.py"]);
}

#[test]
fn test_mutual_imports_terminate() {
    let index = GraphIndex::new([
        ("a", ModuleRecord::file("a.py").with_imports(["b"])),
        ("b", ModuleRecord::file("b.py").with_imports(["a"])),
    ]);

    let result = DependencyResolver::new(&index).resolve("a");
    assert_eq!(result.files, vec!["a.py", "b.py"]);
    assert_eq!(
        result.visited.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["a", "b"]
    );

    assert_eq!(files(&index, "b"), vec!["b.py", "a.py"]);
}

#[test]
fn test_self_import_terminates() {
    let index = GraphIndex::new([("a", ModuleRecord::file("a.py").with_imports(["a"]))]);
    assert_eq!(files(&index, "a"), vec!["a.py"]);
}

#[test]
fn test_depth_first_order_follows_import_order() {
    let index = GraphIndex::new([
        ("root", ModuleRecord::file("root.py").with_imports(["a", "b"])),
        ("a", ModuleRecord::file("a.py").with_imports(["c"])),
        ("b", ModuleRecord::file("b.py").with_imports(["c"])),
        ("c", ModuleRecord::file("c.py")),
    ]);

    assert_eq!(files(&index, "root"), vec!["root.py", "a.py", "c.py", "b.py"]);
}

#[test]
fn test_listed_import_order_is_kept() {
    let index = GraphIndex::new([
        (
            "root",
            ModuleRecord::file("root.py").with_imports(["zeta", "alpha", "mid"]),
        ),
        ("alpha", ModuleRecord::file("alpha.py")),
        ("mid", ModuleRecord::file("mid.py")),
        ("zeta", ModuleRecord::file("zeta.py")),
    ]);

    assert_eq!(
        files(&index, "root"),
        vec!["root.py", "zeta.py", "alpha.py", "mid.py"]
    );
}

#[test]
fn test_parent_package_of_file_is_included() {
    let index = GraphIndex::new([
        ("pkg", ModuleRecord::file("pkg/__init__.py").with_dir("pkg")),
        ("pkg.sub", ModuleRecord::file("pkg/sub.py")),
    ]);

    assert_eq!(
        files(&index, "pkg.sub"),
        vec!["pkg/sub.py", "pkg/__init__.py"]
    );
}

#[test]
fn test_package_initializer_and_ancestors_are_included() {
    let index = GraphIndex::new([
        ("a", ModuleRecord::file("a/__init__.py").with_dir("a")),
        ("a.b", ModuleRecord::file("a/b/__init__.py").with_dir("a/b")),
        (
            "a.b.c",
            ModuleRecord::file("a/b/c/__init__.py").with_dir("a/b/c"),
        ),
        ("a.b.c.mod", ModuleRecord::file("a/b/c/mod.py")),
    ]);

    assert_eq!(
        files(&index, "a.b.c.mod"),
        vec![
            "a/b/c/mod.py",
            "a/__init__.py",
            "a/b/__init__.py",
            "a/b/c/__init__.py",
        ]
    );
}

#[test]
fn test_package_init_record_is_resolved_first() {
    let index = GraphIndex::new([
        ("email", ModuleRecord::default().with_dir("email")),
        (
            "email.__init__",
            ModuleRecord::file("email/__init__.py").with_imports(["email.utils"]),
        ),
        ("email.utils", ModuleRecord::file("email/utils.py")),
        (
            "email.parser",
            ModuleRecord::file("email/parser.py").with_dir("email"),
        ),
    ]);

    assert_eq!(
        files(&index, "email.parser"),
        vec!["email/__init__.py", "email/utils.py", "email/parser.py"]
    );
}

#[test]
fn test_namespace_package_still_resolves_imports() {
    let index = GraphIndex::new([
        ("ns", ModuleRecord::default().with_imports(["time"])),
        ("time", ModuleRecord::file("time.py")),
    ]);

    assert_eq!(files(&index, "ns"), vec!["time.py"]);
}

#[test]
fn test_shared_file_is_emitted_once() {
    let index = GraphIndex::new([
        ("a", ModuleRecord::file("shared.py").with_imports(["b"])),
        ("b", ModuleRecord::file("shared.py")),
    ]);

    assert_eq!(files(&index, "a"), vec!["shared.py"]);
}

#[test]
fn test_empty_file_name_is_ignored() {
    let index = GraphIndex::new([
        ("odd", ModuleRecord::file("").with_imports(["time"])),
        ("time", ModuleRecord::file("time.py")),
    ]);

    assert_eq!(files(&index, "odd"), vec!["time.py"]);
}

#[test]
fn test_dependencies_behind_skipped_module_are_pruned() {
    let index = GraphIndex::new([
        ("app", ModuleRecord::file("app.py").with_imports(["os"])),
        ("os", ModuleRecord::file("os.py").with_imports(["posixpath"])),
        ("posixpath", ModuleRecord::file("posixpath.py")),
    ])
    .with_preloaded(["os"]);

    let result = DependencyResolver::new(&index).resolve("app");
    assert_eq!(result.files, vec!["app.py"]);
    assert!(!result.visited.contains("posixpath"));

    let pruned = index.pruned_imports();
    assert_eq!(pruned.get("os"), Some(&vec!["posixpath"]));
}

#[test]
fn test_pruned_dependency_reachable_elsewhere_is_bundled() {
    let index = GraphIndex::new([
        (
            "app",
            ModuleRecord::file("app.py").with_imports(["os", "posixpath"]),
        ),
        ("os", ModuleRecord::file("os.py").with_imports(["posixpath"])),
        ("posixpath", ModuleRecord::file("posixpath.py")),
    ])
    .with_excluded(["os"]);

    assert_eq!(files(&index, "app"), vec!["app.py", "posixpath.py"]);
}

#[test]
fn test_resolution_is_deterministic() {
    let index = GraphIndex::new([
        (
            "root",
            ModuleRecord::file("pkg/root.py").with_imports(["x", "y", "z"]),
        ),
        ("pkg", ModuleRecord::file("pkg/__init__.py").with_dir("pkg")),
        ("x", ModuleRecord::file("x.py").with_imports(["z"])),
        ("y", ModuleRecord::file("y.py").with_imports(["x"])),
        ("z", ModuleRecord::file("z.py")),
    ]);

    let resolver = DependencyResolver::new(&index);
    let first = resolver.resolve("root");
    for _ in 0..10 {
        assert_eq!(resolver.resolve("root"), first);
    }
}

#[test]
fn test_long_import_chain_does_not_overflow() {
    const DEPTH: usize = 20_000;

    let index = GraphIndex::new((0..DEPTH).map(|i| {
        let record = ModuleRecord::file(format!("m{i}.py"));
        let record = if i + 1 < DEPTH {
            record.with_imports([format!("m{}", i + 1)])
        } else {
            record
        };
        (format!("m{i}"), record)
    }));

    let result = DependencyResolver::new(&index).resolve("m0");
    assert_eq!(result.file_count(), DEPTH);
    assert_eq!(result.files.last().map(String::as_str), Some("m19999.py"));
}
