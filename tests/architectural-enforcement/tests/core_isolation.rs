//! Integration Test: Core Isolation
//!
//! **Policy**: `taskboard-core` is a headless library. It renders into a
//! `DisplaySink` and never talks to a terminal, prints, panics on bad input,
//! or exits the process. Those jobs belong to the driver.

use architectural_enforcement::{find_violations, workspace_root};

const TERMINAL_CRATES: &[&str] = &["crossterm", "ratatui", "termion", "console"];

/// The core manifest declares no terminal libraries
#[test]
fn test_core_has_no_terminal_dependencies() {
    let manifest_path = workspace_root().join("taskboard/core/Cargo.toml");
    let manifest = std::fs::read_to_string(&manifest_path).unwrap();
    let manifest: toml::Table = manifest.parse().unwrap();

    let mut found = Vec::new();
    for section in ["dependencies", "dev-dependencies"] {
        if let Some(deps) = manifest.get(section).and_then(toml::Value::as_table) {
            found.extend(
                deps.keys()
                    .filter(|name| TERMINAL_CRATES.contains(&name.as_str()))
                    .cloned(),
            );
        }
    }

    assert!(
        found.is_empty(),
        "taskboard-core must stay headless, found terminal dependencies: {found:?}"
    );
}

/// No `unwrap()`/`expect()` outside test modules
#[test]
fn test_core_does_not_panic_on_results() {
    let violations = find_violations(
        &workspace_root().join("taskboard/core/src"),
        &[".unwrap()", ".expect("],
    );

    for violation in &violations {
        eprintln!("  {violation}");
    }
    assert!(
        violations.is_empty(),
        "Found {} unwrap/expect call(s) in core production code. Propagate the error instead.",
        violations.len()
    );
}

/// No printing or process control; output goes through the sink, logs through tracing
#[test]
fn test_core_does_not_print_or_exit() {
    let violations = find_violations(
        &workspace_root().join("taskboard/core/src"),
        &["println!", "eprintln!", "print!(", "dbg!", "std::process"],
    );

    for violation in &violations {
        eprintln!("  {violation}");
    }
    assert!(
        violations.is_empty(),
        "Found {} print/process call(s) in core production code.",
        violations.len()
    );
}

/// The driver keeps logs off stdout, which carries the dashboard
#[test]
fn test_driver_does_not_print_to_stdout() {
    let violations = find_violations(&workspace_root().join("tui/src"), &["println!", "print!("]);

    for violation in &violations {
        eprintln!("  {violation}");
    }
    assert!(violations.is_empty());
}

/// Every normal dependency of a crate is referenced from its sources
fn unused_dependencies(crate_dir: &str) -> Vec<String> {
    let root = workspace_root().join(crate_dir);
    let manifest = std::fs::read_to_string(root.join("Cargo.toml")).unwrap();
    let manifest: toml::Table = manifest.parse().unwrap();

    let sources: String = architectural_enforcement::rust_files(&root.join("src"))
        .iter()
        .map(|path| std::fs::read_to_string(path).unwrap())
        .collect();

    manifest
        .get("dependencies")
        .and_then(toml::Value::as_table)
        .map(|deps| {
            deps.keys()
                .filter(|name| !sources.contains(&format!("{}::", name.replace('-', "_"))))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_core_dependencies_are_used() {
    let unused = unused_dependencies("taskboard/core");
    assert!(unused.is_empty(), "unused taskboard-core dependencies: {unused:?}");
}

#[test]
fn test_driver_dependencies_are_used() {
    let unused = unused_dependencies("tui");
    assert!(unused.is_empty(), "unused taskboard-tui dependencies: {unused:?}");
}
