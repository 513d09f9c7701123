//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The dashboard core stays free of terminal libraries
//! - Core production code never panics on `unwrap()`/`expect()`
//! - Core production code never prints or touches the process
//!
//! The helpers below walk the workspace sources; the checks live in `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// A forbidden pattern found in production code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File containing the match
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Workspace root (two levels above this package)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// All `.rs` files below `dir`, sorted
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production lines of a source file as `(line number, text)`
///
/// Stops at the first `#[cfg(test)]` (test modules sit at the bottom of
/// each file) and skips comment lines, doc comments included.
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(idx, line)| (idx + 1, line))
        .collect()
}

/// Find production lines under `dir` containing any of `patterns`
pub fn find_violations(dir: &Path, patterns: &[&str]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for path in rust_files(dir) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (line, text) in production_lines(&content) {
            let code = text.split("//").next().unwrap_or(text);
            if patterns.iter().any(|p| code.contains(p)) {
                violations.push(Violation {
                    path: path.clone(),
                    line,
                    text: text.trim().to_string(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let src = "fn a() {}\n// note\n#[cfg(test)]\nmod tests { fn b() { x.unwrap() } }\n";
        let lines = production_lines(src);
        assert_eq!(lines, vec![(1, "fn a() {}")]);
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }
}
