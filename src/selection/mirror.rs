//! Source-to-test path mirroring for pytest-style layouts.
//!
//! `src/engine/db/sessions.py` mirrors to `tests/engine/db/test_sessions.py`.
//! A module inside a `routes` package also mirrors one level up as
//! `tests/engine/api/test_routes_github.py`.
//!
//! Everything here is pure path arithmetic; existence checks live in the
//! selector.

use std::path::{Component, Path, PathBuf};

const TESTS_DIR: &str = "tests";
const ROUTES_DIR: &str = "routes";

/// Candidate test files for a source file, in lookup order.
///
/// `relative` is the source path relative to the project root. A single
/// leading segment listed in `source_roots` is stripped before mirroring.
pub fn mirror_candidates(relative: &Path, source_roots: &[String]) -> Vec<PathBuf> {
    let mut segments: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    let Some(file_name) = segments.pop() else {
        return Vec::new();
    };
    let file = Path::new(file_name);
    let (Some(stem), Some(ext)) = (
        file.file_stem().and_then(|s| s.to_str()),
        file.extension().and_then(|s| s.to_str()),
    ) else {
        return Vec::new();
    };

    let under_root = segments
        .first()
        .is_some_and(|first| source_roots.iter().any(|root| root == first));
    if under_root {
        segments.remove(0);
    }

    let mut candidates = vec![tests_path(&segments, &format!("test_{stem}.{ext}"))];

    if let Some((last, parents)) = segments.split_last()
        && *last == ROUTES_DIR
    {
        candidates.push(tests_path(parents, &format!("test_routes_{stem}.{ext}")));
    }

    candidates
}

/// Whether a path already is a test file: `test_*`, `*_test.py`, or under a `tests/` segment.
pub fn is_test_file(relative: &Path) -> bool {
    let name = relative
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.starts_with("test_") || name.ends_with("_test.py") {
        return true;
    }
    relative
        .parent()
        .is_some_and(|parent| parent.components().any(|c| c.as_os_str() == TESTS_DIR))
}

fn tests_path(parents: &[&str], file_name: &str) -> PathBuf {
    let mut path = PathBuf::from(TESTS_DIR);
    path.extend(parents);
    path.push(file_name);
    path
}
