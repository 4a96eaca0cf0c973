//! Framework discovery.
//!
//! Inspects the top level of a project and picks the single test framework
//! that governs it. Checks run in a fixed priority order and the first match
//! wins; a project with no recognizable markers has no framework.

pub mod framework;
pub mod markers;

pub use framework::{Framework, FrameworkDescriptor, SelectionStrategy};
pub use markers::ProjectMarkers;

use std::path::Path;
use tracing::debug;

/// Detect the test framework governing `working_dir`.
pub fn detect(working_dir: &Path) -> Option<FrameworkDescriptor> {
    let markers = ProjectMarkers::scan(working_dir);
    let framework = Framework::ALL
        .into_iter()
        .find(|framework| matches_framework(*framework, &markers))?;

    debug!(framework = %framework, path = %working_dir.display(), "Detected test framework");
    Some(FrameworkDescriptor::new(framework))
}

fn matches_framework(framework: Framework, markers: &ProjectMarkers) -> bool {
    match framework {
        Framework::Pytest => markers.is_pytest(),
        Framework::Vitest => markers.is_vitest(),
        Framework::Jest => markers.is_jest(),
        Framework::Mocha => markers.is_mocha(),
        Framework::Npm => markers.has_npm_test_script(),
        Framework::Go => markers.has_file("go.mod"),
        Framework::Cargo => markers.has_file("Cargo.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            let (name, content) = name.split_once('=').unwrap_or((name, ""));
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn detected(files: &[&str]) -> Option<Framework> {
        let dir = project(files);
        detect(dir.path()).map(|d| d.framework)
    }

    #[test]
    fn test_detect_each_framework() {
        assert_eq!(detected(&["pytest.ini"]), Some(Framework::Pytest));
        assert_eq!(detected(&["conftest.py"]), Some(Framework::Pytest));
        assert_eq!(detected(&["tests/test_a.py"]), Some(Framework::Pytest));
        assert_eq!(detected(&["vitest.config.mts"]), Some(Framework::Vitest));
        assert_eq!(detected(&["jest.config.js"]), Some(Framework::Jest));
        assert_eq!(
            detected(&[r#"package.json={"jest": {"testEnvironment": "node"}}"#]),
            Some(Framework::Jest)
        );
        assert_eq!(
            detected(&[r#"package.json={"dependencies": {"mocha": "10"}}"#]),
            Some(Framework::Mocha)
        );
        assert_eq!(
            detected(&[r#"package.json={"scripts": {"test": "tap"}}"#]),
            Some(Framework::Npm)
        );
        assert_eq!(detected(&["go.mod"]), Some(Framework::Go));
        assert_eq!(detected(&["Cargo.toml"]), Some(Framework::Cargo));
    }

    #[test]
    fn test_detect_nothing() {
        assert_eq!(detected(&[]), None);
        assert_eq!(detected(&["README.md", "main.c"]), None);
        assert_eq!(
            detected(&[r#"package.json={"scripts": {"test": "echo \"Error: no test specified\""}}"#]),
            None
        );
    }

    #[test]
    fn test_priority_first_match_wins() {
        // A Python service with a Rust extension crate
        assert_eq!(
            detected(&["Cargo.toml", "go.mod", "conftest.py"]),
            Some(Framework::Pytest)
        );
        // vitest beats a jest key in package.json
        assert_eq!(
            detected(&["vitest.config.ts", r#"package.json={"jest": {}}"#]),
            Some(Framework::Vitest)
        );
        assert_eq!(detected(&["go.mod", "Cargo.toml"]), Some(Framework::Go));
    }

    #[test]
    fn test_descriptor_carries_base_command() {
        let dir = project(&["go.mod"]);
        let descriptor = detect(dir.path()).unwrap();
        assert_eq!(descriptor.base_command, vec!["go", "test", "-count=1"]);
        assert_eq!(descriptor.strategy, SelectionStrategy::PackageDirectory);
    }

    #[test]
    fn test_detect_is_deterministic() {
        let dir = project(&["jest.config.ts", "go.mod"]);
        assert_eq!(detect(dir.path()), detect(dir.path()));
    }
}
