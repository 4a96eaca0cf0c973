//! Project marker inspection.
//!
//! Every check is best-effort: an unreadable directory, file or manifest
//! simply does not match.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PYTEST_CONFIG_FILES: &[&str] = &["pyproject.toml", "setup.cfg", "tox.ini"];
const PYTEST_SECTIONS: &[&str] = &["[tool.pytest", "[pytest]", "[tool:pytest]"];
const VITE_CONFIG_FILES: &[&str] = &["vite.config.ts", "vite.config.js"];
const PLACEHOLDER_TEST_SCRIPT: &str = "no test specified";

/// A one-level snapshot of a project root.
#[derive(Debug, Clone)]
pub struct ProjectMarkers {
    root: PathBuf,
    files: BTreeSet<String>,
    dirs: BTreeSet<String>,
    package_json: Option<Value>,
}

impl ProjectMarkers {
    /// Snapshot the top level of `root`.
    pub fn scan(root: &Path) -> Self {
        let mut files = BTreeSet::new();
        let mut dirs = BTreeSet::new();

        match fs::read_dir(root) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                        continue;
                    };
                    if entry.path().is_dir() {
                        dirs.insert(name);
                    } else {
                        files.insert(name);
                    }
                }
            }
            Err(e) => {
                debug!(path = %root.display(), error = %e, "Failed to list project directory");
            }
        }

        let package_json = if files.contains("package.json") {
            read_json(&root.join("package.json"))
        } else {
            None
        };

        Self {
            root: root.to_path_buf(),
            files,
            dirs,
            package_json,
        }
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    pub fn has_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    fn any_file(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.files.iter().any(|name| pred(name.as_str()))
    }

    fn read_text(&self, name: &str) -> Option<String> {
        if !self.has_file(name) {
            return None;
        }
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to read marker file");
                None
            }
        }
    }

    pub fn is_pytest(&self) -> bool {
        if self.has_file("pytest.ini") || self.has_file("conftest.py") || self.has_dir("tests") {
            return true;
        }
        if self.any_file(|name| name.starts_with("test_") && name.ends_with(".py")) {
            return true;
        }
        PYTEST_CONFIG_FILES.iter().any(|name| {
            self.read_text(name)
                .is_some_and(|content| PYTEST_SECTIONS.iter().any(|s| content.contains(s)))
        })
    }

    pub fn is_vitest(&self) -> bool {
        if self.any_file(|name| name.starts_with("vitest.config.")) {
            return true;
        }
        VITE_CONFIG_FILES.iter().any(|name| {
            self.read_text(name)
                .is_some_and(|content| content.contains("test"))
        })
    }

    pub fn is_jest(&self) -> bool {
        if self.any_file(|name| name.starts_with("jest.config.")) {
            return true;
        }
        self.package_json
            .as_ref()
            .is_some_and(|pkg| pkg.get("jest").is_some())
    }

    pub fn is_mocha(&self) -> bool {
        let Some(pkg) = self.package_json.as_ref() else {
            return false;
        };
        ["dependencies", "devDependencies"].iter().any(|section| {
            pkg.get(section)
                .and_then(|deps| deps.as_object())
                .is_some_and(|deps| deps.contains_key("mocha"))
        })
    }

    pub fn has_npm_test_script(&self) -> bool {
        self.package_json
            .as_ref()
            .and_then(|pkg| pkg.get("scripts"))
            .and_then(|scripts| scripts.get("test"))
            .and_then(|test| test.as_str())
            .is_some_and(|test| !test.trim().is_empty() && !test.contains(PLACEHOLDER_TEST_SCRIPT))
    }
}

/// Parse a JSON object; anything else counts as absent.
fn read_json(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Value>(&content) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => None,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Ignoring malformed manifest");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_scan_splits_files_and_dirs() {
        let dir = project(&[("setup.py", ""), ("tests/test_x.py", "")]);
        let markers = ProjectMarkers::scan(dir.path());
        assert!(markers.has_file("setup.py"));
        assert!(markers.has_dir("tests"));
        assert!(!markers.has_file("tests"));
    }

    #[test]
    fn test_scan_missing_directory_matches_nothing() {
        let markers = ProjectMarkers::scan(Path::new("/nonexistent/project/root"));
        assert!(!markers.is_pytest());
        assert!(!markers.is_jest());
        assert!(!markers.has_npm_test_script());
    }

    #[test]
    fn test_pytest_sections_in_config_files() {
        for (file, content) in [
            ("pyproject.toml", "[tool.pytest.ini_options]\naddopts = \"-q\"\n"),
            ("setup.cfg", "[metadata]\nname = x\n\n[tool:pytest]\n"),
            ("tox.ini", "[tox]\n\n[pytest]\nminversion = 6\n"),
        ] {
            let dir = project(&[(file, content)]);
            assert!(ProjectMarkers::scan(dir.path()).is_pytest(), "{file}");
        }
    }

    #[test]
    fn test_pyproject_without_pytest_section() {
        let dir = project(&[("pyproject.toml", "[tool.black]\nline-length = 100\n")]);
        assert!(!ProjectMarkers::scan(dir.path()).is_pytest());
    }

    #[test]
    fn test_top_level_test_file_marks_pytest() {
        let dir = project(&[("test_smoke.py", "def test_ok(): pass\n")]);
        assert!(ProjectMarkers::scan(dir.path()).is_pytest());
    }

    #[test]
    fn test_vite_config_requires_test_block() {
        let with_test = project(&[("vite.config.ts", "export default { test: {} }")]);
        assert!(ProjectMarkers::scan(with_test.path()).is_vitest());

        let without_test = project(&[("vite.config.js", "export default { plugins: [] }")]);
        assert!(!ProjectMarkers::scan(without_test.path()).is_vitest());
    }

    #[test]
    fn test_malformed_package_json_is_absent() {
        let dir = project(&[("package.json", "{ \"jest\": ")]);
        let markers = ProjectMarkers::scan(dir.path());
        assert!(!markers.is_jest());
        assert!(!markers.is_mocha());
        assert!(!markers.has_npm_test_script());
    }

    #[test]
    fn test_mocha_in_dev_dependencies() {
        let dir = project(&[(
            "package.json",
            r#"{"devDependencies": {"mocha": "^10.0.0", "chai": "^4"}}"#,
        )]);
        assert!(ProjectMarkers::scan(dir.path()).is_mocha());
    }

    #[test]
    fn test_placeholder_test_script_is_ignored() {
        let dir = project(&[(
            "package.json",
            r#"{"scripts": {"test": "echo \"Error: no test specified\" && exit 1"}}"#,
        )]);
        assert!(!ProjectMarkers::scan(dir.path()).has_npm_test_script());

        let real = project(&[("package.json", r#"{"scripts": {"test": "node test.js"}}"#)]);
        assert!(ProjectMarkers::scan(real.path()).has_npm_test_script());
    }
}
