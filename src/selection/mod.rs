//! Test selection.
//!
//! Narrows a framework's suite to the tests an edit set could affect:
//! - pytest mirrors source paths into `tests/`
//! - vitest and jest receive the edited files and resolve related tests themselves
//! - go tests the packages containing edited files
//! - everything else runs the whole suite when any code changed

pub mod mirror;

pub use mirror::{is_test_file, mirror_candidates};

use crate::config::SelectionConfig;
use crate::discovery::{FrameworkDescriptor, SelectionStrategy};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to execute for an edit set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestSelection {
    /// Run exactly these targets. Never empty.
    Explicit(Vec<String>),
    /// Run the whole suite.
    RunAll,
    /// Run nothing.
    Skip,
}

impl TestSelection {
    /// Wrap a target list, collapsing an empty list to `Skip`.
    pub fn from_targets(targets: Vec<String>) -> Self {
        if targets.is_empty() {
            Self::Skip
        } else {
            Self::Explicit(targets)
        }
    }
}

/// Maps edited files to a [`TestSelection`] for a detected framework.
#[derive(Debug, Clone)]
pub struct TestSelector<'a> {
    config: &'a SelectionConfig,
}

impl<'a> TestSelector<'a> {
    pub fn new(config: &'a SelectionConfig) -> Self {
        Self { config }
    }

    pub fn select(
        &self,
        descriptor: &FrameworkDescriptor,
        edited_files: &[PathBuf],
        working_dir: &Path,
    ) -> TestSelection {
        let selection = match descriptor.strategy {
            SelectionStrategy::PathMirror => self.select_mirrored(edited_files, working_dir),
            SelectionStrategy::NativeRelated => self.select_related(edited_files, working_dir),
            SelectionStrategy::PackageDirectory => select_packages(edited_files, working_dir),
            SelectionStrategy::WholeSuiteOnly => self.select_whole_suite(edited_files),
        };
        debug!(framework = %descriptor.framework, ?selection, "Resolved test selection");
        selection
    }

    fn select_mirrored(&self, edited_files: &[PathBuf], working_dir: &Path) -> TestSelection {
        let mut targets = Targets::default();

        for file in edited_files.iter().filter(|f| has_extension(f, "py")) {
            if file.file_name().is_some_and(|n| n == "conftest.py") {
                debug!(path = %file.display(), "conftest.py changed, running whole suite");
                return TestSelection::RunAll;
            }

            let Ok(relative) = file.strip_prefix(working_dir) else {
                debug!(path = %file.display(), "Edited file is outside the project");
                continue;
            };

            if is_test_file(relative) {
                if file.is_file() {
                    targets.push(relative);
                }
                continue;
            }

            let mut found = false;
            for candidate in mirror_candidates(relative, &self.config.source_roots) {
                if working_dir.join(&candidate).is_file() {
                    targets.push(&candidate);
                    found = true;
                }
            }
            if !found {
                debug!(path = %relative.display(), "No mirrored test found");
            }
        }

        TestSelection::from_targets(targets.into_vec())
    }

    fn select_related(&self, edited_files: &[PathBuf], working_dir: &Path) -> TestSelection {
        let mut targets = Targets::default();
        for file in edited_files.iter().filter(|f| !self.config.is_non_code(f)) {
            targets.push(file.strip_prefix(working_dir).unwrap_or(file));
        }
        TestSelection::from_targets(targets.into_vec())
    }

    fn select_whole_suite(&self, edited_files: &[PathBuf]) -> TestSelection {
        if edited_files.iter().any(|f| !self.config.is_non_code(f)) {
            TestSelection::RunAll
        } else {
            TestSelection::Skip
        }
    }
}

fn select_packages(edited_files: &[PathBuf], working_dir: &Path) -> TestSelection {
    let mut targets = Targets::default();

    for file in edited_files.iter().filter(|f| has_extension(f, "go")) {
        let Some(package) = file
            .parent()
            .and_then(|dir| dir.strip_prefix(working_dir).ok())
        else {
            continue;
        };

        if package.as_os_str().is_empty() {
            targets.push_str(".".to_string());
        } else {
            targets.push_str(format!("./{}", package.display()));
        }
    }

    TestSelection::from_targets(targets.into_vec())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Ordered, deduplicated target list.
#[derive(Debug, Default)]
struct Targets {
    seen: HashSet<String>,
    list: Vec<String>,
}

impl Targets {
    fn push(&mut self, path: &Path) {
        self.push_str(path.to_string_lossy().into_owned());
    }

    fn push_str(&mut self, target: String) {
        if self.seen.insert(target.clone()) {
            self.list.push(target);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.list
    }
}
