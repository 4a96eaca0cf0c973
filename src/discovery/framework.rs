//! Test framework definitions.

use crate::selection::TestSelection;
use std::fmt;

/// A supported test framework.
///
/// Variant order is detection priority: when several frameworks match a
/// project, the earliest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    Pytest,
    Vitest,
    Jest,
    Mocha,
    /// `npm test` with a real `scripts.test` entry
    Npm,
    Go,
    Cargo,
}

/// How edited files narrow the suite for a framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Mirror source paths into `tests/` (pytest).
    PathMirror,
    /// Hand edited files to the runner's own related-tests resolution.
    NativeRelated,
    /// Test the packages that contain edited files (go).
    PackageDirectory,
    /// No granular selection; run everything or nothing.
    WholeSuiteOnly,
}

impl Framework {
    /// All frameworks in detection priority order.
    pub const ALL: [Framework; 7] = [
        Self::Pytest,
        Self::Vitest,
        Self::Jest,
        Self::Mocha,
        Self::Npm,
        Self::Go,
        Self::Cargo,
    ];

    /// Stable identifier used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pytest => "pytest",
            Self::Vitest => "vitest",
            Self::Jest => "jest",
            Self::Mocha => "mocha",
            Self::Npm => "npm",
            Self::Go => "go",
            Self::Cargo => "cargo",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pytest => "pytest",
            Self::Vitest => "vitest",
            Self::Jest => "jest",
            Self::Mocha => "mocha",
            Self::Npm => "npm test",
            Self::Go => "go test",
            Self::Cargo => "cargo test",
        }
    }

    pub fn base_command(&self) -> &'static [&'static str] {
        match self {
            Self::Pytest => &["pytest", "--tb=short", "-q"],
            Self::Vitest => &["npx", "vitest"],
            Self::Jest => &["npx", "jest"],
            Self::Mocha => &["npx", "mocha"],
            Self::Npm => &["npm", "test"],
            Self::Go => &["go", "test", "-count=1"],
            Self::Cargo => &["cargo", "test"],
        }
    }

    pub fn strategy(&self) -> SelectionStrategy {
        match self {
            Self::Pytest => SelectionStrategy::PathMirror,
            Self::Vitest | Self::Jest => SelectionStrategy::NativeRelated,
            Self::Go => SelectionStrategy::PackageDirectory,
            Self::Mocha | Self::Npm | Self::Cargo => SelectionStrategy::WholeSuiteOnly,
        }
    }

    /// Arguments appended to the base command to run the whole suite.
    fn run_all_args(&self) -> &'static [&'static str] {
        match self {
            Self::Vitest => &["run"],
            Self::Go => &["./..."],
            _ => &[],
        }
    }

    /// Arguments placed between the base command and explicit targets.
    fn explicit_args(&self) -> &'static [&'static str] {
        match self {
            Self::Vitest => &["related", "--run"],
            Self::Jest => &["--findRelatedTests"],
            _ => &[],
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The framework governing a project, with its invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkDescriptor {
    pub framework: Framework,
    pub base_command: Vec<String>,
    pub strategy: SelectionStrategy,
}

impl FrameworkDescriptor {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            base_command: framework
                .base_command()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strategy: framework.strategy(),
        }
    }

    /// Replace the base command, e.g. `python -m pytest` instead of `pytest`.
    ///
    /// Selection-specific arguments are still appended after it.
    pub fn with_base_command(mut self, base_command: Vec<String>) -> Self {
        if !base_command.is_empty() {
            self.base_command = base_command;
        }
        self
    }

    /// Build the full command line for a selection.
    ///
    /// Returns `None` for `Skip` and for an empty explicit target list, so an
    /// empty selection can never turn into a whole-suite run.
    pub fn command_for(&self, selection: &TestSelection) -> Option<Vec<String>> {
        let mut command = self.base_command.clone();
        match selection {
            TestSelection::Skip => return None,
            TestSelection::RunAll => {
                command.extend(self.framework.run_all_args().iter().map(|s| s.to_string()));
            }
            TestSelection::Explicit(targets) => {
                if targets.is_empty() {
                    return None;
                }
                if self.strategy == SelectionStrategy::WholeSuiteOnly {
                    command.extend(self.framework.run_all_args().iter().map(|s| s.to_string()));
                } else {
                    command.extend(self.framework.explicit_args().iter().map(|s| s.to_string()));
                    command.extend(targets.iter().cloned());
                }
            }
        }
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(targets: &[&str]) -> TestSelection {
        TestSelection::Explicit(targets.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_strategy_per_framework() {
        assert_eq!(Framework::Pytest.strategy(), SelectionStrategy::PathMirror);
        assert_eq!(Framework::Vitest.strategy(), SelectionStrategy::NativeRelated);
        assert_eq!(Framework::Jest.strategy(), SelectionStrategy::NativeRelated);
        assert_eq!(Framework::Go.strategy(), SelectionStrategy::PackageDirectory);
        assert_eq!(Framework::Cargo.strategy(), SelectionStrategy::WholeSuiteOnly);
        assert_eq!(Framework::Mocha.strategy(), SelectionStrategy::WholeSuiteOnly);
        assert_eq!(Framework::Npm.strategy(), SelectionStrategy::WholeSuiteOnly);
    }

    #[test]
    fn test_pytest_commands() {
        let d = FrameworkDescriptor::new(Framework::Pytest);
        assert_eq!(
            d.command_for(&TestSelection::RunAll).unwrap(),
            vec!["pytest", "--tb=short", "-q"]
        );
        assert_eq!(
            d.command_for(&explicit(&["tests/test_a.py"])).unwrap(),
            vec!["pytest", "--tb=short", "-q", "tests/test_a.py"]
        );
    }

    #[test]
    fn test_native_related_commands() {
        let vitest = FrameworkDescriptor::new(Framework::Vitest);
        assert_eq!(
            vitest.command_for(&explicit(&["src/a.ts"])).unwrap(),
            vec!["npx", "vitest", "related", "--run", "src/a.ts"]
        );
        assert_eq!(
            vitest.command_for(&TestSelection::RunAll).unwrap(),
            vec!["npx", "vitest", "run"]
        );

        let jest = FrameworkDescriptor::new(Framework::Jest);
        assert_eq!(
            jest.command_for(&explicit(&["src/a.ts", "src/b.ts"])).unwrap(),
            vec!["npx", "jest", "--findRelatedTests", "src/a.ts", "src/b.ts"]
        );
    }

    #[test]
    fn test_go_commands() {
        let d = FrameworkDescriptor::new(Framework::Go);
        assert_eq!(
            d.command_for(&explicit(&["./pkg/db"])).unwrap(),
            vec!["go", "test", "-count=1", "./pkg/db"]
        );
        assert_eq!(
            d.command_for(&TestSelection::RunAll).unwrap(),
            vec!["go", "test", "-count=1", "./..."]
        );
    }

    #[test]
    fn test_skip_and_empty_explicit_yield_no_command() {
        for framework in Framework::ALL {
            let d = FrameworkDescriptor::new(framework);
            assert!(d.command_for(&TestSelection::Skip).is_none());
            assert!(d.command_for(&TestSelection::Explicit(Vec::new())).is_none());
        }
    }

    #[test]
    fn test_whole_suite_ignores_explicit_targets() {
        let d = FrameworkDescriptor::new(Framework::Cargo);
        assert_eq!(
            d.command_for(&explicit(&["src/lib.rs"])).unwrap(),
            vec!["cargo", "test"]
        );
    }

    #[test]
    fn test_base_command_override() {
        let d = FrameworkDescriptor::new(Framework::Pytest)
            .with_base_command(vec!["uv".into(), "run".into(), "pytest".into()]);
        assert_eq!(
            d.command_for(&explicit(&["tests/test_a.py"])).unwrap(),
            vec!["uv", "run", "pytest", "tests/test_a.py"]
        );

        let unchanged = FrameworkDescriptor::new(Framework::Go).with_base_command(Vec::new());
        assert_eq!(unchanged.base_command, vec!["go", "test", "-count=1"]);
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: std::collections::HashSet<_> = Framework::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys.len(), Framework::ALL.len());
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Framework::Npm.to_string(), "npm test");
        assert_eq!(Framework::Pytest.to_string(), "pytest");
    }
}
