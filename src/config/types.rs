//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for cc-testscope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timeout bounds for the test subprocess.
    pub timeouts: TimeoutConfig,
    /// Advisory report limits.
    pub report: ReportConfig,
    /// Location of the session-scoped edited-file log.
    pub edit_log: EditLogConfig,
    /// Test selection tuning.
    pub selection: SelectionConfig,
    /// Base command overrides keyed by framework (`pytest`, `jest`, `go`, ...).
    pub runners: HashMap<String, Vec<String>>,
}

impl Config {
    /// Reject values the loader accepts syntactically but that cannot work.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeouts.affected_secs == 0 {
            return Err("timeouts.affected_secs must be at least 1".to_string());
        }
        if self.timeouts.full_secs == 0 {
            return Err("timeouts.full_secs must be at least 1".to_string());
        }
        Ok(())
    }

    /// Configured base command for a framework key, if any.
    pub fn runner_override(&self, key: &str) -> Option<&[String]> {
        self.runners
            .get(key)
            .map(Vec::as_slice)
            .filter(|command| !command.is_empty())
    }
}

/// Timeout bounds, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Bound for the selective (affected tests) run.
    pub affected_secs: u64,
    /// Bound for the unconditional full-suite run.
    pub full_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            affected_secs: 15,
            full_secs: 60,
        }
    }
}

impl TimeoutConfig {
    pub fn affected(&self) -> Duration {
        Duration::from_secs(self.affected_secs)
    }

    pub fn full(&self) -> Duration {
        Duration::from_secs(self.full_secs)
    }
}

/// Advisory report limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of trailing output lines kept on failure.
    pub tail_lines: usize,
    /// Overall character budget for the rendered report.
    pub max_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tail_lines: 30,
            max_chars: 2000,
        }
    }
}

/// Edited-file log location.
///
/// The log for a session lives at `<directory>/<prefix><session_id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditLogConfig {
    /// Directory holding the logs. `None` means the system temp directory.
    pub directory: Option<PathBuf>,
    /// File name prefix, followed by the session id.
    pub prefix: String,
}

impl Default for EditLogConfig {
    fn default() -> Self {
        Self {
            directory: None,
            prefix: "claude-edited-files-".to_string(),
        }
    }
}

impl EditLogConfig {
    /// Directory the logs are read from.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Test selection tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Leading path segments stripped before mirroring a source file into `tests/`.
    pub source_roots: Vec<String>,
    /// Extensions that never trigger a test run.
    pub non_code_extensions: HashSet<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        let non_code_extensions = ["md", "json", "yaml", "yml", "toml", "txt", "css"]
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            source_roots: vec!["src".to_string()],
            non_code_extensions,
        }
    }
}

impl SelectionConfig {
    /// Check whether a path is documentation, data or styling rather than code.
    pub fn is_non_code(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.non_code_extensions.contains(&ext.to_lowercase()))
    }
}
