//! Edited-file sources.
//!
//! An upstream writer appends one path per line to a session-keyed log while
//! Claude edits files. This module only reads that log; clearing it is the
//! writer's job.

use crate::config::EditLogConfig;
use crate::error::{Result, TestScopeError};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the files touched during a session.
pub trait EditedFileSource {
    /// Return the edited files for `session_id`: existing paths only,
    /// deduplicated, in first-edit order.
    fn read(&self, session_id: &str) -> Result<Vec<PathBuf>>;
}

/// Reads `<directory>/<prefix><session_id>` from disk.
#[derive(Debug, Clone)]
pub struct SessionLogSource {
    directory: PathBuf,
    prefix: String,
    base_dir: PathBuf,
}

impl SessionLogSource {
    /// Create a source. Relative entries in the log are resolved against `base_dir`.
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>, base_dir: &Path) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Create a source from the `edit_log` config section.
    ///
    /// A relative log directory is taken relative to `base_dir`.
    pub fn from_config(config: &EditLogConfig, base_dir: &Path) -> Self {
        let directory = config.resolved_directory();
        let directory = if directory.is_relative() {
            base_dir.join(directory)
        } else {
            directory
        };
        Self::new(directory, config.prefix.clone(), base_dir)
    }

    /// Path of the log for a session, or `None` if the id could escape the log directory.
    pub fn log_path(&self, session_id: &str) -> Option<PathBuf> {
        if !is_safe_session_id(session_id) {
            return None;
        }
        Some(self.directory.join(format!("{}{}", self.prefix, session_id)))
    }
}

impl EditedFileSource for SessionLogSource {
    fn read(&self, session_id: &str) -> Result<Vec<PathBuf>> {
        let Some(path) = self.log_path(session_id) else {
            debug!(session_id, "Rejected unsafe session id");
            return Ok(Vec::new());
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No edited-file log for session");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(TestScopeError::ReadLog {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        Ok(collect_existing(content.lines(), &self.base_dir))
    }
}

/// In-memory source, keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    sessions: Vec<(String, Vec<PathBuf>)>,
    base_dir: PathBuf,
}

impl InMemorySource {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            sessions: Vec::new(),
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Record `paths` as edited during `session_id`.
    pub fn with_session<P: Into<PathBuf>>(
        mut self,
        session_id: &str,
        paths: impl IntoIterator<Item = P>,
    ) -> Self {
        self.sessions.push((
            session_id.to_string(),
            paths.into_iter().map(Into::into).collect(),
        ));
        self
    }
}

impl EditedFileSource for InMemorySource {
    fn read(&self, session_id: &str) -> Result<Vec<PathBuf>> {
        let lines = self
            .sessions
            .iter()
            .filter(|(id, _)| id == session_id)
            .flat_map(|(_, paths)| paths.iter())
            .filter_map(|p| p.to_str());
        Ok(collect_existing(lines, &self.base_dir))
    }
}

/// Session ids come from Claude Code as UUIDs; anything that could form a
/// path component other than a plain file name is refused.
fn is_safe_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && !session_id.contains('/')
        && !session_id.contains('\\')
        && !session_id.contains("..")
        && !session_id.contains('\0')
}

/// Trim, resolve, existence-filter and deduplicate log lines, keeping first occurrence.
fn collect_existing<'a>(lines: impl IntoIterator<Item = &'a str>, base_dir: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let path = Path::new(line);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };

        if !path.exists() {
            debug!(path = %path.display(), "Dropping edited file that no longer exists");
            continue;
        }

        if seen.insert(path.clone()) {
            files.push(path);
        }
    }

    files
}
