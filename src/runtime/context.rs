//! Per-invocation run context.

use crate::config::Config;
use crate::exec::RunScope;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a single pipeline run needs to know about its environment.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Project root the tests run in.
    pub working_dir: PathBuf,
    pub config: Config,
    pub scope: RunScope,
    /// Overrides the configured bound for `scope`.
    pub timeout_override: Option<Duration>,
}

impl RunContext {
    pub fn new(working_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            working_dir: working_dir.into(),
            config,
            scope: RunScope::Affected,
            timeout_override: None,
        }
    }

    pub fn with_scope(mut self, scope: RunScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_override = timeout;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The bound applied to the test subprocess.
    pub fn timeout(&self) -> Duration {
        self.timeout_override.unwrap_or_else(|| match self.scope {
            RunScope::Affected => self.config.timeouts.affected(),
            RunScope::Full => self.config.timeouts.full(),
        })
    }
}
