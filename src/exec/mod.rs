//! Test execution.
//!
//! Runs one test command as a child process under a timeout. Stdout and
//! stderr are captured and joined into a single text. There are no retries.

use crate::discovery::Framework;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Errors that prevent a test run from producing an outcome.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Refusing to run an empty command")]
    EmptyCommand,

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed waiting for test process: {0}")]
    Wait(#[source] std::io::Error),
}

impl ExecError {
    /// Whether the runner binary is missing or could not be started.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, Self::Launch { .. })
    }
}

/// Which suite a run covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunScope {
    /// Tests selected from the session's edits.
    #[default]
    Affected,
    /// The whole suite, regardless of edits.
    Full,
}

impl RunScope {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Affected => "affected tests",
            Self::Full => "full test suite",
        }
    }
}

/// Result of a finished (or abandoned) test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub framework: Framework,
    pub scope: RunScope,
    /// `None` when the run timed out or the process was killed by a signal.
    pub exit_status: Option<i32>,
    /// Stdout followed by stderr. Empty after a timeout.
    pub output: String,
    pub timed_out: bool,
    /// The bound the run was held to.
    pub timeout: Duration,
}

impl ExecutionOutcome {
    pub fn passed(&self) -> bool {
        self.exit_status == Some(0)
    }
}

/// Runs test commands for one framework.
#[derive(Debug, Clone)]
pub struct TestRunner {
    framework: Framework,
    scope: RunScope,
    timeout: Duration,
}

impl TestRunner {
    pub fn new(framework: Framework, scope: RunScope, timeout: Duration) -> Self {
        Self {
            framework,
            scope,
            timeout,
        }
    }

    /// Run `command` in `working_dir`, blocking until it exits or times out.
    pub fn run(&self, command: &[String], working_dir: &Path) -> Result<ExecutionOutcome, ExecError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ExecError::Runtime)?;

        runtime.block_on(self.run_async(command, working_dir))
    }

    async fn run_async(
        &self,
        command: &[String],
        working_dir: &Path,
    ) -> Result<ExecutionOutcome, ExecError> {
        let (program, args) = command.split_first().ok_or(ExecError::EmptyCommand)?;

        info!(command = %command.join(" "), timeout_secs = self.timeout.as_secs(), "Running tests");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own group, so a timeout can take down the runner's children too
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd.spawn().map_err(|e| ExecError::Launch {
            program: program.clone(),
            source: e,
        })?;
        let pid = child.id();

        let mut stdout = child.stdout.take();
        let mut stderr = child.stderr.take();

        let collect = async {
            let mut out = Vec::new();
            let mut err = Vec::new();
            let read_out = async {
                if let Some(pipe) = stdout.as_mut() {
                    pipe.read_to_end(&mut out).await?;
                }
                Ok::<_, std::io::Error>(())
            };
            let read_err = async {
                if let Some(pipe) = stderr.as_mut() {
                    pipe.read_to_end(&mut err).await?;
                }
                Ok::<_, std::io::Error>(())
            };
            let (out_res, err_res) = tokio::join!(read_out, read_err);
            out_res?;
            err_res?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, combine_output(&out, &err)))
        };

        match tokio::time::timeout(self.timeout, collect).await {
            Ok(result) => {
                let (status, output) = result.map_err(ExecError::Wait)?;
                debug!(status = ?status.code(), bytes = output.len(), "Test process exited");
                Ok(ExecutionOutcome {
                    framework: self.framework,
                    scope: self.scope,
                    exit_status: status.code(),
                    output,
                    timed_out: false,
                    timeout: self.timeout,
                })
            }
            Err(_) => {
                info!(timeout_secs = self.timeout.as_secs(), "Test run timed out");
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                Ok(ExecutionOutcome {
                    framework: self.framework,
                    scope: self.scope,
                    exit_status: None,
                    output: String::new(),
                    timed_out: true,
                    timeout: self.timeout,
                })
            }
        }
    }
}

/// Kill the process group led by `pid`.
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = i32::try_from(pid) else {
        return;
    };
    debug!(pgid, "Killing test process group");
    unsafe {
        let _ = libc::kill(-pgid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    let stderr = String::from_utf8_lossy(stderr);
    if !stderr.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&stderr);
    }
    combined
}
