//! Claude Code Stop hook integration.
//!
//! Reads the hook event from stdin, runs the tests affected by the session's
//! edits, and writes an advisory `additionalContext` record to stdout. The
//! hook never blocks: every failure degrades to no output and exit code 0.
//!
//! # Usage
//!
//! Add to Claude Code settings.json:
//!
//! ```json
//! {
//!   "hooks": {
//!     "Stop": [
//!       { "hooks": [{ "type": "command", "command": "cc-testscope" }] }
//!     ]
//!   }
//! }
//! ```

pub mod types;

pub use types::{HookInput, HookOutput};

use crate::config::Config;
use crate::error::{Result, TestScopeError};
use crate::exec::RunScope;
use crate::input::SessionLogSource;
use crate::runtime::{Pipeline, RunContext};
use std::io::{self, Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, warn};

/// Command-line controls for a hook invocation.
#[derive(Debug, Clone, Default)]
pub struct HookOptions {
    pub scope: RunScope,
    /// Overrides the configured timeout for `scope`.
    pub timeout: Option<Duration>,
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

/// Run the hook mode, reading from stdin and writing to stdout.
///
/// Always returns success, whatever happened along the way.
pub fn run_hook_mode(options: &HookOptions) -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_io(stdin.lock(), stdout.lock(), options);
    ExitCode::SUCCESS
}

/// The hook boundary over arbitrary streams. Errors and panics are logged
/// and swallowed here and nowhere else.
pub fn run_with_io<R: Read, W: Write>(reader: R, writer: W, options: &HookOptions) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| process(reader, writer, options)));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Hook finished without a report"),
        Err(_) => warn!("Hook panicked; no report emitted"),
    }
}

fn process<R: Read, W: Write>(mut reader: R, mut writer: W, options: &HookOptions) -> Result<()> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(TestScopeError::ReadInput)?;

    let Some(output) = respond(&input, options)? else {
        return Ok(());
    };

    let json = serde_json::to_string(&output)?;
    writeln!(writer, "{json}").map_err(TestScopeError::Output)?;
    writer.flush().map_err(TestScopeError::Output)
}

/// Compute the hook's reply to a raw stdin payload.
///
/// `None` means the hook stays silent.
pub fn respond(input: &str, options: &HookOptions) -> Result<Option<HookOutput>> {
    if input.trim().is_empty() {
        debug!("Empty hook input");
        return Ok(None);
    }

    let event: HookInput = serde_json::from_str(input)?;
    debug!(
        event = event.hook_event_name.as_deref().unwrap_or("Stop"),
        session_id = %event.session_id,
        "Received hook event"
    );
    if event.should_skip() {
        debug!(
            stop_hook_active = event.stop_hook_active,
            "Skipping: stop hook already active or no session"
        );
        return Ok(None);
    }

    let Some(working_dir) = resolve_working_dir(event.cwd.as_deref()) else {
        debug!("No usable working directory");
        return Ok(None);
    };

    let config = Config::load(options.config_path.as_deref(), &working_dir)?;
    let source = SessionLogSource::from_config(&config.edit_log, &working_dir);
    let context = RunContext::new(working_dir, config)
        .with_scope(options.scope)
        .with_timeout(options.timeout);

    let report = Pipeline::new(&context, &source)
        .run(&event.session_id)?
        .into_report();
    Ok(report.map(HookOutput::new))
}

fn resolve_working_dir(cwd: Option<&str>) -> Option<PathBuf> {
    if let Some(cwd) = cwd
        && Path::new(cwd).is_dir()
    {
        return Some(PathBuf::from(cwd));
    }
    std::env::current_dir().ok()
}
