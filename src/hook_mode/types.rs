//! Type definitions for the Stop hook exchange.
//!
//! Claude Code sends a JSON record on stdin; the reply, when there is one, is
//! a single JSON record on stdout.

use serde::{Deserialize, Serialize};

/// Hook event received from Claude Code via stdin.
///
/// Unknown fields are ignored so newer hook payloads keep parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// Session identifier, used to locate the edited-file log
    #[serde(default)]
    pub session_id: String,

    /// Whether a Stop hook is already active for this turn
    #[serde(default)]
    pub stop_hook_active: bool,

    /// Current working directory of the session
    #[serde(default)]
    pub cwd: Option<String>,

    /// Event name, e.g. `Stop` or `SubagentStop`
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

impl HookInput {
    /// True when the hook protocol asks this invocation to do nothing.
    pub fn should_skip(&self) -> bool {
        self.stop_hook_active || self.session_id.is_empty()
    }
}

/// Response sent back to Claude Code via stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub additional_context: String,
}

impl HookOutput {
    pub fn new(additional_context: impl Into<String>) -> Self {
        Self {
            additional_context: additional_context.into(),
        }
    }
}
