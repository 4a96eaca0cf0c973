use crate::config::ReportConfig;
use crate::exec::ExecutionOutcome;
use crate::reporter::Reporter;
use std::time::Duration;

const EMPTY_OUTPUT_PLACEHOLDER: &str = "(no test output captured)";
const CHAR_BUDGET_MARKER: &str = "... (output truncated to fit report size)";

/// Renders test outcomes as short advisory text for Claude.
pub struct AdvisoryReporter {
    tail_lines: usize,
    max_chars: usize,
}

impl AdvisoryReporter {
    pub fn new(tail_lines: usize, max_chars: usize) -> Self {
        Self {
            tail_lines,
            max_chars,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.tail_lines, config.max_chars)
    }

    fn render_failure(&self, header: &str, output: &str) -> String {
        let body = self.tail(output);
        let full = format!("{header}\n{body}");
        if full.chars().count() <= self.max_chars {
            return full;
        }

        let prefix = format!("{header}\n{CHAR_BUDGET_MARKER}\n");
        let room = self.max_chars.saturating_sub(prefix.chars().count());
        if room == 0 {
            // Budget smaller than header and marker: the header alone, clipped.
            return self.clip(header);
        }

        let skip = body.chars().count().saturating_sub(room);
        let cut = body
            .char_indices()
            .nth(skip)
            .map_or(body.len(), |(i, _)| i);
        format!("{prefix}{}", &body[cut..])
    }

    /// Clip single-line text to the character budget.
    fn clip(&self, text: &str) -> String {
        text.chars().take(self.max_chars).collect()
    }

    /// Keep the last `tail_lines` lines, with a marker for what was dropped.
    fn tail(&self, output: &str) -> String {
        let output = output.trim_end();
        if output.trim().is_empty() {
            return EMPTY_OUTPUT_PLACEHOLDER.to_string();
        }

        let lines: Vec<&str> = output.lines().collect();
        if lines.len() <= self.tail_lines {
            return lines.join("\n");
        }

        let dropped = lines.len() - self.tail_lines;
        let mut text = format!("... ({dropped} earlier lines truncated)\n");
        text.push_str(&lines[dropped..].join("\n"));
        text
    }
}

impl Default for AdvisoryReporter {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

impl Reporter for AdvisoryReporter {
    fn report(&self, outcome: &ExecutionOutcome) -> Option<String> {
        let subject = format!("{}: {}", outcome.framework, outcome.scope.label());

        if outcome.timed_out {
            return Some(self.clip(&format!(
                "{subject} timed out after {}; results unknown.",
                format_bound(outcome.timeout)
            )));
        }

        if outcome.passed() {
            return Some(self.clip(&format!("{subject} passed.")));
        }

        let header = match outcome.exit_status {
            Some(code) => format!("{subject} FAILED (exit code {code}):"),
            None => format!("{subject} FAILED (terminated by signal):"),
        };
        Some(self.render_failure(&header, &outcome.output))
    }
}

fn format_bound(bound: Duration) -> String {
    if bound.subsec_millis() == 0 {
        format!("{}s", bound.as_secs())
    } else {
        format!("{}ms", bound.as_millis())
    }
}
