//! Pipeline orchestration.
//!
//! Stages run in a fixed order and any of them may stop the run. A stopped
//! run produces no report at all.

use super::context::RunContext;
use crate::discovery::{self, FrameworkDescriptor};
use crate::error::Result;
use crate::exec::{RunScope, TestRunner};
use crate::input::EditedFileSource;
use crate::reporter::{AdvisoryReporter, Reporter};
use crate::selection::{TestSelection, TestSelector};
use tracing::debug;

/// A stage in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Reading the session's edited files.
    Input,
    /// Detecting the test framework.
    Detection,
    /// Mapping edits to tests.
    Selection,
    /// Running the tests.
    Execution,
    /// Rendering the advisory.
    Report,
}

impl PipelineStage {
    /// Get the stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Detection => "detection",
            Self::Selection => "selection",
            Self::Execution => "execution",
            Self::Report => "report",
        }
    }
}

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Tests ran and there is something to say.
    Report(String),
    /// The run stopped quietly at this stage.
    Stopped(PipelineStage),
}

impl PipelineOutcome {
    pub fn into_report(self) -> Option<String> {
        match self {
            Self::Report(text) => Some(text),
            Self::Stopped(_) => None,
        }
    }
}

/// One run of detect → select → execute → report.
pub struct Pipeline<'a, S: EditedFileSource> {
    context: &'a RunContext,
    source: &'a S,
}

impl<'a, S: EditedFileSource> Pipeline<'a, S> {
    pub fn new(context: &'a RunContext, source: &'a S) -> Self {
        Self { context, source }
    }

    pub fn run(&self, session_id: &str) -> Result<PipelineOutcome> {
        let working_dir = self.context.working_dir();

        let edited = self.source.read(session_id)?;
        if edited.is_empty() && self.context.scope == RunScope::Affected {
            return Ok(stop(PipelineStage::Input));
        }
        debug!(count = edited.len(), "Edited files in session");

        let Some(descriptor) = discovery::detect(working_dir) else {
            return Ok(stop(PipelineStage::Detection));
        };
        let descriptor = self.apply_runner_override(descriptor);

        let selection = match self.context.scope {
            RunScope::Full => TestSelection::RunAll,
            RunScope::Affected => TestSelector::new(&self.context.config.selection).select(
                &descriptor,
                &edited,
                working_dir,
            ),
        };
        let Some(command) = descriptor.command_for(&selection) else {
            return Ok(stop(PipelineStage::Selection));
        };

        let runner = TestRunner::new(
            descriptor.framework,
            self.context.scope,
            self.context.timeout(),
        );
        let outcome = match runner.run(&command, working_dir) {
            Ok(outcome) => outcome,
            Err(e) if e.is_launch_failure() => {
                debug!(error = %e, "Test runner unavailable");
                return Ok(stop(PipelineStage::Execution));
            }
            Err(e) => return Err(e.into()),
        };

        let reporter = AdvisoryReporter::from_config(&self.context.config.report);
        Ok(match reporter.report(&outcome) {
            Some(text) => PipelineOutcome::Report(text),
            None => stop(PipelineStage::Report),
        })
    }

    fn apply_runner_override(&self, descriptor: FrameworkDescriptor) -> FrameworkDescriptor {
        match self.context.config.runner_override(descriptor.framework.key()) {
            Some(command) => descriptor.with_base_command(command.to_vec()),
            None => descriptor,
        }
    }
}

fn stop(stage: PipelineStage) -> PipelineOutcome {
    debug!(stage = stage.name(), "Pipeline stopped without a report");
    PipelineOutcome::Stopped(stage)
}
