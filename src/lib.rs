pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exec;
pub mod hook_mode;
pub mod input;
pub mod logging;
pub mod reporter;
pub mod runtime;
pub mod selection;

#[cfg(test)]
pub mod test_utils;

pub use cli::Cli;
pub use config::{Config, ConfigError, ConfigOrigin};
pub use discovery::{Framework, FrameworkDescriptor, SelectionStrategy, detect};
pub use error::{Result, TestScopeError};
pub use exec::{ExecError, ExecutionOutcome, RunScope, TestRunner};
pub use hook_mode::{HookInput, HookOptions, HookOutput, run_hook_mode};
pub use input::{EditedFileSource, InMemorySource, SessionLogSource};
pub use reporter::{AdvisoryReporter, Reporter};
pub use runtime::{Pipeline, PipelineOutcome, PipelineStage, RunContext};
pub use selection::{TestSelection, TestSelector};
