pub mod advisory;

pub use advisory::AdvisoryReporter;

use crate::exec::ExecutionOutcome;

/// Turns a test outcome into text for the hook response.
///
/// `None` means there is nothing worth telling the caller.
pub trait Reporter {
    fn report(&self, outcome: &ExecutionOutcome) -> Option<String>;
}
