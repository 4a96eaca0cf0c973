//! Runtime execution control.
//!
//! This module provides the per-invocation plumbing:
//! - Run context (working directory, config, scope, timeout)
//! - Pipeline orchestration from edited files to an advisory report

pub mod context;
pub mod pipeline;

pub use context::RunContext;
pub use pipeline::{Pipeline, PipelineOutcome, PipelineStage};
