//! Input layer: where the list of edited files comes from.

pub mod source;

pub use source::{EditedFileSource, InMemorySource, SessionLogSource};
