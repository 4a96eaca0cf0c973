//! Configuration for cc-testscope.
//!
//! ## Layers
//! - `types`: Configuration type definitions
//! - `loading`: File discovery and parsing (YAML, JSON, TOML)

mod error;
mod loading;
mod types;

pub use error::{ConfigError, ConfigOrigin, FormatError};
pub use types::{Config, EditLogConfig, ReportConfig, SelectionConfig, TimeoutConfig};
