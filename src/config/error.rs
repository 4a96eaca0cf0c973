//! Configuration error types.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where in the search order a config file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Passed with `--config`.
    Explicit,
    /// `.cc-testscope.*` in the working directory.
    Project,
    /// `<config_dir>/cc-testscope/config.yaml`.
    Global,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit",
            Self::Project => "project",
            Self::Global => "global",
        })
    }
}

/// Parser failure for one of the supported formats.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// A config file that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {origin} config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        origin: ConfigOrigin,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {origin} config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        origin: ConfigOrigin,
        #[source]
        source: FormatError,
    },

    #[error("Unsupported {origin} config {}: expected .yaml, .yml, .json or .toml", path.display())]
    UnsupportedFormat { path: PathBuf, origin: ConfigOrigin },

    #[error("Rejected {origin} config {}: {reason}", path.display())]
    Invalid {
        path: PathBuf,
        origin: ConfigOrigin,
        reason: String,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::Invalid { path, .. } => path,
        }
    }

    pub fn origin(&self) -> ConfigOrigin {
        match self {
            Self::Read { origin, .. }
            | Self::Parse { origin, .. }
            | Self::UnsupportedFormat { origin, .. }
            | Self::Invalid { origin, .. } => *origin,
        }
    }
}
