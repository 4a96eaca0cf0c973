//! Configuration loading functions.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::error::{ConfigError, ConfigOrigin, FormatError};
use super::types::Config;

const PROJECT_CONFIG_FILES: &[&str] = &[
    ".cc-testscope.yaml",
    ".cc-testscope.yml",
    ".cc-testscope.json",
    ".cc-testscope.toml",
];

impl Config {
    /// Load an explicitly named configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::read(path, ConfigOrigin::Explicit)
    }

    fn read(path: &Path, origin: ConfigOrigin) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            origin,
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let parsed: Result<Config, FormatError> = match ext.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(Into::into),
            Some("json") => serde_json::from_str(&content).map_err(Into::into),
            Some("toml") => toml::from_str(&content).map_err(Into::into),
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    origin,
                });
            }
        };

        let config = parsed.map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            origin,
            source,
        })?;

        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            origin,
            reason,
        })?;
        Ok(config)
    }

    /// Load configuration for a project.
    ///
    /// Search order:
    /// 1. `explicit` path, when given
    /// 2. `.cc-testscope.{yaml,yml,json,toml}` in the project root
    /// 3. `<config_dir>/cc-testscope/config.yaml`
    /// 4. Default configuration
    ///
    /// Only an explicit file is allowed to fail the load. Broken project and
    /// global files are logged and skipped.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for filename in PROJECT_CONFIG_FILES {
            let path = project_root.join(filename);
            if !path.exists() {
                continue;
            }
            match Self::read(&path, ConfigOrigin::Project) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded project config");
                    return Ok(config);
                }
                Err(e) => warn!(
                    origin = %e.origin(),
                    path = %e.path().display(),
                    error = %e,
                    "Skipping config file"
                ),
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let global_config = config_dir.join("cc-testscope").join("config.yaml");
            if global_config.exists() {
                match Self::read(&global_config, ConfigOrigin::Global) {
                    Ok(config) => {
                        debug!(path = %global_config.display(), "Loaded global config");
                        return Ok(config);
                    }
                    Err(e) => warn!(
                        origin = %e.origin(),
                        path = %e.path().display(),
                        error = %e,
                        "Skipping config file"
                    ),
                }
            }
        }

        Ok(Self::default())
    }
}
