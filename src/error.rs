use crate::config::ConfigError;
use crate::exec::ExecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestScopeError {
    #[error("Failed to read hook input: {0}")]
    ReadInput(#[source] std::io::Error),

    #[error("Failed to parse hook input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("Failed to read edited-file log: {path}")]
    ReadLog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Test execution error: {0}")]
    Exec(#[from] ExecError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write hook output: {0}")]
    Output(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TestScopeError>;
