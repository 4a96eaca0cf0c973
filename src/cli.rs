use crate::exec::RunScope;
use crate::hook_mode::HookOptions;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "cc-testscope",
    version,
    about = "Runs the tests affected by a Claude Code session's edits",
    long_about = "cc-testscope is a Claude Code Stop hook. It reads the hook event from stdin, \
selects the tests covering the files edited in the session, runs them under a timeout, \
and reports the result as additionalContext. It never blocks: the exit code is always 0."
)]
pub struct Cli {
    /// Run the whole test suite regardless of which files were edited
    #[arg(long)]
    pub full: bool,

    /// Timeout for the test run, in seconds (default: 15, or 60 with --full)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Path to a configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn scope(&self) -> RunScope {
        if self.full {
            RunScope::Full
        } else {
            RunScope::Affected
        }
    }

    pub fn hook_options(&self) -> HookOptions {
        HookOptions {
            scope: self.scope(),
            timeout: self.timeout.map(Duration::from_secs),
            config_path: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["cc-testscope"]).unwrap();
        assert!(!cli.full);
        assert!(cli.timeout.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.scope(), RunScope::Affected);
    }

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from(["cc-testscope", "--full"]).unwrap();
        assert_eq!(cli.scope(), RunScope::Full);
    }

    #[test]
    fn test_parse_timeout() {
        let cli = Cli::try_parse_from(["cc-testscope", "--timeout", "45"]).unwrap();
        assert_eq!(cli.hook_options().timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_parse_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["cc-testscope", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(["cc-testscope", "-c", "/tmp/ts.yaml"]).unwrap();
        assert_eq!(
            cli.hook_options().config_path,
            Some(PathBuf::from("/tmp/ts.yaml"))
        );
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::try_parse_from([
            "cc-testscope",
            "--full",
            "--timeout",
            "120",
            "--config",
            "ts.toml",
            "--verbose",
        ])
        .unwrap();
        let options = cli.hook_options();
        assert_eq!(options.scope, RunScope::Full);
        assert_eq!(options.timeout, Some(Duration::from_secs(120)));
        assert_eq!(options.config_path, Some(PathBuf::from("ts.toml")));
        assert!(cli.verbose);
    }
}
