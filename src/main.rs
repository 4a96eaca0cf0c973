use cc_testscope::{Cli, logging, run_hook_mode};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version still print; bad flags must not fail the hook
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    logging::init(cli.verbose);
    run_hook_mode(&cli.hook_options())
}
