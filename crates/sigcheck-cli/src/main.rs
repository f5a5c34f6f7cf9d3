use std::process::ExitCode;

use sigcheck_core::logging;

mod cli;

use crate::cli::Cli;

fn main() -> ExitCode {
    // Initialize logging as early as possible; fall back to stderr if the log file is unavailable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and run the check. Exit 1 on any mismatch or fatal error.
    match Cli::run_from_args() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("sigcheck error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
