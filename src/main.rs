//! platepipe - render documents through chains of templates
//!
//! See the [`platepipe::cli`] module for the command line and exit codes.

use platepipe::cli::{self, Parsed};
use std::process::ExitCode;

fn main() -> ExitCode {
    let progname = cli::program_name();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = match cli::parse(std::env::args_os()) {
        Parsed::Run(cli) => cli,
        Parsed::Info(info) => {
            let _ = info.print();
            return ExitCode::SUCCESS;
        }
        Parsed::Invalid(e) => {
            e.display(&progname, false);
            return ExitCode::from(e.exit_code());
        }
    };

    cli.init_logging();
    let verbose = cli.verbose();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            e.display(&progname, verbose);
            ExitCode::from(e.exit_code())
        }
    }
}
