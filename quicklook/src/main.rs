//! `QuickLook` - asset maintenance for the design quick-look portfolio

use clap::Parser;

use quicklook::cli::args::Cli;
use quicklook::cli::commands;
use quicklook::error::ExitCode;
use quicklook::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format.into(), cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
