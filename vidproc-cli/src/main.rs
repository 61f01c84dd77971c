// vidproc-cli/src/main.rs
//
// Entry point for the `vidproc` binary: parses arguments, sets up logging,
// dispatches to the command and turns failures into an exit code.

use clap::Parser;
use console::style;
use std::io;
use std::process;
use vidproc_cli::{Cli, exit_code, logging, run};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(cli, &mut out) {
        log::debug!("Command failed: {:?}", e);
        eprintln!("{} {}", style("Error:").for_stderr().red().bold(), e);
        process::exit(exit_code(&e));
    }
}
