mod cli;
mod execute;

use clap::Parser;
use colored::Colorize;
use packit::error::PackitError;
use crate::cli::CLI;

fn main() {
    let cli = CLI::parse();
    if let Err(err) = execute::execute(cli) {
        eprintln!("{} {}", "error:".red().bold(), err);
        let code = err.downcast_ref::<PackitError>()
            .map(PackitError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
