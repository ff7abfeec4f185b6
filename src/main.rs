mod cli;
mod client;
mod config;
mod error;
mod logging;
mod navigation;
mod node;
mod path;
#[cfg(test)]
mod testing;
mod tui;
mod utils;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    // The TUI owns the terminal, so it stays quiet unless logging to a file.
    let default_filter = match (&cli_args.command, &cli_args.log_file) {
        (cli::Command::Tui, None) => "off",
        _ => "warn",
    };
    logging::init(cli_args.log_file.as_deref(), default_filter)?;

    workflow::run(cli_args)
}
