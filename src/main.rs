//! rtdep - runtime dependency bootstrapper
//!
//! Reads the dependency descriptor packaged with an application, acquires the
//! listed artifacts, and hands control to the application's entry point.

use clap::Parser;
use console::style;
use miette::Diagnostic;

use rtdep::cli::{Cli, Commands};
use rtdep::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match &cli.command {
        Commands::Run(args) => commands::run::run(&cli, args),
        Commands::Describe(args) => commands::describe::run(&cli, args),
        Commands::Version => commands::version::run(),
    };

    if let Err(e) = result {
        tracing::error!("bootstrap failed: {e}");
        eprintln!("{} {e}", style("Error:").for_stderr().red().bold());
        if let Some(help) = e.help() {
            eprintln!("  {} {help}", style("help:").for_stderr().cyan());
        }
        std::process::exit(1);
    }
}
