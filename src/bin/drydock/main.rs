//! Drydock CLI - staged front end for CMake projects

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use drydock::ops::errors::GENERIC_FAILURE;
use drydock::ops::{Report, StageError};
use drydock::util::Shell;

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.global.verbose && !cli.global.quiet {
        EnvFilter::new("drydock=debug")
    } else if cli.global.quiet {
        EnvFilter::new("drydock=warn")
    } else {
        EnvFilter::new("drydock=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Arc::new(Shell::from_flags(
        cli.global.quiet,
        cli.global.verbose,
        cli.global.color,
    ));

    if let Err(e) = run(cli, Arc::clone(&shell)) {
        std::process::exit(report(&e, &shell));
    }
}

fn run(cli: Cli, shell: Arc<Shell>) -> Result<()> {
    let global = &cli.global;

    // Execute command
    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args, global, shell),
        Commands::Build(args) => commands::build::execute(args, global, shell),
        Commands::Test(args) => commands::test::execute(args, global, shell),
        Commands::Run(args) => commands::run::execute(args, global, shell),
        Commands::Clean => commands::clean::execute(global, shell),
        Commands::All(args) => commands::all::execute(args, global, shell),
        Commands::Status(args) => commands::status::execute(args, global, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print a failure and pick the exit code for it.
fn report(err: &anyhow::Error, shell: &Shell) -> i32 {
    let stage_err = err.downcast_ref::<StageError>();

    // Nothing was echoed while the command ran
    if shell.is_quiet() {
        if let Some(lines) = stage_err.and_then(StageError::captured_output) {
            shell.replay(lines);
        }
    }

    Report::from_error(err).emit(shell.use_color());
    stage_err.map_or(GENERIC_FAILURE, StageError::exit_code)
}
