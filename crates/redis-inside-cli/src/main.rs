//! CLI entry point - the composition root.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use redis_inside_cli::{Cli, CliError, Commands, handlers};

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Locate { roots } => handlers::locate::execute(&roots),
        Commands::Profile => handlers::profile::execute(),
    }
}
