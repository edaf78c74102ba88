//! dotcheck CLI entry point.

use clap::Parser;
use dotcheck::cli::{self, Cli, Commands, EXIT_ERROR};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(EXIT_ERROR);
    }

    let result = match cli.command {
        Commands::Lint(args) => cli::run_lint(&args),
        Commands::Init(args) => cli::run_init(&args),
        Commands::Rules => cli::run_rules(),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
