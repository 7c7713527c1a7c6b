//! Face Style CLI - face shape and skin tone classification.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{analyze, Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let exit_code = match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args, &config),
        Some(Commands::Models(ref args)) => report(commands::models::run(args, &config)),
        Some(Commands::Recommend(ref args)) => report(commands::recommend::run(args)),
        None => {
            if cli.analyze.paths.is_empty() {
                eprintln!("error: No paths specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            run_analyze(cli.analyze, &config)
        }
    };

    exit_code.into()
}

fn run_analyze(args: analyze::AnalyzeArgs, config: &AppConfig) -> ExitCode {
    let args = analyze::AnalyzeArgs::with_config(args, config);
    match analyze::run(&args) {
        Ok(summary) => summary.exit_code(),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}

fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
