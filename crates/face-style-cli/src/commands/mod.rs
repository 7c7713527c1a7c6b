//! CLI command definitions and handlers.

pub mod analyze;
pub mod models;
pub mod recommend;

use clap::{Parser, Subcommand};

/// Face Style - face shape and skin tone analysis with styling advice
#[derive(Parser)]
#[command(name = "face-style")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments, used when no subcommand is given.
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify face shape and skin tone in photos
    Analyze(analyze::AnalyzeArgs),
    /// Manage detector models
    Models(models::ModelsArgs),
    /// Print styling advice for a face shape and skin tone
    Recommend(recommend::RecommendArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was analysed.
    Success = 0,
    /// At least one image could not be analysed or loaded.
    AnalysisFailed = 1,
    /// Usage, configuration or I/O error.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
