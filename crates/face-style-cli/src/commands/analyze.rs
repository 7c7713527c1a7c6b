//! Analyze command - classify face shape and skin tone per image.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use face_style_adapters::{models_dir, set_models_dir, FsImageSource};
use face_style_core::{
    BlazeFaceDetector, FaceAnalyzer, FaceDetector, ImageDimensions, ImageReport,
    ImageSource, ProgressEvent, ProgressSink, ResultOutput,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar, TextOutput};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
    /// Human-readable summary
    Text,
}

impl OutputFormat {
    fn from_config(value: &str) -> Option<Self> {
        match value {
            "jsonl" => Some(Self::Jsonl),
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Hardcoded default values.
mod defaults {
    pub const MIN_FACE_CONFIDENCE: f32 = face_style_core::DEFAULT_SCORE_THRESHOLD;
}

/// Parse and validate a confidence value (0.0-1.0).
fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Photos or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Ignore detections scoring below this (0.0-1.0)
    #[arg(long, value_parser = parse_confidence)]
    pub min_face_confidence: Option<f32>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.min_face_confidence = args
            .min_face_confidence
            .or(config.detector.min_face_confidence);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        if args.models_dir.is_none() {
            args.models_dir.clone_from(&config.models.dir);
        }

        args
    }

    fn min_face_confidence(&self) -> f32 {
        self.min_face_confidence
            .unwrap_or(defaults::MIN_FACE_CONFIDENCE)
    }

    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Counts from one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images that reached the analyzer.
    pub processed: usize,
    /// Processed images whose analysis failed.
    pub failed: usize,
    /// Inputs that could not be loaded.
    pub skipped: usize,
}

impl BatchSummary {
    /// Success only if every input was loaded and analysed.
    pub const fn exit_code(&self) -> ExitCode {
        if self.failed > 0 || self.skipped > 0 {
            ExitCode::AnalysisFailed
        } else {
            ExitCode::Success
        }
    }
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first.
pub fn run(args: &AnalyzeArgs) -> Result<BatchSummary> {
    info!("Running analyze command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    if let Some(ref dir) = args.models_dir {
        debug!("Using custom models directory: {}", dir.display());
        set_models_dir(dir);
    }

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output: Box<dyn ResultOutput> = match args.format() {
        OutputFormat::Jsonl => Box::new(JsonOutput::lines_stdout()),
        OutputFormat::Json => Box::new(JsonOutput::array_stdout(args.pretty)),
        OutputFormat::Text => Box::new(TextOutput::stdout()),
    };

    let analyzer = build_analyzer(args);
    run_batch(&source, &analyzer, output.as_ref(), &progress)
}

/// Analyzer over the installed detector weights, filtering detections at
/// the configured confidence.
fn build_analyzer(args: &AnalyzeArgs) -> FaceAnalyzer<BlazeFaceDetector> {
    let min_confidence = args.min_face_confidence();
    debug!("Minimum face confidence: {min_confidence}");
    FaceAnalyzer::new(BlazeFaceDetector::new(&models_dir(), min_confidence))
}

/// Analyses every image of `source`, writing one report per loaded image.
///
/// # Errors
///
/// Returns an error only if writing output fails; per-image failures are
/// recorded in the reports and the summary.
pub fn run_batch<D: FaceDetector>(
    source: &dyn ImageSource,
    analyzer: &FaceAnalyzer<D>,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
) -> Result<BatchSummary> {
    let total = source.count_hint();
    let mut summary = BatchSummary::default();

    for (index, item) in source.images().enumerate() {
        let image = match item.image {
            Ok(img) => img,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: item.path,
                    reason: format!("{e:#}"),
                });
                summary.skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let outcome = analyzer.analyze(&image);
        if let Err(ref e) = outcome {
            debug!("{}: analysis failed: {e}", image.path);
            summary.failed += 1;
        }

        let report = ImageReport::from_outcome(
            image.path.clone(),
            iso_timestamp(),
            ImageDimensions::new(image.width, image.height),
            outcome,
        );
        output.write(&report)?;
        progress.on_event(ProgressEvent::Completed { report });

        summary.processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        processed: summary.processed,
        failed: summary.failed,
        skipped: summary.skipped,
    });

    Ok(summary)
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
