//! Models command - manage detector weights.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use clap::{Args, Subcommand};
use face_style_adapters::models::{
    ensure_models_with_progress, list_models as adapter_list_models, models_dir, set_models_dir,
    ProgressCallback, MODELS,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::AppConfig;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// Download required models
    Fetch,
    /// List installed models
    List,
    /// Print model directory path
    Path,
}

/// Run the models command, honouring `[models] dir` from the config.
pub fn run(args: &ModelsArgs, config: &AppConfig) -> Result<()> {
    if let Some(ref dir) = config.models.dir {
        set_models_dir(dir);
    }

    match args.command {
        ModelsCommand::Fetch => fetch_models(),
        ModelsCommand::List => {
            list_models();
            Ok(())
        }
        ModelsCommand::Path => {
            println!("{}", models_dir().display());
            Ok(())
        }
    }
}

fn fetch_models() -> Result<()> {
    let pb = Arc::new(ProgressBar::new(0));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
            .map_err(|e| anyhow::anyhow!("Invalid progress template: {e}"))?
            .progress_chars("#>-"),
    );

    let current_model: Arc<Mutex<String>> = Arc::new(Mutex::new(String::new()));
    let pb_clone = Arc::clone(&pb);

    let progress: ProgressCallback =
        Box::new(move |name: &str, downloaded: u64, total: Option<u64>| {
            let mut current = current_model
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *current != name {
                *current = name.to_string();
                if let Some(t) = total {
                    pb_clone.set_length(t);
                }
                pb_clone.set_message(name.to_string());
            }
            pb_clone.set_position(downloaded);
        });

    ensure_models_with_progress(Some(&progress))?;

    pb.finish_with_message(format!("Models ready in {}", models_dir().display()));
    Ok(())
}

fn list_models() {
    let models = adapter_list_models();

    println!("Models directory: {}", models_dir().display());
    println!();

    for (name, installed) in &models {
        let status = if *installed { "✓" } else { "✗" };
        let filename = MODELS
            .iter()
            .find(|m| m.name == name)
            .map_or("unknown", |m| m.filename);
        println!("  {status} {name} ({filename})");
    }

    println!();
    let installed_count = models.iter().filter(|(_, installed)| *installed).count();
    println!("{}/{} models installed", installed_count, models.len());
}
