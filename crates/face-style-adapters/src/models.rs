//! Detector weights: where they live and how they get there.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};
use face_style_core::inference::BLAZEFACE_WEIGHTS;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

/// Placeholder checksum indicating verification should be skipped.
const PLACEHOLDER_CHECKSUM: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

const CHUNK_SIZE: usize = 64 * 1024;

/// Model metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: &'static str,
    pub url: &'static str,
    /// Expected SHA256 hash; all zeros skips verification.
    pub sha256: &'static str,
    /// Filename in the models directory.
    pub filename: &'static str,
}

/// Known models.
///
/// `blazeface` is the front-camera model from `hollance/BlazeFace-PyTorch`
/// (`blazeface.pth`, Apache-2.0) exported to safetensors. The leading conv
/// of `backbone1` is stored as `conv0` and the remaining blocks renumbered
/// from zero; heads keep their `classifier_*`/`regressor_*` names. A file
/// converted this way can also be dropped into [`models_dir`] by hand.
pub const MODELS: &[ModelInfo] = &[ModelInfo {
    name: "blazeface",
    url: "https://github.com/face-style/face-style/releases/download/models-v1/blazeface.safetensors",
    // TODO: pin the sha256 once the converted weights are published under models-v1
    sha256: PLACEHOLDER_CHECKSUM,
    filename: BLAZEFACE_WEIGHTS,
}];

/// Download progress: model name, bytes so far, total if known.
pub type ProgressCallback = Box<dyn Fn(&str, u64, Option<u64>) + Send>;

static MODELS_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Points [`models_dir`] somewhere else for the rest of the process.
pub fn set_models_dir(dir: impl Into<PathBuf>) {
    let dir = dir.into();
    debug!("models directory overridden: {}", dir.display());
    match MODELS_DIR_OVERRIDE.write() {
        Ok(mut guard) => *guard = Some(dir),
        Err(poisoned) => *poisoned.into_inner() = Some(dir),
    }
}

/// Returns the models directory path.
///
/// The [`set_models_dir`] override if any, else
/// `XDG_DATA_HOME/face-style/models` or `~/.local/share/face-style/models`.
#[must_use]
pub fn models_dir() -> PathBuf {
    let overridden = match MODELS_DIR_OVERRIDE.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    overridden.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("face-style")
            .join("models")
    })
}

/// Downloads every missing model.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, a download fails,
/// or a checksum does not match.
pub fn ensure_models() -> Result<()> {
    ensure_models_with_progress(None)
}

/// Like [`ensure_models`], reporting download progress to `progress`.
///
/// # Errors
///
/// See [`ensure_models`].
pub fn ensure_models_with_progress(progress: Option<&ProgressCallback>) -> Result<()> {
    let dir = models_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create models directory {}", dir.display()))?;

    for model in MODELS {
        let path = dir.join(model.filename);
        if path.exists() {
            debug!("Model {} already exists", model.name);
        } else {
            download_model(model, &path, progress).with_context(|| {
                format!(
                    "Could not fetch {}; a converted copy can be placed at {}",
                    model.name,
                    path.display()
                )
            })?;
        }
    }

    Ok(())
}

fn download_model(model: &ModelInfo, path: &Path, progress: Option<&ProgressCallback>) -> Result<()> {
    info!("Downloading model: {}", model.name);

    let mut response = reqwest::blocking::get(model.url)
        .with_context(|| format!("Failed to download {}", model.name))?;

    if !response.status().is_success() {
        anyhow::bail!("Download of {} failed with status: {}", model.name, response.status());
    }

    let total = response.content_length();
    let mut bytes = Vec::with_capacity(total.and_then(|t| usize::try_from(t).ok()).unwrap_or(0));
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = response
            .read(&mut chunk)
            .with_context(|| format!("Failed to read response for {}", model.name))?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        if let Some(report) = progress {
            report(model.name, bytes.len() as u64, total);
        }
    }

    verify_checksum(model, &bytes, path)?;

    // Write-then-rename so an interrupted download never looks installed.
    let partial = path.with_extension("part");
    fs::write(&partial, &bytes).with_context(|| format!("Failed to write {}", model.name))?;
    fs::rename(&partial, path).with_context(|| format!("Failed to install {}", model.name))?;

    info!("Downloaded {} ({} bytes)", model.name, bytes.len());
    Ok(())
}

fn verify_checksum(model: &ModelInfo, bytes: &[u8], path: &Path) -> Result<()> {
    if model.sha256 == PLACEHOLDER_CHECKSUM {
        warn!("No checksum recorded for {}; skipping verification", model.name);
        return Ok(());
    }

    let hash = format!("{:x}", Sha256::digest(bytes));
    if hash != model.sha256 {
        anyhow::bail!(
            "Checksum mismatch for {}: expected {}, got {}. \
             Try deleting {} and re-running to download a fresh copy.",
            model.name,
            model.sha256,
            hash,
            path.display()
        );
    }
    Ok(())
}

/// Returns the path to a specific model file.
#[must_use]
pub fn model_path(name: &str) -> Option<PathBuf> {
    MODELS
        .iter()
        .find(|m| m.name == name)
        .map(|m| models_dir().join(m.filename))
}

/// Checks if all models are installed.
#[must_use]
pub fn all_models_installed() -> bool {
    let dir = models_dir();
    MODELS.iter().all(|m| dir.join(m.filename).exists())
}

/// Lists known models with their installed status.
#[must_use]
pub fn list_models() -> Vec<(String, bool)> {
    let dir = models_dir();
    MODELS
        .iter()
        .map(|m| (m.name.to_string(), dir.join(m.filename).exists()))
        .collect()
}
