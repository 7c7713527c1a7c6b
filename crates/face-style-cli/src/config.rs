//! Configuration file support for face-style.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/face-style/config.toml` (lowest priority)
//! - Project-local: `.face-style.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

const PROJECT_FILE: &str = ".face-style.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub detector: DetectorConfig,
    pub models: ModelsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Face detection settings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Detections scoring below this are ignored (0.0-1.0).
    pub min_face_confidence: Option<f32>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// "json", "jsonl" or "text".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Missing files are silently ignored. Files that fail to parse are
    /// skipped with a warning; out-of-range values are dropped with a warning.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Returns a description of every out-of-range value.
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(c) = self.detector.min_face_confidence {
            if !(0.0..=1.0).contains(&c) {
                problems.push(format!(
                    "detector.min_face_confidence must be 0.0-1.0, got {c}"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if !matches!(f.as_str(), "json" | "jsonl" | "text") {
                problems.push(format!(
                    "output.format must be 'json', 'jsonl' or 'text', got '{f}'"
                ));
            }
        }

        problems
    }

    /// Drops invalid values, returning what was wrong with them.
    fn sanitize(&mut self) -> Vec<String> {
        let problems = self.validate();
        if problems.iter().any(|p| p.starts_with("detector.")) {
            self.detector.min_face_confidence = None;
        }
        if problems.iter().any(|p| p.starts_with("output.format")) {
            self.output.format = None;
        }
        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.detector.min_face_confidence = other
            .detector
            .min_face_confidence
            .or(self.detector.min_face_confidence);

        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("face-style").join("config.toml"))
}

fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.face-style.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_FILE))
        .find(|path| path.exists())
}

fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
