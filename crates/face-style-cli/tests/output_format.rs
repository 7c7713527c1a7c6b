//! Output format validation tests.
//!
//! Without detector weights every image yields a `model_unavailable`
//! report, which still exercises the full record layout.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn face_style(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("face-style").unwrap();
    cmd.current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join("xdg-config"))
        .env("XDG_DATA_HOME", workdir.join("xdg-data"))
        .arg("--models-dir")
        .arg(workdir.join("no-models"));
    cmd
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb([220, 170, 130]))
        .save(&path)
        .unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1), "model_unavailable should exit 1");
    String::from_utf8(output.stdout).unwrap()
}

// === JSONL Format Tests ===

#[test]
fn test_jsonl_is_default() {
    let temp = TempDir::new().unwrap();
    let photo = write_png(temp.path(), "a.png", 32, 24);

    let stdout = stdout_of(face_style(temp.path()).arg(&photo));
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(serde_json::from_str::<Value>(lines[0]).unwrap().is_object());
}

#[test]
fn test_jsonl_one_line_per_image() {
    let temp = TempDir::new().unwrap();
    let a = write_png(temp.path(), "a.png", 32, 32);
    let b = write_png(temp.path(), "b.png", 32, 32);

    let stdout = stdout_of(face_style(temp.path()).args(["--format", "jsonl"]).arg(&a).arg(&b));
    let paths: Vec<String> = stdout
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["path"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("a.png"));
    assert!(paths[1].ends_with("b.png"));
}

#[test]
fn test_failure_record_fields() {
    let temp = TempDir::new().unwrap();
    let photo = write_png(temp.path(), "wide.png", 120, 80);

    let stdout = stdout_of(face_style(temp.path()).arg(&photo));
    let record: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert!(record["path"].as_str().unwrap().ends_with("wide.png"));
    assert_eq!(record["dimensions"]["width"], 120);
    assert_eq!(record["dimensions"]["height"], 80);
    assert_eq!(record["error"]["kind"], "model_unavailable");
    assert!(record["error"]["message"]
        .as_str()
        .unwrap()
        .contains("blazeface.safetensors"));
    assert!(record.get("analysis").is_none());

    let timestamp = record["timestamp"].as_str().unwrap();
    assert!(timestamp.contains('T'), "RFC 3339 timestamp: {timestamp}");
}

// === JSON Array Format Tests ===

#[test]
fn test_json_array_format() {
    let temp = TempDir::new().unwrap();
    let a = write_png(temp.path(), "a.png", 16, 16);
    let b = write_png(temp.path(), "b.png", 16, 16);

    let stdout = stdout_of(face_style(temp.path()).args(["--format", "json"]).arg(&a).arg(&b));
    assert_eq!(stdout.lines().count(), 1, "compact array on one line");

    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_json_pretty() {
    let temp = TempDir::new().unwrap();
    let photo = write_png(temp.path(), "a.png", 16, 16);

    let stdout = stdout_of(
        face_style(temp.path())
            .args(["--format", "json", "--pretty"])
            .arg(&photo),
    );
    assert!(stdout.lines().count() > 1);
    assert!(stdout.starts_with('['));
    assert!(serde_json::from_str::<Value>(&stdout).is_ok());
}

#[test]
fn test_json_empty_input_is_empty_array() {
    let temp = TempDir::new().unwrap();
    let empty = temp.path().join("empty");
    std::fs::create_dir(&empty).unwrap();

    face_style(temp.path())
        .args(["--format", "json"])
        .arg(&empty)
        .assert()
        .code(0)
        .stdout("[]\n");
}

// === Text Format Tests ===

#[test]
fn test_text_format() {
    let temp = TempDir::new().unwrap();
    let photo = write_png(temp.path(), "me.png", 40, 30);

    face_style(temp.path())
        .args(["--format", "text"])
        .arg(&photo)
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("me.png (40x30)")
                .and(predicate::str::contains("error (model_unavailable)")),
        );
}
