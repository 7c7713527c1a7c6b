//! `recommend` subcommand tests.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use predicates::prelude::*;

fn recommend(args: &[&str]) -> assert_cmd::assert::Assert {
    Command::cargo_bin("face-style")
        .unwrap()
        .arg("recommend")
        .args(args)
        .assert()
}

#[test]
fn test_shape_advice_then_palette() {
    let output = recommend(&["round", "warm-light"]).success().get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("volume at the crown"));
    assert!(lines[3].starts_with("Warm undertone"));
}

#[test]
fn test_fair_gets_cool_palette() {
    recommend(&["oval", "fair"])
        .success()
        .stdout(predicate::str::contains("Cool undertone"));
}

#[test]
fn test_label_spellings_accepted() {
    for (shape, tone) in [
        ("inverted-triangle", "cool_deep"),
        ("InvertedTriangle", "Cool Deep"),
        ("INVERTED_TRIANGLE", "cool-deep"),
    ] {
        recommend(&[shape, tone])
            .success()
            .stdout(predicate::str::contains("Scoop necklines"));
    }
}

#[test]
fn test_json_output() {
    let output = recommend(&["square", "deep", "--json"])
        .success()
        .get_output()
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(4));
}

#[test]
fn test_unknown_shape_rejected() {
    recommend(&["hexagon", "fair"])
        .code(2)
        .stderr(predicate::str::contains("hexagon"));
}
