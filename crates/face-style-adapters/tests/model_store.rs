//! Model store behaviour against an overridden directory.
//!
//! The override is process-wide, so everything touching it lives in one test.

#![allow(clippy::unwrap_used)]

use face_style_adapters::models::{
    all_models_installed, list_models, model_path, models_dir, set_models_dir,
};
use tempfile::TempDir;

#[test]
fn test_overridden_models_dir() {
    let dir = TempDir::new().unwrap();
    set_models_dir(dir.path());

    assert_eq!(models_dir(), dir.path());
    assert!(!all_models_installed());
    assert_eq!(list_models(), vec![("blazeface".to_string(), false)]);

    let path = model_path("blazeface").unwrap();
    assert_eq!(path, dir.path().join("blazeface.safetensors"));

    std::fs::write(&path, b"weights").unwrap();
    assert!(all_models_installed());
    assert_eq!(list_models(), vec![("blazeface".to_string(), true)]);
}
