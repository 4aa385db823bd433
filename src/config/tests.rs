//! Tests for config loading, validation and output gating

use super::*;
use crate::error::Error;
use crate::quant::QFormat;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ========================================================================
// LOADING
// ========================================================================

#[test]
fn test_defaults() {
    let config = ToolboxConfig::default();
    assert_eq!(config.paths.working_dir, PathBuf::from("."));
    assert!(!config.output.overwrite);
    assert!(config.quantization.is_none());
}

#[test]
fn test_load_empty_mapping_uses_defaults() {
    let file = write_yaml("{}\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config, ToolboxConfig::default());
}

#[test]
fn test_load_full_config() {
    let file = write_yaml(
        r#"
paths:
  working_dir: /data/snn
output:
  overwrite: true
quantization:
  format: Q2.6
  binarize_h: 0.5
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.paths.working_dir, PathBuf::from("/data/snn"));
    assert!(config.output.overwrite);
    let quant = config.quantization.unwrap();
    assert_eq!(quant.format, Some(QFormat::new(2, 6)));
    assert_eq!(quant.binarize_h, Some(0.5));
}

#[test]
fn test_overwrite_accepts_string() {
    let file = write_yaml("output:\n  overwrite: \"TRUE\"\n");
    assert!(load_config(file.path()).unwrap().output.overwrite);

    let file = write_yaml("output:\n  overwrite: \"false\"\n");
    assert!(!load_config(file.path()).unwrap().output.overwrite);
}

#[test]
fn test_overwrite_rejects_other_strings() {
    let file = write_yaml("output:\n  overwrite: \"sometimes\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_unknown_field_rejected() {
    let file = write_yaml("paths:\n  workdir: /tmp\n");
    assert!(matches!(
        load_config(file.path()),
        Err(Error::ConfigError(_))
    ));
}

#[test]
fn test_bad_format_rejected() {
    let file = write_yaml("quantization:\n  format: Q2\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse YAML config"));
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/snnkit.yaml").unwrap_err();
    match err {
        Error::ConfigError(msg) => assert!(msg.contains("Failed to read config file")),
        other => panic!("unexpected error: {other}"),
    }
}

// ========================================================================
// VALIDATION
// ========================================================================

#[test]
fn test_validate_zero_binarize_h() {
    let file = write_yaml("quantization:\n  binarize_h: 0.0\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("binarize_h"));
}

#[test]
fn test_oversized_format_rejected_on_load() {
    let file = write_yaml("quantization:\n  format: Q8.30\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
    assert!(err.to_string().contains("exceeds 31 bits"));
}

#[test]
fn test_validate_empty_working_dir() {
    let mut config = ToolboxConfig::default();
    config.paths.working_dir = PathBuf::new();
    assert!(validate_config(&config).is_err());
}

// ========================================================================
// OUTPUT GATING
// ========================================================================

#[test]
fn test_should_write_new_file_without_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let mut prompt = Vec::new();
    let ok = should_write_with(
        &dir.path().join("new.json"),
        &OutputConfig::default(),
        &mut Cursor::new(""),
        &mut prompt,
    )
    .unwrap();
    assert!(ok);
    assert!(prompt.is_empty());
}

#[test]
fn test_should_write_overwrite_skips_prompt() {
    let file = NamedTempFile::new().unwrap();
    let mut prompt = Vec::new();
    let ok = should_write_with(
        file.path(),
        &OutputConfig { overwrite: true },
        &mut Cursor::new(""),
        &mut prompt,
    )
    .unwrap();
    assert!(ok);
    assert!(prompt.is_empty());
}

#[test]
fn test_should_write_existing_file_prompts() {
    let file = NamedTempFile::new().unwrap();
    let mut prompt = Vec::new();
    let ok = should_write_with(
        file.path(),
        &OutputConfig::default(),
        &mut Cursor::new("n\n"),
        &mut prompt,
    )
    .unwrap();
    assert!(!ok);
    assert!(String::from_utf8(prompt).unwrap().contains("already exists"));
}
