//! # Configuration Tests
//!
//! Defaults, partial JSON documents and file loading.

use std::io::Write;

use armsim_core::config::{Config, ConfigError, CpuConfig, GeneralConfig, MemoryConfig};
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.start_pc, 0);
    assert!(!config.general.high_vectors);
    assert!(!config.general.start_thumb);
}

#[test]
fn test_section_defaults() {
    let general = GeneralConfig::default();
    assert_eq!(general.start_pc, 0);

    let memory = MemoryConfig::default();
    assert_eq!(memory.ram_base, 0);
    assert_eq!(memory.ram_size, 64 * 1024 * 1024);
    assert_eq!(memory.rom_size, 0);

    let cpu = CpuConfig::default();
    assert_eq!(cpu.main_id, 0x4106_9265);
    assert_eq!(cpu.cache_type, 0x1D15_2152);
}

#[test]
fn test_empty_document_yields_defaults() {
    let config = Config::from_json("{}").expect("parse");
    assert_eq!(config.memory.ram_size, MemoryConfig::default().ram_size);
    assert_eq!(config.cpu.main_id, CpuConfig::default().main_id);
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let json = r#"{
        "general": { "start_pc": 32768, "start_thumb": true },
        "memory": { "rom_size": 4096 }
    }"#;
    let config = Config::from_json(json).expect("parse");
    assert_eq!(config.general.start_pc, 0x8000);
    assert!(config.general.start_thumb);
    assert!(!config.general.high_vectors);
    assert_eq!(config.memory.rom_size, 4096);
    assert_eq!(config.memory.ram_size, 64 * 1024 * 1024);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_json(r#"{ "general": { "verbose": 3 }, "extra": [] }"#)
        .expect("parse");
    assert_eq!(config.general.start_pc, 0);
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = Config::from_json(r#"{ "general": { "start_pc": "zero" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"{{ "general": {{ "high_vectors": true }}, "cpu": {{ "main_id": 1 }} }}"#
    )
    .expect("write");
    let config = Config::from_file(file.path()).expect("load");
    assert!(config.general.high_vectors);
    assert_eq!(config.cpu.main_id, 1);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Config::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
