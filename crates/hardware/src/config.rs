//! Configuration system for the ARM core.
//!
//! This module defines the configuration structures used to parameterize the core and its
//! backing system. It provides:
//! 1. **Defaults:** Baseline constants (RAM placement, ARM926-class identification registers).
//! 2. **Structures:** Hierarchical config for general, memory and CPU settings.
//! 3. **Loading:** JSON parsing from a string or a file, with every field optional.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the core.
///
/// These values define the baseline configuration when not explicitly overridden in
/// JSON configuration files.
mod defaults {
    /// Base address of system RAM.
    ///
    /// The exception vectors live at address 0, so RAM starts there by default.
    pub const RAM_BASE: u32 = 0x0000_0000;

    /// Total size of system RAM (64 MiB).
    pub const RAM_SIZE: usize = 64 * 1024 * 1024;

    /// Initial program counter (the reset vector).
    pub const START_PC: u32 = 0x0000_0000;

    /// cp15 main ID register (ARM926EJ-S r0p5).
    pub const MAIN_ID: u32 = 0x4106_9265;

    /// cp15 cache type register (16 KiB I/D, 4-way, 32-byte lines).
    pub const CACHE_TYPE: u32 = 0x1D15_2152;
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid JSON for [`Config`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Root configuration.
///
/// All sections and fields are optional; anything missing takes its default.
///
/// # Example
///
/// ```
/// use armsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "high_vectors": true },
///     "memory": { "ram_size": 1048576 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert!(config.general.high_vectors);
/// assert_eq!(config.memory.ram_size, 1 << 20);
/// assert_eq!(config.cpu.main_id, 0x4106_9265);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Backing RAM layout
    #[serde(default)]
    pub memory: MemoryConfig,
    /// CPU identification
    #[serde(default)]
    pub cpu: CpuConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON document; unknown fields are ignored.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or [`ConfigError::Parse`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the file.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or [`ConfigError`] on I/O or parse failure.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// General settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction at `trace` level
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC value (defaults to the reset vector)
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Start with the cp15 V bit set (vectors at 0xFFFF0000)
    #[serde(default)]
    pub high_vectors: bool,

    /// Start in Thumb state
    #[serde(default)]
    pub start_thumb: bool,
}

impl GeneralConfig {
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
            high_vectors: false,
            start_thumb: false,
        }
    }
}

/// Backing RAM layout.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Physical base address of RAM
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,

    /// RAM size in bytes
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,

    /// Size of a write-protected window at the start of RAM (0 disables it)
    #[serde(default)]
    pub rom_size: usize,
}

impl MemoryConfig {
    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            rom_size: 0,
        }
    }
}

/// CPU identification registers exposed through cp15.
#[derive(Debug, Clone, Deserialize)]
pub struct CpuConfig {
    /// cp15 c0 main ID
    #[serde(default = "CpuConfig::default_main_id")]
    pub main_id: u32,

    /// cp15 c0 cache type
    #[serde(default = "CpuConfig::default_cache_type")]
    pub cache_type: u32,
}

impl CpuConfig {
    fn default_main_id() -> u32 {
        defaults::MAIN_ID
    }

    fn default_cache_type() -> u32 {
        defaults::CACHE_TYPE
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            main_id: defaults::MAIN_ID,
            cache_type: defaults::CACHE_TYPE,
        }
    }
}
