//! ARMv5TE CPU core simulator library.
//!
//! This crate implements an instruction-level ARMv5TE core with the following:
//! 1. **Core:** Banked register file, CPSR/SPSR handling, and the exception dispatcher.
//! 2. **ISA:** Decoding, execution and disassembly of ARM, Thumb and the Thumb-2
//!    branch forms.
//! 3. **Memory:** A two-level translation table walker with domain and access permission
//!    checks, driven by the system control coprocessor (cp15).
//! 4. **SoC:** Flat RAM, interrupt lines and the bus/interrupt traits the core consumes.
//! 5. **Simulation:** Configuration and statistics collection.

/// Common types and constants (addresses, registers, errors, access types).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (arch, execution, memory, exceptions).
pub mod core;
/// Instruction set (decode, operands, disassembly).
pub mod isa;
/// System-on-chip (builder, memory, interrupt lines, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Main CPU type; holds the register file, cp15, the MMU and stats.
pub use crate::core::Cpu;
/// Top-level system (RAM and interrupt lines); construct with `System::new`.
pub use crate::soc::System;
