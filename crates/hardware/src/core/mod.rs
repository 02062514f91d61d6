//! Core processor implementation.
//!
//! This module contains the ARMv5TE core:
//! 1. **Architecture:** Processor modes, status registers, exceptions and the coprocessor
//!    contract, including the built-in system control coprocessor.
//! 2. **CPU:** The step loop, the instruction executor, translated memory access and
//!    exception dispatch.
//! 3. **Units:** The ALU (barrel shifter, adder, multiplier) and the MMU.

/// Architecture-specific components (modes, PSRs, exceptions, coprocessors).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Execution units (ALU, MMU).
pub mod units;

pub use self::cpu::Cpu;
