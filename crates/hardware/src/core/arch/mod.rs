//! Architectural state definitions.
//!
//! This module groups the architecturally visible state of an ARMv5TE core:
//! 1. **Modes:** The seven processor modes and the register banks they select.
//! 2. **Status Registers:** CPSR/SPSR layout and flag helpers.
//! 3. **Exceptions:** The exception table and the pending exception set.
//! 4. **Coprocessors:** The coprocessor bus contract and the system control coprocessor.

/// Coprocessor register ids and the slot trait.
pub mod coproc;
/// System control coprocessor (cp15).
pub mod cp15;
/// Exception kinds and the pending set.
pub mod exception;
/// Processor modes and register banks.
pub mod mode;
/// Program status registers.
pub mod psr;

pub use exception::{ExceptionKind, PendingException, PendingExceptions};
pub use mode::{Bank, ProcessorMode};
pub use psr::{Flags, Psr};
