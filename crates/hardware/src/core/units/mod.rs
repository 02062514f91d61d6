//! Functional units of the core.
//!
//! 1. **ALU:** Barrel shifter, arithmetic with flag generation, logic and multiply.
//! 2. **MMU:** Two-level address translation with domain and permission checks.

/// Arithmetic Logic Unit.
pub mod alu;

/// Memory Management Unit.
pub mod mmu;
