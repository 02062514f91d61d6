//! Common utilities and types used throughout the ARM core.
//!
//! This module provides fundamental building blocks shared across all components. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Instruction sizes, PC offsets, vector bases and register aliases.
//! 3. **Memory Access:** Classification of memory operations (Fetch/Read/Write) and widths.
//! 4. **Error Handling:** The host-level [`CoreError`] taxonomy.
//! 5. **Register Management:** The banked register file.
//! 6. **Signals:** Atomic flags shared between the register file, dispatcher and cp15.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Common constants used throughout the core.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Host error types.
pub mod error;

/// Banked register file implementation.
pub mod reg;

/// Atomic flags shared across core components.
pub mod signals;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{REG_LR, REG_PC, REG_SP};
pub use data::{AccessSize, AccessType};
pub use error::{CoreError, CoreResult};
pub use reg::RegisterFile;
pub use signals::CoreSignals;
