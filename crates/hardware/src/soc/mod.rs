//! System-on-Chip (SoC) Components.
//!
//! This module holds what the core runs against: the bus and interrupt contracts, the
//! RAM and interrupt-line implementations of them, and the builder that assembles them.

/// System builder.
pub mod builder;

/// Level-sensitive IRQ/FIQ lines.
pub mod interrupts;

/// System RAM.
pub mod memory;

/// Bus and interrupt controller contracts.
pub mod traits;

pub use builder::System;
pub use interrupts::InterruptLines;
pub use memory::Ram;
pub use traits::{Bus, InterruptController, IrqLine};
