//! Contracts between the core and the system around it.
//!
//! The core consumes two collaborators through these traits:
//! 1. **Bus:** Physical byte/half/word access plus "is this access backed" probes. The
//!    core probes before every access and turns a failed probe into an abort.
//! 2. **Interrupt Controller:** Level-sensitive IRQ and FIQ lines, a description of
//!    what asserted them, and a blocking wait used by cp15's wait-for-interrupt.

use crate::common::{AccessSize, PhysAddr};

/// Physical memory as seen by the core.
///
/// Multi-byte accesses are little-endian. Reads and writes to addresses that fail the
/// matching probe have unspecified results; the core never issues them.
pub trait Bus: Send {
    /// Returns `true` if a read of `size` bytes at `addr` would succeed.
    fn try_read(&self, addr: PhysAddr, size: AccessSize) -> bool;
    /// Returns `true` if a write of `size` bytes at `addr` would succeed.
    fn try_write(&self, addr: PhysAddr, size: AccessSize) -> bool;

    /// Reads one byte.
    fn read8(&mut self, addr: PhysAddr) -> u8;
    /// Reads a halfword.
    fn read16(&mut self, addr: PhysAddr) -> u16;
    /// Reads a word.
    fn read32(&mut self, addr: PhysAddr) -> u32;

    /// Writes one byte.
    fn write8(&mut self, addr: PhysAddr, value: u8);
    /// Writes a halfword.
    fn write16(&mut self, addr: PhysAddr, value: u16);
    /// Writes a word.
    fn write32(&mut self, addr: PhysAddr, value: u32);
}

/// An interrupt input of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IrqLine {
    /// Normal interrupt request.
    Irq,
    /// Fast interrupt request.
    Fiq,
}

impl IrqLine {
    /// Both lines, in sampling order.
    pub const ALL: [Self; 2] = [Self::Irq, Self::Fiq];
}

/// Interrupt source sampled once per step.
///
/// Implementations are shared between the stepping thread and whatever asserts the
/// lines, so they must be `Sync`.
pub trait InterruptController: Send + Sync {
    /// Returns `true` while `line` is asserted.
    fn is_asserted(&self, line: IrqLine) -> bool;
    /// Describes the source currently driving `line`.
    fn message(&self, line: IrqLine) -> String;
    /// Blocks until at least one line is asserted.
    fn wait_for_interrupt(&self);
}
