//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout the core.
//! These types are used for the following:
//! 1. **Permission Validation:** The MMU's access-permission table distinguishes reads from writes.
//! 2. **Fault Generation:** Fetch faults become prefetch aborts, everything else a data abort.
//! 3. **Statistics Tracking:** Categorizing memory operations for reporting.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Faults on fetch raise a prefetch abort rather than a data abort.
    Fetch,

    /// Data read access (loads, the read half of a swap).
    Read,

    /// Data write access (stores, the write half of a swap).
    Write,
}

impl AccessType {
    /// Returns `true` for accesses that read memory (fetches and loads).
    #[inline(always)]
    pub const fn is_read(self) -> bool {
        !matches!(self, Self::Write)
    }

    /// Returns `true` for instruction fetches.
    #[inline(always)]
    pub const fn is_fetch(self) -> bool {
        matches!(self, Self::Fetch)
    }
}

/// Width of a single bus transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessSize {
    /// 8-bit transfer.
    Byte = 1,
    /// 16-bit transfer.
    Half = 2,
    /// 32-bit transfer.
    Word = 4,
}

impl AccessSize {
    /// Width of the transfer in bytes.
    #[inline(always)]
    pub const fn bytes(self) -> u32 {
        self as u32
    }
}
