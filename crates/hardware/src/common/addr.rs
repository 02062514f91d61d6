//! Physical and Virtual Address types.
//!
//! This module defines strong types for the two 32-bit address spaces the core
//! deals with. It provides the following:
//! 1. **Type Safety:** Keeps guest virtual addresses and bus physical addresses apart.
//! 2. **Field Extraction:** Section, table-index and page-offset helpers used by the walker.
//! 3. **MMU Integration:** Acts as the primary interface for translation results.

/// A virtual address as issued by the executing program.
///
/// Virtual addresses are translated by the MMU before reaching the bus. When the
/// MMU is disabled the mapping is the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u32);

/// A physical address on the system bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u32);

impl VirtAddr {
    /// Creates a new virtual address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Index into the first-level translation table (bits 31:20).
    ///
    /// # Returns
    ///
    /// The section index (0-4095).
    #[inline(always)]
    pub const fn section_index(self) -> u32 {
        self.0 >> 20
    }

    /// Offset within a 1 MiB section (bits 19:0).
    #[inline(always)]
    pub const fn section_offset(self) -> u32 {
        self.0 & 0x000F_FFFF
    }

    /// Returns `true` if the address is a multiple of `size` bytes.
    ///
    /// # Arguments
    ///
    /// * `size` - Access width in bytes (1, 2 or 4).
    #[inline(always)]
    pub const fn is_aligned(self, size: u32) -> bool {
        size <= 1 || self.0 & (size - 1) == 0
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "va:{:#010x}", self.0)
    }
}

impl std::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pa:{:#010x}", self.0)
    }
}
