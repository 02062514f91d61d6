//! System RAM.
//!
//! `Ram` is the default [`Bus`] implementation: a flat little-endian byte array mapped at
//! a physical base address. A window at the start of the array can be marked read-only,
//! which makes write probes fail there and so turns guest stores into data aborts.

use std::fmt;

use crate::common::{AccessSize, PhysAddr};
use crate::soc::traits::Bus;

/// Flat RAM with an optional read-only window.
pub struct Ram {
    data: Vec<u8>,
    base: u32,
    read_only: usize,
}

impl fmt::Debug for Ram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ram")
            .field("base", &format_args!("{:#010x}", self.base))
            .field("size", &self.data.len())
            .field("read_only", &self.read_only)
            .finish()
    }
}

impl Ram {
    /// Creates zeroed RAM.
    ///
    /// # Arguments
    ///
    /// * `base` - Physical address of the first byte.
    /// * `size` - Size in bytes.
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            data: vec![0; size],
            base,
            read_only: 0,
        }
    }

    /// Marks the first `len` bytes as read-only.
    pub fn set_read_only(&mut self, len: usize) {
        self.read_only = len.min(self.data.len());
    }

    /// Physical address of the first byte.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Copies `bytes` into RAM, ignoring the read-only window.
    ///
    /// # Arguments
    ///
    /// * `addr` - Physical destination address.
    /// * `bytes` - Data to copy.
    ///
    /// # Returns
    ///
    /// `false` (and nothing written) if the range is not entirely inside RAM.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) -> bool {
        match self.offset(PhysAddr::new(addr), bytes.len()) {
            Some(start) => {
                self.data[start..start + bytes.len()].copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    /// Copies little-endian words into RAM starting at `addr`.
    pub fn load_words(&mut self, addr: u32, words: &[u32]) -> bool {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.load(addr, &bytes)
    }

    fn offset(&self, addr: PhysAddr, len: usize) -> Option<usize> {
        let start = addr.val().checked_sub(self.base)? as usize;
        let end = start.checked_add(len)?;
        (end <= self.data.len()).then_some(start)
    }

    fn bytes<const N: usize>(&self, addr: PhysAddr) -> [u8; N] {
        let mut out = [0u8; N];
        if let Some(start) = self.offset(addr, N) {
            out.copy_from_slice(&self.data[start..start + N]);
        }
        out
    }

    fn store(&mut self, addr: PhysAddr, bytes: &[u8]) {
        if let Some(start) = self.offset(addr, bytes.len()) {
            self.data[start..start + bytes.len()].copy_from_slice(bytes);
        }
    }
}

impl Bus for Ram {
    fn try_read(&self, addr: PhysAddr, size: AccessSize) -> bool {
        self.offset(addr, size.bytes() as usize).is_some()
    }

    fn try_write(&self, addr: PhysAddr, size: AccessSize) -> bool {
        self.offset(addr, size.bytes() as usize)
            .is_some_and(|start| start >= self.read_only)
    }

    fn read8(&mut self, addr: PhysAddr) -> u8 {
        self.bytes::<1>(addr)[0]
    }

    fn read16(&mut self, addr: PhysAddr) -> u16 {
        u16::from_le_bytes(self.bytes(addr))
    }

    fn read32(&mut self, addr: PhysAddr) -> u32 {
        u32::from_le_bytes(self.bytes(addr))
    }

    fn write8(&mut self, addr: PhysAddr, value: u8) {
        self.store(addr, &[value]);
    }

    fn write16(&mut self, addr: PhysAddr, value: u16) {
        self.store(addr, &value.to_le_bytes());
    }

    fn write32(&mut self, addr: PhysAddr, value: u32) {
        self.store(addr, &value.to_le_bytes());
    }
}
