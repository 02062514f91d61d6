//! Memory Access Helpers.
//!
//! This module provides the interface between the executor and the memory subsystem.
//! It performs the following:
//! 1. **Address Translation:** Runs every access through the MMU, latching FSR/FAR and
//!    raising the matching abort on a translation fault.
//! 2. **Bus Probing:** Checks `try_read`/`try_write` before each transfer; a failed probe
//!    becomes a prefetch abort (fetches) or data abort (everything else).
//! 3. **Width Handling:** Byte, halfword and word transfers, with the ARMv5 rotation of
//!    unaligned word loads.
//!
//! Every helper returns `Ok(None)`/`Ok(false)` once an abort has been raised; the caller
//! must stop executing the instruction.

use super::Cpu;
use crate::common::{AccessSize, AccessType, CoreResult, PhysAddr, VirtAddr};
use crate::core::arch::ExceptionKind;
use crate::core::units::mmu::TranslationResult;

impl Cpu {
    /// Returns `true` if data accesses are made with privilege in the current mode.
    #[inline]
    pub(crate) fn is_privileged(&self) -> bool {
        self.regs.mode().is_privileged()
    }

    /// Translates a virtual address, raising an abort on fault.
    ///
    /// # Arguments
    ///
    /// * `va` - Virtual address.
    /// * `size` - Access width (alignment checking).
    /// * `access` - Fetch, read or write.
    /// * `privileged` - Whether the access is privileged.
    ///
    /// # Returns
    ///
    /// The physical address, or `None` if the translation faulted and an abort is now
    /// pending.
    pub fn translate(
        &mut self,
        va: u32,
        size: AccessSize,
        access: AccessType,
        privileged: bool,
    ) -> CoreResult<Option<PhysAddr>> {
        let result =
            self.mmu
                .translate(VirtAddr::new(va), size, access, privileged, self.bus.as_mut())?;
        match result {
            TranslationResult::Mapped(pa) => Ok(Some(pa)),
            TranslationResult::Fault(fault) => {
                self.cp15.record_fault(fault.fsr(), va);
                self.stats.mmu_faults += 1;
                self.raise_exception(abort_kind(access), fault.to_string())?;
                Ok(None)
            }
        }
    }

    /// Reads memory at a virtual address.
    ///
    /// The transfer is made at the address rounded down to `size`; callers that need the
    /// ARMv5 unaligned-word rotation use [`Cpu::load_word`].
    pub(crate) fn read_memory(
        &mut self,
        va: u32,
        size: AccessSize,
        access: AccessType,
        privileged: bool,
    ) -> CoreResult<Option<u32>> {
        let Some(pa) = self.translate(va, size, access, privileged)? else {
            return Ok(None);
        };
        let pa = PhysAddr::new(pa.val() & !(size.bytes() - 1));
        if !self.bus.try_read(pa, size) {
            self.raise_exception(
                abort_kind(access),
                format!("bus error reading {} bytes at {pa}", size.bytes()),
            )?;
            return Ok(None);
        }
        let value = match size {
            AccessSize::Byte => u32::from(self.bus.read8(pa)),
            AccessSize::Half => u32::from(self.bus.read16(pa)),
            AccessSize::Word => self.bus.read32(pa),
        };
        Ok(Some(value))
    }

    /// Writes memory at a virtual address.
    ///
    /// # Returns
    ///
    /// `false` if the write aborted.
    pub(crate) fn write_memory(
        &mut self,
        va: u32,
        size: AccessSize,
        value: u32,
        privileged: bool,
    ) -> CoreResult<bool> {
        let Some(pa) = self.translate(va, size, AccessType::Write, privileged)? else {
            return Ok(false);
        };
        let pa = PhysAddr::new(pa.val() & !(size.bytes() - 1));
        if !self.bus.try_write(pa, size) {
            self.raise_exception(
                ExceptionKind::DataAbort,
                format!("bus error writing {} bytes at {pa}", size.bytes()),
            )?;
            return Ok(false);
        }
        match size {
            AccessSize::Byte => self.bus.write8(pa, value as u8),
            AccessSize::Half => self.bus.write16(pa, value as u16),
            AccessSize::Word => self.bus.write32(pa, value),
        }
        Ok(true)
    }

    /// Loads a word, rotating right by 8 x (address mod 4) for unaligned addresses.
    pub(crate) fn load_word(&mut self, va: u32, privileged: bool) -> CoreResult<Option<u32>> {
        Ok(self
            .read_memory(va, AccessSize::Word, AccessType::Read, privileged)?
            .map(|word| word.rotate_right((va & 3) * 8)))
    }

    /// Fetches a halfword for Thumb execution.
    pub(crate) fn fetch_halfword(&mut self, va: u32) -> CoreResult<Option<u16>> {
        let privileged = self.is_privileged();
        Ok(self
            .read_memory(va, AccessSize::Half, AccessType::Fetch, privileged)?
            .map(|value| value as u16))
    }

    /// Fetches a word for ARM execution.
    pub(crate) fn fetch_word(&mut self, va: u32) -> CoreResult<Option<u32>> {
        let privileged = self.is_privileged();
        self.read_memory(va, AccessSize::Word, AccessType::Fetch, privileged)
    }
}

fn abort_kind(access: AccessType) -> ExceptionKind {
    if access.is_fetch() {
        ExceptionKind::PrefetchAbort
    } else {
        ExceptionKind::DataAbort
    }
}
