//! Memory Management Unit (MMU).
//!
//! This module implements virtual-to-physical address translation for the ARMv5 two-level
//! table format. It provides:
//! 1. **Configuration:** An `MmuConfig` snapshot rebuilt from cp15 whenever the control,
//!    translation table base or domain access registers change.
//! 2. **Translation:** Identity mapping when disabled, alignment checking, and the table
//!    walk with domain and access-permission enforcement.
//! 3. **Fault State:** A sticky fault flag that the caller must clear before translating
//!    again; the fault details feed cp15 FSR/FAR and the abort reason.

/// Fault status codes and fault records.
pub mod fault;

/// Domain classes and the AP permission table.
pub mod permission;

/// First- and second-level descriptor walk.
pub mod walk;

pub use self::fault::{FaultStatus, MmuFault};
pub use self::permission::DomainAccess;

use crate::common::{AccessSize, AccessType, CoreError, CoreResult, PhysAddr, VirtAddr};
use crate::soc::traits::Bus;

/// MMU state derived from cp15.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MmuConfig {
    /// Translation enabled (control M bit).
    pub enabled: bool,
    /// Alignment checking enabled (control A bit).
    pub alignment_check: bool,
    /// System protection (control S bit).
    pub system_protect: bool,
    /// ROM protection (control R bit).
    pub rom_protect: bool,
    /// Translation table base (16 KiB aligned).
    pub table_base: u32,
    /// Access class for each of the 16 domains.
    pub domains: [DomainAccess; 16],
}

impl Default for MmuConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            alignment_check: false,
            system_protect: false,
            rom_protect: false,
            table_base: 0,
            domains: [DomainAccess::NoAccess; 16],
        }
    }
}

/// Outcome of a translation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranslationResult {
    /// The access may proceed at this physical address.
    Mapped(PhysAddr),
    /// The access faulted; the MMU is now in the faulted state.
    Fault(MmuFault),
}

impl TranslationResult {
    /// Physical address if the translation succeeded.
    pub const fn paddr(self) -> Option<PhysAddr> {
        match self {
            Self::Mapped(pa) => Some(pa),
            Self::Fault(_) => None,
        }
    }
}

/// Memory Management Unit for virtual-to-physical address translation.
#[derive(Debug, Default)]
pub struct Mmu {
    config: MmuConfig,
    last_fault: Option<MmuFault>,
}

impl Mmu {
    /// Creates a disabled MMU with no fault latched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the translation configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - New state, normally `SystemControl::mmu_config()`.
    pub fn configure(&mut self, config: MmuConfig) {
        tracing::debug!(
            enabled = config.enabled,
            table_base = format_args!("{:#010x}", config.table_base),
            "mmu reconfigured"
        );
        self.config = config;
    }

    /// Current configuration.
    pub fn config(&self) -> &MmuConfig {
        &self.config
    }

    /// Returns `true` while a fault is latched.
    pub fn is_faulted(&self) -> bool {
        self.last_fault.is_some()
    }

    /// The latched fault, if any.
    pub fn last_fault(&self) -> Option<MmuFault> {
        self.last_fault
    }

    /// Clears the sticky fault flag.
    pub fn clear_fault(&mut self) {
        self.last_fault = None;
    }

    /// Translates a virtual address for an access of the given size and kind.
    ///
    /// Translation is a pure function of the configuration and the table contents: the
    /// same request against unchanged state yields the same result.
    ///
    /// # Arguments
    ///
    /// * `va` - Virtual address.
    /// * `size` - Access width, used by the alignment check.
    /// * `access` - Fetch, read or write.
    /// * `privileged` - Whether the access is made with privilege (false for user mode
    ///   and the `T` load/store variants).
    /// * `bus` - Bus used to read translation table descriptors.
    ///
    /// # Returns
    ///
    /// `Ok(Mapped)` or `Ok(Fault)` for architected outcomes; `Err` if called while a
    /// previous fault is still latched.
    pub fn translate(
        &mut self,
        va: VirtAddr,
        size: AccessSize,
        access: AccessType,
        privileged: bool,
        bus: &mut dyn Bus,
    ) -> CoreResult<TranslationResult> {
        if self.last_fault.is_some() {
            return Err(CoreError::TranslationWhileFaulted { va: va.val() });
        }
        if !self.config.enabled {
            return Ok(TranslationResult::Mapped(PhysAddr::new(va.val())));
        }

        let outcome = if self.config.alignment_check && !va.is_aligned(size.bytes()) {
            Err(MmuFault {
                status: FaultStatus::Alignment,
                domain: 0,
                address: va,
                access,
            })
        } else {
            walk::walk(&self.config, va, access, privileged, bus)
        };

        match outcome {
            Ok(pa) => Ok(TranslationResult::Mapped(pa)),
            Err(fault) => {
                tracing::debug!(%fault, "translation fault");
                self.last_fault = Some(fault);
                Ok(TranslationResult::Fault(fault))
            }
        }
    }
}
