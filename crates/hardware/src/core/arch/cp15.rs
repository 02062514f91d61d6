//! System Control Coprocessor (cp15).
//!
//! This module implements the built-in coprocessor in slot 15. It provides:
//! 1. **Register Map:** A sparse map from composite id to an ARM926-class register set
//!    (identification, control, translation table base, domain access, fault status and
//!    address, cache/TLB maintenance, lockdown and process id registers).
//! 2. **Access Classes:** Read-only, read-write and write-only registers; writes to
//!    read-only registers are ignored.
//! 3. **Side Effects:** Classification of each write so the core can reconfigure the MMU,
//!    move the vector table or suspend for an interrupt in the same instruction.

use std::collections::BTreeMap;

use super::coproc::{Coprocessor, CoprocessorRegId};
use crate::core::units::mmu::{DomainAccess, MmuConfig};

/// Main ID register (c0, 0, c0, 0).
pub const MAIN_ID: CoprocessorRegId = CoprocessorRegId::new(0, 0, 0, 0);
/// Cache type register (c0, 0, c0, 1).
pub const CACHE_TYPE: CoprocessorRegId = CoprocessorRegId::new(0, 0, 0, 1);
/// TCM status register (c0, 0, c0, 2).
pub const TCM_STATUS: CoprocessorRegId = CoprocessorRegId::new(0, 0, 0, 2);
/// Control register (c1, 0, c0, 0).
pub const CONTROL: CoprocessorRegId = CoprocessorRegId::new(1, 0, 0, 0);
/// Translation table base (c2, 0, c0, 0).
pub const TTB: CoprocessorRegId = CoprocessorRegId::new(2, 0, 0, 0);
/// Domain access control (c3, 0, c0, 0).
pub const DACR: CoprocessorRegId = CoprocessorRegId::new(3, 0, 0, 0);
/// Fault status register (c5, 0, c0, 0).
pub const FSR: CoprocessorRegId = CoprocessorRegId::new(5, 0, 0, 0);
/// Fault address register (c6, 0, c0, 0).
pub const FAR: CoprocessorRegId = CoprocessorRegId::new(6, 0, 0, 0);
/// Wait for interrupt (c7, 0, c0, 4).
pub const WAIT_FOR_INTERRUPT: CoprocessorRegId = CoprocessorRegId::new(7, 0, 0, 4);
/// Wait for interrupt, ARM926 encoding (c7, 0, c8, 2).
pub const WAIT_FOR_INTERRUPT_ALT: CoprocessorRegId = CoprocessorRegId::new(7, 0, 8, 2);
/// Test and clean data cache (c7, 0, c10, 3).
pub const TEST_CLEAN_DCACHE: CoprocessorRegId = CoprocessorRegId::new(7, 0, 10, 3);
/// Test, clean and invalidate data cache (c7, 0, c14, 3).
pub const TEST_CLEAN_INVALIDATE_DCACHE: CoprocessorRegId = CoprocessorRegId::new(7, 0, 14, 3);
/// FCSE process id (c13, 0, c0, 0).
pub const FCSE_PID: CoprocessorRegId = CoprocessorRegId::new(13, 0, 0, 0);
/// Context id (c13, 0, c0, 1).
pub const CONTEXT_ID: CoprocessorRegId = CoprocessorRegId::new(13, 0, 0, 1);

/// Control register: MMU enable.
pub const CTRL_M: u32 = 1 << 0;
/// Control register: alignment fault checking.
pub const CTRL_A: u32 = 1 << 1;
/// Control register: data cache enable (accepted, no cache model).
pub const CTRL_C: u32 = 1 << 2;
/// Control register: write buffer enable (accepted, no model).
pub const CTRL_W: u32 = 1 << 3;
/// Control register: system protection.
pub const CTRL_S: u32 = 1 << 8;
/// Control register: ROM protection.
pub const CTRL_R: u32 = 1 << 9;
/// Control register: instruction cache enable (accepted, no cache model).
pub const CTRL_I: u32 = 1 << 12;
/// Control register: high exception vectors.
pub const CTRL_V: u32 = 1 << 13;

/// Control register bits that read as one regardless of writes.
const CTRL_SBO: u32 = 0x0005_0078;

/// Value returned by the test-and-clean operations: bit 30 (Z) set means "cache clean".
const TEST_CLEAN_DONE: u32 = 1 << 30;

/// Translation table base alignment mask (16 KiB).
const TTB_MASK: u32 = 0xFFFF_C000;

/// Access class of a cp15 register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterAccess {
    /// MRC only; MCR is ignored.
    ReadOnly,
    /// MRC and MCR.
    ReadWrite,
    /// MCR only (maintenance operations); MRC reads zero.
    WriteOnly,
}

#[derive(Clone, Copy, Debug)]
struct Register {
    value: u32,
    access: RegisterAccess,
}

/// What the core must do after a cp15 write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemControlEffect {
    /// Nothing beyond storing the value.
    None,
    /// MMU configuration or the vector base changed.
    Reconfigure,
    /// Suspend until an interrupt line is asserted.
    WaitForInterrupt,
}

/// The system control coprocessor.
#[derive(Clone, Debug)]
pub struct SystemControl {
    regs: BTreeMap<CoprocessorRegId, Register>,
}

impl SystemControl {
    /// Creates cp15 with its reset register contents.
    ///
    /// # Arguments
    ///
    /// * `main_id` - Value of the main ID register.
    /// * `cache_type` - Value of the cache type register.
    /// * `high_vectors` - Initial state of the V bit.
    pub fn new(main_id: u32, cache_type: u32, high_vectors: bool) -> Self {
        use RegisterAccess::{ReadOnly, ReadWrite, WriteOnly};

        let control = CTRL_SBO | if high_vectors { CTRL_V } else { 0 };
        let mut regs = BTreeMap::new();
        let mut add = |id: CoprocessorRegId, value: u32, access: RegisterAccess| {
            let _ = regs.insert(id, Register { value, access });
        };

        add(MAIN_ID, main_id, ReadOnly);
        add(CACHE_TYPE, cache_type, ReadOnly);
        add(TCM_STATUS, 0, ReadOnly);
        add(CONTROL, control, ReadWrite);
        add(TTB, 0, ReadWrite);
        add(DACR, 0, ReadWrite);
        add(FSR, 0, ReadWrite);
        add(FAR, 0, ReadWrite);

        // Cache, write buffer and wait-for-interrupt operations.
        for (crm, opcode2) in [
            (0, 4),
            (5, 0),
            (5, 1),
            (5, 2),
            (5, 4),
            (5, 6),
            (5, 7),
            (6, 0),
            (6, 1),
            (6, 2),
            (7, 0),
            (8, 2),
            (10, 1),
            (10, 2),
            (10, 4),
            (13, 1),
            (14, 1),
            (14, 2),
        ] {
            add(CoprocessorRegId::new(7, 0, crm, opcode2), 0, WriteOnly);
        }
        add(TEST_CLEAN_DCACHE, TEST_CLEAN_DONE, ReadOnly);
        add(TEST_CLEAN_INVALIDATE_DCACHE, TEST_CLEAN_DONE, ReadOnly);

        // TLB maintenance.
        for (crm, opcode2) in [(5, 0), (5, 1), (6, 0), (6, 1), (7, 0), (7, 1)] {
            add(CoprocessorRegId::new(8, 0, crm, opcode2), 0, WriteOnly);
        }

        // Cache lockdown, TCM regions, TLB lockdown.
        add(CoprocessorRegId::new(9, 0, 0, 0), 0, ReadWrite);
        add(CoprocessorRegId::new(9, 0, 0, 1), 0, ReadWrite);
        add(CoprocessorRegId::new(9, 0, 1, 0), 0, ReadWrite);
        add(CoprocessorRegId::new(9, 0, 1, 1), 0, ReadWrite);
        add(CoprocessorRegId::new(10, 0, 0, 0), 0, ReadWrite);

        add(FCSE_PID, 0, ReadWrite);
        add(CONTEXT_ID, 0, ReadWrite);

        Self { regs }
    }

    /// Returns the access class of `id`, or `None` if unimplemented.
    pub fn access(&self, id: CoprocessorRegId) -> Option<RegisterAccess> {
        self.regs.get(&id).map(|r| r.access)
    }

    /// Classifies the side effect of a write to `id`.
    pub fn effect_of_write(id: CoprocessorRegId) -> SystemControlEffect {
        match id {
            CONTROL | TTB | DACR => SystemControlEffect::Reconfigure,
            WAIT_FOR_INTERRUPT | WAIT_FOR_INTERRUPT_ALT => SystemControlEffect::WaitForInterrupt,
            _ => SystemControlEffect::None,
        }
    }

    fn value(&self, id: CoprocessorRegId) -> u32 {
        self.regs.get(&id).map_or(0, |r| r.value)
    }

    /// Current control register value.
    pub fn control(&self) -> u32 {
        self.value(CONTROL)
    }

    /// Returns `true` if the V bit selects the high vector base.
    pub fn high_vectors(&self) -> bool {
        self.control() & CTRL_V != 0
    }

    /// Builds the MMU configuration described by the control, TTB and DACR registers.
    pub fn mmu_config(&self) -> MmuConfig {
        let control = self.control();
        let dacr = self.value(DACR);
        let mut domains = [DomainAccess::NoAccess; 16];
        for (index, domain) in domains.iter_mut().enumerate() {
            *domain = DomainAccess::from_bits(dacr >> (index * 2));
        }
        MmuConfig {
            enabled: control & CTRL_M != 0,
            alignment_check: control & CTRL_A != 0,
            system_protect: control & CTRL_S != 0,
            rom_protect: control & CTRL_R != 0,
            table_base: self.value(TTB) & TTB_MASK,
            domains,
        }
    }

    /// Latches a translation fault into FSR and FAR.
    ///
    /// # Arguments
    ///
    /// * `status` - Full FSR value (domain in bits 7:4, status in 3:0).
    /// * `address` - Faulting virtual address.
    pub fn record_fault(&mut self, status: u32, address: u32) {
        self.store(FSR, status);
        self.store(FAR, address);
    }

    fn store(&mut self, id: CoprocessorRegId, value: u32) {
        if let Some(reg) = self.regs.get_mut(&id) {
            reg.value = value;
        }
    }
}

impl Coprocessor for SystemControl {
    fn name(&self) -> &'static str {
        "cp15"
    }

    fn is_valid_id(&self, id: CoprocessorRegId) -> bool {
        self.regs.contains_key(&id)
    }

    fn get_register(&self, id: CoprocessorRegId) -> u32 {
        match self.regs.get(&id) {
            Some(Register {
                access: RegisterAccess::WriteOnly,
                ..
            })
            | None => 0,
            Some(reg) => reg.value,
        }
    }

    fn set_register(&mut self, id: CoprocessorRegId, value: u32) {
        let Some(reg) = self.regs.get_mut(&id) else {
            return;
        };
        match reg.access {
            RegisterAccess::ReadOnly => {
                tracing::warn!(%id, value, "cp15: write to read-only register ignored");
            }
            RegisterAccess::WriteOnly => {
                tracing::trace!(%id, value, "cp15: maintenance operation");
            }
            RegisterAccess::ReadWrite => {
                reg.value = if id == CONTROL { value | CTRL_SBO } else { value };
                tracing::debug!(%id, value = reg.value, "cp15: register write");
            }
        }
    }
}
