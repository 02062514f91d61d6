//! Two-level translation table walk.
//!
//! The walker resolves one virtual address against the tables in guest memory. It handles:
//! 1. **First level:** 4096 word descriptors indexed by `va[31:20]`; fault, coarse table,
//!    section, or fine table.
//! 2. **Second level:** coarse tables (256 entries, `va[19:12]`) and fine tables
//!    (1024 entries, `va[19:10]`) holding large (64 KiB), small (4 KiB) and tiny (1 KiB)
//!    page descriptors.
//! 3. **Protection:** domain classes and AP sub-fields via `permission`.
//!
//! Descriptor reads go straight to the bus; a failed probe is reported as an external abort.

use super::MmuConfig;
use super::fault::{FaultStatus, MmuFault};
use super::permission::{DomainAccess, access_permitted};
use crate::common::{AccessSize, AccessType, PhysAddr, VirtAddr};
use crate::soc::traits::Bus;

/// Mask applied to the translation table base register.
pub const TABLE_BASE_MASK: u32 = 0xFFFF_C000;

/// A first-level descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirstLevel(pub u32);

impl FirstLevel {
    /// Descriptor type `00`.
    pub const FAULT: u32 = 0b00;
    /// Descriptor type `01`.
    pub const COARSE: u32 = 0b01;
    /// Descriptor type `10`.
    pub const SECTION: u32 = 0b10;
    /// Descriptor type `11`.
    pub const FINE: u32 = 0b11;

    /// Descriptor type (bits 1:0).
    #[inline]
    pub const fn kind(self) -> u32 {
        self.0 & 0b11
    }

    /// Domain number (bits 8:5).
    #[inline]
    pub const fn domain(self) -> u32 {
        (self.0 >> 5) & 0xF
    }

    /// Section AP field (bits 11:10).
    #[inline]
    pub const fn section_ap(self) -> u32 {
        (self.0 >> 10) & 0b11
    }

    /// Section base address (bits 31:20).
    #[inline]
    pub const fn section_base(self) -> u32 {
        self.0 & 0xFFF0_0000
    }

    /// Address of the second-level entry for `va`.
    ///
    /// # Arguments
    ///
    /// * `va` - Virtual address being translated.
    pub const fn second_level_address(self, va: VirtAddr) -> u32 {
        let va = va.val();
        if self.kind() == Self::FINE {
            (self.0 & 0xFFFF_F000) | (((va >> 10) & 0x3FF) << 2)
        } else {
            (self.0 & 0xFFFF_FC00) | (((va >> 12) & 0xFF) << 2)
        }
    }
}

/// A second-level (page) descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecondLevel(pub u32);

impl SecondLevel {
    /// Descriptor type `00`.
    pub const FAULT: u32 = 0b00;
    /// Descriptor type `01`, 64 KiB page.
    pub const LARGE: u32 = 0b01;
    /// Descriptor type `10`, 4 KiB page.
    pub const SMALL: u32 = 0b10;
    /// Descriptor type `11`, 1 KiB page.
    pub const TINY: u32 = 0b11;

    /// Descriptor type (bits 1:0).
    #[inline]
    pub const fn kind(self) -> u32 {
        self.0 & 0b11
    }

    /// AP field that governs `va`.
    ///
    /// Large and small pages split into four subpages, each with its own AP pair in
    /// bits 5:4, 7:6, 9:8 and 11:10. Tiny pages have a single AP pair in bits 5:4.
    pub const fn ap_for(self, va: VirtAddr) -> u32 {
        let subpage = match self.kind() {
            Self::LARGE => (va.val() >> 14) & 0b11,
            Self::SMALL => (va.val() >> 10) & 0b11,
            _ => 0,
        };
        (self.0 >> (4 + subpage * 2)) & 0b11
    }

    /// Physical address of `va` within this page.
    pub const fn physical(self, va: VirtAddr) -> u32 {
        let va = va.val();
        match self.kind() {
            Self::LARGE => (self.0 & 0xFFFF_0000) | (va & 0x0000_FFFF),
            Self::SMALL => (self.0 & 0xFFFF_F000) | (va & 0x0000_0FFF),
            _ => (self.0 & 0xFFFF_FC00) | (va & 0x0000_03FF),
        }
    }
}

/// Walks the translation tables for one access.
///
/// # Arguments
///
/// * `config` - Current MMU state (table base, domains, S/R bits).
/// * `va` - Virtual address to translate.
/// * `access` - Access type; fetches and loads are reads.
/// * `privileged` - Whether the access is privileged.
/// * `bus` - Bus used to read descriptors.
///
/// # Returns
///
/// The physical address, or the fault describing why the access was refused.
pub fn walk(
    config: &MmuConfig,
    va: VirtAddr,
    access: AccessType,
    privileged: bool,
    bus: &mut dyn Bus,
) -> Result<PhysAddr, MmuFault> {
    let fault = |status, domain| MmuFault {
        status,
        domain,
        address: va,
        access,
    };

    let l1_addr = PhysAddr::new((config.table_base & TABLE_BASE_MASK) | (va.section_index() << 2));
    if !bus.try_read(l1_addr, AccessSize::Word) {
        return Err(fault(FaultStatus::ExternalFirstLevel, 0));
    }
    let first = FirstLevel(bus.read32(l1_addr));
    let domain = first.domain();

    match first.kind() {
        FirstLevel::FAULT => Err(fault(FaultStatus::SectionTranslation, 0)),
        FirstLevel::SECTION => {
            check(
                config,
                domain,
                first.section_ap(),
                access,
                privileged,
                FaultStatus::SectionDomain,
                FaultStatus::SectionPermission,
            )
            .map_err(|status| fault(status, domain))?;
            Ok(PhysAddr::new(first.section_base() | va.section_offset()))
        }
        _ => {
            let l2_addr = PhysAddr::new(first.second_level_address(va));
            if !bus.try_read(l2_addr, AccessSize::Word) {
                return Err(fault(FaultStatus::ExternalSecondLevel, domain));
            }
            let second = SecondLevel(bus.read32(l2_addr));
            let tiny_in_coarse =
                second.kind() == SecondLevel::TINY && first.kind() == FirstLevel::COARSE;
            if second.kind() == SecondLevel::FAULT || tiny_in_coarse {
                return Err(fault(FaultStatus::PageTranslation, domain));
            }
            check(
                config,
                domain,
                second.ap_for(va),
                access,
                privileged,
                FaultStatus::PageDomain,
                FaultStatus::PagePermission,
            )
            .map_err(|status| fault(status, domain))?;
            Ok(PhysAddr::new(second.physical(va)))
        }
    }
}

fn check(
    config: &MmuConfig,
    domain: u32,
    ap: u32,
    access: AccessType,
    privileged: bool,
    domain_fault: FaultStatus,
    permission_fault: FaultStatus,
) -> Result<(), FaultStatus> {
    match config.domains[domain as usize & 0xF] {
        DomainAccess::Manager => Ok(()),
        DomainAccess::Client => {
            if access_permitted(
                ap,
                access,
                privileged,
                config.system_protect,
                config.rom_protect,
            ) {
                Ok(())
            } else {
                Err(permission_fault)
            }
        }
        DomainAccess::NoAccess | DomainAccess::Reserved => Err(domain_fault),
    }
}
