//! Translation faults.
//!
//! Status codes are the ARMv5 fault status register encodings; the domain that caused
//! the fault sits in FSR bits 7:4.

use crate::common::{AccessType, VirtAddr};

/// Fault status register codes (FSR bits 3:0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultStatus {
    /// Misaligned access with alignment checking enabled.
    Alignment = 0b0001,
    /// First-level descriptor type `00`.
    SectionTranslation = 0b0101,
    /// Second-level descriptor type `00`, or a tiny page in a coarse table.
    PageTranslation = 0b0111,
    /// Section in a no-access or reserved domain.
    SectionDomain = 0b1001,
    /// Page in a no-access or reserved domain.
    PageDomain = 0b1011,
    /// External abort reading the first-level descriptor.
    ExternalFirstLevel = 0b1100,
    /// Section access permissions denied the access.
    SectionPermission = 0b1101,
    /// External abort reading the second-level descriptor.
    ExternalSecondLevel = 0b1110,
    /// Page access permissions denied the access.
    PagePermission = 0b1111,
}

impl FaultStatus {
    /// Short description for logs and exception reasons.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Alignment => "alignment fault",
            Self::SectionTranslation => "section translation fault",
            Self::PageTranslation => "page translation fault",
            Self::SectionDomain => "section domain fault",
            Self::PageDomain => "page domain fault",
            Self::ExternalFirstLevel => "external abort on first-level walk",
            Self::SectionPermission => "section permission fault",
            Self::ExternalSecondLevel => "external abort on second-level walk",
            Self::PagePermission => "page permission fault",
        }
    }
}

/// A failed translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MmuFault {
    /// Fault status code.
    pub status: FaultStatus,
    /// Domain of the descriptor involved (0 when no descriptor was read).
    pub domain: u32,
    /// Faulting virtual address.
    pub address: VirtAddr,
    /// Access that faulted.
    pub access: AccessType,
}

impl MmuFault {
    /// Full fault status register value: domain in bits 7:4, status in bits 3:0.
    pub const fn fsr(&self) -> u32 {
        ((self.domain & 0xF) << 4) | self.status as u32
    }
}

impl std::fmt::Display for MmuFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {:#010x} (domain {}, {:?})",
            self.status.description(),
            self.address.val(),
            self.domain,
            self.access
        )
    }
}
