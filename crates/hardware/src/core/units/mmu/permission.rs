//! Domain and access-permission checks.
//!
//! A descriptor names one of sixteen domains; the domain access control register gives
//! each domain a 2-bit class. Client domains defer to the descriptor's AP bits, which are
//! evaluated together with the cp15 S (system) and R (ROM) protection bits.

use crate::common::AccessType;

/// Access class of a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainAccess {
    /// Any access faults.
    NoAccess,
    /// Accesses are checked against the descriptor's AP bits.
    Client,
    /// Reserved encoding; treated as no access.
    Reserved,
    /// Accesses are never permission-checked.
    Manager,
}

impl DomainAccess {
    /// Decodes the low two bits of `bits`.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Self::NoAccess,
            0b01 => Self::Client,
            0b10 => Self::Reserved,
            _ => Self::Manager,
        }
    }
}

/// Evaluates a 2-bit AP field.
///
/// | AP | S | R | privileged | user |
/// |----|---|---|------------|------|
/// | 00 | 0 | 0 | none       | none |
/// | 00 | 1 | 0 | read       | none |
/// | 00 | 0 | 1 | read       | read |
/// | 00 | 1 | 1 | none       | none |
/// | 01 | x | x | read/write | none |
/// | 10 | x | x | read/write | read |
/// | 11 | x | x | read/write | read/write |
///
/// # Arguments
///
/// * `ap` - The AP field (only the low two bits are used).
/// * `access` - Fetches count as reads.
/// * `privileged` - Whether the access is made with privilege.
/// * `system_protect` - cp15 S bit.
/// * `rom_protect` - cp15 R bit.
pub const fn access_permitted(
    ap: u32,
    access: AccessType,
    privileged: bool,
    system_protect: bool,
    rom_protect: bool,
) -> bool {
    let read = access.is_read();
    match ap & 0b11 {
        0b00 => match (system_protect, rom_protect) {
            (true, false) => read && privileged,
            (false, true) => read,
            _ => false,
        },
        0b01 => privileged,
        0b10 => privileged || read,
        _ => true,
    }
}
