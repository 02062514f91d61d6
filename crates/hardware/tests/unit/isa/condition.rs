//! Condition Code Tests.

use armsim_core::core::arch::Flags;
use armsim_core::isa::Condition;
use rstest::rstest;

const fn flags(n: bool, z: bool, c: bool, v: bool) -> Flags {
    Flags { n, z, c, v }
}

#[rstest]
#[case(0x0, flags(false, true, false, false), true)]
#[case(0x0, flags(false, false, false, false), false)]
#[case(0x1, flags(false, false, false, false), true)]
#[case(0x2, flags(false, false, true, false), true)]
#[case(0x3, flags(false, false, true, false), false)]
#[case(0x4, flags(true, false, false, false), true)]
#[case(0x5, flags(true, false, false, false), false)]
#[case(0x6, flags(false, false, false, true), true)]
#[case(0x7, flags(false, false, false, true), false)]
#[case(0x8, flags(false, false, true, false), true)]
#[case(0x8, flags(false, true, true, false), false)]
#[case(0x9, flags(false, true, true, false), true)]
#[case(0x9, flags(false, false, false, false), true)]
#[case(0xA, flags(true, false, false, true), true)]
#[case(0xA, flags(true, false, false, false), false)]
#[case(0xB, flags(false, false, false, true), true)]
#[case(0xC, flags(false, false, false, false), true)]
#[case(0xC, flags(false, true, false, false), false)]
#[case(0xD, flags(false, true, false, false), true)]
#[case(0xD, flags(true, false, false, true), false)]
#[case(0xE, flags(true, true, true, true), true)]
#[case(0xF, flags(true, true, true, true), false)]
fn condition_truth_table(#[case] bits: u32, #[case] flags: Flags, #[case] expected: bool) {
    assert_eq!(Condition::from_bits(bits).passes(flags), expected);
}

/// Architectural truth table, written out independently of `Condition::passes`.
fn reference_passes(bits: u32, n: bool, z: bool, c: bool, v: bool) -> bool {
    match bits {
        0x0 => z,
        0x1 => !z,
        0x2 => c,
        0x3 => !c,
        0x4 => n,
        0x5 => !n,
        0x6 => v,
        0x7 => !v,
        0x8 => c && !z,
        0x9 => !c || z,
        0xA => n == v,
        0xB => n != v,
        0xC => !z && n == v,
        0xD => z || n != v,
        0xE => true,
        _ => false,
    }
}

#[test]
fn every_condition_against_every_flag_combination() {
    for bits in 0..16 {
        for nzcv in 0u32..16 {
            let (n, z, c, v) = (nzcv & 8 != 0, nzcv & 4 != 0, nzcv & 2 != 0, nzcv & 1 != 0);
            assert_eq!(
                Condition::from_bits(bits).passes(flags(n, z, c, v)),
                reference_passes(bits, n, z, c, v),
                "cond {bits:#x} nzcv {nzcv:#06b}"
            );
        }
    }
}

#[test]
fn from_bits_ignores_upper_bits() {
    assert_eq!(Condition::from_bits(0x1E), Condition::Al);
    for (i, cond) in Condition::ALL.iter().enumerate() {
        assert_eq!(*cond as usize, i);
    }
}

#[test]
fn suffixes() {
    assert_eq!(Condition::Al.suffix(), "");
    assert_eq!(Condition::Ne.suffix(), "ne");
    assert_eq!(Condition::Le.suffix(), "le");
}
