//! Branch and Interworking Tests.

use armsim_core::core::arch::psr::Flags;
use armsim_core::core::cpu::StepOutcome;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::{arm, thumb};
use crate::common::harness::{PROGRAM_BASE, TestContext};

// ══════════════════════════════════════════════════════════
// 1. ARM state
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0x9000)]
#[case(0x8004)]
#[case(0x7000)]
fn b_reaches_target(#[case] target: u32) {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::b(PROGRAM_BASE, target)]);
    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert_eq!(ctx.pc(), target);
    assert_eq!(ctx.cpu.stats.inst_branch, 1);
}

#[test]
fn bl_links_next_instruction() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::bl(PROGRAM_BASE, 0x9000)]);
    let _ = ctx.step();
    assert_eq!(ctx.pc(), 0x9000);
    assert_eq!(ctx.get_reg(14), PROGRAM_BASE + 4);
}

#[test]
fn branch_to_self() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::b(PROGRAM_BASE, PROGRAM_BASE)]);
    ctx.run(3);
    assert_eq!(ctx.pc(), PROGRAM_BASE);
}

#[test]
fn bx_enters_thumb_and_back() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::bx(1)]);
    ctx.set_reg(1, 0x9001);
    let _ = ctx.step();
    assert!(ctx.cpu.regs.is_thumb());
    assert_eq!(ctx.pc(), 0x9000);

    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[thumb::bx(14)]);
    ctx.set_reg(14, 0x9000);
    let _ = ctx.step();
    assert!(!ctx.cpu.regs.is_thumb());
    assert_eq!(ctx.pc(), 0x9000);
}

#[test]
fn blx_register_links_and_switches() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::blx_reg(2)]);
    ctx.set_reg(2, 0xA001);
    let _ = ctx.step();
    assert_eq!(ctx.get_reg(14), PROGRAM_BASE + 4);
    assert!(ctx.cpu.regs.is_thumb());
    assert_eq!(ctx.pc(), 0xA000);
}

#[rstest]
#[case(0x9000)]
#[case(0x9002)]
fn blx_immediate_enters_thumb(#[case] target: u32) {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::blx_imm(PROGRAM_BASE, target)]);
    let _ = ctx.step();
    assert!(ctx.cpu.regs.is_thumb());
    assert_eq!(ctx.pc(), target);
    assert_eq!(ctx.get_reg(14), PROGRAM_BASE + 4);
}

// ══════════════════════════════════════════════════════════
// 2. Thumb and Thumb-2
// ══════════════════════════════════════════════════════════

#[test]
fn thumb_bl_links_with_thumb_bit() {
    let [first, second] = thumb::bl(PROGRAM_BASE, 0xA000);
    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[first, second]);
    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert_eq!(ctx.pc(), 0xA000);
    assert_eq!(ctx.get_reg(14), (PROGRAM_BASE + 4) | 1);
    assert!(ctx.cpu.regs.is_thumb());
}

#[test]
fn thumb_bl_backwards() {
    let [first, second] = thumb::bl(PROGRAM_BASE, 0x4000);
    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[first, second]);
    let _ = ctx.step();
    assert_eq!(ctx.pc(), 0x4000);
}

#[test]
fn thumb_blx_enters_arm() {
    let [first, second] = thumb::blx(PROGRAM_BASE, 0xB000);
    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[first, second]);
    let _ = ctx.step();
    assert!(!ctx.cpu.regs.is_thumb());
    assert_eq!(ctx.pc(), 0xB000);
    assert_eq!(ctx.get_reg(14), (PROGRAM_BASE + 4) | 1);
}

#[test]
fn thumb2_wide_branch() {
    let [first, second] = thumb::b_wide(PROGRAM_BASE, 0x1_0000);
    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[first, second]);
    let _ = ctx.step();
    assert_eq!(ctx.pc(), 0x1_0000);
    assert_eq!(ctx.get_reg(14), 0);
}

#[test]
fn thumb2_conditional_branch() {
    // beq.w +8
    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[0xF000, 0x8004]);
    let _ = ctx.step();
    assert_eq!(ctx.pc(), PROGRAM_BASE + 4);

    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[0xF000, 0x8004]);
    ctx.cpu.regs.set_flags(Flags {
        z: true,
        ..Flags::default()
    });
    let _ = ctx.step();
    assert_eq!(ctx.pc(), PROGRAM_BASE + 4 + 8);
}
