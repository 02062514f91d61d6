//! Block Transfer Execution Tests.

use armsim_core::core::arch::{Bank, ProcessorMode, Psr};
use armsim_core::core::cpu::StepOutcome;
use pretty_assertions::assert_eq;

use crate::common::builder::arm;
use crate::common::harness::{PROGRAM_BASE, TestContext};

const STACK: u32 = 0x2_0000;

// ══════════════════════════════════════════════════════════
// 1. Push and pop
// ══════════════════════════════════════════════════════════

#[test]
fn stmdb_then_ldmia_round_trip() {
    let mut ctx = TestContext::new().load_arm(
        PROGRAM_BASE,
        &[
            arm::stmdb_wb(13, 0b0000_0000_0000_0111),
            arm::mov_imm(0, 0),
            arm::mov_imm(1, 0),
            arm::mov_imm(2, 0),
            arm::ldmia_wb(13, 0b0000_0000_0000_0111),
        ],
    );
    ctx.set_reg(13, STACK);
    for (reg, value) in [(0, 10), (1, 20), (2, 30)] {
        ctx.set_reg(reg, value);
    }

    let _ = ctx.step();
    assert_eq!(ctx.get_reg(13), STACK - 12);
    // Lowest register at the lowest address.
    assert_eq!(ctx.read_word(STACK - 12), 10);
    assert_eq!(ctx.read_word(STACK - 4), 30);

    ctx.run(4);
    assert_eq!((ctx.get_reg(0), ctx.get_reg(1), ctx.get_reg(2)), (10, 20, 30));
    assert_eq!(ctx.get_reg(13), STACK);
}

#[test]
fn increment_before_and_decrement_after() {
    let mut ctx = TestContext::new().load_arm(
        PROGRAM_BASE,
        &[
            arm::block(false, 1, 0b11, true, true, true, false),
            arm::block(false, 2, 0b11, false, false, false, false),
        ],
    );
    ctx.set_reg(0, 0xA);
    ctx.set_reg(1, STACK);
    ctx.set_reg(2, STACK + 0x100);
    ctx.run(2);
    // stmib r1!, {r0, r1}
    assert_eq!(ctx.read_word(STACK + 4), 0xA);
    assert_eq!(ctx.read_word(STACK + 8), STACK);
    assert_eq!(ctx.get_reg(1), STACK + 8);
    // stmda r2, {r0, r1}
    assert_eq!(ctx.read_word(STACK + 0xFC), 0xA);
    assert_eq!(ctx.read_word(STACK + 0x100), STACK + 8);
    assert_eq!(ctx.get_reg(2), STACK + 0x100);
}

#[test]
fn loaded_base_wins_over_writeback() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::ldmia_wb(1, 0b11)]);
    ctx.write_word(STACK, 0x11);
    ctx.write_word(STACK + 4, 0x22);
    ctx.set_reg(1, STACK);
    let _ = ctx.step();
    assert_eq!((ctx.get_reg(0), ctx.get_reg(1)), (0x11, 0x22));
}

#[test]
fn ldm_into_pc_branches() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::ldmia_wb(13, 1 << 15)]);
    ctx.write_word(STACK, 0x9000);
    ctx.set_reg(13, STACK);
    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert_eq!(ctx.pc(), 0x9000);
    assert_eq!(ctx.get_reg(13), STACK + 4);
}

// ══════════════════════════════════════════════════════════
// 2. User bank and exception return
// ══════════════════════════════════════════════════════════

#[test]
fn stm_user_bank_stores_user_sp() {
    let mut ctx = TestContext::new().load_arm(
        PROGRAM_BASE,
        &[arm::block(false, 0, 1 << 13, false, true, false, true)],
    );
    ctx.cpu.regs.write_banked(Bank::User, 13, 0x7777);
    ctx.set_reg(13, 0x5555);
    ctx.set_reg(0, STACK);
    let _ = ctx.step();
    assert_eq!(ctx.read_word(STACK), 0x7777);
    assert_eq!(ctx.get_reg(13), 0x5555);
}

#[test]
fn ldm_user_bank_loads_user_lr() {
    let mut ctx = TestContext::new().load_arm(
        PROGRAM_BASE,
        &[arm::block(true, 0, 1 << 14, false, true, false, true)],
    );
    ctx.write_word(STACK, 0x4444);
    ctx.set_reg(0, STACK);
    ctx.set_reg(14, 0x1);
    let _ = ctx.step();
    assert_eq!(ctx.cpu.regs.read_banked(Bank::User, 14), 0x4444);
    assert_eq!(ctx.get_reg(14), 0x1);
}

#[test]
fn ldm_exception_return_restores_cpsr() {
    let mut ctx = TestContext::new().load_arm(
        PROGRAM_BASE,
        &[arm::block(true, 13, (1 << 15) | 1, false, true, true, true)],
    );
    ctx.write_word(STACK, 0x42);
    ctx.write_word(STACK + 4, 0xA000);
    ctx.set_reg(13, STACK);
    let user = Psr::RESET.with_mode(ProcessorMode::User).with_irq_disabled(false);
    ctx.cpu.regs.set_spsr(user).expect("svc has an spsr");

    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert_eq!(ctx.cpu.regs.mode(), ProcessorMode::User);
    assert_eq!(ctx.pc(), 0xA000);
    assert_eq!(ctx.get_reg(0), 0x42);
    assert_eq!(ctx.cpu.regs.read_banked(Bank::Supervisor, 13), STACK + 8);
}
