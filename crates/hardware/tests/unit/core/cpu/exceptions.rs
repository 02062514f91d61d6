//! Exception Raising, Entry and Return Tests.
//!
//! An exception raised by an instruction ends that step with the PC unchanged; the next
//! step performs entry and runs the first handler instruction.

use std::sync::Arc;

use armsim_core::common::CoreError;
use armsim_core::config::Config;
use armsim_core::core::Cpu;
use armsim_core::core::arch::coproc::Coprocessor;
use armsim_core::core::arch::cp15::{FAR, FSR};
use armsim_core::core::arch::{Bank, ExceptionKind, ProcessorMode};
use armsim_core::core::cpu::StepOutcome;
use armsim_core::soc::{IrqLine, Ram};
use pretty_assertions::assert_eq;

use crate::common::builder::{arm, tables, thumb};
use crate::common::harness::{PROGRAM_BASE, TEST_RAM_SIZE, TestContext};
use crate::common::mocks::interrupts::MockLines;

/// Places a NOP at every vector.
fn with_nop_vectors(mut ctx: TestContext) -> TestContext {
    for vector in (0..0x20).step_by(4) {
        ctx.write_word(vector, arm::NOP);
    }
    ctx
}

fn unmask_interrupts(ctx: &mut TestContext) {
    let cpsr = ctx
        .cpu
        .regs
        .cpsr()
        .with_irq_disabled(false)
        .with_fiq_disabled(false);
    ctx.cpu.regs.set_cpsr(cpsr).expect("valid cpsr");
}

// ══════════════════════════════════════════════════════════
// 1. Data abort through the MMU
// ══════════════════════════════════════════════════════════

#[test]
fn first_level_fault_raises_data_abort() {
    let mut ctx = with_nop_vectors(TestContext::new().load_arm(
        PROGRAM_BASE,
        &[
            arm::mcr(15, 0, 2, 2, 0, 0),
            arm::mcr(15, 0, 3, 3, 0, 0),
            arm::mcr(15, 0, 4, 1, 0, 0),
            arm::ldr_imm(0, 1, 0),
        ],
    ));
    tables::identity_map(ctx.cpu.bus_mut(), 1);
    ctx.set_reg(1, 0x0010_0000);
    ctx.set_reg(2, tables::TABLE_BASE);
    ctx.set_reg(3, tables::DACR_ALL_CLIENT);
    ctx.set_reg(4, 0x0005_0079);
    ctx.run(3);
    assert!(ctx.cpu.mmu.config().enabled);

    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::DataAbort));
    assert_eq!(ctx.cpu.cp15.get_register(FSR), 5);
    assert_eq!(ctx.cpu.cp15.get_register(FAR), 0x0010_0000);
    assert_eq!(ctx.cpu.pending_exception(), Some(ExceptionKind::DataAbort));
    assert!(ctx.cpu.mmu.is_faulted());
    assert_eq!(ctx.pc(), PROGRAM_BASE + 12);
    assert_eq!(ctx.cpu.stats.mmu_faults, 1);

    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert!(!ctx.cpu.mmu.is_faulted());
    assert_eq!(ctx.cpu.regs.mode(), ProcessorMode::Abort);
    assert_eq!(ctx.get_reg(14), PROGRAM_BASE + 12 + 8);
    assert_eq!(ctx.pc(), 0x14);
    assert_eq!(
        ctx.cpu.regs.spsr().expect("abort spsr").mode(),
        Some(ProcessorMode::Supervisor)
    );
}

#[test]
fn second_raise_while_pending_is_an_error() {
    let mut ctx = TestContext::new();
    ctx.cpu
        .raise_exception(ExceptionKind::DataAbort, "first")
        .expect("nothing pending");
    let err = ctx
        .cpu
        .raise_exception(ExceptionKind::Undefined, "second")
        .expect_err("already pending");
    assert!(matches!(
        err,
        CoreError::ExceptionAlreadyPending {
            raised: ExceptionKind::Undefined,
            pending: ExceptionKind::DataAbort,
        }
    ));
    assert_eq!(ctx.cpu.pending_exception(), Some(ExceptionKind::DataAbort));
}

// ══════════════════════════════════════════════════════════
// 2. Software interrupts, breakpoints and undefined
// ══════════════════════════════════════════════════════════

#[test]
fn swi_from_user_and_return() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::swi(0x12), arm::mov_imm(0, 1)]);
    ctx.write_word(0x8, arm::movs_pc_lr());
    ctx.set_mode(ProcessorMode::User);

    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::SoftwareInterrupt));
    assert_eq!(ctx.pc(), PROGRAM_BASE);

    let _ = ctx.step();
    assert_eq!(ctx.cpu.regs.mode(), ProcessorMode::User);
    assert_eq!(ctx.pc(), PROGRAM_BASE + 4);

    let _ = ctx.step();
    assert_eq!(ctx.get_reg(0), 1);
    assert_eq!(ctx.cpu.stats.exceptions_taken[ExceptionKind::SoftwareInterrupt as usize], 1);
}

#[test]
fn thumb_swi_links_two_ahead() {
    let mut ctx = with_nop_vectors(TestContext::new().load_thumb(PROGRAM_BASE, &[thumb::swi(5)]));
    let _ = ctx.step();
    let _ = ctx.step();
    assert_eq!(ctx.cpu.regs.mode(), ProcessorMode::Supervisor);
    assert!(!ctx.cpu.regs.is_thumb());
    assert_eq!(ctx.get_reg(14), PROGRAM_BASE + 2);
    assert_eq!(ctx.pc(), 0xC);
    assert!(ctx.cpu.regs.spsr().expect("svc spsr").thumb());
}

#[test]
fn bkpt_is_a_prefetch_abort() {
    let mut ctx = with_nop_vectors(TestContext::new().load_arm(PROGRAM_BASE, &[arm::bkpt(0x1234)]));
    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::PrefetchAbort));
    let _ = ctx.step();
    assert_eq!(ctx.cpu.regs.mode(), ProcessorMode::Abort);
    assert_eq!(ctx.get_reg(14), PROGRAM_BASE + 4);
    assert_eq!(ctx.pc(), 0x10);
}

#[test]
fn undefined_instruction() {
    let mut ctx = with_nop_vectors(TestContext::new().load_arm(PROGRAM_BASE, &[0xE7F0_00F0]));
    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::Undefined));
    let _ = ctx.step();
    assert_eq!(ctx.cpu.regs.mode(), ProcessorMode::Undefined);
    assert_eq!(ctx.get_reg(14), PROGRAM_BASE + 4);
    assert_eq!(ctx.pc(), 0x8);
}

#[test]
fn raised_signal_tracks_the_pending_set() {
    let mut ctx = with_nop_vectors(TestContext::new().load_arm(PROGRAM_BASE, &[0xE7F0_00F0]));
    assert!(!ctx.cpu.signals().exception_raised());

    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::Undefined));
    assert!(ctx.cpu.signals().exception_raised());
    assert_eq!(ctx.cpu.pending_exception(), Some(ExceptionKind::Undefined));

    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert!(!ctx.cpu.signals().exception_raised());
    assert_eq!(ctx.cpu.pending_exception(), None);
    assert_eq!(ctx.cpu.stats.exceptions_taken[ExceptionKind::Undefined as usize], 1);
}

#[test]
fn fetch_outside_memory_is_a_prefetch_abort() {
    let mut ctx = with_nop_vectors(TestContext::new());
    ctx.set_reg(15, 0x0200_0000);
    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::PrefetchAbort));
    let _ = ctx.step();
    assert_eq!(ctx.get_reg(14), 0x0200_0004);
    assert_eq!(ctx.pc(), 0x10);
}

#[test]
fn high_vectors_relocate_entry() {
    let mut config = Config::default();
    config.memory.ram_size = TEST_RAM_SIZE;
    config.general.high_vectors = true;
    let mut ctx = TestContext::with_config(&config).load_arm(PROGRAM_BASE, &[arm::swi(0)]);
    assert!(ctx.cpu.signals().high_vectors());

    let _ = ctx.step();
    // Entry succeeds; the handler fetch at 0xFFFF0008 has no memory behind it.
    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::PrefetchAbort));
    assert_eq!(ctx.pc(), 0xFFFF_0008);
    assert_eq!(
        ctx.cpu.regs.read_banked(Bank::Supervisor, 14),
        PROGRAM_BASE + 4
    );
}

// ══════════════════════════════════════════════════════════
// 3. Interrupts
// ══════════════════════════════════════════════════════════

#[test]
fn irq_entry_and_return() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::mov_imm(0, 7)]);
    ctx.write_word(0x18, arm::subs_pc_lr(4));
    unmask_interrupts(&mut ctx);
    ctx.assert_line(IrqLine::Irq);

    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::Irq));
    assert_eq!(ctx.pc(), PROGRAM_BASE);
    assert_eq!(ctx.get_reg(0), 0);

    let _ = ctx.step();
    ctx.lines.deassert(IrqLine::Irq);
    assert_eq!(ctx.cpu.regs.mode(), ProcessorMode::Supervisor);
    assert_eq!(ctx.pc(), PROGRAM_BASE);
    assert_eq!(ctx.cpu.regs.read_banked(Bank::Irq, 14), PROGRAM_BASE + 4);

    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert_eq!(ctx.get_reg(0), 7);
}

#[test]
fn masked_irq_is_ignored() {
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[arm::NOP]);
    ctx.assert_line(IrqLine::Irq);
    assert_eq!(ctx.step(), StepOutcome::Retired);
    assert_eq!(ctx.cpu.pending_exception(), None);
}

#[test]
fn fiq_masks_both_lines() {
    let mut ctx = with_nop_vectors(TestContext::new().load_arm(PROGRAM_BASE, &[arm::NOP]));
    unmask_interrupts(&mut ctx);
    ctx.assert_line(IrqLine::Fiq);
    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::Fiq));
    let _ = ctx.step();
    let cpsr = ctx.cpu.regs.cpsr();
    assert_eq!(cpsr.mode(), Some(ProcessorMode::Fiq));
    assert!(cpsr.irq_disabled() && cpsr.fiq_disabled());
    assert_eq!(ctx.pc(), 0x20);
}

#[test]
fn irq_from_custom_controller() {
    let mut lines = MockLines::new();
    let _ = lines
        .expect_is_asserted()
        .returning(|line| line == IrqLine::Irq);
    let _ = lines.expect_message().return_const("timer".to_string());

    let mut config = Config::default();
    config.general.start_pc = PROGRAM_BASE;
    let mut cpu = Cpu::with_parts(
        Box::new(Ram::new(0, TEST_RAM_SIZE)),
        Arc::new(lines),
        &config,
    );
    let cpsr = cpu.regs.cpsr().with_irq_disabled(false);
    cpu.regs.set_cpsr(cpsr).expect("valid cpsr");
    assert_eq!(
        cpu.step().expect("step"),
        StepOutcome::Raised(ExceptionKind::Irq)
    );
    assert_eq!(cpu.regs.pc(), PROGRAM_BASE);
}

// ══════════════════════════════════════════════════════════
// 4. Host errors
// ══════════════════════════════════════════════════════════

#[test]
fn unsupported_encodings_are_errors() {
    for word in [0xFE00_0000, 0xED91_0100] {
        let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &[word]);
        assert!(matches!(ctx.cpu.step(), Err(CoreError::Unsupported { .. })), "{word:#x}");
        assert_eq!(ctx.pc(), PROGRAM_BASE);
    }

    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[0xF7F0, 0x8000]);
    assert!(matches!(ctx.cpu.step(), Err(CoreError::Unsupported { .. })));
}

#[test]
fn thumb2_permanently_undefined() {
    let mut ctx = TestContext::new().load_thumb(PROGRAM_BASE, &[0xF7F0, 0xA000]);
    assert_eq!(ctx.step(), StepOutcome::Raised(ExceptionKind::Undefined));
}
