//! ARM instruction encoders. Every encoder produces an `AL`-conditioned word; use
//! [`with_cond`] to change it.

pub const NOP: u32 = 0xE1A0_0000;

/// Data-processing opcodes.
pub mod op {
    pub const AND: u32 = 0x0;
    pub const EOR: u32 = 0x1;
    pub const SUB: u32 = 0x2;
    pub const RSB: u32 = 0x3;
    pub const ADD: u32 = 0x4;
    pub const ADC: u32 = 0x5;
    pub const SBC: u32 = 0x6;
    pub const TST: u32 = 0x8;
    pub const CMP: u32 = 0xA;
    pub const ORR: u32 = 0xC;
    pub const MOV: u32 = 0xD;
    pub const BIC: u32 = 0xE;
    pub const MVN: u32 = 0xF;
}

/// Shift types for register operands.
pub mod shift {
    pub const LSL: u32 = 0;
    pub const LSR: u32 = 1;
    pub const ASR: u32 = 2;
    pub const ROR: u32 = 3;
}

pub fn with_cond(word: u32, cond: u32) -> u32 {
    (word & 0x0FFF_FFFF) | (cond << 28)
}

pub fn dp_imm(opcode: u32, s: bool, rn: u32, rd: u32, imm8: u32, rot: u32) -> u32 {
    0xE200_0000 | (opcode << 21) | ((s as u32) << 20) | (rn << 16) | (rd << 12) | (rot << 8) | imm8
}

pub fn dp_reg(opcode: u32, s: bool, rn: u32, rd: u32, rm: u32, kind: u32, amount: u32) -> u32 {
    0xE000_0000
        | (opcode << 21)
        | ((s as u32) << 20)
        | (rn << 16)
        | (rd << 12)
        | (amount << 7)
        | (kind << 5)
        | rm
}

pub fn dp_rsr(opcode: u32, s: bool, rn: u32, rd: u32, rm: u32, kind: u32, rs: u32) -> u32 {
    0xE000_0010
        | (opcode << 21)
        | ((s as u32) << 20)
        | (rn << 16)
        | (rd << 12)
        | (rs << 8)
        | (kind << 5)
        | rm
}

pub fn mov_imm(rd: u32, imm8: u32) -> u32 {
    dp_imm(op::MOV, false, 0, rd, imm8, 0)
}

pub fn mov_reg(rd: u32, rm: u32) -> u32 {
    dp_reg(op::MOV, false, 0, rd, rm, shift::LSL, 0)
}

pub fn add_imm(rd: u32, rn: u32, imm8: u32) -> u32 {
    dp_imm(op::ADD, false, rn, rd, imm8, 0)
}

pub fn adds_imm(rd: u32, rn: u32, imm8: u32) -> u32 {
    dp_imm(op::ADD, true, rn, rd, imm8, 0)
}

pub fn subs_imm(rd: u32, rn: u32, imm8: u32) -> u32 {
    dp_imm(op::SUB, true, rn, rd, imm8, 0)
}

pub fn cmp_imm(rn: u32, imm8: u32) -> u32 {
    dp_imm(op::CMP, true, rn, 0, imm8, 0)
}

/// `subs pc, lr, #imm`: exception return.
pub fn subs_pc_lr(imm8: u32) -> u32 {
    dp_imm(op::SUB, true, 14, 15, imm8, 0)
}

/// `movs pc, lr`: exception return.
pub fn movs_pc_lr() -> u32 {
    dp_reg(op::MOV, true, 0, 15, 14, shift::LSL, 0)
}

pub fn mul(rd: u32, rm: u32, rs: u32) -> u32 {
    0xE000_0090 | (rd << 16) | (rs << 8) | rm
}

pub fn mla(rd: u32, rm: u32, rs: u32, rn: u32) -> u32 {
    0xE020_0090 | (rd << 16) | (rn << 12) | (rs << 8) | rm
}

pub fn umull(lo: u32, hi: u32, rm: u32, rs: u32) -> u32 {
    0xE080_0090 | (hi << 16) | (lo << 12) | (rs << 8) | rm
}

pub fn smull(lo: u32, hi: u32, rm: u32, rs: u32) -> u32 {
    0xE0C0_0090 | (hi << 16) | (lo << 12) | (rs << 8) | rm
}

pub fn clz(rd: u32, rm: u32) -> u32 {
    0xE16F_0F10 | (rd << 12) | rm
}

/// Addressing mode 2 with an immediate offset; `pre`/`wb` select the indexing form.
pub fn mem_imm(load: bool, byte: bool, rd: u32, rn: u32, offset: i32, pre: bool, wb: bool) -> u32 {
    0xE400_0000
        | ((pre as u32) << 24)
        | (((offset >= 0) as u32) << 23)
        | ((byte as u32) << 22)
        | ((wb as u32) << 21)
        | ((load as u32) << 20)
        | (rn << 16)
        | (rd << 12)
        | (offset.unsigned_abs() & 0xFFF)
}

pub fn ldr_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_imm(true, false, rd, rn, offset, true, false)
}

pub fn str_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_imm(false, false, rd, rn, offset, true, false)
}

pub fn ldrb_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_imm(true, true, rd, rn, offset, true, false)
}

pub fn strb_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_imm(false, true, rd, rn, offset, true, false)
}

/// `ldr rd, [rn, rm, lsl #amount]`.
pub fn ldr_reg(rd: u32, rn: u32, rm: u32, amount: u32) -> u32 {
    0xE790_0000 | (rn << 16) | (rd << 12) | (amount << 7) | rm
}

/// Addressing mode 3 with an immediate offset. `sh` is the S:H pair (01 = H, 10 = SB or
/// LDRD, 11 = SH or STRD).
pub fn mem_extra_imm(load: bool, sh: u32, rd: u32, rn: u32, offset: i32, pre: bool, wb: bool) -> u32 {
    let abs = offset.unsigned_abs();
    0xE040_0090
        | ((pre as u32) << 24)
        | (((offset >= 0) as u32) << 23)
        | ((wb as u32) << 21)
        | ((load as u32) << 20)
        | (rn << 16)
        | (rd << 12)
        | ((abs >> 4) << 8)
        | (sh << 5)
        | (abs & 0xF)
}

pub fn ldrh_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_extra_imm(true, 0b01, rd, rn, offset, true, false)
}

pub fn strh_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_extra_imm(false, 0b01, rd, rn, offset, true, false)
}

pub fn ldrsb_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_extra_imm(true, 0b10, rd, rn, offset, true, false)
}

pub fn ldrsh_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_extra_imm(true, 0b11, rd, rn, offset, true, false)
}

pub fn ldrd_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_extra_imm(false, 0b10, rd, rn, offset, true, false)
}

pub fn strd_imm(rd: u32, rn: u32, offset: i32) -> u32 {
    mem_extra_imm(false, 0b11, rd, rn, offset, true, false)
}

pub fn swp(rd: u32, rm: u32, rn: u32) -> u32 {
    0xE100_0090 | (rn << 16) | (rd << 12) | rm
}

pub fn swpb(rd: u32, rm: u32, rn: u32) -> u32 {
    0xE140_0090 | (rn << 16) | (rd << 12) | rm
}

/// Addressing mode 4. `s` is the `^` suffix.
pub fn block(load: bool, rn: u32, list: u32, pre: bool, up: bool, wb: bool, s: bool) -> u32 {
    0xE800_0000
        | ((pre as u32) << 24)
        | ((up as u32) << 23)
        | ((s as u32) << 22)
        | ((wb as u32) << 21)
        | ((load as u32) << 20)
        | (rn << 16)
        | list
}

/// `stmdb rn!, {list}` (push).
pub fn stmdb_wb(rn: u32, list: u32) -> u32 {
    block(false, rn, list, true, false, true, false)
}

/// `ldmia rn!, {list}` (pop).
pub fn ldmia_wb(rn: u32, list: u32) -> u32 {
    block(true, rn, list, false, true, true, false)
}

fn branch_imm24(from: u32, to: u32) -> u32 {
    (to.wrapping_sub(from.wrapping_add(8)) >> 2) & 0x00FF_FFFF
}

pub fn b(from: u32, to: u32) -> u32 {
    0xEA00_0000 | branch_imm24(from, to)
}

pub fn bl(from: u32, to: u32) -> u32 {
    0xEB00_0000 | branch_imm24(from, to)
}

/// `blx <thumb target>` (unconditional space).
pub fn blx_imm(from: u32, to: u32) -> u32 {
    let offset = to.wrapping_sub(from.wrapping_add(8));
    0xFA00_0000 | (((offset >> 1) & 1) << 24) | ((offset >> 2) & 0x00FF_FFFF)
}

pub fn bx(rm: u32) -> u32 {
    0xE12F_FF10 | rm
}

pub fn blx_reg(rm: u32) -> u32 {
    0xE12F_FF30 | rm
}

pub fn swi(imm24: u32) -> u32 {
    0xEF00_0000 | imm24
}

pub fn bkpt(imm16: u32) -> u32 {
    0xE120_0070 | ((imm16 >> 4) << 8) | (imm16 & 0xF)
}

pub fn mrs(rd: u32, spsr: bool) -> u32 {
    0xE10F_0000 | ((spsr as u32) << 22) | (rd << 12)
}

pub fn msr_reg(mask: u32, spsr: bool, rm: u32) -> u32 {
    0xE120_F000 | ((spsr as u32) << 22) | (mask << 16) | rm
}

pub fn msr_imm(mask: u32, spsr: bool, imm8: u32, rot: u32) -> u32 {
    0xE320_F000 | ((spsr as u32) << 22) | (mask << 16) | (rot << 8) | imm8
}

pub fn mcr(cp: u32, op1: u32, rd: u32, crn: u32, crm: u32, op2: u32) -> u32 {
    0xEE00_0010 | (op1 << 21) | (crn << 16) | (rd << 12) | (cp << 8) | (op2 << 5) | crm
}

pub fn mrc(cp: u32, op1: u32, rd: u32, crn: u32, crm: u32, op2: u32) -> u32 {
    mcr(cp, op1, rd, crn, crm, op2) | (1 << 20)
}

pub fn cdp(cp: u32, op1: u32, crd: u32, crn: u32, crm: u32, op2: u32) -> u32 {
    0xEE00_0000 | (op1 << 20) | (crn << 16) | (crd << 12) | (cp << 8) | (op2 << 5) | crm
}
