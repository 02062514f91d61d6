//! Thumb and Thumb-2 instruction encoders.

pub fn movs(rd: u16, imm8: u16) -> u16 {
    0x2000 | (rd << 8) | imm8
}

pub fn cmp_imm(rd: u16, imm8: u16) -> u16 {
    0x2800 | (rd << 8) | imm8
}

pub fn adds_imm8(rd: u16, imm8: u16) -> u16 {
    0x3000 | (rd << 8) | imm8
}

pub fn subs_imm8(rd: u16, imm8: u16) -> u16 {
    0x3800 | (rd << 8) | imm8
}

pub fn adds_reg(rd: u16, rn: u16, rm: u16) -> u16 {
    0x1800 | (rm << 6) | (rn << 3) | rd
}

pub fn subs_reg(rd: u16, rn: u16, rm: u16) -> u16 {
    0x1A00 | (rm << 6) | (rn << 3) | rd
}

pub fn adds_imm3(rd: u16, rn: u16, imm3: u16) -> u16 {
    0x1C00 | (imm3 << 6) | (rn << 3) | rd
}

pub fn lsls_imm(rd: u16, rm: u16, imm5: u16) -> u16 {
    (imm5 << 6) | (rm << 3) | rd
}

pub fn lsrs_imm(rd: u16, rm: u16, imm5: u16) -> u16 {
    0x0800 | (imm5 << 6) | (rm << 3) | rd
}

/// Register data processing, `op` is bits 9:6 (0 = AND ... 15 = MVN).
pub fn alu(op: u16, rd: u16, rm: u16) -> u16 {
    0x4000 | (op << 6) | (rm << 3) | rd
}

pub const ALU_AND: u16 = 0x0;
pub const ALU_LSL: u16 = 0x2;
pub const ALU_NEG: u16 = 0x9;
pub const ALU_ORR: u16 = 0xC;
pub const ALU_MUL: u16 = 0xD;
pub const ALU_MVN: u16 = 0xF;

pub fn mov_hi(rd: u16, rm: u16) -> u16 {
    0x4600 | ((rd >> 3) << 7) | (rm << 3) | (rd & 7)
}

pub fn add_hi(rd: u16, rm: u16) -> u16 {
    0x4400 | ((rd >> 3) << 7) | (rm << 3) | (rd & 7)
}

pub fn bx(rm: u16) -> u16 {
    0x4700 | (rm << 3)
}

pub fn blx_reg(rm: u16) -> u16 {
    0x4780 | (rm << 3)
}

pub fn ldr_literal(rd: u16, imm8: u16) -> u16 {
    0x4800 | (rd << 8) | imm8
}

pub fn str_imm(rd: u16, rn: u16, imm5: u16) -> u16 {
    0x6000 | (imm5 << 6) | (rn << 3) | rd
}

pub fn ldr_imm(rd: u16, rn: u16, imm5: u16) -> u16 {
    0x6800 | (imm5 << 6) | (rn << 3) | rd
}

pub fn ldrb_imm(rd: u16, rn: u16, imm5: u16) -> u16 {
    0x7800 | (imm5 << 6) | (rn << 3) | rd
}

pub fn ldrsb_reg(rd: u16, rn: u16, rm: u16) -> u16 {
    0x5600 | (rm << 6) | (rn << 3) | rd
}

pub fn push(list: u16, lr: bool) -> u16 {
    0xB400 | ((lr as u16) << 8) | list
}

pub fn pop(list: u16, pc: bool) -> u16 {
    0xBC00 | ((pc as u16) << 8) | list
}

pub fn stmia(rn: u16, list: u16) -> u16 {
    0xC000 | (rn << 8) | list
}

pub fn ldmia(rn: u16, list: u16) -> u16 {
    0xC800 | (rn << 8) | list
}

/// Conditional branch; `offset` is relative to the instruction address + 4.
pub fn b_cond(cond: u16, offset: i32) -> u16 {
    0xD000 | (cond << 8) | (((offset >> 1) as u16) & 0xFF)
}

/// Unconditional branch; `offset` is relative to the instruction address + 4.
pub fn b(offset: i32) -> u16 {
    0xE000 | (((offset >> 1) as u16) & 0x7FF)
}

pub fn swi(imm8: u16) -> u16 {
    0xDF00 | imm8
}

pub fn bkpt(imm8: u16) -> u16 {
    0xBE00 | imm8
}

fn long_branch(from: u32, to: u32, second_prefix: u16) -> [u16; 2] {
    let offset = to.wrapping_sub(from.wrapping_add(4));
    let s = (offset >> 24) & 1;
    let i1 = (offset >> 23) & 1;
    let i2 = (offset >> 22) & 1;
    let j1 = (!(i1 ^ s)) & 1;
    let j2 = (!(i2 ^ s)) & 1;
    let first = 0xF000 | (s << 10) | ((offset >> 12) & 0x3FF);
    let second = u32::from(second_prefix) | (j1 << 13) | (j2 << 11) | ((offset >> 1) & 0x7FF);
    [first as u16, second as u16]
}

/// 32-bit BL.
pub fn bl(from: u32, to: u32) -> [u16; 2] {
    long_branch(from, to, 0xD000)
}

/// 32-bit BLX to an ARM target (`to` must be word aligned).
pub fn blx(from: u32, to: u32) -> [u16; 2] {
    let [first, second] = long_branch(from & !3, to, 0xC000);
    [first, second & !1]
}

/// 32-bit B.W (encoding T4).
pub fn b_wide(from: u32, to: u32) -> [u16; 2] {
    long_branch(from, to, 0x9000)
}
