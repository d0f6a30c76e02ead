// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Test helpers: a tiny instruction encoder and a RAM-backed test machine

use super::super::CPU;
use crate::core::memory::{Bus, Ram};
use crate::core::timing::CycleCounter;

/// Size of the test RAM (physical 0x0000-0x1FFF)
pub(super) const RAM_SIZE: usize = 0x2000;

pub(super) const NOP: u32 = 0x0000_0000;

fn i_type(op: u32, rs: u8, rt: u8, imm: u16) -> u32 {
    (op << 26) | ((rs as u32) << 21) | ((rt as u32) << 16) | imm as u32
}

fn r_type(funct: u32, rs: u8, rt: u8, rd: u8, shamt: u8) -> u32 {
    ((rs as u32) << 21) | ((rt as u32) << 16) | ((rd as u32) << 11) | ((shamt as u32) << 6) | funct
}

pub(super) fn addiu(rt: u8, rs: u8, imm: i16) -> u32 {
    i_type(0x09, rs, rt, imm as u16)
}

pub(super) fn ori(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x0D, rs, rt, imm)
}

pub(super) fn lui(rt: u8, imm: u16) -> u32 {
    i_type(0x0F, 0, rt, imm)
}

pub(super) fn addu(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x21, rs, rt, rd, 0)
}

pub(super) fn add(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x20, rs, rt, rd, 0)
}

pub(super) fn sra(rd: u8, rt: u8, shamt: u8) -> u32 {
    r_type(0x03, 0, rt, rd, shamt)
}

pub(super) fn jr(rs: u8) -> u32 {
    r_type(0x08, rs, 0, 0, 0)
}

pub(super) fn syscall() -> u32 {
    0x0000_000C
}

pub(super) fn lw(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x23, base, rt, offset as u16)
}

pub(super) fn lwl(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x22, base, rt, offset as u16)
}

pub(super) fn lwr(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x26, base, rt, offset as u16)
}

pub(super) fn sw(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x2B, base, rt, offset as u16)
}

pub(super) fn swl(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x2A, base, rt, offset as u16)
}

pub(super) fn swr(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x2E, base, rt, offset as u16)
}

/// BEQ with an offset in instructions relative to the delay slot
pub(super) fn beq(rs: u8, rt: u8, offset: i16) -> u32 {
    i_type(0x04, rs, rt, offset as u16)
}

pub(super) fn bgezal(rs: u8, offset: i16) -> u32 {
    i_type(0x01, rs, 0x11, offset as u16)
}

pub(super) fn j(target: u32) -> u32 {
    (0x02 << 26) | ((target >> 2) & 0x03FF_FFFF)
}

pub(super) fn jal(target: u32) -> u32 {
    (0x03 << 26) | ((target >> 2) & 0x03FF_FFFF)
}

pub(super) fn mfc0(rt: u8, rd: u8) -> u32 {
    0x4000_0000 | ((rt as u32) << 16) | ((rd as u32) << 11)
}

pub(super) fn mtc0(rt: u8, rd: u8) -> u32 {
    0x4080_0000 | ((rt as u32) << 16) | ((rd as u32) << 11)
}

pub(super) fn rfe() -> u32 {
    0x4200_0010
}

/// Write `program` into `ram` starting at physical `address`
pub(super) fn load_program(ram: &mut Ram, address: u32, program: &[u32]) {
    for (i, word) in program.iter().enumerate() {
        ram.write32(address + (i as u32) * 4, *word).unwrap();
    }
}

/// CPU with `program` loaded at physical 0 and PC pointing at it
pub(super) fn setup(program: &[u32]) -> (CPU, Ram, CycleCounter) {
    let mut ram = Ram::new(RAM_SIZE);
    load_program(&mut ram, 0, program);

    let mut cpu = CPU::new();
    cpu.set_pc(0);
    (cpu, ram, CycleCounter::new())
}

/// Run `ticks` CPU ticks
pub(super) fn run(cpu: &mut CPU, ram: &mut Ram, clock: &mut CycleCounter, ticks: usize) {
    for _ in 0..ticks {
        cpu.tick(ram, clock);
    }
}
