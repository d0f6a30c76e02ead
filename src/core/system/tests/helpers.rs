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

//! Instruction encoders for system-level programs

pub(super) const NOP: u32 = 0x0000_0000;

fn i_type(op: u32, rs: u8, rt: u8, imm: u16) -> u32 {
    (op << 26) | ((rs as u32) << 21) | ((rt as u32) << 16) | imm as u32
}

pub(super) fn lui(rt: u8, imm: u16) -> u32 {
    i_type(0x0F, 0, rt, imm)
}

pub(super) fn ori(rt: u8, rs: u8, imm: u16) -> u32 {
    i_type(0x0D, rs, rt, imm)
}

pub(super) fn addiu(rt: u8, rs: u8, imm: i16) -> u32 {
    i_type(0x09, rs, rt, imm as u16)
}

pub(super) fn lw(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x23, base, rt, offset as u16)
}

pub(super) fn sw(rt: u8, offset: i16, base: u8) -> u32 {
    i_type(0x2B, base, rt, offset as u16)
}

pub(super) fn j(target: u32) -> u32 {
    (0x02 << 26) | ((target >> 2) & 0x03FF_FFFF)
}

/// Load a 32-bit constant into `rt` (LUI + ORI)
pub(super) fn li(rt: u8, value: u32) -> [u32; 2] {
    [lui(rt, (value >> 16) as u16), ori(rt, rt, value as u16)]
}

/// Little-endian image of a word sequence
pub(super) fn assemble(program: &[u32]) -> Vec<u8> {
    program.iter().flat_map(|word| word.to_le_bytes()).collect()
}

/// Program storing each word to GP0, with r1 holding the port address
pub(super) fn gp0_writer(words: &[u32]) -> Vec<u32> {
    let mut program = li(1, 0x1F80_1810).to_vec();
    for &word in words {
        program.extend(li(2, word));
        program.push(sw(2, 0, 1));
    }
    program
}

/// Opaque red triangle at (10,10), (20,10), (10,20)
pub(super) const RED_TRIANGLE: [u32; 4] = [0x2000_00FF, 0x000A_000A, 0x000A_0014, 0x0014_000A];
