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

use crate::core::bitfield::bits;

/// Primary opcode (bits [31:26])
#[inline(always)]
pub(super) fn opcode(instr: u32) -> u8 {
    bits(instr, 26, 6) as u8
}

/// Decode R-type instruction
///
/// Format: | op (6) | rs (5) | rt (5) | rd (5) | shamt (5) | funct (6) |
///
/// # Returns
///
/// Tuple of (rs, rt, rd, shamt, funct)
#[inline(always)]
pub(super) fn decode_r_type(instr: u32) -> (u8, u8, u8, u8, u8) {
    let rs = bits(instr, 21, 5) as u8;
    let rt = bits(instr, 16, 5) as u8;
    let rd = bits(instr, 11, 5) as u8;
    let shamt = bits(instr, 6, 5) as u8;
    let funct = bits(instr, 0, 6) as u8;
    (rs, rt, rd, shamt, funct)
}

/// Decode I-type instruction
///
/// Format: | op (6) | rs (5) | rt (5) | immediate (16) |
///
/// # Returns
///
/// Tuple of (op, rs, rt, imm)
#[inline(always)]
pub(super) fn decode_i_type(instr: u32) -> (u8, u8, u8, u16) {
    let op = opcode(instr);
    let rs = bits(instr, 21, 5) as u8;
    let rt = bits(instr, 16, 5) as u8;
    let imm = bits(instr, 0, 16) as u16;
    (op, rs, rt, imm)
}

/// Decode J-type instruction
///
/// Format: | op (6) | target (26) |
///
/// # Returns
///
/// Tuple of (op, target)
#[inline(always)]
pub(super) fn decode_j_type(instr: u32) -> (u8, u32) {
    (opcode(instr), bits(instr, 0, 26))
}

/// Sign-extend a 16-bit immediate to 32 bits
#[inline(always)]
pub(super) fn sign_extend_imm(imm: u16) -> u32 {
    imm as i16 as i32 as u32
}

/// Coprocessor number encoded in a COPz/LWCz/SWCz opcode (bits [27:26])
#[inline(always)]
pub(super) fn coprocessor(instr: u32) -> u8 {
    bits(instr, 26, 2) as u8
}
