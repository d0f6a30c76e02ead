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

use super::super::decode::*;

#[test]
fn test_decode_r_type() {
    // addu r3, r1, r2
    let (rs, rt, rd, shamt, funct) = decode_r_type(0x0022_1821);
    assert_eq!((rs, rt, rd, shamt, funct), (1, 2, 3, 0, 0x21));

    // sll r4, r5, 7
    let (_, rt, rd, shamt, funct) = decode_r_type(0x0005_21C0);
    assert_eq!((rt, rd, shamt, funct), (5, 4, 7, 0x00));
}

#[test]
fn test_decode_i_type() {
    // lw r8, -4(r29)
    let (op, rs, rt, imm) = decode_i_type(0x8FA8_FFFC);
    assert_eq!((op, rs, rt, imm), (0x23, 29, 8, 0xFFFC));
    assert_eq!(sign_extend_imm(imm), 0xFFFF_FFFC);
    assert_eq!(sign_extend_imm(0x7FFF), 0x0000_7FFF);
}

#[test]
fn test_decode_j_type() {
    let (op, target) = decode_j_type(0x0BF0_0040);
    assert_eq!(op, 0x02);
    assert_eq!(target, 0x03F0_0040);
}

#[test]
fn test_coprocessor_number() {
    assert_eq!(coprocessor(0x4000_0000), 0); // COP0
    assert_eq!(coprocessor(0x4A00_0000), 2); // COP2
    assert_eq!(coprocessor(0xCC00_0000), 3); // LWC3
    assert_eq!(opcode(0xE800_0000), 0x3A); // SWC2
}
