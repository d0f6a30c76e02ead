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

//! Small test programs

/// Register arithmetic: $3 = 1 + 2
#[allow(dead_code)]
pub fn basic_arithmetic() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU $1, $0, 1
        0x24020002, // ADDIU $2, $0, 2
        0x00221820, // ADD   $3, $1, $2
        0x00000000, // NOP
    ]
}

/// Store then load through the scratchpad
#[allow(dead_code)]
pub fn scratchpad_load_store() -> Vec<u32> {
    vec![
        0x3C011F80, // LUI   $1, 0x1F80
        0x240200AA, // ADDIU $2, $0, 0xAA
        0xAC220000, // SW    $2, 0($1)
        0x8C230000, // LW    $3, 0($1)
        0x00000000, // NOP (load delay)
    ]
}

/// Taken branch skipping one instruction
#[allow(dead_code)]
pub fn taken_branch() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU $1, $0, 1
        0x24020001, // ADDIU $2, $0, 1
        0x10220002, // BEQ   $1, $2, +2
        0x00000000, // NOP (delay slot)
        0x24030042, // ADDIU $3, $0, 0x42 (skipped)
        0x24040099, // ADDIU $4, $0, 0x99
    ]
}

/// Store each word to GP0
///
/// $1 holds the port address, every word takes LUI + ORI + SW.
#[allow(dead_code)]
pub fn gp0_writer(words: &[u32]) -> Vec<u32> {
    let mut program = vec![
        0x3C011F80, // LUI $1, 0x1F80
        0x34211810, // ORI $1, $1, 0x1810
    ];
    for &word in words {
        program.push(0x3C020000 | (word >> 16)); // LUI $2, hi
        program.push(0x34420000 | (word & 0xFFFF)); // ORI $2, $2, lo
        program.push(0xAC220000); // SW  $2, 0($1)
    }
    program
}

/// Store one word to GP1
#[allow(dead_code)]
pub fn gp1_writer(word: u32) -> Vec<u32> {
    vec![
        0x3C011F80, // LUI $1, 0x1F80
        0x34211814, // ORI $1, $1, 0x1814
        0x3C020000 | (word >> 16), // LUI $2, hi
        0x34420000 | (word & 0xFFFF), // ORI $2, $2, lo
        0xAC220000, // SW  $2, 0($1)
    ]
}

/// Opaque red triangle at (10,10), (20,10), (10,20)
#[allow(dead_code)]
pub const RED_TRIANGLE: [u32; 4] = [0x2000_00FF, 0x000A_000A, 0x000A_0014, 0x0014_000A];
