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

//! CPU execution tests

use super::super::*;
use super::helpers::*;

/// Load `program` at 0x80010000 and point the CPU at it
fn boot(program: &[u32]) -> System {
    let mut system = System::new();
    system.load_program(&assemble(program), 0x8001_0000).unwrap();
    system.set_pc(0x8001_0000);
    system
}

#[test]
fn test_system_step() {
    let mut system = System::new();

    // Empty BIOS reads as NOPs; KSEG1 fetches are uncached
    let cycles = system.step();

    assert_eq!(cycles, 5);
    assert_eq!(system.pc(), 0xBFC0_0004);
    assert_eq!(system.cycles(), 5);
}

#[test]
fn test_system_run() {
    let mut system = System::new();

    let cycles = system.run(10);

    assert_eq!(cycles, 50);
    assert_eq!(system.cycles(), 50);
    assert_eq!(system.pc(), 0xBFC0_0028);
}

#[test]
fn test_program_store_and_load() {
    let mut program = li(1, 0x1234_5678).to_vec();
    program.extend([sw(1, 0x100, 0), lw(2, 0x100, 0), NOP]);
    let mut system = boot(&program);

    system.run(5);

    assert_eq!(system.cpu().reg(2), 0x1234_5678);
    assert_eq!(&system.bus().ram().as_bytes()[0x100..0x104], &[0x78, 0x56, 0x34, 0x12]);
}

#[test]
fn test_store_to_ram_mirror() {
    let mut program = li(1, 0x0020_0200).to_vec();
    program.extend([addiu(2, 0, 42), sw(2, 0, 1)]);
    let mut system = boot(&program);

    system.run(4);

    assert_eq!(system.bus().ram().as_bytes()[0x200], 42);
}

#[test]
fn test_jump_loop() {
    let mut system = boot(&[j(0x8001_0000), NOP]);

    system.run(10);
    assert_eq!(system.pc(), 0x8001_0000);

    system.run(1);
    assert_eq!(system.pc(), 0x8001_0004);
}

#[test]
fn test_unmapped_load_raises_bus_error() {
    let mut program = li(4, 0x1F00_0000).to_vec();
    program.push(lw(3, 0, 4));
    let mut system = boot(&program);

    system.run(3);

    let cause = system.cpu().cop0_reg(13);
    assert_eq!((cause >> 2) & 0x1F, 7);
    assert_eq!(system.cpu().cop0_reg(14), 0x8001_0008);
    assert_eq!(system.pc(), 0x8000_0080);
}
