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

//! Basic system tests

use super::super::*;
use crate::core::config::{CoreConfig, UnhandledCommandPolicy};
use crate::core::error::EmulatorError;
use crate::core::memory::Bus;

#[test]
fn test_system_initialization() {
    let system = System::new();

    assert_eq!(system.pc(), 0xBFC0_0000);
    assert_eq!(system.cycles(), 0);
    assert_eq!(system.gpu().status(), 0x1C80_2000);
    assert_eq!(system.bus().ram().len(), SystemBus::RAM_SIZE);
}

#[test]
fn test_system_with_config() {
    let mut config = CoreConfig::default();
    config.gpu.unhandled_command = UnhandledCommandPolicy::Stall;
    let mut system = System::with_config(&config);

    system.gpu_mut().write_gp0(0x4000_0000);
    assert!(system.gpu().command_in_progress());
}

#[test]
fn test_system_reset() {
    let mut system = System::new();
    system.load_program(&[1, 2, 3, 4], 0x8000_1000).unwrap();
    system.gpu_mut().write_gp1(0x0300_0000);
    system.gpu_mut().write_vram(1, 1, 0x7FFF);
    system.run(3);
    assert!(system.cycles() > 0);

    system.reset();

    assert_eq!(system.pc(), 0xBFC0_0000);
    assert_eq!(system.cycles(), 0);
    assert_eq!(system.bus_mut().read32(0x1000).unwrap(), 0);
    assert_eq!(system.gpu().status(), 0x1C80_2000);
    assert_eq!(system.gpu().read_vram(1, 1), 0x7FFF);
}

#[test]
fn test_set_pc() {
    let mut system = System::new();
    system.set_pc(0x8001_0000);
    assert_eq!(system.pc(), 0x8001_0000);
    assert_eq!(system.cpu().pc(), 0x8001_0000);
}

#[test]
fn test_load_program_in_any_ram_segment() {
    let mut system = System::new();

    system.load_program(&[0xAA], 0x0000_0100).unwrap();
    system.load_program(&[0xBB], 0x8000_0200).unwrap();
    system.load_program(&[0xCC], 0xA000_0300).unwrap();

    let ram = system.bus().ram().as_bytes();
    assert_eq!(ram[0x100], 0xAA);
    assert_eq!(ram[0x200], 0xBB);
    assert_eq!(ram[0x300], 0xCC);
}

#[test]
fn test_load_program_outside_ram() {
    let mut system = System::new();

    let result = system.load_program(&[0; 4], 0xBFC0_0000);
    assert!(matches!(
        result,
        Err(EmulatorError::InvalidMemoryAccess {
            address: 0xBFC0_0000
        })
    ));
}

#[test]
fn test_load_program_too_large() {
    let mut system = System::new();

    let image = vec![0u8; 16];
    let result = system.load_program(&image, 0x801F_FFF8);
    assert!(matches!(result, Err(EmulatorError::ProgramTooLarge { .. })));
}
