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

//! Test fixtures for common test scenarios

use psxcore::core::system::System;

/// Where test programs are loaded (KSEG0)
#[allow(dead_code)]
pub const PROGRAM_BASE: u32 = 0x8001_0000;

/// Little-endian image of a word sequence
#[allow(dead_code)]
pub fn assemble(program: &[u32]) -> Vec<u8> {
    program.iter().flat_map(|word| word.to_le_bytes()).collect()
}

/// Create a System with `program` loaded at [`PROGRAM_BASE`] and PC on it
#[allow(dead_code)]
pub fn system_with_program(program: &[u32]) -> System {
    let mut system = System::new();
    system
        .load_program(&assemble(program), PROGRAM_BASE)
        .expect("program fits in RAM");
    system.set_pc(PROGRAM_BASE);
    system
}

/// Load `program`, run one tick per instruction and return the system
#[allow(dead_code)]
pub fn run_program(program: &[u32]) -> System {
    let mut system = system_with_program(program);
    system.run(program.len() as u64);
    system
}

/// Get BIOS path from environment or default location
#[allow(dead_code)]
pub fn get_bios_path() -> Option<String> {
    std::env::var("PSX_BIOS_PATH").ok().or_else(|| {
        let default_path = "SCPH1001.BIN";
        if std::path::Path::new(default_path).exists() {
            Some(default_path.to_string())
        } else {
            None
        }
    })
}
