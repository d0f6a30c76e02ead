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

//! GPU pipeline driven through the whole machine

mod common;

use common::assertions::assert_vram_pixel;
use common::fixtures::run_program;
use common::programs::{gp0_writer, gp1_writer, RED_TRIANGLE};
use psxcore::core::gpu::{HorizontalRes, GPU};
use psxcore::core::system::System;
use psxcore::core::timing::CycleCounter;

#[test]
fn test_cpu_draws_red_triangle() {
    let system = run_program(&gp0_writer(&RED_TRIANGLE));
    let gpu = system.gpu();

    assert!(!gpu.command_in_progress());
    assert_vram_pixel(gpu, 12, 12, 0x7C00);
    assert_vram_pixel(gpu, 10, 10, 0x7C00);
    assert_vram_pixel(gpu, 0, 0, 0x0000);
    assert_vram_pixel(gpu, 19, 19, 0x0000);
}

#[test]
fn test_partial_command_waits_for_arguments() {
    let system = run_program(&gp0_writer(&RED_TRIANGLE[..3]));

    assert!(system.gpu().command_in_progress());
    assert_eq!(system.gpu().fifo_len(), 3);
    assert_vram_pixel(system.gpu(), 12, 12, 0x0000);
}

#[test]
fn test_gp1_reset_restores_power_on_state() {
    let mut words = vec![0xE100_07FF, 0xE600_0003];
    words.extend_from_slice(&RED_TRIANGLE[..2]);
    let mut program = gp0_writer(&words);
    program.extend(gp1_writer(0x0800_0001));
    let mut system = run_program(&program);
    system.gpu_mut().write_vram(7, 7, 0x1234);

    assert_ne!(system.gpu().status(), 0x1C80_2000);
    assert!(system.gpu().command_in_progress());

    let reset = gp1_writer(0x0000_0000);
    system
        .load_program(&common::fixtures::assemble(&reset), 0x8002_0000)
        .unwrap();
    system.set_pc(0x8002_0000);
    system.run(reset.len() as u64);

    let gpu = system.gpu();
    assert_eq!(gpu.status(), 0x1C80_2000);
    assert_eq!(gpu.fifo_len(), 0);
    assert!(!gpu.command_in_progress());
    assert_eq!(gpu.display_mode().horizontal_res, HorizontalRes::R256);
    assert_vram_pixel(gpu, 7, 7, 0x1234);
}

#[test]
fn test_dma_upload_charges_one_cycle_per_word() {
    let mut gpu = GPU::new();
    let mut clock = CycleCounter::new();

    let header = [0xA000_0000, 0x0000_0000, 0x0002_0002];
    let pixels = [0x7FFF_7C00, 0x001F_03E0];
    for word in header.iter().chain(pixels.iter()) {
        gpu.dma_write(&mut clock, *word);
    }

    assert_eq!(clock.cycles(), 5);
    assert_vram_pixel(&gpu, 0, 0, 0x7C00);
    assert_vram_pixel(&gpu, 1, 0, 0x7FFF);
    assert_vram_pixel(&gpu, 0, 1, 0x03E0);
    assert_vram_pixel(&gpu, 1, 1, 0x001F);
}

#[test]
fn test_vram_survives_system_reset() {
    let mut system = run_program(&gp0_writer(&RED_TRIANGLE));
    system.reset();

    assert_vram_pixel(system.gpu(), 12, 12, 0x7C00);
    assert_eq!(system.gpu().status(), 0x1C80_2000);
}

#[test]
fn test_default_system_has_blank_vram() {
    let system = System::new();
    assert!(system.gpu().vram().iter().all(|&pixel| pixel == 0));
}
