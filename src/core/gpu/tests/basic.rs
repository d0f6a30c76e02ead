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

//! Basic GPU functionality tests
//! Tests for initialization, reset, register ports and DMA access

use super::super::*;
use super::helpers::*;
use crate::core::config::{GpuConfig, UnhandledCommandPolicy};
use crate::core::timing::CycleCounter;

#[test]
fn test_gpu_initialization() {
    let gpu = GPU::new();

    assert_eq!(gpu.vram.len(), GPU::VRAM_SIZE);
    assert!(gpu.vram.iter().all(|&pixel| pixel == 0x0000));
    assert_eq!(gpu.fifo_len(), 0);
    assert!(!gpu.command_in_progress());
}

#[test]
fn test_default_state() {
    let gpu = GPU::new();

    assert_eq!(gpu.status(), 0x1C80_2000);
    assert_eq!(gpu.draw_area(), DrawingArea::default());
    assert_eq!(gpu.draw_area().right, 1023);
    assert_eq!(gpu.draw_area().bottom, 511);
    assert_eq!(gpu.draw_offset(), DrawOffset { x: 0, y: 0 });
    assert_eq!(gpu.texture_window(), TextureWindow::default());
    assert_eq!(gpu.rect_flip(), (false, false));

    let mode = gpu.display_mode();
    assert!(mode.display_disabled);
    assert_eq!(mode.horizontal_res, HorizontalRes::R256);
    assert_eq!(mode.vertical_res, VerticalRes::R240);
    assert_eq!(mode.video_mode, VideoMode::NTSC);
}

#[test]
fn test_status_ready_flags() {
    let gpu = GPU::new();
    let status = GpuStat::from_bits_retain(gpu.status());

    assert!(status.contains(GpuStat::READY_CMD));
    assert!(status.contains(GpuStat::READY_VRAM));
    assert!(status.contains(GpuStat::READY_DMA));
    assert!(status.contains(GpuStat::RESERVED));
    assert!(status.contains(GpuStat::DISPLAY_DISABLE));
    assert!(!status.contains(GpuStat::IRQ));
}

#[test]
fn test_reset_preserves_vram() {
    let mut gpu = GPU::new();

    gpu.write_vram(500, 250, 0x7FFF);
    gpu.write_gp0(0xE500_0000 | 0x10);
    gpu.write_gp0(0xE600_0003);
    gpu.write_gp0(red_triangle()[0]);

    gpu.reset();

    assert_eq!(gpu.read_vram(500, 250), 0x7FFF);
    assert_eq!(gpu.status(), 0x1C80_2000);
    assert_eq!(gpu.draw_offset(), DrawOffset::default());
    assert_eq!(gpu.fifo_len(), 0);
    assert!(!gpu.command_in_progress());
}

#[test]
fn test_register_ports() {
    let mut gpu = GPU::new();

    // Offset 4 reads GPUSTAT
    assert_eq!(gpu.read(4), 0x1C80_2000);

    // Offset 4 writes GP1: enable display
    gpu.write(4, 0x0300_0000);
    assert_eq!(gpu.read(4) & (1 << 23), 0);

    // Offset 0 writes GP0
    for word in red_triangle() {
        gpu.write(0, word);
    }
    assert_eq!(gpu.read_vram(12, 12), RED_15);

    // GPUREAD with no pending read-back
    assert_eq!(gpu.read(0), 0);
}

#[test]
fn test_dma_access_charges_one_cycle_per_word() {
    let mut gpu = GPU::new();
    let mut clock = CycleCounter::new();

    for word in red_triangle() {
        gpu.dma_write(&mut clock, word);
    }
    assert_eq!(clock.cycles(), 4);
    assert_eq!(gpu.read_vram(12, 12), RED_15);

    assert_eq!(gpu.dma_read(&mut clock), 0);
    assert_eq!(clock.cycles(), 5);
}

#[test]
fn test_with_config_selects_unhandled_policy() {
    let config = GpuConfig {
        unhandled_command: UnhandledCommandPolicy::Stall,
    };
    let gpu = GPU::with_config(&config);
    assert_eq!(gpu.unhandled_command, UnhandledCommandPolicy::Stall);

    assert_eq!(GPU::default().unhandled_command, UnhandledCommandPolicy::Drop);
}
