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

//! GP1 control commands
//!
//! Implements GPU reset, interrupt acknowledge, DMA direction and the
//! GPU info query.

use crate::core::bitfield::PackedRegister;
use crate::core::gpu::{GpuStat, GPU};

impl GPU {
    /// GP1(0x00): Reset GPU
    ///
    /// Restores GPUSTAT to its reset value and empties the command
    /// pipeline. VRAM contents are preserved.
    pub(in crate::core::gpu) fn gp1_reset_gpu(&mut self) {
        self.reset();
        log::debug!("GPU reset");
    }

    /// GP1(0x01): Reset Command Buffer
    ///
    /// Clears the GP0 FIFO and abandons the command in progress,
    /// including an unfinished CPU→VRAM copy.
    pub(in crate::core::gpu) fn gp1_reset_command_buffer(&mut self) {
        self.fifo.clear();
        self.progress.complete();
        self.upload = None;

        log::debug!("Command buffer reset");
    }

    /// GP1(0x02): Acknowledge GPU Interrupt
    pub(in crate::core::gpu) fn gp1_acknowledge_interrupt(&mut self) {
        self.stat.remove(GpuStat::IRQ);
        log::debug!("GPU interrupt acknowledged");
    }

    /// GP1(0x04): DMA Direction
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-1: Direction (0=Off, 1=FIFO, 2=CPUtoGP0, 3=GPUREADtoCPU)
    pub(in crate::core::gpu) fn gp1_dma_direction(&mut self, value: u32) {
        let direction = value & 3;
        self.stat.set_field(GpuStat::DMA_DIRECTION, direction);

        match direction {
            0 => log::debug!("DMA off"),
            1 => log::debug!("DMA FIFO"),
            2 => log::debug!("DMA CPU→GP0"),
            _ => log::debug!("DMA GPUREAD→CPU"),
        }
    }

    /// GP1(0x10): GPU Info
    ///
    /// Latches the requested value into GPUREAD.
    ///
    /// | Type | Value                                  |
    /// |------|----------------------------------------|
    /// | 2    | Texture window (GP0(E2h) bits 0-19)    |
    /// | 3    | Drawing area top-left (GP0(E3h) layout) |
    /// | 4    | Drawing area bottom-right              |
    /// | 5    | Drawing offset (GP0(E5h) layout)       |
    /// | 7    | GPU version (2)                        |
    ///
    /// Other types leave GPUREAD unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use psxcore::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_gp1(0x1000_0007);
    /// assert_eq!(gpu.read(0), 2);
    /// ```
    pub(in crate::core::gpu) fn gp1_get_gpu_info(&mut self, value: u32) {
        let info_type = value & 0x7;

        let info = match info_type {
            2 => {
                let window = self.texture_window;
                (window.mask_x as u32)
                    | (window.mask_y as u32) << 5
                    | (window.offset_x as u32) << 10
                    | (window.offset_y as u32) << 15
            }
            3 => (self.draw_area.left as u32) | (self.draw_area.top as u32) << 10,
            4 => (self.draw_area.right as u32) | (self.draw_area.bottom as u32) << 10,
            5 => {
                let x = self.draw_offset.x as u32 & 0x7FF;
                let y = self.draw_offset.y as u32 & 0x7FF;
                x | y << 11
            }
            7 => 2,
            _ => {
                log::debug!("GPU info request: type {} ignored", info_type);
                return;
            }
        };

        log::debug!("GPU info request: type {} = 0x{:06X}", info_type, info);
        self.read_latch = info;
    }
}
