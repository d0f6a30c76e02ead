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

//! GP1 command processing
//!
//! GP1 commands execute synchronously and never enter the FIFO. The GP0
//! dispatcher runs after each one, as it does after a GP0 write.
//! GP1(11h-1Fh) mirror GP1(10h).

use super::GPU;

mod control;
mod display;

impl GPU {
    /// Write a word to GP1
    ///
    /// # Arguments
    ///
    /// * `value` - Command in bits 24-31, parameter in bits 0-23
    pub fn write_gp1(&mut self, value: u32) {
        let command = value >> 24;
        log::trace!("GP1 <- 0x{:08X}", value);

        match command {
            0x00 => self.gp1_reset_gpu(),
            0x01 => self.gp1_reset_command_buffer(),
            0x02 => self.gp1_acknowledge_interrupt(),
            0x03 => self.gp1_display_enable(value),
            0x04 => self.gp1_dma_direction(value),
            0x05 => self.gp1_display_area_start(value),
            0x06 => self.gp1_horizontal_display_range(value),
            0x07 => self.gp1_vertical_display_range(value),
            0x08 => self.gp1_display_mode(value),
            0x10..=0x1F => self.gp1_get_gpu_info(value),
            _ => {
                log::warn!("Unknown GP1 command: 0x{:02X}", command);
            }
        }

        self.process_fifo();
    }
}
