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

//! GP0 command processing
//!
//! GP0 words either run immediately (register-style settings that arrive
//! while the dispatcher is idle) or go through the command FIFO. The
//! dispatcher captures the opcode at the head of the FIFO, then calls its
//! handler until the handler marks the command complete. Handlers that need
//! more words than are queued return without consuming anything and are
//! retried on the next write.
//!
//! # Command Map
//!
//! | Opcode        | Command                          | Words |
//! |---------------|----------------------------------|-------|
//! | 00, 04-1E     | No-op                            | 1     |
//! | 01            | Clear cache                      | 1     |
//! | 20, 22        | Monochrome triangle              | 4     |
//! | 24-27         | Textured triangle                | 7     |
//! | 28, 2A        | Monochrome quad                  | 5     |
//! | 2C-2F         | Textured quad                    | 9     |
//! | 30, 32        | Shaded triangle                  | 6     |
//! | 38, 3A        | Shaded quad                      | 8     |
//! | A0            | Copy rectangle CPU→VRAM          | 3+N   |
//! | C0            | Copy rectangle VRAM→CPU          | 3     |
//! | E1-E6         | Drawing settings                 | 1     |
//! | E0, E7-EF     | No-op                            | 1     |
//!
//! Any other opcode is unhandled: by default it is consumed as a whole
//! command (see [`CommandLength`]) and discarded.

use super::GPU;

mod drawing_mode;
mod polygon;
mod transfer;
mod unhandled;

pub use transfer::VramTransfer;
pub use unhandled::CommandLength;

impl GPU {
    /// Write a word to GP0
    ///
    /// # Arguments
    ///
    /// * `value` - 32-bit GP0 command or data word
    pub fn write_gp0(&mut self, value: u32) {
        log::trace!("GP0 <- 0x{:08X}", value);

        if !self.progress.in_progress && self.execute_immediate(value) {
            return;
        }

        if !self.fifo.enqueue(value) {
            log::warn!("GP0 FIFO full, dropping word 0x{:08X}", value);
        }

        self.process_fifo();
    }

    /// Run a register-style command without queuing it
    ///
    /// # Returns
    ///
    /// `true` if the word was consumed
    fn execute_immediate(&mut self, value: u32) -> bool {
        match value >> 24 {
            0x00 | 0x04..=0x1E | 0xE0 | 0xE7..=0xEF => true,
            0xE1 => {
                self.gp0_draw_mode(value);
                true
            }
            0xE3 => {
                self.gp0_draw_area_top_left(value);
                true
            }
            0xE4 => {
                self.gp0_draw_area_bottom_right(value);
                true
            }
            0xE5 => {
                self.gp0_draw_offset(value);
                true
            }
            _ => false,
        }
    }

    /// Drain the FIFO
    ///
    /// Keeps dispatching while commands complete or consume words, and
    /// stops once the head command is waiting for data (or the FIFO is
    /// empty).
    pub(in crate::core::gpu) fn process_fifo(&mut self) {
        loop {
            if !self.progress.in_progress {
                let Some(opcode) = self.fifo.peek_opcode() else {
                    return;
                };
                self.progress.start(opcode);
            }

            let queued = self.fifo.len();
            self.execute_command(self.progress.opcode);

            if self.progress.in_progress && self.fifo.len() == queued {
                return;
            }
        }
    }

    /// Call the handler of a captured opcode
    fn execute_command(&mut self, opcode: u8) {
        match opcode {
            0x01 => self.gp0_clear_cache(),

            0x20 | 0x22 => self.gp0_monochrome_triangle(),
            0x24..=0x27 => self.gp0_textured_triangle(),
            0x28 | 0x2A => self.gp0_monochrome_quad(),
            0x2C..=0x2F => self.gp0_textured_quad(),
            0x30 | 0x32 => self.gp0_shaded_triangle(),
            0x38 | 0x3A => self.gp0_shaded_quad(),

            0xA0 => self.gp0_copy_rect_cpu_to_vram(),
            0xC0 => self.gp0_copy_rect_vram_to_cpu(),

            0xE1..=0xE6 => self.gp0_queued_setting(),
            0x00 | 0x04..=0x1E | 0xE0 | 0xE7..=0xEF => self.gp0_nop(),

            _ => self.gp0_unhandled(opcode),
        }
    }

    /// No-op command word
    fn gp0_nop(&mut self) {
        if self.fifo.dequeue::<1>().is_some() {
            self.progress.complete();
        }
    }
}
