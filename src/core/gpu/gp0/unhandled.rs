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

//! GP0 commands without a renderer
//!
//! Fill, line, rectangle, VRAM→VRAM copy and the polygon variants that are
//! not drawn are still consumed as whole commands, so that their argument
//! words are never taken for opcodes.

use crate::core::config::UnhandledCommandPolicy;
use crate::core::gpu::GPU;

/// Polyline terminator pattern (checked with [`POLYLINE_END_MASK`])
const POLYLINE_END: u32 = 0x5000_5000;
const POLYLINE_END_MASK: u32 = 0xF000_F000;

/// Length of a GP0 command in words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandLength {
    /// Exactly this many words, command word included
    Fixed(u32),
    /// `prefix` words, then any number of words up to and including a
    /// 0x5xxx5xxx terminator
    Polyline { prefix: u32 },
}

impl CommandLength {
    /// Word count of the command started by `opcode`
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::gpu::CommandLength;
    ///
    /// assert_eq!(CommandLength::of(0x02), CommandLength::Fixed(3));
    /// assert_eq!(CommandLength::of(0x64), CommandLength::Fixed(4));
    /// assert_eq!(CommandLength::of(0x48), CommandLength::Polyline { prefix: 3 });
    /// ```
    pub fn of(opcode: u8) -> Self {
        match opcode {
            // Fill rectangle: command + color, position, size
            0x02 => CommandLength::Fixed(3),

            0x20..=0x3F => {
                let vertices = if opcode & 0x08 != 0 { 4 } else { 3 };
                let textured = if opcode & 0x04 != 0 { vertices } else { 0 };
                let shaded = if opcode & 0x10 != 0 { vertices - 1 } else { 0 };
                CommandLength::Fixed(1 + vertices + textured + shaded)
            }

            0x40..=0x5F => {
                let length = if opcode & 0x10 != 0 { 4 } else { 3 };
                if opcode & 0x08 != 0 {
                    CommandLength::Polyline { prefix: length }
                } else {
                    CommandLength::Fixed(length)
                }
            }

            // Rectangle: command + color, vertex, [texcoord], [size]
            0x60..=0x7F => {
                let textured = (opcode >> 2) & 1;
                let variable_size = u8::from(opcode & 0x18 == 0);
                CommandLength::Fixed(2 + textured as u32 + variable_size as u32)
            }

            // VRAM→VRAM copy: command, source, destination, size
            0x80..=0x9F => CommandLength::Fixed(4),

            _ => CommandLength::Fixed(1),
        }
    }
}

impl GPU {
    /// Opcode without a handler
    ///
    /// Under the drop policy the whole command is consumed and discarded;
    /// under the stall policy it stays at the head of the FIFO.
    pub(in crate::core::gpu) fn gp0_unhandled(&mut self, opcode: u8) {
        match self.unhandled_command {
            UnhandledCommandPolicy::Drop => self.gp0_discard_command(opcode),
            UnhandledCommandPolicy::Stall => {
                log::warn!("Unhandled GP0 command 0x{:02X}, FIFO stalled", opcode);
            }
        }
    }

    /// Consume the words of a dropped command as they arrive
    fn gp0_discard_command(&mut self, opcode: u8) {
        let length = CommandLength::of(opcode);
        if self.progress.words_consumed == 0 {
            log::warn!(
                "Unhandled GP0 command 0x{:02X} ({:?}), dropped",
                opcode,
                length
            );
        }

        while let Some([word]) = self.fifo.dequeue::<1>() {
            self.progress.words_consumed += 1;
            let consumed = self.progress.words_consumed;

            let done = match length {
                CommandLength::Fixed(words) => consumed >= words,
                CommandLength::Polyline { prefix } => {
                    consumed > prefix && word & POLYLINE_END_MASK == POLYLINE_END
                }
            };
            if done {
                self.progress.complete();
                return;
            }
        }
    }
}
