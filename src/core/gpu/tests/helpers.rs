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

//! Command word builders shared by the GPU tests

use super::super::GPU;

/// Pure red in VRAM format
pub(super) const RED_15: u16 = 0x7C00;

/// Pack a vertex word (X bits 0-10, Y bits 16-26)
pub(super) fn vertex(x: i16, y: i16) -> u32 {
    ((y as u16 as u32 & 0x7FF) << 16) | (x as u16 as u32 & 0x7FF)
}

/// Pack a texcoord word with an attribute (CLUT or texpage) in the high half
pub(super) fn texcoord(u: u8, v: u8, attribute: u16) -> u32 {
    ((attribute as u32) << 16) | ((v as u32) << 8) | u as u32
}

/// Pack a command word with a color
pub(super) fn command(opcode: u8, r: u8, g: u8, b: u8) -> u32 {
    ((opcode as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | r as u32
}

/// Write every word to GP0
pub(super) fn send(gpu: &mut GPU, words: &[u32]) {
    for &word in words {
        gpu.write_gp0(word);
    }
}

/// Opaque red triangle at (10,10), (20,10), (10,20)
pub(super) fn red_triangle() -> [u32; 4] {
    [
        command(0x20, 0xFF, 0, 0),
        vertex(10, 10),
        vertex(20, 10),
        vertex(10, 20),
    ]
}

/// Fill a VRAM rectangle with one value
pub(super) fn fill_vram(gpu: &mut GPU, x: u16, y: u16, width: u16, height: u16, value: u16) {
    for dy in 0..height {
        for dx in 0..width {
            gpu.write_vram(x + dx, y + dy, value);
        }
    }
}
