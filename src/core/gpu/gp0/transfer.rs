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

//! GP0 VRAM transfer commands
//!
//! Implements CPU→VRAM and VRAM→CPU rectangle copies.

use crate::core::bitfield::bits;
use crate::core::gpu::GPU;

/// Cursor over a VRAM rectangle
///
/// Pixels are visited left-to-right, top-to-bottom, wrapping at the VRAM
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VramTransfer {
    /// Rectangle origin
    pub x: u16,
    pub y: u16,
    /// Rectangle size (1-1024 × 1-512)
    pub width: u16,
    pub height: u16,
    /// Position of the next pixel, relative to the origin
    pub current_x: u16,
    pub current_y: u16,
}

impl VramTransfer {
    /// Decode the coordinate and size words of GP0(A0h)/GP0(C0h)
    ///
    /// A size of 0 selects the maximum (1024 or 512).
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::gpu::VramTransfer;
    ///
    /// let transfer = VramTransfer::from_words(0x0020_0010, 0x0000_0004);
    /// assert_eq!((transfer.x, transfer.y), (16, 32));
    /// assert_eq!((transfer.width, transfer.height), (4, 512));
    /// ```
    pub fn from_words(coords: u32, size: u32) -> Self {
        let width = (bits(size, 0, 16) as u16).wrapping_sub(1) & 0x3FF;
        let height = (bits(size, 16, 16) as u16).wrapping_sub(1) & 0x1FF;

        Self {
            x: bits(coords, 0, 10) as u16,
            y: bits(coords, 16, 9) as u16,
            width: width + 1,
            height: height + 1,
            current_x: 0,
            current_y: 0,
        }
    }

    /// Total number of pixels in the rectangle
    pub fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// VRAM coordinate of the next pixel, advancing the cursor
    fn next(&mut self) -> (u16, u16) {
        let x = (self.x + self.current_x) & 0x3FF;
        let y = (self.y + self.current_y) & 0x1FF;

        self.current_x += 1;
        if self.current_x == self.width {
            self.current_x = 0;
            self.current_y += 1;
        }
        (x, y)
    }

    /// Whether every row has been visited
    fn is_done(&self) -> bool {
        self.current_y >= self.height
    }
}

impl GPU {
    /// GP0(A0h): Copy Rectangle (CPU→VRAM)
    ///
    /// ```text
    /// Word 0: 0xA0000000
    /// Word 1: Destination (X in bits 0-15, Y in bits 16-31)
    /// Word 2: Size (Width in bits 0-15, Height in bits 16-31)
    /// Word 3+: Pixel data, two 16-bit pixels per word (low half first)
    /// ```
    ///
    /// The header is decoded once; after that every call consumes one data
    /// word, so the copy holds the dispatcher until the last word arrives.
    pub(in crate::core::gpu) fn gp0_copy_rect_cpu_to_vram(&mut self) {
        if self.progress.remaining_words == 0 {
            let Some([_, coords, size]) = self.fifo.dequeue::<3>() else {
                return;
            };

            let transfer = VramTransfer::from_words(coords, size);
            self.progress.remaining_words = transfer.pixel_count().div_ceil(2);
            self.upload = Some(transfer);

            log::debug!(
                "CPU→VRAM copy: ({}, {}) size {}×{}, {} words",
                transfer.x,
                transfer.y,
                transfer.width,
                transfer.height,
                self.progress.remaining_words
            );
            return;
        }

        let Some([word]) = self.fifo.dequeue::<1>() else {
            return;
        };
        let Some(mut transfer) = self.upload.take() else {
            self.progress.complete();
            return;
        };

        // The high half of the last word is padding when the pixel count is odd
        for pixel in [word as u16, (word >> 16) as u16] {
            if transfer.is_done() {
                break;
            }
            let (x, y) = transfer.next();
            self.write_vram(x, y, pixel);
        }

        self.progress.remaining_words -= 1;
        if self.progress.remaining_words == 0 {
            log::debug!("CPU→VRAM copy complete");
            self.progress.complete();
        } else {
            self.upload = Some(transfer);
        }
    }

    /// GP0(C0h): Copy Rectangle (VRAM→CPU)
    ///
    /// Same header as GP0(A0h). The pixels are then read from GPUREAD, two
    /// per word.
    pub(in crate::core::gpu) fn gp0_copy_rect_vram_to_cpu(&mut self) {
        let Some([_, coords, size]) = self.fifo.dequeue::<3>() else {
            return;
        };

        let transfer = VramTransfer::from_words(coords, size);
        log::debug!(
            "VRAM→CPU copy: ({}, {}) size {}×{}",
            transfer.x,
            transfer.y,
            transfer.width,
            transfer.height
        );

        self.readback = Some(transfer);
        self.progress.complete();
    }

    /// Read GPUREAD (0x1F801810)
    ///
    /// While a VRAM→CPU copy is active each read returns the next two
    /// pixels (first pixel in the low half). Otherwise the last value read
    /// is returned again.
    pub(in crate::core::gpu) fn read_gpuread(&mut self) -> u32 {
        let Some(mut transfer) = self.readback.take() else {
            return self.read_latch;
        };

        let mut word = 0u32;
        for shift in [0, 16] {
            if transfer.is_done() {
                break;
            }
            let (x, y) = transfer.next();
            word |= (self.read_vram(x, y) as u32) << shift;
        }

        if transfer.is_done() {
            log::debug!("VRAM→CPU copy complete");
        } else {
            self.readback = Some(transfer);
        }

        self.read_latch = word;
        word
    }
}
