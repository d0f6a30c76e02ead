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

//! GP0 Drawing Mode Commands
//!
//! This module implements GP0 commands that control drawing settings such as
//! texture page, drawing area, drawing offset, and masking behavior.
//!
//! # Commands
//!
//! - 0x01: Clear Cache
//! - 0xE1: Draw Mode Setting (texture page, transparency, dithering, etc.)
//! - 0xE2: Texture Window Setting
//! - 0xE3: Set Drawing Area Top-Left
//! - 0xE4: Set Drawing Area Bottom-Right
//! - 0xE5: Set Drawing Offset
//! - 0xE6: Mask Bit Setting
//!
//! E1, E3, E4 and E5 normally run without entering the FIFO. When they
//! arrive behind a queued command they are dispatched from the FIFO like
//! E2 and E6.
//!
//! # References
//!
//! - [PSX-SPX: GP0 Drawing Settings](http://problemkaputt.de/psx-spx.htm#gpurenderattributes)

use crate::core::bitfield::{bits, sign_extend, PackedRegister};
use crate::core::gpu::{GpuStat, GPU};

impl GPU {
    /// GP0(01h) - Clear Cache
    ///
    /// Drops everything still queued behind the command.
    pub(in crate::core::gpu) fn gp0_clear_cache(&mut self) {
        log::debug!("GP0 clear cache ({} words discarded)", self.fifo.len());
        self.fifo.clear();
        self.progress.complete();
    }

    /// Single-word setting dispatched from the FIFO (E1h-E6h)
    pub(in crate::core::gpu) fn gp0_queued_setting(&mut self) {
        let Some([value]) = self.fifo.dequeue::<1>() else {
            return;
        };

        match value >> 24 {
            0xE1 => self.gp0_draw_mode(value),
            0xE2 => self.gp0_texture_window(value),
            0xE3 => self.gp0_draw_area_top_left(value),
            0xE4 => self.gp0_draw_area_bottom_right(value),
            0xE5 => self.gp0_draw_offset(value),
            _ => self.gp0_mask_settings(value),
        }
        self.progress.complete();
    }

    /// GP0(E1h) - Draw Mode Setting (aka "Texpage")
    ///
    /// # Command Format
    ///
    /// ```text
    /// 0xE1000000 | params
    ///   Bit 0-3:   Texture page X Base   (N*64)
    ///   Bit 4:     Texture page Y Base   (N*256)
    ///   Bit 5-6:   Semi Transparency     (0=B/2+F/2, 1=B+F, 2=B-F, 3=B+F/4)
    ///   Bit 7-8:   Texture page colors   (0=4bit, 1=8bit, 2=15bit)
    ///   Bit 9:     Dithering enabled
    ///   Bit 10:    Drawing to display area allowed
    ///   Bit 11:    Texture disable       (GPUSTAT bit 15)
    ///   Bit 12:    Textured rect X-flip
    ///   Bit 13:    Textured rect Y-flip
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use psxcore::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// // Texture page (128, 256), 8-bit texels, flipped X
    /// gpu.write_gp0(0xE100_10B2);
    /// assert_eq!(gpu.status() & 0x7FF, 0x0B2);
    /// assert_eq!(gpu.rect_flip(), (true, false));
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_mode(&mut self, value: u32) {
        let mut stat = self.stat.bits();
        stat = (stat & !GpuStat::DRAW_MODE_MASK) | (value & GpuStat::DRAW_MODE_MASK);
        self.stat = GpuStat::from_bits_retain(stat);
        self.stat
            .set_flag(GpuStat::TEXTURE_DISABLE, bits(value, 11, 1) != 0);

        self.rect_flip = (bits(value, 12, 1) != 0, bits(value, 13, 1) != 0);

        log::debug!(
            "Draw mode: page=({}, {}) depth={:?} semi={:?} tex_disable={}",
            self.stat.field(GpuStat::TEXPAGE_X) * 64,
            self.stat.field(GpuStat::TEXPAGE_Y) * 256,
            self.stat.texture_depth(),
            self.stat.semi_transparency(),
            self.stat.flag(GpuStat::TEXTURE_DISABLE),
        );
    }

    /// Apply the texpage attribute of a textured polygon to GPUSTAT
    ///
    /// Only the page, semi-transparency, depth and texture disable bits
    /// are taken; dithering and draw-to-display keep their E1h values.
    pub(in crate::core::gpu) fn apply_texpage(&mut self, texpage: u16) {
        let value = texpage as u32;
        self.stat.set_field(GpuStat::TEXPAGE_X, bits(value, 0, 4));
        self.stat.set_field(GpuStat::TEXPAGE_Y, bits(value, 4, 1));
        self.stat
            .set_field(GpuStat::SEMI_TRANSPARENCY, bits(value, 5, 2));
        self.stat.set_field(GpuStat::TEXTURE_DEPTH, bits(value, 7, 2));
        self.stat
            .set_flag(GpuStat::TEXTURE_DISABLE, bits(value, 11, 1) != 0);
    }

    /// GP0(E2h) - Texture Window Setting
    ///
    /// ```text
    ///   Bit 0-4:   Mask X   (in 8-pixel steps)
    ///   Bit 5-9:   Mask Y
    ///   Bit 10-14: Offset X
    ///   Bit 15-19: Offset Y
    /// ```
    pub(in crate::core::gpu) fn gp0_texture_window(&mut self, value: u32) {
        self.texture_window.mask_x = bits(value, 0, 5) as u8;
        self.texture_window.mask_y = bits(value, 5, 5) as u8;
        self.texture_window.offset_x = bits(value, 10, 5) as u8;
        self.texture_window.offset_y = bits(value, 15, 5) as u8;

        log::debug!("Texture window: {:?}", self.texture_window);
    }

    /// GP0(E3h) - Set Drawing Area Top-Left (X bits 0-9, Y bits 10-19)
    pub(in crate::core::gpu) fn gp0_draw_area_top_left(&mut self, value: u32) {
        self.draw_area.left = bits(value, 0, 10) as u16;
        self.draw_area.top = bits(value, 10, 10) as u16;

        log::debug!(
            "Drawing area top-left: ({}, {})",
            self.draw_area.left,
            self.draw_area.top
        );
    }

    /// GP0(E4h) - Set Drawing Area Bottom-Right (X bits 0-9, Y bits 10-19)
    pub(in crate::core::gpu) fn gp0_draw_area_bottom_right(&mut self, value: u32) {
        self.draw_area.right = bits(value, 0, 10) as u16;
        self.draw_area.bottom = bits(value, 10, 10) as u16;

        log::debug!(
            "Drawing area bottom-right: ({}, {})",
            self.draw_area.right,
            self.draw_area.bottom
        );
    }

    /// GP0(E5h) - Set Drawing Offset
    ///
    /// X in bits 0-10 and Y in bits 11-21, both signed 11-bit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use psxcore::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_gp0(0xE500_0000 | (0x7FF << 11) | 0x10);
    /// assert_eq!((gpu.draw_offset().x, gpu.draw_offset().y), (16, -1));
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_offset(&mut self, value: u32) {
        self.draw_offset.x = sign_extend(bits(value, 0, 11), 11) as i16;
        self.draw_offset.y = sign_extend(bits(value, 11, 11), 11) as i16;

        log::debug!(
            "Drawing offset: ({}, {})",
            self.draw_offset.x,
            self.draw_offset.y
        );
    }

    /// GP0(E6h) - Mask Bit Setting
    ///
    /// Bit 0 forces the mask bit on drawn pixels, bit 1 protects pixels
    /// whose mask bit is already set.
    pub(in crate::core::gpu) fn gp0_mask_settings(&mut self, value: u32) {
        self.stat.set_flag(GpuStat::SET_MASK, bits(value, 0, 1) != 0);
        self.stat.set_flag(GpuStat::CHECK_MASK, bits(value, 1, 1) != 0);

        log::debug!(
            "Mask settings: set={} check={}",
            self.stat.flag(GpuStat::SET_MASK),
            self.stat.flag(GpuStat::CHECK_MASK)
        );
    }
}
