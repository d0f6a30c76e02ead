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

//! GPU register type definitions
//!
//! This module contains the packed GPUSTAT layout and the small register
//! blocks set by GP0/GP1 commands: drawing area, drawing offset, texture
//! window and display area.

use crate::core::bitfield::PackedRegister;

bitflags::bitflags! {
    /// GPU status register (GPUSTAT, 0x1F801814)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GpuStat: u32 {
        /// Texture page X base (N×64)
        const TEXPAGE_X = 0xF;
        /// Texture page Y base (N×256)
        const TEXPAGE_Y = 1 << 4;
        /// Semi-transparency mode
        const SEMI_TRANSPARENCY = 0b11 << 5;
        /// Texture page colors (0=4bit, 1=8bit, 2=15bit)
        const TEXTURE_DEPTH = 0b11 << 7;
        /// Dither 24bit to 15bit
        const DITHER = 1 << 9;
        /// Drawing to display area allowed
        const DRAW_TO_DISPLAY = 1 << 10;
        /// Set mask bit when drawing pixels
        const SET_MASK = 1 << 11;
        /// Do not draw to pixels with the mask bit set
        const CHECK_MASK = 1 << 12;
        /// Reserved (always set after reset)
        const RESERVED = 1 << 13;
        /// Reverse flag
        const REVERSE = 1 << 14;
        /// Texture disable
        const TEXTURE_DISABLE = 1 << 15;
        /// Horizontal resolution 2 (368 mode)
        const HRES_2 = 1 << 16;
        /// Horizontal resolution 1 (256/320/512/640)
        const HRES_1 = 0b11 << 17;
        /// Vertical resolution (0=240, 1=480)
        const VRES = 1 << 19;
        /// Video mode (0=NTSC, 1=PAL)
        const VIDEO_MODE = 1 << 20;
        /// Display area color depth (0=15bit, 1=24bit)
        const COLOR_DEPTH_24 = 1 << 21;
        /// Vertical interlace
        const INTERLACE = 1 << 22;
        /// Display disabled
        const DISPLAY_DISABLE = 1 << 23;
        /// Interrupt request
        const IRQ = 1 << 24;
        /// DMA / data request
        const DMA_REQUEST = 1 << 25;
        /// Ready to receive command word
        const READY_CMD = 1 << 26;
        /// Ready to send VRAM to CPU
        const READY_VRAM = 1 << 27;
        /// Ready to receive DMA block
        const READY_DMA = 1 << 28;
        /// DMA direction (0=off, 1=FIFO, 2=CPU→GP0, 3=GPUREAD→CPU)
        const DMA_DIRECTION = 0b11 << 29;
        /// Drawing even/odd lines in interlace mode
        const ODD_LINE = 1 << 31;
    }
}

impl GpuStat {
    /// Bits of GPUSTAT written by GP0(E1h) and the texpage of textured
    /// polygons (bits 0-10; bit 11 of the command lands in bit 15)
    pub const DRAW_MODE_MASK: u32 = 0x7FF;

    /// GPUSTAT after reset: reserved bit, display disabled, all ready flags
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::gpu::GpuStat;
    ///
    /// assert_eq!(GpuStat::reset_value().bits(), 0x1C80_2000);
    /// ```
    pub fn reset_value() -> Self {
        Self::RESERVED
            | Self::DISPLAY_DISABLE
            | Self::READY_CMD
            | Self::READY_VRAM
            | Self::READY_DMA
    }

    /// Texture depth selected for textured drawing
    pub fn texture_depth(&self) -> TextureDepth {
        TextureDepth::from_bits(self.field(Self::TEXTURE_DEPTH))
    }

    /// Semi-transparency mode selected for untextured drawing
    pub fn semi_transparency(&self) -> SemiTransparency {
        SemiTransparency::from_bits(self.field(Self::SEMI_TRANSPARENCY))
    }
}

/// Semi-transparency function (B = existing pixel, F = new pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SemiTransparency {
    /// B/2 + F/2
    #[default]
    Half,
    /// B + F
    Add,
    /// B - F
    Subtract,
    /// B + F/4
    Quarter,
}

impl SemiTransparency {
    /// Decode a 2-bit mode field
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => SemiTransparency::Half,
            1 => SemiTransparency::Add,
            2 => SemiTransparency::Subtract,
            _ => SemiTransparency::Quarter,
        }
    }
}

/// Texel format of a texture page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureDepth {
    /// 4-bit CLUT indices, four texels per VRAM halfword
    #[default]
    T4Bit,
    /// 8-bit CLUT indices, two texels per VRAM halfword
    T8Bit,
    /// Direct 15-bit color (the reserved value 3 behaves the same)
    T15Bit,
}

impl TextureDepth {
    /// Decode a 2-bit depth field
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => TextureDepth::T4Bit,
            1 => TextureDepth::T8Bit,
            _ => TextureDepth::T15Bit,
        }
    }
}

/// Drawing area (clipping rectangle)
///
/// All four bounds are inclusive. A pixel is drawn only when it lies
/// inside the rectangle after the drawing offset has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingArea {
    /// Left edge X coordinate (inclusive)
    pub left: u16,

    /// Top edge Y coordinate (inclusive)
    pub top: u16,

    /// Right edge X coordinate (inclusive)
    pub right: u16,

    /// Bottom edge Y coordinate (inclusive)
    pub bottom: u16,
}

impl DrawingArea {
    /// Check whether a pixel lies inside the area
    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left as i32
            && y >= self.top as i32
            && x <= self.right as i32
            && y <= self.bottom as i32
    }
}

impl Default for DrawingArea {
    fn default() -> Self {
        Self {
            left: 0,
            top: 0,
            right: 1023,
            bottom: 511,
        }
    }
}

/// Drawing offset added to every pixel before clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawOffset {
    /// Signed 11-bit X offset
    pub x: i16,
    /// Signed 11-bit Y offset
    pub y: i16,
}

/// Texture window settings
///
/// Mask and offset are in 8-pixel steps. Texture coordinates are rewritten
/// as `(coord & !(mask * 8)) | ((offset & mask) * 8)` before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureWindow {
    /// Texture window mask X (in 8-pixel steps)
    pub mask_x: u8,

    /// Texture window mask Y (in 8-pixel steps)
    pub mask_y: u8,

    /// Texture window offset X (in 8-pixel steps)
    pub offset_x: u8,

    /// Texture window offset Y (in 8-pixel steps)
    pub offset_y: u8,
}

impl TextureWindow {
    /// Apply the window to a texture coordinate pair
    ///
    /// # Example
    ///
    /// ```
    /// use psxcore::core::gpu::TextureWindow;
    ///
    /// let window = TextureWindow { mask_x: 0x1F, mask_y: 0, offset_x: 0x02, offset_y: 0 };
    /// assert_eq!(window.apply(0xFF, 0x42), (0x17, 0x42));
    /// ```
    #[inline(always)]
    pub fn apply(&self, u: u8, v: u8) -> (u8, u8) {
        let wrap = |coord: u8, mask: u8, offset: u8| -> u8 {
            let mask = mask.wrapping_mul(8);
            let offset = offset.wrapping_mul(8);
            (coord & !mask) | (offset & mask)
        };
        (
            wrap(u, self.mask_x, self.offset_x),
            wrap(v, self.mask_y, self.offset_y),
        )
    }
}

/// Display area configuration set through GP1(05h)-GP1(07h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayArea {
    /// Display area X coordinate in VRAM
    pub x: u16,

    /// Display area Y coordinate in VRAM
    pub y: u16,

    /// Horizontal display range start (GPU clock units)
    pub x1: u16,

    /// Horizontal display range end (GPU clock units)
    pub x2: u16,

    /// Vertical display range start (scanlines)
    pub y1: u16,

    /// Vertical display range end (scanlines)
    pub y2: u16,
}

/// Horizontal resolution modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalRes {
    /// 256 pixels wide
    R256,
    /// 320 pixels wide
    R320,
    /// 512 pixels wide
    R512,
    /// 640 pixels wide
    R640,
    /// 368 pixels wide
    R368,
}

/// Vertical resolution modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalRes {
    /// 240 lines (NTSC) or 256 lines (PAL)
    R240,
    /// 480 lines (NTSC interlaced) or 512 lines (PAL interlaced)
    R480,
}

/// Video mode (refresh rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoMode {
    /// NTSC mode: 60Hz refresh rate
    NTSC,
    /// PAL mode: 50Hz refresh rate
    PAL,
}

/// Display mode decoded from the GPUSTAT bits written by GP1(08h)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    /// Horizontal resolution
    pub horizontal_res: HorizontalRes,

    /// Vertical resolution
    pub vertical_res: VerticalRes,

    /// Video mode (NTSC/PAL)
    pub video_mode: VideoMode,

    /// 24-bit display output
    pub color_depth_24: bool,

    /// Interlaced mode enabled
    pub interlaced: bool,

    /// Display disabled
    pub display_disabled: bool,
}

impl DisplayMode {
    /// Decode the display mode from a status word
    pub fn from_stat(stat: GpuStat) -> Self {
        let horizontal_res = if stat.flag(GpuStat::HRES_2) {
            HorizontalRes::R368
        } else {
            match stat.field(GpuStat::HRES_1) {
                0 => HorizontalRes::R256,
                1 => HorizontalRes::R320,
                2 => HorizontalRes::R512,
                _ => HorizontalRes::R640,
            }
        };

        Self {
            horizontal_res,
            vertical_res: if stat.flag(GpuStat::VRES) {
                VerticalRes::R480
            } else {
                VerticalRes::R240
            },
            video_mode: if stat.flag(GpuStat::VIDEO_MODE) {
                VideoMode::PAL
            } else {
                VideoMode::NTSC
            },
            color_depth_24: stat.flag(GpuStat::COLOR_DEPTH_24),
            interlaced: stat.flag(GpuStat::INTERLACE),
            display_disabled: stat.flag(GpuStat::DISPLAY_DISABLE),
        }
    }
}
