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

//! GPU (Graphics Processing Unit) implementation
//!
//! This module implements the command side of the PlayStation GPU:
//! - 1MB of VRAM (1024×512 pixels, 16-bit per pixel)
//! - The GP0 command FIFO and its dispatcher
//! - GP1 control commands
//! - A software triangle rasterizer with Gouraud shading and texturing
//!
//! # Color Format
//!
//! VRAM pixels use 16-bit color in 5-5-5 format:
//! - Bits 0-4: Blue (5 bits)
//! - Bits 5-9: Green (5 bits)
//! - Bits 10-14: Red (5 bits)
//! - Bit 15: Mask bit (used for draw masking)
//!
//! # Register Ports
//!
//! | Offset | Read     | Write |
//! |--------|----------|-------|
//! | 0x0    | GPUREAD  | GP0   |
//! | 0x4    | GPUSTAT  | GP1   |
//!
//! # References
//!
//! - [PSX-SPX: GPU](http://problemkaputt.de/psx-spx.htm#gpu)

use crate::core::config::{GpuConfig, UnhandledCommandPolicy};
use crate::core::error::{GpuError, Result};
use crate::core::timing::Clock;

mod fifo;
mod gp0;
mod gp1;
mod primitives;
mod registers;
mod render;
#[cfg(test)]
mod tests;

// Public re-exports
pub use fifo::{CommandFifo, CommandProgress};
pub use gp0::{CommandLength, VramTransfer};
pub use primitives::*;
pub use registers::*;

/// GPU state
///
/// The GPU is driven entirely by register writes: every GP0 word goes
/// through the command FIFO and the dispatcher runs synchronously inside
/// the write that delivered it.
///
/// # Examples
///
/// ```
/// use psxcore::core::GPU;
///
/// let mut gpu = GPU::new();
///
/// // Red triangle at (10,10), (20,10), (10,20)
/// gpu.write(0, 0x2000_00FF);
/// gpu.write(0, 0x000A_000A);
/// gpu.write(0, 0x000A_0014);
/// gpu.write(0, 0x0014_000A);
///
/// assert_eq!(gpu.read_vram(12, 12), 0x7C00);
/// assert_eq!(gpu.read_vram(0, 0), 0x0000);
/// ```
pub struct GPU {
    /// VRAM: 1024×512 pixels in row-major order
    pub(in crate::core::gpu) vram: Vec<u16>,

    /// GPUSTAT
    pub(in crate::core::gpu) stat: GpuStat,

    /// GP0 command FIFO
    pub(in crate::core::gpu) fifo: CommandFifo,

    /// Command currently being assembled from the FIFO
    pub(in crate::core::gpu) progress: CommandProgress,

    /// Drawing area (clipping rectangle)
    pub(in crate::core::gpu) draw_area: DrawingArea,

    /// Drawing offset added to every vertex
    pub(in crate::core::gpu) draw_offset: DrawOffset,

    /// Texture window settings
    pub(in crate::core::gpu) texture_window: TextureWindow,

    /// Display area settings
    pub(in crate::core::gpu) display_area: DisplayArea,

    /// Textured rectangle X/Y flip flags from GP0(E1h) bits 12-13
    pub(in crate::core::gpu) rect_flip: (bool, bool),

    /// Destination cursor of an active CPU→VRAM copy
    pub(in crate::core::gpu) upload: Option<VramTransfer>,

    /// Source cursor of an active VRAM→CPU copy
    pub(in crate::core::gpu) readback: Option<VramTransfer>,

    /// Last value presented on GPUREAD
    pub(in crate::core::gpu) read_latch: u32,

    /// Handling of unimplemented GP0 opcodes
    pub(in crate::core::gpu) unhandled_command: UnhandledCommandPolicy,
}

impl GPU {
    /// VRAM width in pixels
    pub const VRAM_WIDTH: usize = 1024;

    /// VRAM height in pixels
    pub const VRAM_HEIGHT: usize = 512;

    /// Total VRAM size in pixels
    pub const VRAM_SIZE: usize = Self::VRAM_WIDTH * Self::VRAM_HEIGHT;

    /// Create a new GPU with black VRAM and reset registers
    ///
    /// # Examples
    ///
    /// ```
    /// use psxcore::core::GPU;
    ///
    /// let gpu = GPU::new();
    /// assert_eq!(gpu.status(), 0x1C80_2000);
    /// assert_eq!(gpu.read_vram(0, 0), 0x0000);
    /// ```
    pub fn new() -> Self {
        Self::with_config(&GpuConfig::default())
    }

    /// Create a GPU using the given options
    pub fn with_config(config: &GpuConfig) -> Self {
        let mut gpu = Self {
            vram: vec![0x0000; Self::VRAM_SIZE],
            stat: GpuStat::reset_value(),
            fifo: CommandFifo::new(),
            progress: CommandProgress::default(),
            draw_area: DrawingArea::default(),
            draw_offset: DrawOffset::default(),
            texture_window: TextureWindow::default(),
            display_area: DisplayArea::default(),
            rect_flip: (false, false),
            upload: None,
            readback: None,
            read_latch: 0,
            unhandled_command: config.unhandled_command,
        };
        gpu.reset();
        gpu
    }

    /// Reset all registers and the command pipeline
    ///
    /// VRAM contents are preserved, as with GP1(00h).
    pub fn reset(&mut self) {
        self.stat = GpuStat::reset_value();
        self.fifo.clear();
        self.progress = CommandProgress::default();
        self.draw_area = DrawingArea::default();
        self.draw_offset = DrawOffset::default();
        self.texture_window = TextureWindow::default();
        self.display_area = DisplayArea::default();
        self.rect_flip = (false, false);
        self.upload = None;
        self.readback = None;
    }

    /// Read a GPU register
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset from the GPU base (0 = GPUREAD, 4 = GPUSTAT)
    pub fn read(&mut self, offset: u32) -> u32 {
        if offset & 0x4 == 0 {
            self.read_gpuread()
        } else {
            self.status()
        }
    }

    /// Write a GPU register
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset from the GPU base (0 = GP0, 4 = GP1)
    /// * `value` - Command word
    pub fn write(&mut self, offset: u32, value: u32) {
        if offset & 0x4 == 0 {
            self.write_gp0(value);
        } else {
            self.write_gp1(value);
        }
    }

    /// DMA read: one GPUREAD access, charged one cycle
    pub fn dma_read<C: Clock + ?Sized>(&mut self, clock: &mut C) -> u32 {
        clock.consume(1);
        self.read(0)
    }

    /// DMA write: one GP0 access, charged one cycle
    pub fn dma_write<C: Clock + ?Sized>(&mut self, clock: &mut C, value: u32) {
        clock.consume(1);
        self.write(0, value);
    }

    /// Read a 16-bit pixel from VRAM
    ///
    /// Coordinates wrap to the VRAM size (0-1023, 0-511).
    #[inline(always)]
    pub fn read_vram(&self, x: u16, y: u16) -> u16 {
        self.vram[Self::vram_index(x, y)]
    }

    /// Write a 16-bit pixel to VRAM
    ///
    /// Coordinates wrap to the VRAM size (0-1023, 0-511).
    ///
    /// # Examples
    ///
    /// ```
    /// use psxcore::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_vram(1024 + 5, 3, 0x7FFF);
    /// assert_eq!(gpu.read_vram(5, 3), 0x7FFF);
    /// ```
    #[inline(always)]
    pub fn write_vram(&mut self, x: u16, y: u16, value: u16) {
        let index = Self::vram_index(x, y);
        self.vram[index] = value;
    }

    /// Upload a block of pixels from the host
    ///
    /// `pixels` holds `width × height` values in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GpuError::InvalidVramAccess`] if the rectangle does not lie
    /// entirely inside VRAM or `pixels` has the wrong length. Nothing is
    /// written in that case.
    pub fn write_vram_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        pixels: &[u16],
    ) -> Result<()> {
        let fits = x as usize + width as usize <= Self::VRAM_WIDTH
            && y as usize + height as usize <= Self::VRAM_HEIGHT;
        if !fits || pixels.len() != width as usize * height as usize {
            return Err(GpuError::InvalidVramAccess { x, y }.into());
        }

        if width == 0 {
            return Ok(());
        }
        for (row, line) in pixels.chunks_exact(width as usize).enumerate() {
            let start = Self::vram_index(x, y + row as u16);
            self.vram[start..start + line.len()].copy_from_slice(line);
        }
        Ok(())
    }

    /// Whole VRAM in row-major order
    pub fn vram(&self) -> &[u16] {
        &self.vram
    }

    /// Linear index of a wrapped VRAM coordinate
    #[inline(always)]
    pub(in crate::core::gpu) fn vram_index(x: u16, y: u16) -> usize {
        let x = (x & 0x3FF) as usize;
        let y = (y & 0x1FF) as usize;
        y * Self::VRAM_WIDTH + x
    }

    /// Current GPUSTAT value
    pub fn status(&self) -> u32 {
        self.stat.bits()
    }

    /// Display mode decoded from GPUSTAT
    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_stat(self.stat)
    }

    /// Drawing area (clipping rectangle)
    pub fn draw_area(&self) -> DrawingArea {
        self.draw_area
    }

    /// Drawing offset
    pub fn draw_offset(&self) -> DrawOffset {
        self.draw_offset
    }

    /// Texture window
    pub fn texture_window(&self) -> TextureWindow {
        self.texture_window
    }

    /// Display area configuration
    pub fn display_area(&self) -> DisplayArea {
        self.display_area
    }

    /// Textured rectangle flip flags (X, Y)
    pub fn rect_flip(&self) -> (bool, bool) {
        self.rect_flip
    }

    /// Number of words waiting in the GP0 FIFO
    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    /// Progress of the command at the head of the FIFO
    pub fn progress(&self) -> CommandProgress {
        self.progress
    }

    /// Whether a GP0 command is partially received
    pub fn command_in_progress(&self) -> bool {
        self.progress.in_progress
    }
}

impl Default for GPU {
    fn default() -> Self {
        Self::new()
    }
}
