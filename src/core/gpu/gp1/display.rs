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

//! GP1 display configuration commands
//!
//! Implements display enable, display area and display mode settings.

use crate::core::bitfield::{bits, PackedRegister};
use crate::core::gpu::{GpuStat, GPU};

impl GPU {
    /// GP1(0x03): Display Enable
    ///
    /// # Arguments
    ///
    /// * `value` - Bit 0: 0=Enable, 1=Disable
    pub(in crate::core::gpu) fn gp1_display_enable(&mut self, value: u32) {
        let disabled = bits(value, 0, 1) != 0;
        self.stat.set_flag(GpuStat::DISPLAY_DISABLE, disabled);

        log::debug!("Display {}", if disabled { "disabled" } else { "enabled" });
    }

    /// GP1(0x05): Start of Display Area
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-9: X coordinate, Bits 10-18: Y coordinate
    pub(in crate::core::gpu) fn gp1_display_area_start(&mut self, value: u32) {
        self.display_area.x = bits(value, 0, 10) as u16;
        self.display_area.y = bits(value, 10, 9) as u16;

        log::debug!(
            "Display area start: ({}, {})",
            self.display_area.x,
            self.display_area.y
        );
    }

    /// GP1(0x06): Horizontal Display Range
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-11: X1 start, Bits 12-23: X2 end
    pub(in crate::core::gpu) fn gp1_horizontal_display_range(&mut self, value: u32) {
        self.display_area.x1 = bits(value, 0, 12) as u16;
        self.display_area.x2 = bits(value, 12, 12) as u16;

        log::debug!(
            "Horizontal display range: {} to {}",
            self.display_area.x1,
            self.display_area.x2
        );
    }

    /// GP1(0x07): Vertical Display Range
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-9: Y1 start, Bits 10-19: Y2 end
    pub(in crate::core::gpu) fn gp1_vertical_display_range(&mut self, value: u32) {
        self.display_area.y1 = bits(value, 0, 10) as u16;
        self.display_area.y2 = bits(value, 10, 10) as u16;

        log::debug!(
            "Vertical display range: {} to {}",
            self.display_area.y1,
            self.display_area.y2
        );
    }

    /// GP1(0x08): Display Mode
    ///
    /// ```text
    ///   Bit 0-1: Horizontal resolution 1 -> GPUSTAT 17-18
    ///   Bit 2:   Vertical resolution     -> GPUSTAT 19
    ///   Bit 3:   Video mode              -> GPUSTAT 20
    ///   Bit 4:   Color depth             -> GPUSTAT 21
    ///   Bit 5:   Vertical interlace      -> GPUSTAT 22
    ///   Bit 6:   Horizontal resolution 2 -> GPUSTAT 16
    ///   Bit 7:   Reverse flag            -> GPUSTAT 14
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use psxcore::core::GPU;
    /// # use psxcore::core::gpu::{HorizontalRes, VideoMode};
    /// let mut gpu = GPU::new();
    /// gpu.write_gp1(0x0800_0009); // 320 wide, PAL
    ///
    /// let mode = gpu.display_mode();
    /// assert_eq!(mode.horizontal_res, HorizontalRes::R320);
    /// assert_eq!(mode.video_mode, VideoMode::PAL);
    /// ```
    pub(in crate::core::gpu) fn gp1_display_mode(&mut self, value: u32) {
        self.stat.set_field(GpuStat::HRES_1, bits(value, 0, 2));
        self.stat.set_flag(GpuStat::VRES, bits(value, 2, 1) != 0);
        self.stat.set_flag(GpuStat::VIDEO_MODE, bits(value, 3, 1) != 0);
        self.stat
            .set_flag(GpuStat::COLOR_DEPTH_24, bits(value, 4, 1) != 0);
        self.stat.set_flag(GpuStat::INTERLACE, bits(value, 5, 1) != 0);
        self.stat.set_flag(GpuStat::HRES_2, bits(value, 6, 1) != 0);
        self.stat.set_flag(GpuStat::REVERSE, bits(value, 7, 1) != 0);

        log::debug!("Display mode: {:?}", self.display_mode());
    }
}
